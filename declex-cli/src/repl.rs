//! Line-oriented interactive session.
//!
//! A [`Session`] owns the token buffer accumulated across input lines and
//! dispatches commands to the core stages. Errors from a command are reported
//! and the session keeps going; only `:quit` (or end of input) ends it.
use crate::buffer::{DedupPolicy, TokenBuffer};
use crate::render;
use anyhow::{Context, Result};
use declex::{LexerOptions, build, parse, scan_with};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
commands:
  <source>        scan and append to the token buffer (same as :expr)
  :expr <source>  scan and append to the token buffer
  :new <source>   clear the buffer, then scan and append
  :tokens         list buffered tokens by category
  :parse          parse the buffered tokens as one expression
  :symbols        build the symbol table from the buffered tokens
  :clear          empty the token buffer
  :help           show this text
  :quit           leave the session
";

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to show the user (may be empty).
    Output(String),
    /// End the session.
    Quit,
}

/// Session settings.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub lexer: LexerOptions,
    pub dedup: DedupPolicy,
    /// Rewritten after every successful scan when set.
    pub token_file: Option<PathBuf>,
    /// Rewritten after every `:symbols` when set.
    pub symbol_file: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    buffer: TokenBuffer,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let buffer = TokenBuffer::new(config.dedup);
        Self { config, buffer }
    }

    pub fn buffer(&self) -> &TokenBuffer {
        &self.buffer
    }

    /// Executes one input line.
    pub fn execute(&mut self, line: &str) -> Result<Reply> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Reply::Output(String::new()));
        }
        let (cmd, arg) = match line.strip_prefix(':') {
            Some(rest) => match rest.split_once(char::is_whitespace) {
                Some((cmd, arg)) => (cmd, arg.trim()),
                None => (rest, ""),
            },
            None => ("expr", line),
        };
        log::debug!("command {cmd:?} {arg:?}");

        match cmd {
            "expr" | "e" => self.add_source(arg),
            "new" | "n" => {
                self.buffer.clear();
                self.add_source(arg)
            }
            "tokens" | "t" => {
                if self.buffer.is_empty() {
                    return Ok(Reply::Output(
                        "no tokens scanned yet; enter an expression first\n".into(),
                    ));
                }
                Ok(Reply::Output(render::render_grouped(self.buffer.tokens())))
            }
            "parse" | "p" => {
                let tree = parse(self.buffer.tokens())?;
                Ok(Reply::Output(tree.display_tree()))
            }
            "symbols" | "s" => {
                let table = build(self.buffer.tokens());
                if let Some(path) = &self.config.symbol_file {
                    render::write_symbol_file(path, &table)
                        .with_context(|| format!("can't write {}", path.display()))?;
                }
                Ok(Reply::Output(table.to_string()))
            }
            "clear" | "c" => {
                self.buffer.clear();
                Ok(Reply::Output("token buffer cleared\n".into()))
            }
            "help" | "h" | "?" => Ok(Reply::Output(HELP.into())),
            "quit" | "q" | "exit" => Ok(Reply::Quit),
            other => anyhow::bail!("unknown command :{other} (try :help)"),
        }
    }

    fn add_source(&mut self, source: &str) -> Result<Reply> {
        let tokens = scan_with(source, self.config.lexer)?;
        let scanned = tokens.len();
        // The buffer only takes the new tokens once the token file has them.
        let mut next = self.buffer.clone();
        let added = next.extend(tokens);
        if let Some(path) = &self.config.token_file {
            render::write_token_file(path, next.tokens())
                .with_context(|| format!("can't write {}", path.display()))?;
        }
        self.buffer = next;
        Ok(Reply::Output(format!(
            "scanned {scanned} tokens, kept {added} ({} buffered)\n",
            self.buffer.len()
        )))
    }

    /// Reads commands from `input` until `:quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        write!(output, "> ")?;
        output.flush()?;
        for line in input.lines() {
            match self.execute(&line?) {
                Ok(Reply::Quit) => return Ok(()),
                Ok(Reply::Output(text)) => write!(output, "{text}")?,
                Err(err) => writeln!(output, "error: {err:#}")?,
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declex::KeywordTextPolicy;

    fn output(reply: Reply) -> String {
        match reply {
            Reply::Output(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn bare_line_is_scanned_into_buffer() {
        let mut s = Session::new(SessionConfig::default());
        let out = output(s.execute("int a = 5 ;").unwrap());
        assert_eq!(out, "scanned 5 tokens, kept 5 (5 buffered)\n");
        assert_eq!(s.buffer().len(), 5);
    }

    #[test]
    fn fragments_accumulate_and_new_replaces() {
        let mut s = Session::new(SessionConfig::default());
        s.execute(":expr a +").unwrap();
        s.execute(":expr b").unwrap();
        assert_eq!(output(s.execute(":parse").unwrap()), "+\n  a\n  b\n");

        s.execute(":new x * y").unwrap();
        assert_eq!(s.buffer().len(), 3);
        assert_eq!(output(s.execute(":p").unwrap()), "*\n  x\n  y\n");
    }

    #[test]
    fn lexical_error_leaves_buffer_untouched() {
        let mut s = Session::new(SessionConfig::default());
        s.execute("a").unwrap();
        let err = s.execute("b # c").unwrap_err();
        assert!(err.to_string().contains('#'));
        assert_eq!(s.buffer().len(), 1);
    }

    #[test]
    fn parse_error_is_reported() {
        let mut s = Session::new(SessionConfig::default());
        s.execute("(a + b").unwrap();
        let err = s.execute(":parse").unwrap_err();
        assert!(err.to_string().contains("missing closing parenthesis"));
    }

    #[test]
    fn tokens_before_input() {
        let mut s = Session::new(SessionConfig::default());
        assert!(output(s.execute(":tokens").unwrap()).starts_with("no tokens"));
    }

    #[test]
    fn symbols_use_buffer() {
        let mut s = Session::new(SessionConfig::default());
        s.execute("int a ;").unwrap();
        s.execute("float b ;").unwrap();
        let out = output(s.execute(":symbols").unwrap());
        assert_eq!(out, "ID   Name Type\n1    a    int\n2    b    float\n");
    }

    #[test]
    fn dedup_policy_applies_to_session() {
        let mut s = Session::new(SessionConfig {
            dedup: DedupPolicy::SkipRepeatedText,
            ..Default::default()
        });
        s.execute("a + b").unwrap();
        let out = output(s.execute("a + c").unwrap());
        assert_eq!(out, "scanned 3 tokens, kept 1 (4 buffered)\n");
    }

    #[test]
    fn keyword_policy_applies_to_session() {
        let mut s = Session::new(SessionConfig {
            lexer: LexerOptions::default().with_keyword_text(KeywordTextPolicy::PreserveOriginal),
            ..Default::default()
        });
        s.execute("INT n").unwrap();
        assert_eq!(s.buffer().tokens()[0].text.as_str(), "INT");
    }

    #[test]
    fn files_are_written_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let token_file = dir.path().join("tokens.txt");
        let symbol_file = dir.path().join("symbols.txt");
        let mut s = Session::new(SessionConfig {
            token_file: Some(token_file.clone()),
            symbol_file: Some(symbol_file.clone()),
            ..Default::default()
        });
        s.execute("char c").unwrap();
        s.execute(":symbols").unwrap();
        assert_eq!(
            std::fs::read_to_string(&token_file).unwrap(),
            "Token: char Type: Keyword\nToken: c Type: Identifier\n"
        );
        assert!(std::fs::read_to_string(&symbol_file).unwrap().contains("char"));
    }

    #[test]
    fn failed_token_file_write_keeps_buffer_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = Session::new(SessionConfig {
            token_file: Some(dir.path().join("missing").join("tokens.txt")),
            ..Default::default()
        });
        let err = s.execute("a + b").unwrap_err();
        assert!(format!("{err:#}").starts_with("can't write"));
        assert!(s.buffer().is_empty());

        let mut s = Session::new(SessionConfig {
            token_file: Some(dir.path().join("tokens.txt")),
            ..Default::default()
        });
        s.execute("a").unwrap();
        s.config.token_file = Some(dir.path().join("missing").join("tokens.txt"));
        assert!(s.execute(":expr + b").is_err());
        assert_eq!(s.buffer().len(), 1);
    }

    #[test]
    fn deep_input_is_an_error_not_a_crash() {
        let mut s = Session::new(SessionConfig::default());
        let deep = format!("{}a{}", "(".repeat(5_000), ")".repeat(5_000));
        s.execute(&deep).unwrap();
        let err = s.execute(":parse").unwrap_err();
        assert!(err.to_string().contains("nested deeper than"));

        s.execute(&format!(":new a{}", " + a".repeat(100_000))).unwrap();
        let out = output(s.execute(":parse").unwrap());
        assert_eq!(out.lines().count(), 200_001);
        assert_eq!(output(s.execute(":clear").unwrap()), "token buffer cleared\n");
    }

    #[test]
    fn unknown_command() {
        let mut s = Session::new(SessionConfig::default());
        assert!(s.execute(":frobnicate").is_err());
    }

    #[test]
    fn run_loop_reports_errors_and_quits() {
        let mut s = Session::new(SessionConfig::default());
        let input = b"a $\nx - y\n:parse\n:quit\n:tokens\n";
        let mut out = Vec::new();
        s.run(&input[..], &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("error: unrecognized character '$' at 1:3"));
        assert!(out.contains("-\n  x\n  y\n"));
        assert!(!out.contains("Keywords"));
    }

    #[test]
    fn run_loop_ends_at_eof() {
        let mut s = Session::new(SessionConfig::default());
        let mut out = Vec::new();
        s.run(&b":clear\n"[..], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "> token buffer cleared\n> \n"
        );
    }
}
