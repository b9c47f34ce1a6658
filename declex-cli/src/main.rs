//! Command-line interface (CLI) for declex.
//!
//! Scans, parses or builds the symbol table for source given on the command
//! line, in a file, or on standard input; or runs an interactive session.
//! Set `RUST_LOG=trace` to watch the individual stages.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser as ClapParser, Subcommand, ValueEnum};
use declex::{KeywordTextPolicy, LexerOptions, build, parse, scan_with};
use declex_cli::render;
use declex_cli::{DedupPolicy, Session, SessionConfig};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// How keyword text is stored in tokens
    #[arg(short, long, value_enum, default_value_t = KeywordText::Lowercase, global = true)]
    keyword_text: KeywordText,

    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KeywordText {
    /// Store keywords as written
    Preserve,
    /// Store keywords in lowercase
    Lowercase,
}

impl From<KeywordText> for KeywordTextPolicy {
    fn from(k: KeywordText) -> Self {
        match k {
            KeywordText::Preserve => KeywordTextPolicy::PreserveOriginal,
            KeywordText::Lowercase => KeywordTextPolicy::NormalizeLowercase,
        }
    }
}

#[derive(ClapArgs, Debug)]
struct Source {
    /// Source text; read from --input or standard input when omitted
    source: Option<String>,

    /// Input file with source text
    #[arg(short, long, conflicts_with = "source")]
    input: Option<PathBuf>,
}

impl Source {
    fn read(&self) -> Result<String> {
        if let Some(text) = &self.source {
            return Ok(text.clone());
        }
        if let Some(path) = &self.input {
            return std::fs::read_to_string(path)
                .with_context(|| format!("can't open {:?}", path));
        }
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("can't read standard input")?;
        Ok(text)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lists tokens grouped by category
    Tokens {
        #[command(flatten)]
        source: Source,
        /// Also write one `Token: .. Type: ..` line per token to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parses one expression and prints its tree
    Parse {
        #[command(flatten)]
        source: Source,
        /// Print the tree as an s-expression
        #[arg(long)]
        sexpr: bool,
    },
    /// Builds and prints the symbol table
    Symbols {
        #[command(flatten)]
        source: Source,
        /// Also write the table to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Runs an interactive session
    Repl {
        /// Token de-duplication across input lines
        #[arg(short, long, value_enum, default_value_t = DedupPolicy::KeepAll)]
        dedup: DedupPolicy,
        /// File rewritten with the buffered tokens after every input line
        #[arg(short, long, default_value = render::DEFAULT_TOKEN_FILE)]
        token_file: PathBuf,
        /// Don't write the token file
        #[arg(long)]
        no_token_file: bool,
        /// File rewritten with the symbol table on every `:symbols`
        #[arg(short, long)]
        symbol_file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = LexerOptions::default().with_keyword_text(args.keyword_text.into());

    match args.command {
        Commands::Tokens { source, output } => {
            let tokens = scan_with(&source.read()?, options)?;
            print!("{}", render::render_grouped(&tokens));
            if let Some(path) = output {
                render::write_token_file(&path, &tokens)
                    .with_context(|| format!("can't write {:?}", path))?;
            }
        }
        Commands::Parse { source, sexpr } => {
            let tokens = scan_with(&source.read()?, options)?;
            let tree = parse(&tokens)?;
            if let Some(span) = tree.span {
                log::debug!("expression covers {span}");
            }
            if sexpr {
                println!("{tree}");
            } else {
                print!("{}", tree.display_tree());
            }
        }
        Commands::Symbols { source, output } => {
            let tokens = scan_with(&source.read()?, options)?;
            let table = build(&tokens);
            print!("{table}");
            if let Some(path) = output {
                render::write_symbol_file(&path, &table)
                    .with_context(|| format!("can't write {:?}", path))?;
            }
        }
        Commands::Repl {
            dedup,
            token_file,
            no_token_file,
            symbol_file,
        } => {
            let config = SessionConfig {
                lexer: options,
                dedup,
                token_file: (!no_token_file).then_some(token_file),
                symbol_file,
            };
            log::info!("starting session with {:?}", config);
            let mut session = Session::new(config);
            let stdin = io::stdin();
            session.run(stdin.lock(), io::stdout())?;
        }
    }

    Ok(())
}
