//! Text renderings of front-end results and their file persistence.
use declex::{SymbolTable, Token, TokenKind};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Default file written by the token listing.
pub const DEFAULT_TOKEN_FILE: &str = "tokens.txt";

const GROUPS: [(TokenKind, &str); 5] = [
    (TokenKind::Keyword, "Keywords"),
    (TokenKind::Identifier, "Identifiers"),
    (TokenKind::Literal, "Literals"),
    (TokenKind::Operator, "Operators"),
    (TokenKind::Delimiter, "Delimiters"),
];

/// Lists token texts grouped by category, one category per line.
///
/// ```text
/// Keywords:    int
/// Identifiers: a
/// Literals:    5
/// Operators:
/// Delimiters:  = ;
/// ```
pub fn render_grouped(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (kind, label) in GROUPS {
        let texts: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.text.as_str())
            .collect();
        let line = format!("{:<13}{}", format!("{label}:"), texts.join(" "));
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// One line per token: `Token: <text> Type: <kind>`.
pub fn write_tokens<W: Write>(out: &mut W, tokens: &[Token]) -> io::Result<()> {
    for tok in tokens {
        writeln!(out, "Token: {} Type: {}", tok.text, tok.kind)?;
    }
    Ok(())
}

/// Writes the token listing to `path`, replacing its contents.
pub fn write_token_file(path: impl AsRef<Path>, tokens: &[Token]) -> io::Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_tokens(&mut out, tokens)?;
    out.flush()?;
    log::info!("wrote {} tokens to {}", tokens.len(), path.display());
    Ok(())
}

/// Writes the symbol table columns to `path`, replacing its contents.
pub fn write_symbol_file(path: impl AsRef<Path>, table: &SymbolTable) -> io::Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "{table}")?;
    out.flush()?;
    log::info!("wrote {} symbols to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use declex::{build, scan};

    #[test]
    fn grouped_listing() {
        let toks = scan("int a = 5 ; float b = a * 2 ;").unwrap();
        assert_eq!(
            render_grouped(&toks),
            "Keywords:    int float\n\
             Identifiers: a b a\n\
             Literals:    5 2\n\
             Operators:   *\n\
             Delimiters:  = ; = ;\n"
        );
    }

    #[test]
    fn grouped_listing_of_nothing() {
        assert_eq!(
            render_grouped(&[]),
            "Keywords:\nIdentifiers:\nLiterals:\nOperators:\nDelimiters:\n"
        );
    }

    #[test]
    fn token_lines() {
        let toks = scan("x + 1").unwrap();
        let mut out = Vec::new();
        write_tokens(&mut out, &toks).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Token: x Type: Identifier\nToken: + Type: Operator\nToken: 1 Type: Literal\n"
        );
    }

    #[test]
    fn token_file_round_trip_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_TOKEN_FILE);
        write_token_file(&path, &scan("char c ;").unwrap()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Token: char Type: Keyword\nToken: c Type: Identifier\nToken: ; Type: Delimiter\n"
        );
    }

    #[test]
    fn symbol_file_matches_display() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symbols.txt");
        let table = build(&scan("int a ; double d").unwrap());
        write_symbol_file(&path, &table).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), table.to_string());
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tokens.txt");
        assert!(write_token_file(&path, &[]).is_err());
    }
}
