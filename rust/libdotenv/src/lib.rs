//! Parser for `.env` files.
//!
//! A dotenv document is a sequence of `KEY=VALUE` statements with shell-like
//! conventions: optional `export` prefixes, single- and double-quoted values,
//! backslash escapes inside double quotes, inline `#` comments, and
//! `$VAR`/`${VAR}` substitution against variables defined earlier.
//!
//! # Parsing Pipeline
//!
//! 1. **Scanner**: Skips blank and comment lines, locates the next statement,
//!    and splits off a validated key.
//!
//! 2. **Value Extractor**: Reads a quoted or unquoted value, separates its
//!    inline comment, and resolves escapes and substitutions.
//!
//! Captured comments can then be read as annotations with [`build_specs`].

mod encode;
mod error;
mod expand;
mod extract;
mod parser;
mod scanner;
mod spec;
mod value;

pub use encode::encode;
pub use error::{EncodeError, ParseError, Result};
pub use spec::{build_specs, Spec, SpecName, Specs};
pub use value::{Comments, Document, Env};

/// Options controlling a parse.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Name reported in error locations.
    pub filename: Option<String>,
    /// Collect inline comments into [`Document::comments`].
    pub capture_comments: bool,
}

impl ParseOptions {
    /// Options with comment capture enabled.
    pub fn with_comments() -> Self {
        Self {
            capture_comments: true,
            ..Self::default()
        }
    }

    /// Set the filename reported in error locations.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Parse a dotenv document from a string.
///
/// # Example
///
/// ```
/// use libdotenv::parse;
///
/// let env = parse("HOST=localhost\nURL=\"http://${HOST}\"").unwrap();
/// assert_eq!(env["URL"], "http://localhost");
/// ```
pub fn parse(input: &str) -> Result<Env> {
    parse_with_options(input, &ParseOptions::default()).map(Env::from)
}

/// Parse a dotenv document from raw bytes. Invalid UTF-8 is replaced.
pub fn parse_bytes(input: &[u8]) -> Result<Env> {
    parse(&String::from_utf8_lossy(input))
}

/// Parse a dotenv document, keeping inline comments.
///
/// ```
/// use libdotenv::parse_with_comments;
///
/// let doc = parse_with_comments("TOKEN=abc # Secret!").unwrap();
/// assert_eq!(doc.comment("TOKEN"), Some("Secret!"));
/// ```
pub fn parse_with_comments(input: &str) -> Result<Document> {
    parse_with_options(input, &ParseOptions::with_comments())
}

/// Parse a dotenv document with explicit options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Document> {
    let source = input.replace("\r\n", "\n");
    let ctx = error::ParseContext::new(&source, options.filename.as_deref());
    parser::parse_document(&source, &ctx, options.capture_comments)
}
