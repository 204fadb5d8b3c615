//! Error types for dotenv parsing and encoding.

use thiserror::Error;

/// Result type for dotenv parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying the source and filename for error reporting.
#[derive(Clone, Debug)]
pub struct ParseContext<'a> {
    pub filename: Option<String>,
    source: &'a str,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context over a normalized source buffer.
    pub fn new(source: &'a str, filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
            source,
        }
    }

    /// Zero-based line and column of a cursor that is a suffix of the source.
    pub fn position_of(&self, cursor: &str) -> (usize, usize) {
        let offset = self.source.len().saturating_sub(cursor.len());
        let before = &self.source[..offset];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let col = before[line_start..].chars().count();
        (line, col)
    }

    /// Format a location suffix for error messages.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
            None => String::new(),
        }
    }
}

/// Error type for dotenv parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character outside `[A-Za-z0-9_.]` appeared before the key delimiter.
    #[error("unexpected character \"{ch}\" in variable name near {fragment:?}{location}")]
    InvalidKeySyntax {
        ch: char,
        fragment: String,
        location: String,
    },

    /// A quoted value was opened but never closed.
    #[error("unterminated quoted value {fragment}{location}")]
    UnterminatedQuote { fragment: String, location: String },
}

impl ParseError {
    pub(crate) fn invalid_key(ch: char, fragment: &str) -> Self {
        ParseError::InvalidKeySyntax {
            ch,
            fragment: fragment.to_string(),
            location: String::new(),
        }
    }

    pub(crate) fn unterminated_quote(fragment: &str) -> Self {
        ParseError::UnterminatedQuote {
            fragment: fragment.to_string(),
            location: String::new(),
        }
    }

    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext, line: usize, col: usize) -> Self {
        let location = ctx.loc_suffix(line, col);
        match self {
            ParseError::InvalidKeySyntax { ch, fragment, .. } => ParseError::InvalidKeySyntax {
                ch,
                fragment,
                location,
            },
            ParseError::UnterminatedQuote { fragment, .. } => {
                ParseError::UnterminatedQuote { fragment, location }
            }
        }
    }
}

/// Error type for writing a mapping back out as dotenv text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The key would not survive a re-parse.
    #[error("invalid variable name {0:?}")]
    InvalidKey(String),

    /// No quoting style can reproduce the value exactly.
    #[error("value of {0} cannot be represented in dotenv syntax")]
    Unrepresentable(String),
}
