//! Phase 1: Scanner
//!
//! The scanner walks the source statement by statement. It:
//! - Skips blank lines and full-line `#` comments
//! - Strips an optional `export` prefix
//! - Validates the key name and splits it from the raw remainder

use crate::error::{ParseContext, ParseError, Result};

pub(crate) const COMMENT_CHAR: char = '#';
const EXPORT_PREFIX: &str = "export";

/// Whitespace that may appear inside a line. Unlike `char::is_whitespace`,
/// line feeds are excluded because they separate statements.
pub(crate) fn is_inline_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{0B}' | '\u{0C}' | '\r' | ' ' | '\u{85}' | '\u{A0}'
    )
}

/// Characters accepted in a variable name.
pub(crate) fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Advance to the start of the next statement, or `None` at end of input.
pub fn statement_start(mut src: &str) -> Option<&str> {
    loop {
        src = src.trim_start();
        if src.is_empty() {
            return None;
        }
        if !src.starts_with(COMMENT_CHAR) {
            return Some(src);
        }
        // Comment line: resume at its terminating newline
        let pos = src.find('\n')?;
        src = &src[pos..];
    }
}

/// Split a statement into its key and the remainder after the delimiter.
///
/// Returns an empty key when no `=` or `:` is found; the caller treats that
/// as the end of the document.
pub fn locate_key<'a>(src: &'a str, ctx: &ParseContext) -> Result<(&'a str, &'a str)> {
    let mut src = src.trim_start_matches(is_inline_space);
    if let Some(trimmed) = src.strip_prefix(EXPORT_PREFIX) {
        if trimmed.starts_with(is_inline_space) {
            src = trimmed.trim_start_matches(is_inline_space);
        }
    }

    for (i, ch) in src.char_indices() {
        if is_inline_space(ch) {
            continue;
        }
        match ch {
            // `:` allows yaml-style declarations
            '=' | ':' => {
                let key = src[..i].trim_end();
                let rest = src[i + 1..].trim_start_matches(is_inline_space);
                return Ok((key, rest));
            }
            c if is_key_char(c) => {}
            c => {
                let (line, col) = ctx.position_of(&src[i..]);
                return Err(
                    ParseError::invalid_key(c, first_line(src)).with_location(ctx, line, col)
                );
            }
        }
    }

    Ok(("", ""))
}

/// The text up to (not including) the first line terminator.
pub(crate) fn first_line(src: &str) -> &str {
    &src[..find_end_of_line(src)]
}

/// Index of the first `\n` or `\r`, or the length of the input.
pub(crate) fn find_end_of_line(src: &str) -> usize {
    src.find(&['\n', '\r'][..]).unwrap_or(src.len())
}
