//! Phase 2: Value Extractor
//!
//! Given the remainder after `KEY=`, the extractor:
//! - Chooses the quoted or unquoted path from the first character
//! - Separates a trailing inline comment (`#` preceded by whitespace)
//! - Decodes escapes (double quotes only) and substitutes variables
//! - Returns the unconsumed rest of the buffer

use crate::error::{ParseContext, ParseError, Result};
use crate::expand::{expand_escapes, expand_variables};
use crate::scanner::{find_end_of_line, first_line, is_inline_space, COMMENT_CHAR};
use crate::value::Env;

const SINGLE_QUOTE: char = '\'';
const DOUBLE_QUOTE: char = '"';

/// A value pulled off the front of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub value: String,
    /// Trimmed inline comment without the `#`; empty when absent.
    pub comment: String,
    pub rest: &'a str,
}

/// Extract the value at the front of `src`, resolving against `vars`.
pub fn extract_value<'a>(src: &'a str, vars: &Env, ctx: &ParseContext) -> Result<Extracted<'a>> {
    match src.chars().next() {
        Some(quote @ (SINGLE_QUOTE | DOUBLE_QUOTE)) => extract_quoted(src, vars, quote, ctx),
        _ => Ok(extract_unquoted(src, vars)),
    }
}

fn extract_unquoted<'a>(src: &'a str, vars: &Env) -> Extracted<'a> {
    let end_of_line = find_end_of_line(src);
    let line = &src[..end_of_line];
    let end_of_var = find_comment_start(line);

    let (raw, comment) = if end_of_var == line.len() && line.starts_with(COMMENT_CHAR) {
        // Nothing but a comment after the delimiter
        ("", line[1..].trim())
    } else {
        let raw = line[..end_of_var].trim_matches(is_inline_space);
        (raw, comment_after(line, end_of_var))
    };

    Extracted {
        value: expand_variables(raw, vars),
        comment: comment.to_string(),
        rest: &src[end_of_line..],
    }
}

fn extract_quoted<'a>(
    src: &'a str,
    vars: &Env,
    quote: char,
    ctx: &ParseContext,
) -> Result<Extracted<'a>> {
    let bytes = src.as_bytes();
    let quote_byte = quote as u8;

    for i in 1..bytes.len() {
        if bytes[i] != quote_byte || bytes[i - 1] == b'\\' {
            continue;
        }

        let literal = src[..i].trim_matches(quote);
        let rest = &src[i + 1..];
        let tail = first_line(rest);
        let comment = comment_after(tail, find_comment_start(tail));

        let value = if quote == DOUBLE_QUOTE {
            expand_variables(&expand_escapes(literal), vars)
        } else {
            literal.to_string()
        };

        return Ok(Extracted {
            value,
            comment: comment.to_string(),
            rest,
        });
    }

    let (line, col) = ctx.position_of(src);
    Err(ParseError::unterminated_quote(first_line(src)).with_location(ctx, line, col))
}

/// Byte index of the inline comment marker, or the line length if none.
///
/// The marker is the last `#` that directly follows inline whitespace, so a
/// `#` glued to a token (such as a URL fragment) stays part of the value.
fn find_comment_start(line: &str) -> usize {
    line.char_indices()
        .rev()
        .find(|&(i, c)| {
            c == COMMENT_CHAR
                && line[..i]
                    .chars()
                    .next_back()
                    .is_some_and(is_inline_space)
        })
        .map_or(line.len(), |(i, _)| i)
}

fn comment_after(line: &str, end_of_var: usize) -> &str {
    if end_of_var + 1 < line.len() {
        line[end_of_var + 1..].trim()
    } else {
        ""
    }
}
