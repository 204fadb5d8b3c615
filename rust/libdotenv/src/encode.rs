//! Encode a variable mapping back to dotenv text.
//!
//! Each variable becomes one `KEY=VALUE` line in mapping order. Values are
//! written in the plainest form that parses back to the same string:
//! - bare when every character is inert in an unquoted value
//! - single-quoted when the value is free of `'`, `\r`, and a trailing `\`
//! - double-quoted with escapes when neither of those fit
//! - unquoted as a last resort, when nothing in the value would be read as
//!   a quote, comment, line break, substitution, or trimmed space

use crate::error::EncodeError;
use crate::scanner::{is_inline_space, is_key_char};
use crate::value::Env;

/// Encode a mapping as dotenv text.
///
/// Fails if a key is not a valid variable name, or if a value cannot be
/// reproduced by any quoting style (the closing quote of a quoted value may
/// not follow a backslash, and surrounding quote characters are trimmed).
pub fn encode(env: &Env) -> Result<String, EncodeError> {
    let mut out = String::new();
    for (key, value) in env {
        if key.is_empty() || !key.chars().all(is_key_char) {
            return Err(EncodeError::InvalidKey(key.clone()));
        }
        out.push_str(key);
        out.push('=');
        out.push_str(&encode_value(key, value)?);
        out.push('\n');
    }
    Ok(out)
}

fn encode_value(key: &str, value: &str) -> Result<String, EncodeError> {
    if value.chars().all(is_bare_char) {
        return Ok(value.to_string());
    }
    if !value.contains(&['\'', '\r'][..]) && !value.ends_with('\\') {
        return Ok(format!("'{}'", value));
    }
    if !value.ends_with(&['"', '\\'][..]) {
        return Ok(format!("\"{}\"", escape_double_quoted(value)));
    }
    if survives_unquoted(value) {
        return Ok(value.to_string());
    }
    Err(EncodeError::Unrepresentable(key.to_string()))
}

/// Characters that survive an unquoted round trip untouched.
fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '_' | '-' | '.' | '/' | ':' | '?' | '@' | '%' | '+' | ',' | '=' | '~' | '\\'
        )
}

/// Whether an unquoted value reads back verbatim: no opening quote or `#`,
/// no trimmed edge space, no line break, no `$`, and no inline comment marker.
fn survives_unquoted(value: &str) -> bool {
    let mut prev: Option<char> = None;
    for c in value.chars() {
        if matches!(c, '\n' | '\r' | '$') {
            return false;
        }
        if c == '#' && prev.map_or(true, is_inline_space) {
            return false;
        }
        prev = Some(c);
    }
    !value.starts_with(&['\'', '"'][..])
        && !value.starts_with(is_inline_space)
        && !value.ends_with(is_inline_space)
}

fn escape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
