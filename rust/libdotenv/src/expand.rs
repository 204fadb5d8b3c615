//! Escape decoding and `$VAR` substitution.
//!
//! Both run as regex replacements over an already-extracted value. The
//! patterns are compiled once per process and shared read-only.

use crate::value::Env;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\.").expect("valid regex"));
static UNESCAPE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([^$])").expect("valid regex"));
static EXPAND_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\\)?(\$)(\()?\{?([A-Z0-9_]+)?\}?").expect("valid regex")
});

/// Decode backslash escapes in a double-quoted value.
///
/// `\n` and `\r` become control characters; every other `\X` except `\$`
/// becomes `X`. The `\$` form is left for [`expand_variables`].
pub fn expand_escapes(value: &str) -> String {
    let out = ESCAPE_RE.replace_all(value, |caps: &Captures| match &caps[0] {
        r"\n" => "\n".to_string(),
        r"\r" => "\r".to_string(),
        other => other.to_string(),
    });
    UNESCAPE_CHARS_RE.replace_all(&out, "${1}").into_owned()
}

/// Substitute `$NAME` and `${NAME}` with values defined so far.
///
/// Only `[A-Z0-9_]+` names are recognized. Unknown names resolve to the
/// empty string. `\$` yields a literal dollar and `$(` passes through.
pub fn expand_variables(value: &str, vars: &Env) -> String {
    EXPAND_VAR_RE
        .replace_all(value, |caps: &Captures| {
            let whole = &caps[0];
            if caps.get(1).is_some() {
                whole[1..].to_string()
            } else if caps.get(3).is_some() {
                whole.to_string()
            } else if let Some(name) = caps.get(4) {
                vars.get(name.as_str()).cloned().unwrap_or_default()
            } else {
                whole.to_string()
            }
        })
        .into_owned()
}
