//! Comment annotations.
//!
//! An inline comment of the form `Name[!][:{json}]` annotates a variable
//! with a kind, an optional required flag, and parameters. For example
//! `PASSWORD=hunter22 # Password!:{"length":8}` declares a required password
//! of exactly eight bytes.

use crate::value::{Comments, Env};
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

const REQUIRED_MARKER: char = '!';
const PARAMS_SEPARATOR: char = ':';

/// Annotation kind named by a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SpecName {
    #[default]
    Opaque,
    Plain,
    Secret,
    Password,
    Number,
    /// A name outside the recognized set, kept verbatim after normalization.
    Unknown(String),
}

impl SpecName {
    /// The normalized name.
    pub fn as_str(&self) -> &str {
        match self {
            SpecName::Opaque => "Opaque",
            SpecName::Plain => "Plain",
            SpecName::Secret => "Secret",
            SpecName::Password => "Password",
            SpecName::Number => "Number",
            SpecName::Unknown(name) => name,
        }
    }

    /// Returns `true` for the five built-in kinds.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, SpecName::Unknown(_))
    }
}

impl FromStr for SpecName {
    type Err = Infallible;

    /// Normalizes case (`pASSword` -> `Password`) before matching.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = capitalize(s);
        Ok(match name.as_str() {
            "Opaque" => SpecName::Opaque,
            "Plain" => SpecName::Plain,
            "Secret" => SpecName::Secret,
            "Password" => SpecName::Password,
            "Number" => SpecName::Number,
            _ => SpecName::Unknown(name),
        })
    }
}

impl fmt::Display for SpecName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annotation attached to a single variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Spec {
    pub name: SpecName,
    pub required: bool,
    pub valid: bool,
}

/// Annotations keyed by variable name.
pub type Specs = IndexMap<String, Spec>;

/// Build an annotation record for every variable in `values`.
///
/// Never fails: a malformed parameter block is reported with a warning and
/// treated as having no parameters.
pub fn build_specs(values: &Env, comments: &Comments) -> Specs {
    values
        .iter()
        .map(|(key, value)| {
            let spec = match comments.get(key).filter(|c| !c.is_empty()) {
                Some(comment) => spec_from_comment(key, value, comment),
                None => Spec::default(),
            };
            (key.clone(), spec)
        })
        .collect()
}

fn spec_from_comment(key: &str, value: &str, comment: &str) -> Spec {
    let (name, params) = match comment.split_once(PARAMS_SEPARATOR) {
        Some((name, params)) => (name, Some(parse_params(key, params))),
        None => (comment, None),
    };

    let mut spec = Spec::default();
    let name = name.trim();
    let name = match name.strip_suffix(REQUIRED_MARKER) {
        Some(stripped) => {
            spec.required = true;
            stripped.trim_end()
        }
        None => name,
    };
    if !name.is_empty() {
        spec.name = name.parse().unwrap_or_default();
    }

    validate(&mut spec, value, params.as_ref());
    spec
}

fn parse_params(key: &str, raw: &str) -> Map<String, JsonValue> {
    match serde_json::from_str(raw) {
        Ok(params) => params,
        Err(e) => {
            warn!(key, error = %e, "wrong params format in annotation");
            Map::new()
        }
    }
}

fn validate(spec: &mut Spec, value: &str, params: Option<&Map<String, JsonValue>>) {
    match spec.name {
        // All kinds share one rule for now; split arms when a kind needs its own.
        SpecName::Opaque
        | SpecName::Plain
        | SpecName::Secret
        | SpecName::Password
        | SpecName::Number => {
            if value.trim().is_empty() {
                return;
            }
            spec.valid = true;
            if spec.required {
                let length = params
                    .and_then(|p| p.get("length"))
                    .and_then(JsonValue::as_f64);
                if let Some(length) = length {
                    spec.valid = value.len() as f64 == length.trunc();
                }
            }
        }
        SpecName::Unknown(_) => {}
    }
}

/// First character uppercase, the rest lowercase.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
