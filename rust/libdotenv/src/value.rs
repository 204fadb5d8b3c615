//! Parsed dotenv document representation.

use crate::spec::{build_specs, Specs};
use indexmap::IndexMap;

/// Mapping from variable name to resolved value, in first-definition order.
pub type Env = IndexMap<String, String>;

/// Mapping from variable name to its trailing inline comment.
pub type Comments = IndexMap<String, String>;

/// A parsed dotenv document: resolved values plus captured comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Resolved variable values. A redefined key keeps its first position.
    pub env: Env,
    /// Inline comments, present only for keys with a non-empty comment.
    pub comments: Comments,
}

impl Document {
    /// Returns the value of a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Returns the inline comment attached to a variable.
    pub fn comment(&self, key: &str) -> Option<&str> {
        self.comments.get(key).map(String::as_str)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.env.len()
    }

    /// Returns `true` if no variables were defined.
    pub fn is_empty(&self) -> bool {
        self.env.is_empty()
    }

    /// Iterate `(key, value)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Interpret the captured comments as annotations.
    pub fn specs(&self) -> Specs {
        build_specs(&self.env, &self.comments)
    }
}

impl From<Document> for Env {
    fn from(doc: Document) -> Self {
        doc.env
    }
}

impl From<Env> for Document {
    fn from(env: Env) -> Self {
        Document {
            env,
            comments: Comments::new(),
        }
    }
}
