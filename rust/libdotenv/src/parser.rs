//! Statement loop driving the scanner and the value extractor.

use crate::error::{ParseContext, Result};
use crate::extract::extract_value;
use crate::scanner::{locate_key, statement_start};
use crate::value::Document;
use tracing::{debug, trace};

/// Parse a whole document.
///
/// `source` must already have `\r\n` normalized to `\n`. Comments are only
/// collected when `capture_comments` is set.
pub fn parse_document(
    source: &str,
    ctx: &ParseContext,
    capture_comments: bool,
) -> Result<Document> {
    let mut doc = Document::default();
    let mut cursor = source;

    while let Some(statement) = statement_start(cursor) {
        let (key, rest) = locate_key(statement, ctx)?;
        if key.is_empty() {
            trace!("statement without key, stopping");
            break;
        }

        let extracted = extract_value(rest, &doc.env, ctx)?;
        trace!(key, value_len = extracted.value.len(), "parsed variable");

        doc.env.insert(key.to_string(), extracted.value);
        if capture_comments && !extracted.comment.is_empty() {
            doc.comments.insert(key.to_string(), extracted.comment);
        }
        cursor = extracted.rest;
    }

    debug!(
        variables = doc.env.len(),
        comments = doc.comments.len(),
        "parsed dotenv document"
    );
    Ok(doc)
}
