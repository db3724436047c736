//! Skills index loading.
//!
//! The index is a JSON array; only its length matters here. Element
//! shape is not inspected.

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SyncError};

/// Read the index file at `path` and return its element count.
pub fn load_skill_count(path: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(path).map_err(|e| SyncError::from_read(path, e))?;
    count_entries(&content, path)
}

/// Count the elements of a JSON array held in `content`.
///
/// `path` is only used for error messages.
pub fn count_entries(content: &str, path: &Path) -> Result<usize> {
    let value: Value = serde_json::from_str(content).map_err(|source| SyncError::MalformedIndex {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(entries) => {
            debug!("{} entries in {}", entries.len(), path.display());
            Ok(entries.len())
        }
        other => Err(SyncError::NotASequence {
            path: path.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
