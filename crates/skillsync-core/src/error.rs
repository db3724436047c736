//! Error types for synchronization runs.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a synchronization run.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Index or document does not exist
    #[error("File not found: {}", path.display())]
    InputMissing { path: PathBuf },

    /// Index or document exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Index content is not valid JSON
    #[error("Invalid JSON in {}: {source}", path.display())]
    MalformedIndex {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Index is valid JSON but its top-level value is not an array
    #[error("Expected a JSON array in {}, found {found}", path.display())]
    NotASequence { path: PathBuf, found: &'static str },

    /// Document could not be written back
    #[error("Failed to write {}: {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Strict mode: one or more envelopes are absent from the document
    #[error("Missing count envelopes in {}: {}", path.display(), rules.join(", "))]
    MissingEnvelopes { path: PathBuf, rules: Vec<String> },

    /// No rule registered under the requested id
    #[error("Unknown rule '{id}'. Available rules: {available}")]
    UnknownRule { id: String, available: String },
}

/// Result alias for synchronization operations
pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    /// Classify a read failure, separating "not there" from other I/O errors.
    pub(crate) fn from_read(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            SyncError::InputMissing {
                path: path.to_path_buf(),
            }
        } else {
            SyncError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
