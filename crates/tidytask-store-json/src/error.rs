//! Error types for the JSON state store.

use thiserror::Error;

/// Errors that can occur while loading or saving the state file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The state file is not valid JSON or does not match the schema.
    #[error("failed to parse state file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The state file was written by a newer release.
    #[error("state file version {found} is newer than supported version {supported}")]
    VersionTooNew {
        /// Version recorded in the file.
        found: u64,
        /// Latest version this build understands.
        supported: u64,
    },
}
