//! Error types for the outfit library

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fitcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by write-style operations.
///
/// Read-style operations (loading records, thumbnails, analysis) log their
/// failures and fall back to a default instead of returning one of these.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Key-value store error (wraps rusqlite::Error)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record collection could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An outfit with this id is already stored
    #[error("Outfit already exists: {0}")]
    DuplicateId(String),

    /// Destination file is already present
    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A blocking storage task panicked or was cancelled
    #[error("Task join error: {0}")]
    Task(#[from] tokio::task::JoinError),
}
