//! Error types for keyentry-core

use thiserror::Error;

/// Result type alias using keyentry-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in keyentry-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Account or lookup target not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
