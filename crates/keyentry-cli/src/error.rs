use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] keyentry_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    KeyRejected(String),
    #[error("Account name cannot be empty")]
    EmptyAccountName,
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Key entry ended before a key was saved")]
    Unfinished,
}
