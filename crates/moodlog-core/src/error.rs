use thiserror::Error;

use crate::entry::Violation;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Too short: {0}")]
    TooShort(String),

    #[error("Unsupported question kind: {0}")]
    UnsupportedKind(String),

    #[error("Entry validation failed: {}", Violation::join(.0))]
    RecordValidation(Vec<Violation>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JournalError>;
