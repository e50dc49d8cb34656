//! Error types for the record store and the command layer.

use thiserror::Error;

/// Failures raised while reading, decoding, or rewriting a record file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Stored records are not a valid JSON array: {0}")]
    CorruptStore(#[source] serde_json::Error),

    #[error("Item is not a valid record: {0}")]
    InvalidItem(#[source] serde_json::Error),

    #[error("Failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Item with id {0} already exists")]
    DuplicateId(String),
}

/// Errors surfaced to the command-line caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("-fileName flag has to be specified")]
    MissingFileName,

    #[error("-operation flag has to be specified")]
    MissingOperation,

    #[error("-item flag has to be specified")]
    MissingItem,

    #[error("-id flag has to be specified")]
    MissingId,

    #[error("Operation {0} not allowed!")]
    OperationNotAllowed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    StorageError(#[from] StoreError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
