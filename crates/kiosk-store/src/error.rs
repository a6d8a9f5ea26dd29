use crate::types::FileId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested file was not found.
    #[error("file not found: {0}")]
    NotFound(FileId),

    /// The remote API answered with a non-success status.
    #[error("store API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport-level failure talking to the remote API.
    #[error("store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote API answered with something we could not decode.
    #[error("unexpected store response: {0}")]
    InvalidResponse(String),

    /// Failure injected or reported by a permission change.
    #[error("permission change failed: {0}")]
    Permission(String),

    /// Missing credentials or other setup problem.
    #[error("store configuration error: {0}")]
    Config(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
