use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("form not found: {0}")]
    NotFound(String),

    /// The stored bytes no longer match the digest recorded in the index.
    #[error("stored form {id} failed its digest check")]
    Integrity { id: String },

    #[error(transparent)]
    Core(#[from] forma_core::FormaError),
}
