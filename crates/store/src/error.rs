use thiserror::Error;

/// Errors from the persistence layer.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Store rejected `{key}`: {reason}")]
    Backend { key: String, reason: String },
    #[error("Saved value for `{key}` is malformed: {value:?}")]
    Malformed { key: &'static str, value: String },
}

pub type Result<T> = core::result::Result<T, PersistenceError>;
