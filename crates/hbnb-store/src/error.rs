use hbnb_types::{RegistryKey, TypeError};

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error on the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a valid document.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A persisted entry has no `__class__` field.
    #[error("entry {0} has no class")]
    MissingClass(String),

    /// An entity could not be rebuilt from its flat map.
    #[error("entity error: {0}")]
    Entity(#[from] TypeError),

    /// A rebuilt entity does not hash to the key it was stored under.
    #[error("entry {key} rebuilt as {actual}")]
    KeyMismatch { key: String, actual: RegistryKey },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for StoreError {
    /// Failures of the underlying reader or writer stay I/O errors.
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Self::Io(e.into())
        } else {
            Self::Serialization(e.to_string())
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
