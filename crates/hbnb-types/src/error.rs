use thiserror::Error;

/// Errors produced while converting entities to and from flat maps.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("missing field: {0}")]
    MissingField(String),

    #[error("field {field}: expected {expected}, found {found}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid timestamp in {field}: {value}")]
    InvalidTimestamp { field: String, value: String },

    #[error("unknown entity type: {0}")]
    UnknownType(String),

    #[error("class mismatch: expected {expected}, found {found}")]
    ClassMismatch {
        expected: &'static str,
        found: String,
    },
}

/// Result alias for entity conversions.
pub type TypeResult<T> = Result<T, TypeError>;
