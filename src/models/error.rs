//! Error types for model construction and serialization.

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Error type for model construction and serialization.
///
/// A source record either constructs fully and validly or not at all; every
/// failure surfaces synchronously to the caller and nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a valid number: `{value}`")]
    InvalidNumber {
        field: &'static str,
        value: String,
    },

    #[error("field `time` is not a valid timestamp: `{0}`")]
    InvalidTimestamp(String),

    #[error("close approach of `{0}` is not linked to a near-Earth object")]
    Unlinked(String),
}
