use thiserror::Error;

pub type NnResult<T> = Result<T, NnError>;

#[derive(Debug, Error)]
pub enum NnError {
    #[error("Shape mismatch in {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Example source failed: {0}")]
    Source(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NnError {
    pub(crate) fn shape(context: impl Into<String>, expected: usize, got: usize) -> NnError {
        NnError::ShapeMismatch {
            context: context.into(),
            expected,
            got,
        }
    }
}
