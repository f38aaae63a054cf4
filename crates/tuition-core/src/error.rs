use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuitionError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for TuitionError {
    fn from(e: serde_json::Error) -> Self {
        TuitionError::SerializationError(e.to_string())
    }
}
