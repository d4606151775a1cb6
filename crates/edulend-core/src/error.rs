use thiserror::Error;

#[derive(Debug, Error)]
pub enum EduLendError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EduLendError {
    fn from(e: serde_json::Error) -> Self {
        EduLendError::SerializationError(e.to_string())
    }
}
