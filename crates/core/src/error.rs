#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid feedback record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("failed to deserialize feedback payload: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to read feedback file: {0}")]
    FileRead(std::io::Error),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type FeedbackResult<T> = std::result::Result<T, FeedbackError>;
