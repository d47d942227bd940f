use thiserror::Error;

pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid month key: {0} (expected YYYY-MM)")]
    InvalidMonth(String),
    #[error("Snapshot error: {0}")]
    Snapshot(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
