use std::io;
use thiserror::Error;
use serde::{Serialize, Deserialize};

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FriendifyError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    // Reserved for a real backend; the mock store never raises it
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Anyhow error: {0}")]
    Anyhow(String),
}

pub type Result<T, E = FriendifyError> = std::result::Result<T, E>;

impl From<serde_json::Error> for FriendifyError {
    fn from(err: serde_json::Error) -> Self {
        FriendifyError::Json(err.to_string())
    }
}

impl From<io::Error> for FriendifyError {
    fn from(err: io::Error) -> Self {
        FriendifyError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for FriendifyError {
    fn from(err: anyhow::Error) -> Self {
        FriendifyError::Anyhow(err.to_string())
    }
}
