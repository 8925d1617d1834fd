use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Missing TinyPNG API key. Pass --key or set TINIFY_API_KEY")]
    MissingApiKey,

    #[error("Invalid service endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TinyPNG service error ({status}): {error}: {message}")]
    Service {
        status: u16,
        error: String,
        message: String,
    },

    #[error("TinyPNG response did not include an output location")]
    MissingOutputLocation,

    #[error("Failed to start async runtime: {0}")]
    Runtime(String),

    #[error("Failed to read user input: {0}")]
    Prompt(String),
}

impl CompressionError {
    /// True when the service rejected the API key.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CompressionError::Service { status: 401, .. })
    }

    /// True when the monthly compression quota is exhausted.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, CompressionError::Service { status: 429, .. })
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
