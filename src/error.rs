//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document extraction error: {0}")]
    DocumentExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    /// 403/429 from the job source. Recovered by the search layer, never surfaced.
    #[error("Job source unavailable ({status}): {message}")]
    SourceUnavailable { status: u16, message: String },

    #[error("Job source error {status}: {message}")]
    Source { status: u16, message: String },

    #[error("Malformed job source response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Convert reqwest errors to our custom error type
impl From<reqwest::Error> for ScreenerError {
    fn from(err: reqwest::Error) -> Self {
        ScreenerError::Network(err.to_string())
    }
}

impl ScreenerError {
    /// Whether this error should trigger the sample-data fallback
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, ScreenerError::SourceUnavailable { .. })
    }
}
