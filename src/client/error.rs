//! Fetch Error Types
//!
//! One result type for every backend call, native or wasm.

use thiserror::Error;

/// Errors that can occur when talking to the churn backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response (connection refused, DNS, timeout, CORS)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("HTTP error with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The body did not match the expected payload
    #[error("Decode error: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        FetchError::Status {
            status,
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Result type for backend calls
pub type FetchResult<T> = Result<T, FetchError>;
