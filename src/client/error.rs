//! Client error types
//!
//! Every backend call either reaches the server and comes back with a
//! status, or it doesn't. Those are the two failures callers care about.

use thiserror::Error;

/// Errors that can occur when talking to the backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Request never reached the server, or no response came back
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a 4xx/5xx status
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request description could not be turned into an HTTP request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// HTTP status for status errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ClientError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type alias for backend calls
pub type ClientResult<T> = Result<T, ClientError>;
