//! Error types for the soldrank system.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the soldrank system.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing credentials, out-of-range parameters).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential exchange returned a non-success status.
    #[error("Authentication failed with HTTP {status}: {body}")]
    Auth { status: u16, body: String },

    /// Search call returned a non-success status.
    #[error("Search request failed with HTTP {status}: {body}")]
    Request { status: u16, body: String },

    /// Malformed timestamp input.
    #[error("Format error: {0}")]
    Format(String),

    /// Network-level failure talking to an endpoint.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Output artifact could not be written.
    #[error("Output error: {0}")]
    Output(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an authentication error.
    pub fn auth(status: u16, body: impl Into<String>) -> Self {
        Error::Auth {
            status,
            body: body.into(),
        }
    }

    /// Create a search request error.
    pub fn request(status: u16, body: impl Into<String>) -> Self {
        Error::Request {
            status,
            body: body.into(),
        }
    }

    /// Create a format error.
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }

    /// Create an output error.
    pub fn output(msg: impl Into<String>) -> Self {
        Error::Output(msg.into())
    }

    /// HTTP status carried by a search failure, if this is one.
    pub fn request_status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
