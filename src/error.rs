//! Error types for transport and setup failures
//!
//! Provider-reported errors never show up here: those travel inside
//! [`crate::Envelope::Failure`]. This type only carries faults that stop a
//! call from producing a reply at all.

use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Transport, authentication and configuration failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be read
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider replied with a body that is not valid JSON
    #[error("invalid response JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A base endpoint or continuation link could not be parsed
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The authenticator could not produce request headers
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading or writing the configuration file failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an authentication error with the given message
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a configuration error with the given message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
