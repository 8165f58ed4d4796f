//! Error types for the reqwest transport.

use prest_query::RestError;
use thiserror::Error;

use crate::config::TIMEOUT_VAR;

/// Result type for transport setup and calls.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors raised by the reqwest transport.
#[derive(Error, Debug)]
pub enum HttpError {
    /// Error from the HTTP client.
    #[error("http error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Malformed URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnv(String),

    /// Header name or value rejected by the client.
    #[error("invalid header: {0}")]
    Header(String),
}

impl HttpError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid header error.
    pub fn header(message: impl Into<String>) -> Self {
        Self::Header(message.into())
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Reqwest(e) if e.is_connect())
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Reqwest(e) if e.is_timeout())
    }
}

impl From<HttpError> for RestError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Reqwest(e) => {
                let url = e.url().map(|u| u.to_string());
                let mapped = if e.is_timeout() {
                    RestError::timeout(e.to_string())
                        .with_help(format!("Raise {} if the server is slow to answer", TIMEOUT_VAR))
                } else if e.is_connect() {
                    RestError::connection(e.to_string())
                } else if e.is_decode() {
                    RestError::deserialization(e.to_string())
                } else if e.is_builder() {
                    RestError::configuration(e.to_string())
                } else {
                    RestError::transport(e.to_string())
                };
                let mapped = match url {
                    Some(url) => mapped.with_url(url),
                    None => mapped,
                };
                mapped.with_source(e)
            }
            HttpError::Url(e) => RestError::configuration(format!("invalid url: {}", e)),
            HttpError::Config(msg) => RestError::configuration(msg),
            HttpError::MissingEnv(name) => RestError::missing_configuration(name),
            HttpError::Header(msg) => RestError::configuration(format!("invalid header: {}", msg)),
        }
    }
}
