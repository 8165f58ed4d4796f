//! Error types for request construction and dispatch.
//!
//! Errors carry a numeric code for programmatic handling, a message, and
//! optional context about the request that failed.
//!
//! # Error Codes
//!
//! Error codes follow a pattern: P{category}{number}
//! - 1xxx: Request construction errors (invalid body, unscoped mutation)
//! - 3xxx: Transport errors (connection, timeout)
//! - 5xxx: Response errors (unexpected status)
//! - 6xxx: Data errors (serialization, deserialization)
//! - 7xxx: Configuration errors
//! - 9xxx: Internal errors
//!
//! ```rust
//! use prest_query::{ErrorCode, RestError};
//!
//! let err = RestError::unscoped_mutation("DELETE", "http://localhost/users");
//! assert_eq!(err.code, ErrorCode::UnscopedMutation);
//! assert_eq!(err.code.code(), "P1002");
//! ```
//!
//! Note that a response whose status is outside the success set is *not* an
//! error at this layer: it is routed to the failure handler. `RestError` is
//! only returned for failures that prevent a response from being produced.

use std::fmt;
use thiserror::Error;

use crate::http::HttpResponse;

/// Result type for request operations.
pub type RestResult<T> = Result<T, RestError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request construction errors (1xxx)
    /// Request body is not the expected JSON shape (P1001).
    InvalidBody = 1001,
    /// Update or delete dispatched without filters or an all-rows opt-in (P1002).
    UnscopedMutation = 1002,

    // Transport errors (3xxx)
    /// Could not connect to the server (P3001).
    ConnectionFailed = 3001,
    /// The request timed out (P3002).
    Timeout = 3002,
    /// Any other transport failure (P3003).
    Transport = 3003,

    // Response errors (5xxx)
    /// Response status was not in the success set (P5001).
    UnexpectedStatus = 5001,

    // Data errors (6xxx)
    /// Serialization error (P6001).
    SerializationError = 6001,
    /// Deserialization error (P6002).
    DeserializationError = 6002,

    // Configuration errors (7xxx)
    /// Invalid configuration (P7001).
    InvalidConfiguration = 7001,
    /// Missing configuration (P7002).
    MissingConfiguration = 7002,

    // Internal errors (9xxx)
    /// Internal error (P9001).
    Internal = 9001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "P1001").
    pub fn code(&self) -> String {
        format!("P{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidBody => "Invalid request body",
            Self::UnscopedMutation => "Unscoped update or delete",
            Self::ConnectionFailed => "Connection failed",
            Self::Timeout => "Request timeout",
            Self::Transport => "Transport error",
            Self::UnexpectedStatus => "Unexpected response status",
            Self::SerializationError => "Serialization error",
            Self::DeserializationError => "Deserialization error",
            Self::InvalidConfiguration => "Invalid configuration",
            Self::MissingConfiguration => "Missing configuration",
            Self::Internal => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// The HTTP method of the request.
    pub method: Option<String>,
    /// The full request URL.
    pub url: Option<String>,
    /// The response status, when one was received.
    pub status: Option<u16>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors that can occur while building or dispatching a request.
#[derive(Error, Debug)]
pub struct RestError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl RestError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add context about the operation.
    pub fn with_context(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Set the request method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.context.method = Some(method.into());
        self
    }

    /// Set the request URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.context.url = Some(url.into());
        self
    }

    /// Set the response status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.context.status = Some(status);
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(suggestion.into());
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// Create an invalid body error.
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidBody,
            format!("Invalid request body: {}", message.into()),
        )
        .with_suggestion("Insert and update bodies must serialize to a JSON object")
    }

    /// Create an error for an update or delete with no row scope.
    pub fn unscoped_mutation(method: impl Into<String>, url: impl Into<String>) -> Self {
        let method = method.into();
        Self::new(
            ErrorCode::UnscopedMutation,
            format!("{} would affect every row of the resource", method),
        )
        .with_method(method)
        .with_url(url)
        .with_suggestion("Narrow the request with where_(...)")
        .with_suggestion("Call all_rows() to target the whole resource on purpose")
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ConnectionFailed,
            format!("Connection error: {}", message.into()),
        )
        .with_suggestion("Check that the API server is reachable")
        .with_suggestion("Verify the base URL is correct")
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Request timed out: {}", message.into()),
        )
        .with_suggestion("Increase the transport timeout")
    }

    /// Create a generic transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::Transport,
            format!("Transport error: {}", message.into()),
        )
    }

    /// Create an unexpected status error from a response.
    ///
    /// Useful inside failure handlers that want to surface the real status
    /// instead of the generic internal error.
    pub fn from_response(response: &HttpResponse) -> Self {
        Self::new(
            ErrorCode::UnexpectedStatus,
            format!(
                "Unexpected response status {}: {}",
                response.status, response.body
            ),
        )
        .with_status(response.status)
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message.into())
    }

    /// Create a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::DeserializationError,
            format!("Failed to deserialize response: {}", message.into()),
        )
        .with_suggestion("Check that the target type matches the resource columns")
    }

    /// Create an invalid configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfiguration, message.into())
    }

    /// Create a missing configuration error.
    pub fn missing_configuration(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            ErrorCode::MissingConfiguration,
            format!("Missing configuration: {}", name),
        )
        .with_suggestion(format!("Set {} in the environment", name))
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::Internal,
            format!("Internal error: {}", message.into()),
        )
    }

    // ============== Error Checks ==============

    /// Check if this error came from the transport layer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ConnectionFailed | ErrorCode::Timeout | ErrorCode::Transport
        )
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        self.code == ErrorCode::ConnectionFailed
    }

    /// Check if this is the generic internal error produced by the default
    /// failure handler.
    pub fn is_internal(&self) -> bool {
        self.code == ErrorCode::Internal
    }

    // ============== Display Functions ==============

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref op) = self.context.operation {
            output.push_str(&format!("  → While: {}\n", op));
        }
        if let (Some(method), Some(url)) = (&self.context.method, &self.context.url) {
            output.push_str(&format!("  → Request: {} {}\n", method, url));
        } else if let Some(ref url) = self.context.url {
            output.push_str(&format!("  → URL: {}\n", url));
        }
        if let Some(status) = self.context.status {
            output.push_str(&format!("  → Status: {}\n", status));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        if let Some(ref help) = self.context.help {
            output.push_str(&format!("\nHelp: {}\n", help));
        }

        output
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            RestError::deserialization(err.to_string()).with_source(err)
        } else {
            RestError::serialization(err.to_string()).with_source(err)
        }
    }
}
