//! Error types for DNS Updater
//!
//! This module defines all error types used throughout the workspace.
//! A record that does not exist is never an error: lookups return `Ok(None)`.

use thiserror::Error;

/// Result type alias for DNS Updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for DNS Updater
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid endpoint configuration (URL, username, token)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record type outside of the supported set
    #[error("Unsupported record type: {0} (supported: A, TXT)")]
    UnsupportedRecordType(String),

    /// No registrable zone could be derived from the name
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Network failure or unreadable response body
    #[error("API request {module}:{function} failed: {message}")]
    Transport {
        /// Remote API module
        module: String,
        /// Remote API function
        function: String,
        /// Underlying failure
        message: String,
    },

    /// Remote answered with a non-success HTTP status
    #[error("API request {module}/{function} failed: HTTP {status}")]
    HttpStatus {
        /// Remote API module
        module: String,
        /// Remote API function
        function: String,
        /// Status line, e.g. `403 Forbidden`
        status: String,
    },

    /// Remote answered successfully but embedded an error reason
    #[error("API request {module}/{function} rejected: {reason}")]
    Api {
        /// Remote API module
        module: String,
        /// Remote API function
        function: String,
        /// Reason reported by the remote, verbatim
        reason: String,
    },

    /// Response body could not be interpreted
    #[error("API request {module}/{function} returned an unreadable response: {message}")]
    Decode {
        /// Remote API module
        module: String,
        /// Remote API function
        function: String,
        /// Parser message
        message: String,
    },

    /// A mutation returned no result rows, so the change is unconfirmed
    #[error("API request {module}/{function} returned an empty response")]
    EmptyResponse {
        /// Remote API module
        module: String,
        /// Remote API function
        function: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unsupported record type error
    pub fn unsupported_record_type(record_type: impl Into<String>) -> Self {
        Self::UnsupportedRecordType(record_type.into())
    }

    /// Create an invalid domain error
    pub fn invalid_domain(domain: impl Into<String>) -> Self {
        Self::InvalidDomain(domain.into())
    }

    /// Create a transport error for a remote call
    pub fn transport(module: &str, function: &str, message: impl Into<String>) -> Self {
        Self::Transport {
            module: module.to_string(),
            function: function.to_string(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error for a remote call
    pub fn http_status(module: &str, function: &str, status: impl Into<String>) -> Self {
        Self::HttpStatus {
            module: module.to_string(),
            function: function.to_string(),
            status: status.into(),
        }
    }

    /// Create an API-level error carrying the remote reason
    pub fn api(module: &str, function: &str, reason: impl Into<String>) -> Self {
        Self::Api {
            module: module.to_string(),
            function: function.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a decode error for a remote call
    pub fn decode(module: &str, function: &str, message: impl Into<String>) -> Self {
        Self::Decode {
            module: module.to_string(),
            function: function.to_string(),
            message: message.into(),
        }
    }

    /// Create an empty response error for a remote call
    pub fn empty_response(module: &str, function: &str) -> Self {
        Self::EmptyResponse {
            module: module.to_string(),
            function: function.to_string(),
        }
    }

    /// Whether the error was caused by local input rather than the remote side
    ///
    /// Configuration problems and unsupported record types are detected
    /// before any request is sent.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::UnsupportedRecordType(_))
    }
}
