//! Error types for CSS intel
//!
//! Every failure in this crate is recoverable. The core returns these errors
//! with `?` and the public edges (document cache, hover provider) turn them
//! into "no result" after logging.

use std::time::Duration;
use thiserror::Error;

/// Why a collaborator lookup produced nothing
#[derive(Error, Debug)]
pub enum LookupError {
    /// The backend answered but had no match for the query
    #[error("no match for '{query}'")]
    NoMatch { query: String },

    /// HTTP transport or status errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Response body could not be decoded
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend reported errors in its response payload
    #[error("backend error: {message}")]
    Backend { message: String },

    /// The lookup did not finish in time
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Main error type for CSS intel operations
#[derive(Error, Debug)]
pub enum IntelError {
    /// Stylesheet text did not conform to the grammar
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// A syntax node had no usable source position
    #[error("Node '{kind}' has no source position")]
    UnresolvedPosition { kind: String },

    /// An external collaborator failed or had nothing to say
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Document language is not CSS or SCSS
    #[error("Unsupported dialect: {language_id}")]
    UnsupportedDialect { language_id: String },

    /// Document URI is not a repository locator
    #[error("Invalid document URI '{uri}': {message}")]
    InvalidUri { uri: String, message: String },

    /// Configuration could not be read or decoded
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors (config file, log file)
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CSS intel operations
pub type IntelResult<T> = Result<T, IntelError>;

impl From<std::io::Error> for IntelError {
    fn from(err: std::io::Error) -> Self {
        IntelError::Io {
            source: err,
            message: "IO operation failed".to_string(),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Http {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Json {
            message: "Failed to decode response".to_string(),
            source: err,
        }
    }
}

impl From<reqwest::Error> for IntelError {
    fn from(err: reqwest::Error) -> Self {
        IntelError::Lookup(err.into())
    }
}

/// Helper trait for converting IO errors with context
pub trait IoContext<T> {
    fn with_io_context(self, message: &str) -> IntelResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, message: &str) -> IntelResult<T> {
        self.map_err(|e| IntelError::Io {
            message: message.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_converts_into_intel_error() {
        let err: IntelError = LookupError::NoMatch { query: "--gap:".to_string() }.into();
        assert!(matches!(err, IntelError::Lookup(LookupError::NoMatch { .. })));
        assert_eq!(err.to_string(), "Lookup failed: no match for '--gap:'");
    }

    #[test]
    fn test_io_context() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let err = result.with_io_context("Failed to read config").unwrap_err();
        assert_eq!(err.to_string(), "IO error: Failed to read config");
    }
}
