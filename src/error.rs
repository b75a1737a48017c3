//! Error types for introgen
//!
//! This module defines the error hierarchy for the entire generator.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for introgen
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Schema Inference Errors
    // ============================================================================
    #[error("Shape conflict at '{path}': {message}")]
    ShapeConflict { path: String, message: String },

    #[error("Unsupported response example format '{format}'")]
    UnsupportedFormat { format: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Authorization failed (401) against {url}")]
    Unauthorized { url: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Code Emission Errors
    // ============================================================================
    #[error("Code emission failed: {message}")]
    Emit { message: String },

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a shape conflict error
    pub fn shape_conflict(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ShapeConflict {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a code emission error
    pub fn emit(message: impl Into<String>) -> Self {
        Self::Emit {
            message: message.into(),
        }
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if this error is fatal only for a single action.
    ///
    /// Shape conflicts and unsupported example formats abort one action's
    /// response generation; sibling actions and services keep going.
    pub fn is_action_scoped(&self) -> bool {
        matches!(
            self,
            Error::ShapeConflict { .. } | Error::UnsupportedFormat { .. }
        )
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for introgen
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::shape_conflict("issues.flows", "mixed scalar and object elements");
        assert_eq!(
            err.to_string(),
            "Shape conflict at 'issues.flows': mixed scalar and object elements"
        );

        let err = Error::unsupported_format("csv");
        assert_eq!(err.to_string(), "Unsupported response example format 'csv'");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::http_status(429, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());

        assert!(!Error::http_status(400, "").is_retryable());
        assert!(!Error::shape_conflict("x", "y").is_retryable());
        assert!(!Error::unsupported_format("csv").is_retryable());
    }

    #[test]
    fn test_is_action_scoped() {
        assert!(Error::shape_conflict("x", "y").is_action_scoped());
        assert!(Error::unsupported_format("csv").is_action_scoped());
        assert!(!Error::config("bad host").is_action_scoped());
    }
}
