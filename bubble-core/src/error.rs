//! Global error types for the Bubble Data API client.
//!
//! All error categories across the workspace are unified into a single
//! `BubbleError` enum with conversions from underlying library errors.
//! Every failure is surfaced to the caller as a typed value; nothing is
//! logged and masked as an empty success.

use thiserror::Error;

/// Convenience type alias for Results using BubbleError.
pub type BubbleResult<T> = Result<T, BubbleError>;

/// Unified error type covering all error categories in the client.
#[derive(Error, Debug)]
pub enum BubbleError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Network errors --
    /// Connection-level HTTP failure (DNS, refused connection, closed socket).
    #[error("network error: {0}")]
    Network(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// The server rejected the bearer token (401/403).
    #[error("authentication rejected (status {status})")]
    Auth {
        /// HTTP status code.
        status: u16,
    },

    /// The server rejected the request (other 4xx).
    #[error("request rejected (status {status}): {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error body from the server.
        message: String,
    },

    /// The server failed to process the request (5xx).
    #[error("server error (status {status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error body from the server.
        message: String,
    },

    /// Response body could not be decoded as the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for BubbleError {
    fn from(e: serde_json::Error) -> Self {
        BubbleError::Decode(e.to_string())
    }
}

impl From<toml::de::Error> for BubbleError {
    fn from(e: toml::de::Error) -> Self {
        BubbleError::Config(e.to_string())
    }
}

impl BubbleError {
    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            BubbleError::Auth { status } => Some(*status),
            BubbleError::Http { status, .. } => Some(*status),
            BubbleError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error is an authentication rejection.
    pub fn is_auth(&self) -> bool {
        matches!(self, BubbleError::Auth { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BubbleError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");

        let err = BubbleError::Server {
            status: 502,
            message: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "server error (status 502): bad gateway");
    }

    #[test]
    fn test_status_helper() {
        assert_eq!(BubbleError::Auth { status: 401 }.status(), Some(401));
        assert_eq!(
            BubbleError::Server {
                status: 500,
                message: String::new()
            }
            .status(),
            Some(500)
        );
        assert_eq!(BubbleError::Network("refused".into()).status(), None);
    }

    #[test]
    fn test_is_auth() {
        assert!(BubbleError::Auth { status: 403 }.is_auth());
        assert!(!BubbleError::Timeout("30s".into()).is_auth());
    }

    #[test]
    fn test_serde_json_error_maps_to_decode() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BubbleError = parse_err.into();
        assert!(matches!(err, BubbleError::Decode(_)));
    }
}
