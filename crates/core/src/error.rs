//! Unified error types for unfurl.
//!
//! Every variant except `ClientInit` is a fetch failure. Extraction itself never
//! fails, so these are the only conditions a caller of the pipeline has to handle.

use std::time::Duration;

/// Unified error type for the unfurl pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No complete response arrived within the configured deadline.
    #[error("TIMEOUT: no response within {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The target answered with a 4xx or 5xx status.
    #[error("UPSTREAM_STATUS: {0}")]
    UpstreamStatus(u16),

    /// DNS failure, refused connection, TLS failure or any other transport error.
    #[error("CONNECTION_FAILURE: {0}")]
    ConnectionFailure(String),

    /// Response size exceeds the configured cap.
    #[error("CONTENT_TOO_LARGE: {size} bytes exceeds {limit}")]
    ContentTooLarge { size: u64, limit: u64 },

    /// Declared media type is not HTML-like.
    #[error("UNSUPPORTED_CONTENT_TYPE: {0}")]
    UnsupportedContentType(String),

    /// The HTTP client could not be constructed.
    #[error("CLIENT_INIT: {0}")]
    ClientInit(String),
}

impl Error {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Timeout(_) => "TIMEOUT",
            Error::UpstreamStatus(_) => "UPSTREAM_STATUS",
            Error::ConnectionFailure(_) => "CONNECTION_FAILURE",
            Error::ContentTooLarge { .. } => "CONTENT_TOO_LARGE",
            Error::UnsupportedContentType(_) => "UNSUPPORTED_CONTENT_TYPE",
            Error::ClientInit(_) => "CLIENT_INIT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UpstreamStatus(404);
        assert_eq!(err.to_string(), "UPSTREAM_STATUS: 404");

        let err = Error::ContentTooLarge { size: 6_000_000, limit: 5_242_880 };
        assert!(err.to_string().contains("6000000 bytes exceeds 5242880"));
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "TIMEOUT: no response within 10000ms");
    }

    #[test]
    fn test_error_code_prefixes_display() {
        let errors = [
            Error::Timeout(Duration::from_millis(1)),
            Error::UpstreamStatus(500),
            Error::ConnectionFailure("refused".into()),
            Error::ContentTooLarge { size: 2, limit: 1 },
            Error::UnsupportedContentType("application/pdf".into()),
            Error::ClientInit("tls".into()),
        ];

        for err in errors {
            assert!(err.to_string().starts_with(err.code()), "{err}");
        }
    }
}
