//! Structured errors for the unfurl server.
//!
//! Only input problems surface as MCP errors. Fetch failures are reported inside
//! the tool's response envelope instead.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use unfurl_client::UrlError;

/// Structured errors for the unfurl server.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Invalid input parameters (e.g., empty HTML).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The supplied URL is not an absolute http(s) URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(#[from] UrlError),
}

impl From<WebError> for McpError {
    fn from(err: WebError) -> Self {
        let message = err.to_string();
        McpError { code: ErrorCode(-32602), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_maps_to_invalid_params() {
        let err: McpError = WebError::from(UrlError::Empty).into();
        assert_eq!(err.code.0, -32602);
        assert!(err.message.contains("INVALID_URL"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = WebError::InvalidInput("html cannot be empty".into());
        assert_eq!(err.to_string(), "INVALID_INPUT: html cannot be empty");
    }
}
