//! The `{ success, data, error }` response envelope shared by all tools.

use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use unfurl_core::{Error, MetadataRecord};

/// Tool response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnfurlResponse {
    /// Whether extraction worked.
    pub success: bool,
    /// The extracted metadata, on success.
    pub data: Option<MetadataRecord>,
    /// Human-readable failure message, on failure.
    pub error: Option<String>,
}

impl UnfurlResponse {
    pub fn ok(record: MetadataRecord) -> Self {
        Self { success: true, data: Some(record), error: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()) }
    }

    /// Build the envelope for a pipeline outcome on `url`.
    pub fn from_outcome(outcome: Result<MetadataRecord, Error>, url: &str) -> Self {
        match outcome {
            Ok(record) => Self::ok(record),
            Err(err) => {
                tracing::info!(url, code = err.code(), error = %err, "unfurl failed");
                Self::failed(describe_failure(&err, url))
            }
        }
    }

    /// Serialize into a tool result; failures are flagged as tool errors.
    pub fn into_call_result(self) -> CallToolResult {
        let content = vec![Content::text(serde_json::to_string_pretty(&self).unwrap_or_default())];
        if self.success { CallToolResult::success(content) } else { CallToolResult::error(content) }
    }
}

/// User-facing message for each failure condition.
pub fn describe_failure(err: &Error, url: &str) -> String {
    match err {
        Error::Timeout(_) => format!("Request timed out while fetching {url}"),
        Error::UpstreamStatus(code) => format!("HTTP error {code} while fetching {url}"),
        Error::ConnectionFailure(detail) => format!("Failed to connect to {url}: {detail}"),
        Error::ContentTooLarge { size, .. } => format!("Content too large: {size} bytes"),
        Error::UnsupportedContentType(content_type) => format!("Not HTML content: {content_type}"),
        Error::ClientInit(_) => "An unexpected error occurred while processing the URL".to_string(),
    }
}
