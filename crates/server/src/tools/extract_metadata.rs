//! extract_metadata tool implementation.
//!
//! Resolves metadata from caller-supplied HTML. No network I/O is performed.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use unfurl_client::{assemble, parse_page_url};

use super::envelope::UnfurlResponse;
use crate::error::WebError;

/// Input parameters for the extract_metadata tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractMetadataParams {
    /// The raw HTML to read metadata from.
    pub html: String,

    /// URL the HTML was served from; relative image, favicon and media
    /// references resolve against it and it is echoed back as `url`.
    pub base_url: String,
}

/// Implementation of the extract_metadata tool.
pub async fn extract_impl(params: ExtractMetadataParams) -> Result<CallToolResult, McpError> {
    if params.html.trim().is_empty() {
        return Err(WebError::InvalidInput("html cannot be empty".into()).into());
    }

    let base_url = parse_page_url(&params.base_url).map_err(WebError::from)?;
    let record = assemble(&params.html, &base_url);

    Ok(UnfurlResponse::ok(record).into_call_result())
}
