//! unfurl tool implementation.
//!
//! Fetches a URL and extracts its social-preview metadata.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use unfurl_client::{Fetcher, Unfurler, parse_page_url};

use super::envelope::UnfurlResponse;
use crate::error::WebError;

/// Input parameters for the unfurl tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UnfurlParams {
    /// Absolute http(s) URL of the page to preview.
    pub url: String,
}

/// Implementation of the unfurl tool.
///
/// A malformed URL is an invalid-params error; every fetch failure comes back as a
/// `success: false` envelope.
pub async fn unfurl_impl<F: Fetcher>(unfurler: &Unfurler<F>, params: UnfurlParams) -> Result<CallToolResult, McpError> {
    let url = parse_page_url(&params.url).map_err(WebError::from)?;

    let outcome = unfurler.extract(&url).await;
    Ok(UnfurlResponse::from_outcome(outcome, url.as_str()).into_call_result())
}
