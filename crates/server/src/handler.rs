//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::extract_metadata::{ExtractMetadataParams, extract_impl};
use crate::tools::unfurl::{UnfurlParams, unfurl_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use unfurl_client::Unfurler;

/// The main MCP server handler for unfurl.
#[derive(Clone)]
pub struct UnfurlServer {
    tool_router: ToolRouter<Self>,
    unfurler: Arc<Unfurler>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl UnfurlServer {
    /// Create a new server handler around a shared unfurler.
    pub fn new(unfurler: Unfurler) -> Self {
        Self { tool_router: Self::tool_router(), unfurler: Arc::new(unfurler) }
    }

    /// Fetch a page and extract its social-preview metadata.
    #[tool(
        description = "Fetch a web page and extract its preview metadata (title, description, image, site name, favicon, ...). Returns { success, data, error }."
    )]
    async fn unfurl(&self, params: Parameters<UnfurlParams>) -> Result<CallToolResult, McpError> {
        unfurl_impl(self.unfurler.as_ref(), params.0).await
    }

    /// Extract preview metadata from supplied HTML.
    ///
    /// No network requests are made.
    #[tool(description = "Extract preview metadata from raw HTML, resolving relative URLs against base_url. No network access.")]
    async fn extract_metadata(&self, params: Parameters<ExtractMetadataParams>) -> Result<CallToolResult, McpError> {
        extract_impl(params.0).await
    }
}

impl ServerHandler for UnfurlServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "unfurl".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
