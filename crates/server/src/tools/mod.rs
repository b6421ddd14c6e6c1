//! MCP tool implementations.
//!
//! This module contains all tools exposed by the unfurl server.

pub mod envelope;
pub mod extract_metadata;
pub mod unfurl;
