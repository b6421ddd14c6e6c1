//! Core types and shared functionality for unfurl.
//!
//! This crate provides:
//! - The metadata record handed back to callers
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod record;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use record::MetadataRecord;
