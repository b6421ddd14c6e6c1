//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (UNFURL_*)
//! 2. TOML config file (if UNFURL_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Default identifying User-Agent sent with every outbound request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; unfurl/0.1)";

/// Default cap on response size: 5 MiB.
pub const DEFAULT_MAX_CONTENT_LENGTH: u64 = 5 * 1024 * 1024;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (UNFURL_*)
/// 2. TOML config file (if UNFURL_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-Agent string for outbound requests.
    ///
    /// Set via UNFURL_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Outbound request timeout in seconds.
    ///
    /// Set via UNFURL_TIMEOUT_SECS environment variable.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum response size in bytes.
    ///
    /// Set via UNFURL_MAX_CONTENT_LENGTH environment variable.
    #[serde(default = "default_max_content_length")]
    pub max_content_length: u64,

    /// Maximum number of redirects to follow.
    ///
    /// Set via UNFURL_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Accept-Language header value.
    ///
    /// Set via UNFURL_ACCEPT_LANGUAGE environment variable.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Media type prefixes treated as HTML.
    #[serde(default = "default_accepted_media_types")]
    pub accepted_media_types: Vec<String>,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_content_length() -> u64 {
    DEFAULT_MAX_CONTENT_LENGTH
}

fn default_max_redirects() -> usize {
    10
}

fn default_accept_language() -> String {
    "en-US,en;q=0.5".into()
}

fn default_accepted_media_types() -> Vec<String> {
    vec!["text/html".into(), "application/xhtml+xml".into()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_content_length: default_max_content_length(),
            max_redirects: default_max_redirects(),
            accept_language: default_accept_language(),
            accepted_media_types: default_accepted_media_types(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `UNFURL_`
    /// 2. TOML file from `UNFURL_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("UNFURL_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("UNFURL_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        tracing::debug!(
            timeout_secs = config.timeout_secs,
            max_content_length = config.max_content_length,
            max_redirects = config.max_redirects,
            "configuration loaded"
        );

        Ok(config)
    }
}
