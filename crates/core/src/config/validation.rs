//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Largest accepted `max_content_length`: 50 MiB.
const MAX_CONTENT_LENGTH_CEILING: u64 = 50 * 1024 * 1024;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_content_length` is 0 or exceeds 50MB
    /// - `timeout_secs` is 0 or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `accepted_media_types` is empty or holds a blank entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_content_length == 0 {
            return Err(ConfigError::Invalid {
                field: "max_content_length".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.max_content_length > MAX_CONTENT_LENGTH_CEILING {
            return Err(ConfigError::Invalid {
                field: "max_content_length".into(),
                reason: "must not exceed 50MB".into(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid { field: "timeout_secs".into(), reason: "must be at least 1s".into() });
        }
        if self.timeout_secs > 300 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs".into(),
                reason: "must not exceed 5 minutes (300s)".into(),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.accepted_media_types.is_empty() || self.accepted_media_types.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "accepted_media_types".into(),
                reason: "must list at least one non-empty media type".into(),
            });
        }

        if self.max_redirects == 0 {
            tracing::warn!("max_redirects is 0; redirected pages will not be followed");
        }

        Ok(())
    }
}
