//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

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
    /// - `server_url` is not an absolute http(s) URL
    /// - `timeout_ms` is less than 100ms or exceeds 10 minutes
    /// - `connect_timeout_ms` is less than 100ms, exceeds 1 minute, or exceeds `timeout_ms`
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let server_url = self.server_url()?;
        if server_url.cannot_be_a_base() {
            return Err(ConfigError::Invalid { field: "server_url".into(), reason: "must be able to carry a path".into() });
        }
        if server_url.query().is_some() || server_url.fragment().is_some() {
            tracing::warn!(
                server_url = %self.server_url,
                "server_url carries a query or fragment; it is discarded when building request URLs"
            );
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 600_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 10 minutes (600000ms)".into(),
            });
        }

        if self.connect_timeout_ms < 100 {
            return Err(ConfigError::Invalid {
                field: "connect_timeout_ms".into(),
                reason: "must be at least 100ms".into(),
            });
        }
        if self.connect_timeout_ms > 60_000 {
            return Err(ConfigError::Invalid {
                field: "connect_timeout_ms".into(),
                reason: "must not exceed 1 minute (60000ms)".into(),
            });
        }
        if self.connect_timeout_ms > self.timeout_ms {
            return Err(ConfigError::Invalid {
                field: "connect_timeout_ms".into(),
                reason: "must not exceed timeout_ms".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        Ok(())
    }
}
