//! Storefront timing configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default simulated submission delay.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;

/// Default time the order-placed banner stays visible.
pub const DEFAULT_SUCCESS_DISPLAY_MS: u64 = 5000;

/// Errors loading a [`StorefrontConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid storefront config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// Timing knobs for the checkout flow.
///
/// Missing keys fall back to their defaults.
///
/// ```
/// use cartflow::config::StorefrontConfig;
/// use std::time::Duration;
///
/// let config = StorefrontConfig::from_json(r#"{ "submit_delay_ms": 250 }"#)?;
/// assert_eq!(config.submit_delay(), Duration::from_millis(250));
/// assert_eq!(config.success_display(), Duration::from_secs(5));
/// # Ok::<(), cartflow::config::ConfigError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontConfig {
    pub submit_delay_ms: u64,
    pub success_display_ms: u64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            success_display_ms: DEFAULT_SUCCESS_DISPLAY_MS,
        }
    }
}

impl StorefrontConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.submit_delay_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "submit_delay_ms",
            });
        }
        if self.success_display_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "success_display_ms",
            });
        }
        Ok(())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }
}
