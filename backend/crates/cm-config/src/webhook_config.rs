use crate::{ConfigError, ConfigErrorResult};

use serde::{Deserialize, Serialize};

// Webhook delivery constraints
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const MAX_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

pub const MAX_RETRY_DELAY_MS: u64 = 10_000;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Outbound webhook delivery settings.
///
/// `max_attempts` counts the first try, so the default of 2 means one retry
/// before the message is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebhookConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Total delivery attempts, including the first
    pub max_attempts: u32,
    /// Delay before a retry in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl WebhookConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::webhook(format!(
                "webhook.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if self.max_attempts < MIN_MAX_ATTEMPTS || self.max_attempts > MAX_MAX_ATTEMPTS {
            return Err(ConfigError::webhook(format!(
                "webhook.max_attempts must be {}-{}, got {}",
                MIN_MAX_ATTEMPTS, MAX_MAX_ATTEMPTS, self.max_attempts
            )));
        }

        if self.retry_delay_ms > MAX_RETRY_DELAY_MS {
            return Err(ConfigError::webhook(format!(
                "webhook.retry_delay_ms must be at most {}, got {}",
                MAX_RETRY_DELAY_MS, self.retry_delay_ms
            )));
        }

        Ok(())
    }
}
