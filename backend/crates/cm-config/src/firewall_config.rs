use crate::{ConfigError, ConfigErrorResult};

use serde::{Deserialize, Serialize};

pub const DEFAULT_RULE_PREFIX: &str = "GameServerControl";

pub const MIN_COMMAND_TIMEOUT_SECS: u64 = 1;
pub const MAX_COMMAND_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirewallConfig {
    /// Prefix of every rule name the monitor creates
    pub rule_prefix: String,
    /// Upper bound on a single firewall command
    pub command_timeout_secs: u64,
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self {
            rule_prefix: String::from(DEFAULT_RULE_PREFIX),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
        }
    }
}

impl FirewallConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let prefix = self.rule_prefix.trim();
        if prefix.is_empty() || prefix.contains('"') {
            return Err(ConfigError::firewall(format!(
                "firewall.rule_prefix must be non-empty and contain no quotes, got '{}'",
                self.rule_prefix
            )));
        }

        if self.command_timeout_secs < MIN_COMMAND_TIMEOUT_SECS
            || self.command_timeout_secs > MAX_COMMAND_TIMEOUT_SECS
        {
            return Err(ConfigError::firewall(format!(
                "firewall.command_timeout_secs must be {}-{}, got {}",
                MIN_COMMAND_TIMEOUT_SECS, MAX_COMMAND_TIMEOUT_SECS, self.command_timeout_secs
            )));
        }

        Ok(())
    }
}
