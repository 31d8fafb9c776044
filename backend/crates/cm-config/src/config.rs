use crate::{
    CONFIG_PATH_ENV, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_PATH, FirewallConfig,
    LoggingConfig, ServerConfig, WebhookConfig, flexible_bool,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[serde(deserialize_with = "flexible_bool::deserialize")]
    pub discord_enabled: bool,
    pub discord_webhook_url: String,
    pub server: ServerConfig,
    pub webhook: WebhookConfig,
    pub firewall: FirewallConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Resolve the config file path.
    /// Priority: explicit path (CLI) > CM_CONFIG_PATH env var > ./config/config.json
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
            && !path.trim().is_empty()
        {
            return PathBuf::from(path);
        }

        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Load config from `path`.
    ///
    /// Loading order:
    /// 1. Parse the JSON file if it exists
    /// 2. Otherwise write a default file there (so the operator has a
    ///    template to edit) and use the defaults
    /// 3. Apply CM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load(path: &Path) -> ConfigErrorResult<Self> {
        Self::load_or_init(path).map(|(config, _)| config)
    }

    /// Like [`Config::load`], also reporting whether the defaults were just
    /// written to `path`. Nothing is logged here because this normally runs
    /// before the logger is set up.
    pub fn load_or_init(path: &Path) -> ConfigErrorResult<(Self, bool)> {
        let created = !path.exists();
        let mut config = if created {
            let config = Config::default();
            config.save(path)?;
            config
        } else {
            Self::load_json(path)?
        };

        config.apply_env_overrides();

        Ok((config, created))
    }

    fn load_json(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the config as pretty JSON.
    ///
    /// Uses write-to-temp-then-rename so a crash never leaves a
    /// half-written file behind.
    pub fn save(&self, path: &Path) -> ConfigErrorResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).map_err(|e| ConfigError::Io {
            path: temp_path.clone(),
            source: e,
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.discord_enabled {
            let url = self.discord_webhook_url.trim();
            if url.is_empty() {
                return Err(ConfigError::webhook(
                    "discord_webhook_url is required when discord_enabled is true",
                ));
            }
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::webhook(
                    "discord_webhook_url must start with http:// or https://",
                ));
            }
        }

        self.server.validate()?;
        self.webhook.validate()?;
        self.firewall.validate()?;
        self.logging.validate()?;

        Ok(())
    }

    /// Webhook URL with the path (which carries the token) masked.
    pub fn redacted_webhook_url(&self) -> String {
        let url = self.discord_webhook_url.trim();
        if url.is_empty() {
            return String::from("<unset>");
        }

        match url.split_once("://") {
            Some((scheme, rest)) => {
                let host = rest.split('/').next().unwrap_or_default();
                format!("{}://{}/***", scheme, host)
            }
            None => String::from("***"),
        }
    }

    /// Log configuration summary (NEVER logs the webhook token).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: '{}' (log: {})",
            self.server.name,
            self.server.log_path().display()
        );
        info!(
            "  polling: every {}ms, startup delay {}s",
            self.server.poll_interval_ms, self.server.startup_delay
        );

        info!(
            "  discord: {} ({})",
            if self.discord_enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.redacted_webhook_url()
        );
        info!(
            "  webhook: timeout={}s, attempts={}, retry_delay={}ms",
            self.webhook.timeout_secs, self.webhook.max_attempts, self.webhook.retry_delay_ms
        );

        let ports: Vec<String> = self.server.ports.iter().map(ToString::to_string).collect();
        info!(
            "  firewall: {} (prefix {}, ports [{}], on exit: {})",
            if self.server.firewall_enabled {
                "enabled"
            } else {
                "disabled"
            },
            self.firewall.rule_prefix,
            ports.join(", "),
            self.server.ports_on_exit
        );

        let zombie = &self.server.zombie_detection;
        info!(
            "  zombie_detection: {} (process {}, every {}s, timeout {}m, auto_kill {})",
            if zombie.enabled {
                "enabled"
            } else {
                "disabled"
            },
            zombie.process_name,
            zombie.check_interval_seconds,
            zombie.timeout_minutes,
            zombie.auto_kill
        );

        info!(
            "  notifications: {}/{} kinds enabled",
            self.server.message_control.enabled_count(),
            cm_core::NotificationKind::ALL.len()
        );

        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging
                .file_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| String::from("none"))
        );
    }

    fn apply_env_overrides(&mut self) {
        // Discord
        Self::apply_env_bool("CM_DISCORD_ENABLED", &mut self.discord_enabled);
        Self::apply_env_string("CM_DISCORD_WEBHOOK_URL", &mut self.discord_webhook_url);

        // Server
        Self::apply_env_string("CM_LOGS_DIRECTORY", &mut self.server.logs_directory);
        Self::apply_env_parse("CM_STARTUP_DELAY", &mut self.server.startup_delay);
        Self::apply_env_bool("CM_FIREWALL_ENABLED", &mut self.server.firewall_enabled);
        Self::apply_env_parse("CM_POLL_INTERVAL_MS", &mut self.server.poll_interval_ms);

        // Logging
        Self::apply_env_parse("CM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_option_string("CM_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val.eq_ignore_ascii_case("true") || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values.
    /// An empty value clears the option.
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = if val.trim().is_empty() {
                None
            } else {
                Some(val)
            };
        }
    }
}
