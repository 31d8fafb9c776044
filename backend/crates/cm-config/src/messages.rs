use crate::{ConfigError, ConfigErrorResult};

use cm_core::NotificationKind;

use serde::{Deserialize, Serialize};

/// Message templates per notification kind. `{server}` expands to the
/// server name and `{detail}` to the event detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Messages {
    pub startup: String,
    pub loading: String,
    pub ready: String,
    pub shutdown_warning: String,
    pub network_shutdown: String,
    pub shutdown_final: String,
    pub monitor_stop: String,
    pub zombie_detected: String,
    pub zombie_killed: String,
    pub error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            startup: String::from("[START] Server monitor starting up..."),
            loading: String::from("[UPDATE] Server is starting up..."),
            ready: String::from("[SUCCESS] Server is fully loaded and ready for connections!"),
            shutdown_warning: String::from("[WARNING] Server is preparing to shut down..."),
            network_shutdown: String::from("[WARNING] Server network is shutting down..."),
            shutdown_final: String::from("[WARNING] Server has stopped..."),
            monitor_stop: String::from("[STOP] Server monitor shutting down..."),
            zombie_detected: String::from(
                "[WARNING] Server process is not responding (zombie state detected)!",
            ),
            zombie_killed: String::from("[UPDATE] Zombie process was forcefully terminated."),
            error: String::from("[ERROR] {server}: {detail}"),
        }
    }
}

impl Messages {
    pub fn template(&self, kind: NotificationKind) -> &str {
        match kind {
            NotificationKind::Startup => &self.startup,
            NotificationKind::Loading => &self.loading,
            NotificationKind::Ready => &self.ready,
            NotificationKind::ShutdownWarning => &self.shutdown_warning,
            NotificationKind::NetworkShutdown => &self.network_shutdown,
            NotificationKind::ShutdownFinal => &self.shutdown_final,
            NotificationKind::MonitorStop => &self.monitor_stop,
            NotificationKind::ZombieDetected => &self.zombie_detected,
            NotificationKind::ZombieKilled => &self.zombie_killed,
            NotificationKind::Error => &self.error,
        }
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        for kind in NotificationKind::ALL {
            if self.template(kind).trim().is_empty() {
                return Err(ConfigError::messages(format!(
                    "server.messages.{} must not be empty",
                    kind
                )));
            }
        }

        Ok(())
    }
}
