use cm_core::NotificationKind;

use serde::{Deserialize, Serialize};

/// Per-kind notification toggles (`<kind>_notification`). Missing flags
/// default to on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessageControl {
    pub startup_notification: bool,
    pub loading_notification: bool,
    pub ready_notification: bool,
    pub shutdown_warning_notification: bool,
    pub network_shutdown_notification: bool,
    pub shutdown_final_notification: bool,
    pub monitor_stop_notification: bool,
    pub zombie_detected_notification: bool,
    pub zombie_killed_notification: bool,
    pub error_notification: bool,
}

impl Default for MessageControl {
    fn default() -> Self {
        Self {
            startup_notification: true,
            loading_notification: true,
            ready_notification: true,
            shutdown_warning_notification: true,
            network_shutdown_notification: true,
            shutdown_final_notification: true,
            monitor_stop_notification: true,
            zombie_detected_notification: true,
            zombie_killed_notification: true,
            error_notification: true,
        }
    }
}

impl MessageControl {
    pub fn is_enabled(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Startup => self.startup_notification,
            NotificationKind::Loading => self.loading_notification,
            NotificationKind::Ready => self.ready_notification,
            NotificationKind::ShutdownWarning => self.shutdown_warning_notification,
            NotificationKind::NetworkShutdown => self.network_shutdown_notification,
            NotificationKind::ShutdownFinal => self.shutdown_final_notification,
            NotificationKind::MonitorStop => self.monitor_stop_notification,
            NotificationKind::ZombieDetected => self.zombie_detected_notification,
            NotificationKind::ZombieKilled => self.zombie_killed_notification,
            NotificationKind::Error => self.error_notification,
        }
    }

    /// Number of enabled kinds, for the config summary.
    pub fn enabled_count(&self) -> usize {
        NotificationKind::ALL
            .iter()
            .filter(|kind| self.is_enabled(**kind))
            .count()
    }
}
