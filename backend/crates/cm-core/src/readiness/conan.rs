//! Log markers written by the Conan Exiles dedicated server.

use crate::{MarkerRule, MarkerTarget};

pub const SERVER_STARTING: &str = "Entered application state 'ConanSandboxStarting'";
pub const LOAD_COMPLETE: &str = "WorldPersistenceDone";
pub const SERVER_EXIT_WARNING: &str = "LogWindows: FPlatformMisc::RequestExit(0)";
pub const SERVER_NETWORK_DOWN: &str = "LogNet: World NetDriver shutdown";
pub const SERVER_STOPPED: &str = "Entered application state 'ConanSandboxStopped'";

pub const LOG_FILE_NAME: &str = "ConanSandbox.log";
pub const SERVER_PROCESS_NAME: &str = "ConanSandboxServer-Win64-Shipping.exe";

/// Rule order matters: the stop marker is checked first so a line carrying
/// several markers resolves to the most final step.
pub fn marker_rules() -> Vec<MarkerRule> {
    vec![
        MarkerRule::new(SERVER_STOPPED, MarkerTarget::Stopped),
        MarkerRule::new(SERVER_STARTING, MarkerTarget::Starting),
        MarkerRule::new(LOAD_COMPLETE, MarkerTarget::Ready),
        MarkerRule::new(SERVER_EXIT_WARNING, MarkerTarget::ShutdownWarning),
        MarkerRule::new(SERVER_NETWORK_DOWN, MarkerTarget::NetworkDown),
    ]
}
