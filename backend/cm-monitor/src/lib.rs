pub mod cli;
pub mod error;
pub mod lock;
pub mod log_watcher;
pub mod logger;
pub mod orchestrator;
pub mod session;
pub mod shutdown;

pub use error::{MonitorError, Result as MonitorResult, WatchError};
pub use lock::LockFile;
pub use log_watcher::{LogBatch, LogWatcher};
pub use orchestrator::{Orchestrator, OrchestratorSettings};
pub use session::{MonitorPhase, MonitorSession};
pub use shutdown::{ShutdownCoordinator, ShutdownGuard, StopReason};

#[cfg(test)]
mod tests;
