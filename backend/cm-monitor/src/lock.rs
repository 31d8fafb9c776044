//! Lock file for single-instance enforcement.

use crate::{MonitorError, MonitorResult};

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};

use error_location::ErrorLocation;
use log::info;
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, PidExt, System, SystemExt};

pub const LOCK_FILENAME: &str = "monitor.lock";

/// Prevents two monitors from gating the same ports.
///
/// The lock file holds JSON with the PID and start time, so a lock left
/// behind by a crashed monitor can be recognised and replaced.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
    file: Option<File>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LockInfo {
    pid: u32,
    started_at: String,
}

impl LockFile {
    /// Try to acquire `monitor.lock` inside `dir`.
    ///
    /// Fails with `AlreadyRunning` while the recorded process is alive; a
    /// stale lock is removed and acquisition succeeds.
    #[track_caller]
    pub fn acquire(dir: &Path) -> MonitorResult<Self> {
        let path = dir.join(LOCK_FILENAME);

        if path.exists()
            && let Some(existing) = Self::read_lock_info(&path)
        {
            if Self::is_process_running(existing.pid) {
                return Err(MonitorError::AlreadyRunning {
                    path,
                    pid: existing.pid,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            info!(
                "Removing stale lock file (PID {} not running, started {})",
                existing.pid, existing.started_at
            );
            std::fs::remove_file(&path).ok();
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| MonitorError::LockAcquisition {
                path: path.clone(),
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut lock = Self {
            path,
            file: Some(file),
        };
        lock.write_info()?;

        Ok(lock)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[track_caller]
    fn write_info(&mut self) -> MonitorResult<()> {
        let info = LockInfo {
            pid: std::process::id(),
            started_at: chrono::Utc::now().to_rfc3339(),
        };

        let content = serde_json::to_string_pretty(&info).map_err(|e| {
            MonitorError::io("serializing lock info", std::io::Error::other(e))
        })?;

        if let Some(ref mut file) = self.file {
            file.write_all(content.as_bytes())
                .and_then(|_| file.sync_all())
                .map_err(|e| MonitorError::LockAcquisition {
                    path: self.path.clone(),
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        Ok(())
    }

    /// Unreadable or malformed lock files count as stale.
    fn read_lock_info(path: &Path) -> Option<LockInfo> {
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn is_process_running(pid: u32) -> bool {
        let mut system = System::new();
        system.refresh_process(Pid::from_u32(pid))
    }

    /// Release the lock file.
    ///
    /// Called automatically on drop, but can be called
    /// explicitly for graceful shutdown.
    pub fn release(&mut self) {
        if self.file.take().is_some() {
            std::fs::remove_file(&self.path).ok();
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        self.release();
    }
}
