use std::fmt;

/// What the liveness checker tells the monitor loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LivenessSignal {
    /// Process stayed unresponsive past the timeout
    ZombieDetected { pid: u32 },
    /// The zombie was force-terminated
    ZombieKilled { pid: u32 },
    KillFailed { pid: u32, reason: String },
    /// A process previously reported as a zombie responds again
    Recovered { pid: u32 },
    /// A previously seen process is gone from the process table
    Exited { pid: u32 },
}

impl fmt::Display for LivenessSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZombieDetected { pid } => write!(f, "zombie detected (pid {})", pid),
            Self::ZombieKilled { pid } => write!(f, "zombie killed (pid {})", pid),
            Self::KillFailed { pid, reason } => {
                write!(f, "failed to kill zombie (pid {}): {}", pid, reason)
            }
            Self::Recovered { pid } => write!(f, "process recovered (pid {})", pid),
            Self::Exited { pid } => write!(f, "process exited (pid {})", pid),
        }
    }
}
