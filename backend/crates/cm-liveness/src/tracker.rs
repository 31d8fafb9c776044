use crate::ProcessSample;

use std::time::{Duration, Instant};

/// Outcome of folding one sample into the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No process seen, before or now
    Absent,
    Responsive,
    /// Not responding, timeout not reached yet (or zombie already reported)
    Unresponsive,
    /// Timeout reached; raised once per unresponsive episode
    Zombie { pid: u32, kill: bool },
    Recovered { pid: u32 },
    Exited { pid: u32 },
}

/// Unresponsive-duration bookkeeping for a single process. Time is passed in
/// so the thresholds can be tested without sleeping.
#[derive(Debug, Clone)]
pub struct LivenessTracker {
    timeout: Duration,
    auto_kill: bool,
    seen_pid: Option<u32>,
    unresponsive_since: Option<Instant>,
    zombie: bool,
}

impl LivenessTracker {
    pub fn new(timeout: Duration, auto_kill: bool) -> Self {
        Self {
            timeout,
            auto_kill,
            seen_pid: None,
            unresponsive_since: None,
            zombie: false,
        }
    }

    pub fn is_zombie(&self) -> bool {
        self.zombie
    }

    pub fn observe(&mut self, sample: Option<ProcessSample>, now: Instant) -> Verdict {
        let Some(sample) = sample else {
            return match self.seen_pid.take() {
                Some(pid) => {
                    self.reset_episode();
                    Verdict::Exited { pid }
                }
                None => Verdict::Absent,
            };
        };

        if self.seen_pid != Some(sample.pid) {
            // New process: its first CPU reading has no baseline yet
            self.reset_episode();
            self.seen_pid = Some(sample.pid);
            if !sample.halted {
                return Verdict::Responsive;
            }
        }

        if sample.is_responsive() {
            let was_zombie = self.zombie;
            self.reset_episode();
            return if was_zombie {
                Verdict::Recovered { pid: sample.pid }
            } else {
                Verdict::Responsive
            };
        }

        if self.zombie {
            return Verdict::Unresponsive;
        }

        let since = *self.unresponsive_since.get_or_insert(now);
        if now.saturating_duration_since(since) >= self.timeout {
            self.zombie = true;
            return Verdict::Zombie {
                pid: sample.pid,
                kill: self.auto_kill,
            };
        }

        Verdict::Unresponsive
    }

    fn reset_episode(&mut self) {
        self.unresponsive_since = None;
        self.zombie = false;
    }
}
