use crate::{LivenessError, LivenessResult};

use sysinfo::{Pid, PidExt, ProcessExt, ProcessStatus, System, SystemExt};

/// One look at the watched process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    /// OS reports the process as zombie, dead or stopped
    pub halted: bool,
    /// CPU usage since the previous sample, in percent
    pub cpu_usage: f32,
}

impl ProcessSample {
    /// A live server always burns some CPU on its game loop.
    pub fn is_responsive(&self) -> bool {
        !self.halted && self.cpu_usage > 0.0
    }
}

/// Process-table access, kept behind a trait so tests can script it.
pub trait ProcessProbe: Send {
    /// Sample the first process named `name`, or `None` when none runs.
    fn sample(&mut self, name: &str) -> LivenessResult<Option<ProcessSample>>;

    fn kill(&mut self, pid: u32) -> LivenessResult<()>;
}

/// Probe backed by `sysinfo`. The `System` is kept between samples so CPU
/// usage is measured over the check interval.
pub struct SysinfoProbe {
    system: System,
}

impl SysinfoProbe {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProbe for SysinfoProbe {
    fn sample(&mut self, name: &str) -> LivenessResult<Option<ProcessSample>> {
        self.system.refresh_processes();

        let sample = self
            .system
            .processes()
            .iter()
            .filter(|(_, process)| process.name().eq_ignore_ascii_case(name))
            .min_by_key(|(pid, _)| pid.as_u32())
            .map(|(pid, process)| ProcessSample {
                pid: pid.as_u32(),
                halted: matches!(
                    process.status(),
                    ProcessStatus::Zombie | ProcessStatus::Dead | ProcessStatus::Stop
                ),
                cpu_usage: process.cpu_usage(),
            });

        Ok(sample)
    }

    fn kill(&mut self, pid: u32) -> LivenessResult<()> {
        let process = self
            .system
            .process(Pid::from_u32(pid))
            .ok_or_else(|| LivenessError::kill(pid, "process no longer exists"))?;

        if process.kill() {
            Ok(())
        } else {
            Err(LivenessError::kill(pid, "termination request was refused"))
        }
    }
}
