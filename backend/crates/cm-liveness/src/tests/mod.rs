mod tracker;

use crate::{LivenessError, LivenessResult, ProcessProbe, ProcessSample};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub(crate) const PID: u32 = 4242;

pub(crate) fn busy(pid: u32) -> Option<ProcessSample> {
    Some(ProcessSample {
        pid,
        halted: false,
        cpu_usage: 12.5,
    })
}

pub(crate) fn idle(pid: u32) -> Option<ProcessSample> {
    Some(ProcessSample {
        pid,
        halted: false,
        cpu_usage: 0.0,
    })
}

pub(crate) fn halted(pid: u32) -> Option<ProcessSample> {
    Some(ProcessSample {
        pid,
        halted: true,
        cpu_usage: 0.0,
    })
}

/// Probe replaying a scripted list of samples; the last one repeats.
#[derive(Clone, Default)]
pub(crate) struct ScriptedProbe {
    samples: Arc<Mutex<VecDeque<LivenessResult<Option<ProcessSample>>>>>,
    last: Arc<Mutex<Option<ProcessSample>>>,
    pub(crate) kills: Arc<Mutex<Vec<u32>>>,
    refuse_kill: bool,
}

impl ScriptedProbe {
    pub(crate) fn new(samples: Vec<Option<ProcessSample>>) -> Self {
        Self {
            samples: Arc::new(Mutex::new(samples.into_iter().map(Ok).collect())),
            ..Self::default()
        }
    }

    pub(crate) fn refusing_kill(mut self) -> Self {
        self.refuse_kill = true;
        self
    }

    pub(crate) fn push_error(&self) {
        self.samples
            .lock()
            .unwrap()
            .push_front(Err(LivenessError::process_query("access denied")));
    }

    pub(crate) fn kill_count(&self) -> usize {
        self.kills.lock().unwrap().len()
    }
}

impl ProcessProbe for ScriptedProbe {
    fn sample(&mut self, _name: &str) -> LivenessResult<Option<ProcessSample>> {
        match self.samples.lock().unwrap().pop_front() {
            Some(Ok(sample)) => {
                *self.last.lock().unwrap() = sample;
                Ok(sample)
            }
            Some(Err(e)) => Err(e),
            None => Ok(*self.last.lock().unwrap()),
        }
    }

    fn kill(&mut self, pid: u32) -> LivenessResult<()> {
        self.kills.lock().unwrap().push(pid);
        if self.refuse_kill {
            return Err(LivenessError::kill(pid, "access denied"));
        }
        Ok(())
    }
}
