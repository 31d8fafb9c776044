//! Process liveness and zombie detection for the game server executable.
//!
//! The checker never touches the monitor's state directly. It samples the
//! process table on its own timer and posts [`LivenessSignal`]s; the
//! monitor loop folds them in on its next tick.

mod checker;
mod error;
mod probe;
mod signal;
mod tracker;

pub use checker::LivenessChecker;
pub use error::{LivenessError, Result as LivenessResult};
pub use probe::{ProcessProbe, ProcessSample, SysinfoProbe};
pub use signal::LivenessSignal;
pub use tracker::{LivenessTracker, Verdict};

#[cfg(test)]
mod tests;
