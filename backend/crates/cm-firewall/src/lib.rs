//! Port gating: inbound block rules for the game server's ports.
//!
//! Blocking a port means a deny rule named `<prefix>_<port>_<PROTO>` exists;
//! allowing it means that rule is gone. Both directions are idempotent and
//! applied rule by rule, so one failing rule never stops the others.

mod backend;
mod error;
mod netsh;
mod port_gate;

pub use backend::FirewallBackend;
pub use error::{FirewallError, Result as FirewallResult};
pub use netsh::NetshFirewall;
pub use port_gate::{GateAction, GateReport, PortGate, RuleFailure};

#[cfg(test)]
mod tests;
