use crate::Protocol;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single inbound (port, protocol) pair under port gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortRule {
    pub port: u16,
    pub proto: Protocol,
}

impl PortRule {
    pub fn new(port: u16, proto: Protocol) -> Self {
        Self { port, proto }
    }

    /// Firewall rule name for this pair, e.g. `GameServerControl_7777_UDP`.
    pub fn rule_name(&self, prefix: &str) -> String {
        format!("{}_{}_{}", prefix, self.port, self.proto)
    }

    /// Default Conan Exiles dedicated server ports.
    pub fn conan_defaults() -> Vec<PortRule> {
        vec![
            PortRule::new(7777, Protocol::Udp),
            PortRule::new(7777, Protocol::Tcp),
            PortRule::new(7778, Protocol::Udp),
            PortRule::new(27015, Protocol::Udp),
            PortRule::new(25575, Protocol::Tcp),
        ]
    }
}

impl fmt::Display for PortRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.proto)
    }
}
