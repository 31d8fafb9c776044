use std::fmt;

use serde::{Deserialize, Serialize};

/// Firewall state the monitor leaves behind when it exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortsOnExit {
    #[default]
    Block,
    Allow,
}

impl fmt::Display for PortsOnExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => f.write_str("block"),
            Self::Allow => f.write_str("allow"),
        }
    }
}
