use crate::{FirewallBackend, FirewallError, NetshFirewall};

use cm_config::Config;
use cm_core::PortRule;

use std::fmt;

use log::{error, info};

/// Direction of a gate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    Block,
    Allow,
}

impl fmt::Display for GateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => f.write_str("block"),
            Self::Allow => f.write_str("allow"),
        }
    }
}

#[derive(Debug)]
pub struct RuleFailure {
    pub rule: PortRule,
    pub error: FirewallError,
}

/// Per-rule outcome of one `block` or `allow` pass.
#[derive(Debug)]
pub struct GateReport {
    pub action: GateAction,
    /// Rules whose firewall state this pass changed
    pub changed: Vec<PortRule>,
    /// Rules already in the requested state
    pub unchanged: Vec<PortRule>,
    pub failures: Vec<RuleFailure>,
}

impl GateReport {
    fn new(action: GateAction) -> Self {
        Self {
            action,
            changed: Vec::new(),
            unchanged: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line description of the failed rules, for an error notification.
    pub fn failure_summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }

        let failed: Vec<String> = self
            .failures
            .iter()
            .map(|failure| failure.rule.to_string())
            .collect();
        Some(format!(
            "Failed to {} port(s) {}",
            self.action,
            failed.join(", ")
        ))
    }
}

/// Best-effort, idempotent block/allow over the configured port list.
pub struct PortGate {
    backend: Box<dyn FirewallBackend>,
    rules: Vec<PortRule>,
    rule_prefix: String,
}

impl PortGate {
    pub fn new(backend: Box<dyn FirewallBackend>, rules: Vec<PortRule>, rule_prefix: &str) -> Self {
        Self {
            backend,
            rules,
            rule_prefix: rule_prefix.to_string(),
        }
    }

    /// Netsh-backed gate, or `None` when `firewall_enabled` is off.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.server.firewall_enabled {
            return None;
        }

        Some(Self::new(
            Box::new(NetshFirewall::from_config(&config.firewall)),
            config.server.ports.clone(),
            &config.firewall.rule_prefix,
        ))
    }

    pub fn rules(&self) -> &[PortRule] {
        &self.rules
    }

    pub async fn block(&self) -> GateReport {
        self.apply(GateAction::Block).await
    }

    pub async fn allow(&self) -> GateReport {
        self.apply(GateAction::Allow).await
    }

    async fn apply(&self, action: GateAction) -> GateReport {
        let mut report = GateReport::new(action);

        for rule in &self.rules {
            let name = rule.rule_name(&self.rule_prefix);
            match self.apply_rule(action, &name, rule).await {
                Ok(true) => report.changed.push(*rule),
                Ok(false) => report.unchanged.push(*rule),
                Err(e) => {
                    error!("Port gate: {} {} failed: {}", action, rule, e);
                    report.failures.push(RuleFailure {
                        rule: *rule,
                        error: e,
                    });
                }
            }
        }

        info!(
            "Port gate: {} applied ({} changed, {} unchanged, {} failed)",
            action,
            report.changed.len(),
            report.unchanged.len(),
            report.failures.len()
        );

        report
    }

    async fn apply_rule(
        &self,
        action: GateAction,
        name: &str,
        rule: &PortRule,
    ) -> Result<bool, FirewallError> {
        let exists = self.backend.rule_exists(name).await?;

        match (action, exists) {
            (GateAction::Block, false) => {
                self.backend.add_block_rule(name, rule).await?;
                Ok(true)
            }
            (GateAction::Allow, true) => {
                self.backend.delete_rule(name).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
