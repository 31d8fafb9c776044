use crate::FirewallResult;

use cm_core::PortRule;

use async_trait::async_trait;

/// OS firewall operations, keyed by rule name.
#[async_trait]
pub trait FirewallBackend: Send + Sync {
    async fn rule_exists(&self, name: &str) -> FirewallResult<bool>;

    /// Create an inbound deny rule for `rule`.
    async fn add_block_rule(&self, name: &str, rule: &PortRule) -> FirewallResult<()>;

    async fn delete_rule(&self, name: &str) -> FirewallResult<()>;
}
