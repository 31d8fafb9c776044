mod port_gate;

use crate::{FirewallBackend, FirewallError, FirewallResult};

use cm_core::PortRule;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

/// In-memory rule table with optional per-port failures
#[derive(Clone, Default)]
pub(crate) struct FakeFirewall {
    pub(crate) rules: Arc<Mutex<BTreeMap<String, PortRule>>>,
    pub(crate) failing_names: Arc<Mutex<Vec<String>>>,
    pub(crate) mutations: Arc<Mutex<usize>>,
}

impl FakeFirewall {
    pub(crate) fn fail_on(&self, name: &str) {
        self.failing_names.lock().unwrap().push(name.to_string());
    }

    pub(crate) fn rule_names(&self) -> Vec<String> {
        self.rules.lock().unwrap().keys().cloned().collect()
    }

    pub(crate) fn mutation_count(&self) -> usize {
        *self.mutations.lock().unwrap()
    }

    fn check(&self, name: &str) -> FirewallResult<()> {
        if self.failing_names.lock().unwrap().iter().any(|n| n == name) {
            return Err(FirewallError::command_failed(
                format!("fake {}", name),
                "access denied",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FirewallBackend for FakeFirewall {
    async fn rule_exists(&self, name: &str) -> FirewallResult<bool> {
        Ok(self.rules.lock().unwrap().contains_key(name))
    }

    async fn add_block_rule(&self, name: &str, rule: &PortRule) -> FirewallResult<()> {
        self.check(name)?;
        *self.mutations.lock().unwrap() += 1;
        self.rules.lock().unwrap().insert(name.to_string(), *rule);
        Ok(())
    }

    async fn delete_rule(&self, name: &str) -> FirewallResult<()> {
        self.check(name)?;
        *self.mutations.lock().unwrap() += 1;
        self.rules.lock().unwrap().remove(name);
        Ok(())
    }
}
