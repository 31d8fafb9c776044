use crate::{FirewallBackend, FirewallError, FirewallResult};

use cm_config::FirewallConfig;
use cm_core::PortRule;

use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

const NETSH: &str = "netsh";

/// Windows Defender Firewall through `netsh advfirewall`.
///
/// Needs an elevated process; every invocation is bounded by `timeout` and
/// the child is killed if it overruns.
#[derive(Debug, Clone)]
pub struct NetshFirewall {
    timeout: Duration,
}

impl NetshFirewall {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &FirewallConfig) -> Self {
        Self::new(Duration::from_secs(config.command_timeout_secs))
    }

    async fn run(&self, args: &[String]) -> FirewallResult<Output> {
        let command_line = format!("{} {}", NETSH, args.join(" "));
        debug!("Firewall: running {}", command_line);

        let child = Command::new(NETSH)
            .args(args)
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(FirewallError::command_failed(command_line, e.to_string())),
            Err(_) => Err(FirewallError::timeout(command_line, self.timeout.as_secs())),
        }
    }

    fn rule_args(action: &str, name: &str) -> Vec<String> {
        vec![
            String::from("advfirewall"),
            String::from("firewall"),
            action.to_string(),
            String::from("rule"),
            format!("name={}", name),
        ]
    }

    fn expect_success(args: &[String], output: &Output) -> FirewallResult<()> {
        if output.status.success() {
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = format!(
            "exit {}: {} {}",
            output.status,
            stdout.trim(),
            stderr.trim()
        );
        Err(FirewallError::command_failed(
            format!("{} {}", NETSH, args.join(" ")),
            message.trim(),
        ))
    }
}

#[async_trait]
impl FirewallBackend for NetshFirewall {
    async fn rule_exists(&self, name: &str) -> FirewallResult<bool> {
        let args = Self::rule_args("show", name);
        let output = self.run(&args).await?;

        // netsh exits non-zero with "No rules match" when the rule is absent
        Ok(output.status.success())
    }

    async fn add_block_rule(&self, name: &str, rule: &PortRule) -> FirewallResult<()> {
        let mut args = Self::rule_args("add", name);
        args.extend([
            String::from("dir=in"),
            String::from("action=block"),
            format!("protocol={}", rule.proto),
            format!("localport={}", rule.port),
        ]);

        let output = self.run(&args).await?;
        Self::expect_success(&args, &output)
    }

    async fn delete_rule(&self, name: &str) -> FirewallResult<()> {
        let args = Self::rule_args("delete", name);
        let output = self.run(&args).await?;
        Self::expect_success(&args, &output)
    }
}
