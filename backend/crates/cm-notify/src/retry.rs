//! Bounded redelivery of a single webhook message.

use crate::{NotifyError, NotifyResult};

use cm_config::WebhookConfig;

use std::time::Duration;

use log::{debug, info, warn};

/// Longest pause between two attempts, whatever a rate limit asks for
pub const MAX_RETRY_PAUSE: Duration = Duration::from_secs(10);

/// How often one message is posted and how long to pause in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Pause before a redelivery
    pub retry_delay: Duration,
    /// Cap on any pause, including a rate limit's `Retry-After`
    pub max_pause: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&WebhookConfig::default())
    }
}

impl From<&WebhookConfig> for RetryPolicy {
    fn from(config: &WebhookConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            max_pause: MAX_RETRY_PAUSE,
        }
    }
}

impl RetryPolicy {
    /// Pause before attempt `attempt + 1` after `error`, or `None` when the
    /// message should be dropped.
    ///
    /// A rate-limited response waits at least as long as the webhook asked,
    /// capped by `max_pause`.
    pub fn pause_after(&self, attempt: u32, error: &NotifyError) -> Option<Duration> {
        if attempt >= self.max_attempts || !error.is_retryable() {
            return None;
        }

        let pause = match error.retry_after() {
            Some(requested) => requested.max(self.retry_delay),
            None => self.retry_delay,
        };
        Some(pause.min(self.max_pause))
    }
}

/// Post one message through `attempt` until it lands or the policy gives
/// up. Returns the number of attempts it took.
pub async fn deliver_with_retry<F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut attempt: F,
) -> NotifyResult<u32>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = NotifyResult<()>>,
{
    let mut attempts = 0;

    loop {
        attempts += 1;

        let error = match attempt().await {
            Ok(()) => {
                if attempts > 1 {
                    info!("{} delivered on attempt {}", label, attempts);
                }
                return Ok(attempts);
            }
            Err(e) => e,
        };

        let Some(pause) = policy.pause_after(attempts, &error) else {
            warn!("{} failed after {} attempt(s): {}", label, attempts, error);
            return Err(error);
        };

        debug!(
            "{} attempt {} failed: {}. Retrying in {:?}",
            label, attempts, error, pause
        );
        tokio::time::sleep(pause).await;
    }
}
