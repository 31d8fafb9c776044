use crate::{
    DEFAULT_QUEUE_CAPACITY, MessageCatalog, NotifyResult, RetryPolicy, WebhookClient,
    deliver_with_retry,
};

use cm_config::Config;
use cm_core::NotificationEvent;

use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

/// Cheap, cloneable sender side of the delivery queue.
///
/// `notify` never waits: when the queue is full the event is dropped and
/// logged, so a stalled webhook cannot hold up the monitor loop.
#[derive(Debug, Clone)]
pub struct NotifierHandle {
    tx: mpsc::Sender<NotificationEvent>,
}

impl NotifierHandle {
    /// Bare queue without a delivery task, for callers that consume events
    /// themselves.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<NotificationEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    pub fn notify<E: Into<NotificationEvent>>(&self, event: E) {
        let event = event.into();
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!("Notifier: queue full, dropping {} notification", event.kind);
            }
            Err(TrySendError::Closed(event)) => {
                warn!(
                    "Notifier: delivery task gone, dropping {} notification",
                    event.kind
                );
            }
        }
    }
}

/// Background webhook delivery.
pub struct Notifier {
    catalog: MessageCatalog,
    client: Option<WebhookClient>,
    retry: RetryPolicy,
}

impl Notifier {
    pub fn new(catalog: MessageCatalog, client: Option<WebhookClient>, retry: RetryPolicy) -> Self {
        Self {
            catalog,
            client,
            retry,
        }
    }

    /// Notifier for `config`; without `discord_enabled` messages are only logged.
    pub fn from_config(config: &Config) -> NotifyResult<Self> {
        let client = if config.discord_enabled {
            Some(WebhookClient::new(
                &config.discord_webhook_url,
                Duration::from_secs(config.webhook.timeout_secs),
            )?)
        } else {
            None
        };

        Ok(Self::new(
            MessageCatalog::from_config(&config.server),
            client,
            RetryPolicy::from(&config.webhook),
        ))
    }

    /// Start the delivery task. It ends once every handle is dropped and the
    /// queue is drained.
    pub fn spawn(self) -> (NotifierHandle, JoinHandle<()>) {
        self.spawn_with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    pub fn spawn_with_capacity(self, capacity: usize) -> (NotifierHandle, JoinHandle<()>) {
        let (handle, mut rx) = NotifierHandle::channel(capacity);

        let task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                self.deliver(&event).await;
            }
            debug!("Notifier: queue closed, delivery task exiting");
        });

        (handle, task)
    }

    /// Render and send one event. Failures are logged and swallowed.
    pub async fn deliver(&self, event: &NotificationEvent) {
        let Some(text) = self.catalog.render(event) else {
            debug!("Notifier: {} notifications are disabled", event.kind);
            return;
        };

        let Some(client) = &self.client else {
            info!("[{}] {}", event.kind, text);
            return;
        };

        let label = format!("Webhook {} notification", event.kind);
        match deliver_with_retry(&self.retry, &label, || client.post(&text)).await {
            Ok(attempts) => debug!(
                "Notifier: delivered {} notification ({} attempt(s))",
                event.kind, attempts
            ),
            Err(e) => error!("Notifier: dropping {} notification: {}", event.kind, e),
        }
    }
}
