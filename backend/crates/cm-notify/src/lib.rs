//! Status notifications for the server monitor.
//!
//! Events are rendered through a [`MessageCatalog`] (per-kind toggles and
//! templates) and posted to a Discord-style webhook by a background task, so
//! callers never wait on the network.

mod error;
mod message_catalog;
mod notifier;
mod retry;
mod webhook_client;

pub use error::{NotifyError, Result as NotifyResult};
pub use message_catalog::MessageCatalog;
pub use notifier::{Notifier, NotifierHandle};
pub use retry::{MAX_RETRY_PAUSE, RetryPolicy, deliver_with_retry};
pub use webhook_client::WebhookClient;

/// Queue depth of the background delivery task
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;
