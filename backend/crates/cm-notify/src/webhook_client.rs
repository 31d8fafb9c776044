use crate::{NotifyError, NotifyResult};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use reqwest::Client as ReqwestClient;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::Serialize;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts plain-text messages to a Discord-compatible webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    url: String,
    client: ReqwestClient,
}

impl WebhookClient {
    /// Build a client whose every request is bounded by `timeout`.
    #[track_caller]
    pub fn new(url: &str, timeout: Duration) -> NotifyResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Setup {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            url: url.trim().to_string(),
            client,
        })
    }

    /// One delivery attempt. Only the status code is inspected.
    pub async fn post(&self, content: &str) -> NotifyResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { content })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_retry_after);
            return Err(NotifyError::rate_limited(retry_after));
        }
        if !status.is_success() {
            return Err(NotifyError::status(status.as_u16()));
        }

        Ok(())
    }
}

/// `Retry-After` in (possibly fractional) seconds, as Discord sends it.
pub(crate) fn parse_retry_after(value: &str) -> Option<Duration> {
    let secs: f64 = value.trim().parse().ok()?;
    if secs.is_finite() && secs >= 0.0 {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}
