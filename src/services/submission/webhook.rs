use anyhow::Context;
use async_trait::async_trait;

use super::Submitter;
use crate::models::{Booking, Inquiry};

/// POSTs submissions as JSON to `{base_url}/bookings` and `{base_url}/inquiries`.
pub struct WebhookSubmitter {
    base_url: String,
    client: reqwest::Client,
}

impl WebhookSubmitter {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn post<T: serde::Serialize + Sync>(&self, path: &str, payload: &T) -> anyhow::Result<()> {
        let url = format!("{}/{path}", self.base_url);

        self.client
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("failed to reach submission endpoint {url}"))?
            .error_for_status()
            .context("submission endpoint returned error")?;

        Ok(())
    }
}

#[async_trait]
impl Submitter for WebhookSubmitter {
    async fn submit_booking(&self, booking: &Booking) -> anyhow::Result<()> {
        self.post("bookings", booking).await
    }

    async fn submit_inquiry(&self, inquiry: &Inquiry) -> anyhow::Result<()> {
        self.post("inquiries", inquiry).await
    }
}
