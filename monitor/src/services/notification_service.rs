// File: monitor/src/services/notification_service.rs
use crate::constants::notifications::SEND_TIMEOUT;
use anyhow::{anyhow, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Pushes plain-text messages to an ntfy-style topic URL.
///
/// Delivery is best-effort: failures are logged and never returned.
#[derive(Clone)]
pub struct NotificationService {
    topic_url: String,
    client: Client,
}

impl NotificationService {
    pub fn new(topic_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client for NotificationService: {}", e))?;

        Ok(Self { topic_url, client })
    }

    pub fn is_enabled(&self) -> bool {
        !self.topic_url.is_empty()
    }

    pub fn get_topic_url(&self) -> &str {
        &self.topic_url
    }

    /// Send one message; returns whether the topic accepted it
    pub async fn send(&self, message: &str) -> bool {
        if !self.is_enabled() {
            debug!("No notification URL configured, skipping: {}", message);
            return false;
        }

        match timeout(
            SEND_TIMEOUT,
            self.client
                .post(&self.topic_url)
                .header(CONTENT_TYPE, "text/plain")
                .body(message.to_string())
                .send(),
        )
        .await
        {
            Ok(Ok(response)) => {
                if response.status().is_success() {
                    info!("Notification sent: {}", message);
                    true
                } else {
                    warn!("Failed to send notification: topic returned status {}", response.status());
                    false
                }
            }
            Ok(Err(e)) => {
                warn!("Failed to send notification: {}", e);
                false
            }
            Err(_) => {
                warn!("Failed to send notification: timeout");
                false
            }
        }
    }
}
