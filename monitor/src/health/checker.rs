//! Endpoint liveness and freshness checking

use super::evm::fetch_head_block;
use super::types::{BlockHead, EndpointState, HealthVerdict};
use crate::config::{Config, EndpointConfig};
use crate::errors::CheckError;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use reqwest::redirect::Policy;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Produces a [`HealthVerdict`] per endpoint; never fails outward
#[derive(Clone)]
pub struct EndpointChecker {
    client: HttpClient,
    rpc_timeout_seconds: u64,
    freshness_threshold: chrono::Duration,
}

impl EndpointChecker {
    pub fn new(config: &Config) -> Result<Self> {
        // Redirects are surfaced as "URL has moved" instead of being followed
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(config.rpc_timeout_seconds))
            .redirect(Policy::none())
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        let freshness_threshold = config.freshness_threshold().ok_or_else(|| {
            anyhow!(
                "freshness_threshold_seconds {} is out of range",
                config.freshness_threshold_seconds
            )
        })?;

        Ok(Self {
            client,
            rpc_timeout_seconds: config.rpc_timeout_seconds,
            freshness_threshold,
        })
    }

    /// Check one endpoint, logging the outcome.
    ///
    /// `state` is only used for diagnostic suppression here; up/down
    /// transitions are applied by the monitor once every check has settled.
    pub async fn check(&self, endpoint: &EndpointConfig, state: &mut EndpointState) -> HealthVerdict {
        match self.probe(endpoint).await {
            Ok(head) => {
                state.network_warning_shown = false;
                info!("{}: Block #{}", endpoint.name, head.number);
                HealthVerdict::up(&head)
            }
            Err(e) => {
                log_failure(endpoint, state, &e);
                HealthVerdict::down()
            }
        }
    }

    /// Fetch the head block and apply the freshness rule
    pub async fn probe(&self, endpoint: &EndpointConfig) -> Result<BlockHead, CheckError> {
        let head = fetch_head_block(&self.client, &endpoint.url, self.rpc_timeout_seconds).await?;
        assess_freshness(head, Utc::now(), self.freshness_threshold)
    }
}

/// A head strictly older than `threshold` is stale; future timestamps count as fresh
pub fn assess_freshness(
    head: BlockHead,
    now: DateTime<Utc>,
    threshold: chrono::Duration,
) -> Result<BlockHead, CheckError> {
    let age = now - head.timestamp;
    if age > threshold {
        return Err(CheckError::Stale {
            age_seconds: age.num_seconds(),
        });
    }
    Ok(head)
}

fn log_failure(endpoint: &EndpointConfig, state: &mut EndpointState, error: &CheckError) {
    if error.is_suppressible() {
        if state.network_warning_shown {
            debug!("{}: {} (suppressed)", endpoint.name, error);
            return;
        }
        state.network_warning_shown = true;
    }

    match error {
        CheckError::ConnectionFailed { reason } => {
            warn!("{}: {}", endpoint.name, error);
            debug!("{}: connection failure detail: {}", endpoint.name, reason);
        }
        CheckError::Moved {
            location: Some(location),
        } => {
            warn!("{}: {} (redirects to {})", endpoint.name, error, location);
        }
        _ => warn!("{}: {}", endpoint.name, error),
    }
}
