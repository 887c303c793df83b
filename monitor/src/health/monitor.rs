// File: monitor/src/health/monitor.rs
use super::checker::EndpointChecker;
use super::types::{EndpointState, HealthVerdict, Transition};
use crate::config::{Config, EndpointConfig};
use crate::constants::notifications;
use crate::services::NotificationService;
use anyhow::Result;
use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, info};

/// An endpoint together with the state the loop keeps for it
#[derive(Debug, Clone)]
pub struct MonitoredEndpoint {
    pub endpoint: EndpointConfig,
    pub state: EndpointState,
}

/// Transition observed for one endpoint during a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionEvent {
    pub endpoint_name: String,
    pub transition: Transition,
    pub notified: bool,
}

pub struct RpcMonitor {
    checker: EndpointChecker,
    notifier: NotificationService,
    endpoints: Vec<MonitoredEndpoint>,
    check_interval: Duration,
    notify_on_down: bool,
    tick_count: u64,
}

impl RpcMonitor {
    pub fn new(config: &Config, notifier: NotificationService) -> Result<Self> {
        let endpoints = config
            .enabled_endpoints()
            .into_iter()
            .map(|endpoint| MonitoredEndpoint {
                endpoint,
                state: EndpointState::new(),
            })
            .collect();

        Ok(Self {
            checker: EndpointChecker::new(config)?,
            notifier,
            endpoints,
            check_interval: Duration::from_millis(config.check_interval_ms),
            notify_on_down: config.notify_on_down,
            tick_count: 0,
        })
    }

    pub fn endpoints(&self) -> &[MonitoredEndpoint] {
        &self.endpoints
    }

    pub fn state(&self, endpoint_name: &str) -> Option<&EndpointState> {
        self.endpoints
            .iter()
            .find(|m| m.endpoint.name == endpoint_name)
            .map(|m| &m.state)
    }

    /// Log the monitored endpoints and send the "started" notification
    pub async fn announce_start(&self) {
        info!("{}", notifications::STARTED_MESSAGE);
        info!("Monitoring RPCs:");
        for monitored in &self.endpoints {
            info!("- {}: {}", monitored.endpoint.name, monitored.endpoint.url);
        }
        self.notifier.send(notifications::STARTED_MESSAGE).await;
    }

    /// Announce, then run the loop
    pub async fn start(self) -> Result<()> {
        self.announce_start().await;
        self.run().await
    }

    /// Run ticks until the process is terminated
    pub async fn run(mut self) -> Result<()> {
        info!(
            "Monitor loop started with {}ms interval for {} endpoints (notify on down: {})",
            self.check_interval.as_millis(),
            self.endpoints.len(),
            self.notify_on_down
        );

        loop {
            self.tick().await;
            tokio::time::sleep(self.check_interval).await;
        }
    }

    /// One round: check every endpoint concurrently, then apply transitions in order
    pub async fn tick(&mut self) -> Vec<TransitionEvent> {
        self.tick_count += 1;
        if self.tick_count.is_multiple_of(60) {
            debug!("Monitoring cycle #{}", self.tick_count);
        }

        let verdicts = self.check_all().await;
        self.process_verdicts(&verdicts).await
    }

    /// Every check settles before this returns; a failing endpoint only yields a down verdict
    pub async fn check_all(&mut self) -> Vec<HealthVerdict> {
        let checker = &self.checker;
        let checks = self
            .endpoints
            .iter_mut()
            .map(|monitored| checker.check(&monitored.endpoint, &mut monitored.state));

        join_all(checks).await
    }

    /// Apply verdicts (in endpoint order) and send notifications for transitions
    pub async fn process_verdicts(&mut self, verdicts: &[HealthVerdict]) -> Vec<TransitionEvent> {
        let mut events = Vec::new();

        for (monitored, verdict) in self.endpoints.iter_mut().zip(verdicts) {
            let Some(transition) = monitored.state.apply(verdict) else {
                continue;
            };

            let message = match &transition {
                Transition::Recovered { block_number } => {
                    Some(recovery_message(&monitored.endpoint, *block_number))
                }
                Transition::WentDown if self.notify_on_down => {
                    Some(down_message(&monitored.endpoint))
                }
                Transition::WentDown => {
                    info!("{} went down", monitored.endpoint.name);
                    None
                }
            };

            let notified = match message {
                Some(message) => {
                    info!("{}", message);
                    self.notifier.send(&message).await;
                    true
                }
                None => false,
            };

            events.push(TransitionEvent {
                endpoint_name: monitored.endpoint.name.clone(),
                transition,
                notified,
            });
        }

        events
    }
}

pub fn recovery_message(endpoint: &EndpointConfig, block_number: Option<u64>) -> String {
    let block = block_number.map_or_else(|| "unknown".to_string(), |n| n.to_string());
    format!(
        "{} {} is back online! Block: {}",
        endpoint.recovery_icon(),
        endpoint.name,
        block
    )
}

pub fn down_message(endpoint: &EndpointConfig) -> String {
    format!("{} {} is down", notifications::DOWN_ICON, endpoint.name)
}
