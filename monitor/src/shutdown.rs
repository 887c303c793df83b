//! Termination signal handling and the process lifecycle around the monitor

use crate::constants::notifications;
use crate::services::NotificationService;
use anyhow::{anyhow, Result};
use std::future::Future;
use tracing::{error, info};

/// Signal handlers registered up front, so a signal arriving during startup
/// is buffered instead of killing the process
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl ShutdownSignal {
    #[cfg(unix)]
    pub fn install() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> Result<Self> {
        Ok(Self {})
    }

    /// Resolves on Ctrl+C, or SIGTERM on unix
    pub async fn recv(mut self) -> Result<()> {
        self.wait().await?;
        info!("Shutdown signal received, stopping monitor");
        Ok(())
    }

    #[cfg(unix)]
    async fn wait(&mut self) -> Result<()> {
        tokio::select! {
            _ = self.interrupt.recv() => {},
            _ = self.terminate.recv() => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    async fn wait(&mut self) -> Result<()> {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}

/// Drive `monitor_task` until `shutdown` resolves.
///
/// The task covers startup as well as the loop, so a signal during the
/// start notification still sends the stop notification. Returns `Ok` after
/// a signal, and `Err` if the task ends on its own (error or panic).
pub async fn run_until_shutdown<T, S>(
    monitor_task: T,
    notifier: NotificationService,
    shutdown: S,
) -> Result<()>
where
    T: Future<Output = Result<()>> + Send + 'static,
    S: Future<Output = Result<()>>,
{
    let monitor_task = tokio::spawn(monitor_task);

    tokio::select! {
        signal = shutdown => {
            signal?;
            info!("Shutting down monitor...");
            notifier.send(notifications::STOPPED_MESSAGE).await;
            Ok(())
        }
        outcome = monitor_task => {
            let reason = match outcome {
                Ok(Ok(())) => "monitor loop exited".to_string(),
                Ok(Err(e)) => format!("monitor loop failed: {}", e),
                Err(e) => format!("monitor task panicked: {}", e),
            };
            error!("Fatal error: {}", reason);
            Err(anyhow!(reason))
        }
    }
}
