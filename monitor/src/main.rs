// File: monitor/src/main.rs
use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use monitor::constants::defaults;
use monitor::shutdown::{run_until_shutdown, ShutdownSignal};
use monitor::{ConfigManager, NotificationService, RpcMonitor};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("monitor=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    // Installed before anything slow so early signals still shut down gracefully
    let shutdown = ShutdownSignal::install()?;

    info!("Starting RPC endpoint monitor");

    let config_dir = std::env::var(defaults::CONFIG_DIR_ENV)
        .unwrap_or_else(|_| defaults::CONFIG_DIR.to_string());
    let config_manager = ConfigManager::new(config_dir).await?;
    let config = config_manager.get_current_config();
    info!(
        "Configuration loaded: {} endpoints, {}ms interval, {}s freshness threshold",
        config.enabled_endpoints().len(),
        config.check_interval_ms,
        config.freshness_threshold_seconds
    );

    let notifier = NotificationService::new(config.notification_url.clone())?;
    if notifier.is_enabled() {
        info!("Notifications will be sent to: {}", notifier.get_topic_url());
    } else {
        warn!("⚠️  NOTIFICATIONS DISABLED ⚠️");
        warn!("Set 'notification_url = \"https://ntfy.sh/<topic>\"' in main.toml to enable them");
    }

    let monitor = RpcMonitor::new(&config, notifier.clone())?;

    run_until_shutdown(monitor.start(), notifier, shutdown.recv()).await
}
