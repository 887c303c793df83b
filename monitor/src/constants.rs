//! Central repository for default values and fixed message texts
//!
//! Values here are used when `main.toml` leaves a setting out.

use std::time::Duration;

/// Default configuration values
pub mod defaults {
    /// Pause between the end of one tick and the start of the next
    pub const CHECK_INTERVAL_MS: u64 = 1000;

    /// Blocks older than this mark the chain as stale (5 minutes)
    pub const FRESHNESS_THRESHOLD_SECONDS: u64 = 300;

    /// Default RPC timeout in seconds
    pub const RPC_TIMEOUT_SECONDS: u64 = 10;

    /// Icon used in recovery messages when an endpoint does not set one
    pub const RECOVERY_ICON: &str = "🎉";

    /// Directory holding main.toml and endpoint files
    pub const CONFIG_DIR: &str = "config";

    /// Environment variable overriding the config directory
    pub const CONFIG_DIR_ENV: &str = "MONITOR_CONFIG_DIR";
}

/// Notification delivery constants
pub mod notifications {
    use super::Duration;

    /// Timeout for a single push to the notification topic
    pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

    pub const STARTED_MESSAGE: &str = "🚀 Starting RPC monitoring...";

    pub const STOPPED_MESSAGE: &str = "⏹️ RPC monitoring stopped";

    pub const DOWN_ICON: &str = "🔻";
}
