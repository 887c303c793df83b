pub mod config;
pub mod constants;
pub mod errors;
pub mod health;
pub mod services;
pub mod shutdown;

// Re-export commonly used types
pub use config::{Config, ConfigManager, EndpointConfig};
pub use errors::{CheckError, ConfigError};
pub use health::{EndpointChecker, EndpointState, HealthVerdict, RpcMonitor};
pub use services::NotificationService;
