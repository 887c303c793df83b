//! This module provides reusable test utilities:
//! - Mock JSON-RPC endpoint
//! - Mock ntfy topic
//! - Test configuration builders

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_rpc;
pub mod test_config;

// Re-export commonly used items
pub use mock_ntfy::MockNtfyServer;
pub use mock_rpc::MockRpcServer;
pub use test_config::{endpoint, test_config, TestConfigBuilder};
