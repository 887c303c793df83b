//! Health monitoring module
//!
//! This module provides liveness and freshness checking for EVM JSON-RPC
//! endpoints and the edge-triggered monitor loop built on top of it.

pub mod checker;
pub mod evm;
pub mod monitor;
pub mod types;

pub use checker::EndpointChecker;
pub use monitor::RpcMonitor;
pub use types::{EndpointState, HealthVerdict, Transition};
