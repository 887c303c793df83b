//! Health monitoring types and RPC response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one endpoint check
#[derive(Debug, Clone, PartialEq)]
pub struct HealthVerdict {
    pub is_up: bool,
    pub block_number: Option<u64>,
    pub block_timestamp: Option<DateTime<Utc>>,
}

impl HealthVerdict {
    pub fn up(head: &BlockHead) -> Self {
        Self {
            is_up: true,
            block_number: Some(head.number),
            block_timestamp: Some(head.timestamp),
        }
    }

    pub fn down() -> Self {
        Self {
            is_up: false,
            block_number: None,
            block_timestamp: None,
        }
    }
}

/// Head block as reported by the endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct BlockHead {
    pub number: u64,
    pub timestamp: DateTime<Utc>,
}

/// State change produced by feeding a verdict into [`EndpointState`]
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Recovered { block_number: Option<u64> },
    WentDown,
}

/// Per-endpoint state owned by the monitor loop for the life of the process
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointState {
    pub was_down: bool,
    pub last_notified_block: Option<u64>,
    /// Set once the "network not detected" diagnostic has been logged;
    /// cleared by the next successful check
    pub network_warning_shown: bool,
}

impl EndpointState {
    /// Every endpoint starts DOWN so the first healthy check is reported
    pub fn new() -> Self {
        Self {
            was_down: true,
            last_notified_block: None,
            network_warning_shown: false,
        }
    }

    pub fn is_up(&self) -> bool {
        !self.was_down
    }

    /// Edge detection: only DOWN -> UP and UP -> DOWN produce a transition
    pub fn apply(&mut self, verdict: &HealthVerdict) -> Option<Transition> {
        match (self.was_down, verdict.is_up) {
            (true, true) => {
                self.was_down = false;
                self.last_notified_block = verdict.block_number;
                Some(Transition::Recovered {
                    block_number: verdict.block_number,
                })
            }
            (false, false) => {
                self.was_down = true;
                Some(Transition::WentDown)
            }
            _ => None,
        }
    }
}

impl Default for EndpointState {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: serde_json::Value, // Can be string or number
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// The one field read from an EVM block object; a hex quantity
#[derive(Debug, Clone, Deserialize)]
pub struct RpcBlock {
    pub timestamp: String,
}
