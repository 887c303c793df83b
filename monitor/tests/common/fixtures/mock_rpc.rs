//! Mock EVM JSON-RPC server for testing endpoint checks
//!
//! This simulates `eth_blockNumber` / `eth_getBlockByNumber` responses
//! without requiring a real chain.

use chrono::Utc;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, method},
    Mock, MockServer, ResponseTemplate,
};

/// Mock RPC server that simulates an EVM node
pub struct MockRpcServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockRpcServer {
    /// Create a new mock RPC server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Drop all mounted responses (to change behavior between ticks)
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// Mock a head block whose timestamp is `age_seconds` in the past
    pub async fn mock_head(&self, block_number: u64, age_seconds: i64) {
        let timestamp = Utc::now().timestamp() - age_seconds;
        self.mock_block_number(block_number).await;
        self.mock_block(block_number, timestamp).await;
    }

    /// Mock a healthy node producing blocks right now
    pub async fn mock_healthy(&self, block_number: u64) {
        self.mock_head(block_number, 0).await;
    }

    /// Mock healthy responses that arrive after `delay`
    pub async fn mock_healthy_delayed(&self, block_number: u64, delay: Duration) {
        let timestamp = Utc::now().timestamp();
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_blockNumber" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(rpc_result(json!(format!("0x{:x}", block_number))))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_getBlockByNumber" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(rpc_result(block_json(block_number, timestamp)))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_block_number(&self, block_number: u64) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_blockNumber" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(rpc_result(json!(format!("0x{:x}", block_number)))),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_block(&self, block_number: u64, timestamp: i64) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_getBlockByNumber" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(rpc_result(block_json(block_number, timestamp))),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock a node that reports a head number but returns null for the block
    pub async fn mock_missing_block(&self, block_number: u64) {
        self.mock_block_number(block_number).await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_getBlockByNumber" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(rpc_result(json!(null))))
            .mount(&self.server)
            .await;
    }

    /// Mock every request failing with the given HTTP status
    pub async fn mock_status(&self, status_code: u16) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint whose path has moved
    pub async fn mock_redirect(&self, location: &str) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", location))
            .mount(&self.server)
            .await;
    }

    /// Mock a gateway answering 200 with something other than JSON-RPC
    pub async fn mock_not_json_rpc(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>starting up</html>"))
            .mount(&self.server)
            .await;
    }

    /// Mock a JSON-RPC error object
    pub async fn mock_rpc_error(&self, code: i64, message: &str) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": code, "message": message }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a node that never answers within `delay`
    pub async fn mock_hanging(&self, delay: Duration) {
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(rpc_result(json!("0x1")))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Number of received JSON-RPC calls for `rpc_method`
    pub async fn call_count(&self, rpc_method: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|req| serde_json::from_slice::<serde_json::Value>(&req.body).ok())
            .filter(|body| body["method"] == rpc_method)
            .count()
    }
}

fn rpc_result(result: serde_json::Value) -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result
    })
}

fn block_json(block_number: u64, timestamp: i64) -> serde_json::Value {
    json!({
        "number": format!("0x{:x}", block_number),
        "hash": format!("0x{:064x}", block_number),
        "timestamp": format!("0x{:x}", timestamp),
        "transactions": []
    })
}
