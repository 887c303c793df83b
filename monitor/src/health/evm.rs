//! EVM JSON-RPC calls used by the endpoint checker

use super::types::{BlockHead, RpcBlock, RpcResponse};
use crate::errors::CheckError;
use chrono::{DateTime, Utc};
use reqwest::header::LOCATION;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;

/// Fetch the head block number and then the block itself
pub async fn fetch_head_block(
    client: &HttpClient,
    rpc_url: &str,
    rpc_timeout_seconds: u64,
) -> Result<BlockHead, CheckError> {
    let number = fetch_block_number(client, rpc_url, rpc_timeout_seconds).await?;

    let block = fetch_block_by_number(client, rpc_url, rpc_timeout_seconds, number)
        .await?
        .ok_or(CheckError::MissingBlock { number })?;

    let seconds = parse_hex_quantity(&block.timestamp)?;
    let timestamp = i64::try_from(seconds)
        .ok()
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
        .ok_or_else(|| CheckError::InvalidResponse {
            reason: format!("block timestamp {} out of range", block.timestamp),
        })?;

    Ok(BlockHead { number, timestamp })
}

/// `eth_blockNumber`
pub async fn fetch_block_number(
    client: &HttpClient,
    rpc_url: &str,
    rpc_timeout_seconds: u64,
) -> Result<u64, CheckError> {
    let result = call(client, rpc_url, rpc_timeout_seconds, "eth_blockNumber", Value::Array(vec![]))
        .await?;

    let hex = result.as_str().ok_or_else(|| CheckError::InvalidResponse {
        reason: format!("eth_blockNumber returned {}", result),
    })?;

    parse_hex_quantity(hex)
}

/// `eth_getBlockByNumber`; `None` when the endpoint returns null
pub async fn fetch_block_by_number(
    client: &HttpClient,
    rpc_url: &str,
    rpc_timeout_seconds: u64,
    number: u64,
) -> Result<Option<RpcBlock>, CheckError> {
    let params = serde_json::json!([format!("0x{:x}", number), false]);
    let result = call(client, rpc_url, rpc_timeout_seconds, "eth_getBlockByNumber", params).await?;

    if result.is_null() {
        return Ok(None);
    }

    serde_json::from_value(result)
        .map(Some)
        .map_err(|e| CheckError::InvalidResponse {
            reason: format!("malformed block: {}", e),
        })
}

async fn call(
    client: &HttpClient,
    rpc_url: &str,
    rpc_timeout_seconds: u64,
    method: &str,
    params: Value,
) -> Result<Value, CheckError> {
    let request_body = serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": Uuid::new_v4().to_string()
    });

    let response = timeout(
        Duration::from_secs(rpc_timeout_seconds),
        client.post(rpc_url).json(&request_body).send(),
    )
    .await
    .map_err(|_| CheckError::Timeout)?
    .map_err(|e| CheckError::from_reqwest(&e))?;

    let status = response.status();
    if status.is_redirection() {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        return Err(CheckError::from_status(status.as_u16(), location));
    }

    if !status.is_success() {
        return Err(CheckError::from_status(status.as_u16(), None));
    }

    let body = response
        .text()
        .await
        .map_err(|e| CheckError::from_reqwest(&e))?;

    // A 2xx body that is not JSON-RPC means the endpoint is not serving the chain yet
    let rpc_response: RpcResponse =
        serde_json::from_str(&body).map_err(|_| CheckError::NetworkNotDetected)?;

    if let Some(error) = rpc_response.error {
        return Err(CheckError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    Ok(rpc_response.result.unwrap_or(Value::Null))
}

/// Parse a JSON-RPC hex quantity such as `0x1b4`
pub fn parse_hex_quantity(value: &str) -> Result<u64, CheckError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| CheckError::InvalidResponse {
            reason: format!("'{}' is not a hex quantity", value),
        })?;

    u64::from_str_radix(digits, 16).map_err(|e| CheckError::InvalidResponse {
        reason: format!("'{}' is not a hex quantity: {}", value, e),
    })
}
