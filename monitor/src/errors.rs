//! Custom error types for the RPC monitor
//!
//! Check failures never escape the checker; they are classified here so the
//! console can say why an endpoint is considered down.

use std::fmt;

/// Why a single endpoint check failed
#[derive(Debug, Clone, PartialEq)]
pub enum CheckError {
    /// Host name could not be resolved
    DnsLookup,

    /// Upstream proxy answered 502
    BadGateway,

    /// Any other 5xx answer
    ServerError { status: u16 },

    /// Endpoint answered with a redirect; the configured path is outdated
    Moved { location: Option<String> },

    /// Endpoint answered 2xx but not with a JSON-RPC envelope
    NetworkNotDetected,

    /// Request did not complete within the RPC timeout
    Timeout,

    /// Connection refused, reset or otherwise not established
    ConnectionFailed { reason: String },

    /// Non-success status that is neither a redirect nor a 5xx
    UnexpectedStatus { status: u16 },

    /// JSON-RPC error object returned by the endpoint
    Rpc { code: i64, message: String },

    /// Envelope was valid but its payload could not be interpreted
    InvalidResponse { reason: String },

    /// `eth_getBlockByNumber` returned null for the head block
    MissingBlock { number: u64 },

    /// Head block is older than the freshness threshold
    Stale { age_seconds: i64 },
}

/// Configuration validation failures
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No enabled endpoint is configured
    NoEndpoints,

    /// Two endpoints share a display name
    DuplicateEndpoint { name: String },

    /// Endpoint URL is not http(s)
    InvalidUrl { name: String, url: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::DnsLookup => write!(f, "DNS lookup failed"),
            CheckError::BadGateway => write!(f, "502 Bad Gateway"),
            CheckError::ServerError { status } => write!(f, "Server error (HTTP {})", status),
            CheckError::Moved { .. } => write!(f, "URL has moved - needs updated RPC path"),
            CheckError::NetworkNotDetected => {
                write!(f, "Network detection failed - will keep retrying")
            }
            CheckError::Timeout => write!(f, "Request timed out"),
            CheckError::ConnectionFailed { .. } => write!(f, "Connection failed"),
            CheckError::UnexpectedStatus { status } => {
                write!(f, "Unexpected HTTP status {}", status)
            }
            CheckError::Rpc { code, message } => write!(f, "RPC error {}: {}", code, message),
            CheckError::InvalidResponse { reason } => write!(f, "Invalid response: {}", reason),
            CheckError::MissingBlock { number } => write!(f, "Block #{} not returned", number),
            CheckError::Stale { age_seconds } => write!(
                f,
                "Chain appears stale (last block: {} minutes old)",
                age_seconds / 60
            ),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoEndpoints => write!(f, "No enabled endpoints configured"),
            ConfigError::DuplicateEndpoint { name } => {
                write!(f, "Endpoint '{}' is configured more than once", name)
            }
            ConfigError::InvalidUrl { name, url } => {
                write!(f, "Endpoint '{}' has invalid URL '{}'", name, url)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for CheckError {}
impl std::error::Error for ConfigError {}

impl CheckError {
    /// Build the classification for a failed reqwest call
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return CheckError::Timeout;
        }

        if let Some(status) = err.status() {
            return CheckError::from_status(status.as_u16(), None);
        }

        if is_dns_failure(err) {
            return CheckError::DnsLookup;
        }

        CheckError::ConnectionFailed {
            reason: root_cause(err),
        }
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, location: Option<String>) -> Self {
        match status {
            502 => CheckError::BadGateway,
            300..=399 => CheckError::Moved { location },
            500..=599 => CheckError::ServerError { status },
            _ => CheckError::UnexpectedStatus { status },
        }
    }

    /// Whether this diagnostic is subject to one-shot suppression
    pub fn is_suppressible(&self) -> bool {
        matches!(self, CheckError::NetworkNotDetected)
    }
}

// hyper reports resolver failures as "dns error" somewhere in the source chain
fn is_dns_failure(err: &reqwest::Error) -> bool {
    let mut source: Option<&dyn std::error::Error> = Some(err);
    while let Some(e) = source {
        let text = e.to_string().to_lowercase();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return true;
        }
        source = e.source();
    }
    false
}

fn root_cause(err: &reqwest::Error) -> String {
    let mut current: &dyn std::error::Error = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}
