// # HTTP IP Source
//
// This crate provides the HTTP-based public address discovery for the DNS
// updater.
//
// ## Architecture
//
// Asks an ipify-style service for the caller's public address once:
//
// ```http
// GET https://api.ipify.org/?format=json
//
// { "ip": "1.2.3.4" }
// ```
//
// Every failure (transport, status, body, shape) is reported as
// `Error::Discovery`. There is no polling and no caching.

use dns_update_core::traits::IpSource;
use dns_update_core::{Error, Result};

use serde::Deserialize;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Default discovery endpoint
pub const DEFAULT_IP_URL: &str = "https://api.ipify.org/?format=json";

/// Default HTTP timeout for discovery requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Body returned by ipify with `format=json`
#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: Option<String>,
}

/// HTTP-based IP source backed by ipify
pub struct IpifySource {
    /// URL to fetch the address from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl IpifySource {
    /// Create a source for the default ipify endpoint
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_IP_URL, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a source for a custom endpoint and timeout
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Endpoint this source queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl IpSource for IpifySource {
    async fn current(&self) -> Result<Ipv4Addr> {
        tracing::debug!("Fetching public address from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::discovery(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::discovery(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::discovery(format!("Failed to read response: {}", e)))?;

        parse_address(&body)
    }

    fn source_name(&self) -> &'static str {
        "ipify"
    }
}

/// Decode an ipify JSON body into a dotted-quad address
fn parse_address(body: &str) -> Result<Ipv4Addr> {
    let response: IpifyResponse = serde_json::from_str(body)
        .map_err(|e| Error::discovery(format!("Unable to read ipify response: {}", e)))?;

    let ip = response
        .ip
        .ok_or_else(|| Error::discovery("Response has no ip field"))?;

    ip.trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| Error::discovery(format!("Not an IPv4 address: {}", ip)))
}
