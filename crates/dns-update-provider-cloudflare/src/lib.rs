// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare DNS provider for the DNS updater.
//
// ## Behavior
//
// - ✅ One HTTP request per trait call (zone lookup, record lookup, update)
// - ✅ Global API key authentication (`X-Auth-Key` + `X-Auth-Email`)
// - ✅ Typed decoding of the v4 response envelope
// - ✅ HTTP timeout configured (30 seconds by default)
// - ✅ Dry-run mode for safe testing
// - ❌ NO retry logic (a failed run is simply run again by the scheduler)
// - ❌ NO caching (every run resolves zone and record afresh)
//
// ## Security Requirements
//
// - API key NEVER appears in logs or Debug output
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?type=A&name=...`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

mod types;

use async_trait::async_trait;
use dns_update_core::traits::{DnsProvider, DnsRecord};
use dns_update_core::{Credentials, Error, Result};
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use types::{Envelope, Zone};

/// Cloudflare zones endpoint
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4/zones/";

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Record type managed by this provider
const RECORD_TYPE: &str = "A";

/// Cloudflare DNS provider
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider will:
/// - Perform both GET requests (zone lookup, record lookup)
/// - Log the intended PUT payload
/// - **NOT** actually modify DNS records
///
/// # Security
///
/// The Debug implementation does NOT expose the API key.
pub struct CloudflareProvider {
    /// Account email and API key
    credentials: Credentials,

    /// Zones endpoint, always ending in `/`
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, perform GET requests but skip PUT updates
    dry_run: bool,
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `credentials`: Account email and global API key
    /// - `base_url`: Zones endpoint (see [`CLOUDFLARE_API_BASE`])
    /// - `timeout`: Per-request HTTP timeout
    /// - `dry_run`: If true, perform GET requests but skip PUT updates
    pub fn new(
        credentials: Credentials,
        base_url: impl Into<String>,
        timeout: Duration,
        dry_run: bool,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            credentials,
            base_url,
            client,
            dry_run,
        })
    }

    /// Create a provider against the public API (production/live mode)
    pub fn new_live(credentials: Credentials) -> Result<Self> {
        Self::new(credentials, CLOUDFLARE_API_BASE, DEFAULT_HTTP_TIMEOUT, false)
    }

    /// Create a provider against the public API (dry-run mode)
    pub fn new_dry_run(credentials: Credentials) -> Result<Self> {
        Self::new(credentials, CLOUDFLARE_API_BASE, DEFAULT_HTTP_TIMEOUT, true)
    }

    /// Whether updates are skipped
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Send one authenticated request and unwrap the response envelope
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: the non-empty `result` payload
    /// - `Err(Error::Transport)`: the request could not be completed
    /// - `Err(Error::Provider)`: `success` was false, or the body was not an envelope
    /// - `Err(Error::EmptyResult)`: `success` was true but `result` was empty
    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header("X-Auth-Key", self.credentials.api_key())
            .header("X-Auth-Email", self.credentials.email())
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;

        // Cloudflare reports failures inside the envelope, so the status is
        // only logged.
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        let text = response.text().await.map_err(transport_error)?;

        let envelope: Envelope = serde_json::from_str(&text).map_err(|e| {
            tracing::debug!("Unreadable response body: {}", e);
            Error::provider("Unable to obtain Cloudflare response.")
        })?;

        if !envelope.success {
            let message = envelope.first_error_message();
            tracing::warn!("Cloudflare reported failure ({}): {}", status, message);
            return Err(Error::provider(message));
        }

        envelope.into_result().ok_or(Error::EmptyResult)
    }
}

/// Classify a client failure into a transport error
fn transport_error(e: reqwest::Error) -> Error {
    let code = if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else if e.is_body() || e.is_decode() {
        "body"
    } else if e.is_request() {
        "request"
    } else {
        "other"
    };
    Error::transport(code, e.to_string())
}

/// Decode a result payload, mapping failure with `wrap`
fn decode<T: DeserializeOwned>(value: Value, wrap: fn(String) -> Error) -> Result<T> {
    serde_json::from_value(value).map_err(|e| wrap(format!("Invalid response format: {}", e)))
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// ```http
    /// GET /zones?name=example.com
    /// ```
    async fn resolve_zone(&self, domain: &str) -> Result<String> {
        tracing::debug!("Looking up zone ID for domain: {}", domain);

        let result = self
            .request::<()>(Method::GET, "", &[("name", domain)], None)
            .await?;

        let zones: Vec<Zone> = decode(result, Error::Lookup)?;
        let zone = zones.into_iter().next().ok_or(Error::EmptyResult)?;

        tracing::debug!("Found zone ID: {}", zone.id);
        Ok(zone.id)
    }

    /// ```http
    /// GET /zones/:zone_id/dns_records?type=A&name=example.com
    /// ```
    async fn find_record(&self, zone_id: &str, name: &str) -> Result<DnsRecord> {
        tracing::debug!("Looking up record: {} (type: {})", name, RECORD_TYPE);

        let path = format!("{}/dns_records", zone_id);
        let result = self
            .request::<()>(
                Method::GET,
                &path,
                &[("type", RECORD_TYPE), ("name", name)],
                None,
            )
            .await?;

        let records: Vec<DnsRecord> = decode(result, Error::Lookup)?;
        let record = records.into_iter().next().ok_or(Error::EmptyResult)?;

        tracing::debug!("Found record ID: {}", record.id);
        Ok(record)
    }

    /// ```http
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// { ...record, "content": "1.2.3.4" }
    /// ```
    async fn update_record(&self, zone_id: &str, record: &DnsRecord) -> Result<DnsRecord> {
        let path = format!("{}/dns_records/{}", zone_id, record.id);

        if self.dry_run {
            tracing::warn!(
                "[DRY-RUN] Would send PUT request to {}{} with payload: {}",
                self.base_url,
                path,
                serde_json::to_string(record).unwrap_or_default()
            );
            return Ok(record.clone());
        }

        tracing::info!("Updating Cloudflare DNS record: {} -> {}", record.name, record.content);

        let result = self
            .request(Method::PUT, &path, &[], Some(record))
            .await?;

        decode(result, Error::Update)
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
