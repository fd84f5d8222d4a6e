//! Runtime settings from environment variables
//!
//! - `DNS_UPDATE_LOG_LEVEL`: trace, debug, info, warn, error (default: warn)
//! - `DNS_UPDATE_MODE`: live or dry-run (default: live)
//! - `DNS_UPDATE_IP_URL`: address discovery URL
//! - `DNS_UPDATE_API_BASE`: Cloudflare zones endpoint
//! - `DNS_UPDATE_HTTP_TIMEOUT_SECS`: per-request timeout, 1 to 300 (default: 30)

use anyhow::Result;
use dns_update_ip_http::DEFAULT_IP_URL;
use dns_update_provider_cloudflare::{CLOUDFLARE_API_BASE, DEFAULT_HTTP_TIMEOUT};
use std::env;
use std::time::Duration;
use tracing::Level;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub log_level: String,
    pub dry_run: bool,
    pub ip_url: String,
    pub api_base: String,
    pub http_timeout_secs: u64,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mode = lookup("DNS_UPDATE_MODE").unwrap_or_else(|| "live".to_string());
        let dry_run = match mode.to_lowercase().as_str() {
            "live" => false,
            "dry-run" => true,
            _ => anyhow::bail!(
                "DNS_UPDATE_MODE '{}' is not valid. Valid modes: live, dry-run",
                mode
            ),
        };

        let http_timeout_secs = match lookup("DNS_UPDATE_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                anyhow::anyhow!(
                    "DNS_UPDATE_HTTP_TIMEOUT_SECS must be a number of seconds. Got: {}",
                    raw
                )
            })?,
            None => DEFAULT_HTTP_TIMEOUT.as_secs(),
        };

        Ok(Self {
            log_level: lookup("DNS_UPDATE_LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
            dry_run,
            ip_url: lookup("DNS_UPDATE_IP_URL").unwrap_or_else(|| DEFAULT_IP_URL.to_string()),
            api_base: lookup("DNS_UPDATE_API_BASE")
                .unwrap_or_else(|| CLOUDFLARE_API_BASE.to_string()),
            http_timeout_secs,
        })
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        self.max_log_level()?;

        for (name, url) in [
            ("DNS_UPDATE_IP_URL", &self.ip_url),
            ("DNS_UPDATE_API_BASE", &self.api_base),
        ] {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                anyhow::bail!("{} must use HTTP or HTTPS scheme. Got: {}", name, url);
            }
        }

        if !(1..=300).contains(&self.http_timeout_secs) {
            anyhow::bail!(
                "DNS_UPDATE_HTTP_TIMEOUT_SECS must be between 1 and 300 seconds. Got: {}",
                self.http_timeout_secs
            );
        }

        Ok(())
    }

    /// Maximum tracing level
    pub fn max_log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "DNS_UPDATE_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }

    /// Per-request HTTP timeout
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
