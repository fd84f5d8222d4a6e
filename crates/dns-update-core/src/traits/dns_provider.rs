// # DNS Provider Trait
//
// Defines the interface for resolving and updating a DNS A record through a
// provider API.
//
// ## Implementations
//
// - Cloudflare: `dns-update-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use dns_update_core::DnsProvider;
//
// let zone_id = provider.resolve_zone("example.com").await?;
// let record = provider.find_record(&zone_id, "example.com").await?;
// let updated = provider
//     .update_record(&zone_id, &record.with_content("1.2.3.4"))
//     .await?;
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A DNS record as returned by the provider
///
/// Fields the updater does not interpret are kept in `extra` and sent back
/// untouched on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record ID (provider-specific)
    pub id: String,
    /// Record name
    pub name: String,
    /// Record content (the address, for A records)
    pub content: String,
    /// All other provider fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DnsRecord {
    /// Copy of this record with only `content` replaced
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }
}

/// Trait for DNS provider implementations
///
/// Each method performs exactly one API call. Providers do not retry,
/// cache, or decide whether an update is needed; that is owned by the
/// [`Updater`](crate::Updater).
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Resolve the provider's zone ID for a domain
    ///
    /// The first matching zone wins.
    async fn resolve_zone(&self, domain: &str) -> Result<String, crate::Error>;

    /// Find the A record with the given name in a zone
    ///
    /// The first matching record wins.
    async fn find_record(&self, zone_id: &str, name: &str) -> Result<DnsRecord, crate::Error>;

    /// Submit a full record for update and return the provider's echo
    async fn update_record(
        &self,
        zone_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord, crate::Error>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}
