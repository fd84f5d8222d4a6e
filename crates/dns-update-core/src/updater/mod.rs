//! Single-pass DNS updater
//!
//! The Updater is responsible for:
//! - Discovering the public address via IpSource
//! - Resolving the zone and the A record via DnsProvider
//! - Stopping when the record is already current
//! - Submitting the record with its content replaced
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐   address   ┌──────────────┐   zone id   ┌──────────────┐
//! │  IpSource   │────────────▶│   Updater    │◀───────────▶│ DnsProvider  │
//! └─────────────┘             └──────────────┘   record    └──────────────┘
//!                                     │
//!                                     ▼
//!                             ┌──────────────┐
//!                             │ UpdateEvent  │
//!                             │  (progress)  │
//!                             └──────────────┘
//! ```
//!
//! Every step depends on the previous one. The first error ends the run.

use crate::config::{Target, UpdaterConfig};
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, DnsRecord, IpSource};
use std::net::Ipv4Addr;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Progress events emitted by the Updater
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    /// Public address discovered
    AddressDiscovered { address: Ipv4Addr },

    /// Zone resolved for the target domain
    ZoneResolved { zone_id: String },

    /// Record found and scheduled for update
    RecordResolved { record_id: String, name: String },

    /// Provider accepted the update
    RecordUpdated { name: String, content: String },
}

/// Result of a run that reached the update call
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// Record as echoed back by the provider
    pub record: DnsRecord,
    /// Content the record held before the update
    pub previous_content: String,
}

/// Single-pass updater
///
/// ## Lifecycle
///
/// 1. Create with [`Updater::new()`]
/// 2. Consume with [`Updater::run()`]; the event channel closes when the run ends
pub struct Updater {
    /// IP source for discovery
    ip_source: Box<dyn IpSource>,

    /// DNS provider for lookup and update
    provider: Box<dyn DnsProvider>,

    /// Record to manage
    target: Target,

    /// Event sender for progress reporting
    event_tx: mpsc::Sender<UpdateEvent>,
}

impl Updater {
    /// Create a new updater
    ///
    /// # Returns
    ///
    /// A tuple of (updater, event_receiver) where event_receiver yields progress events
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        config: UpdaterConfig,
    ) -> Result<(Self, mpsc::Receiver<UpdateEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.event_channel_capacity);

        let updater = Self {
            ip_source,
            provider,
            target: config.target,
            event_tx: tx,
        };

        Ok((updater, rx))
    }

    /// Run the four steps once
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateOutcome)`: the record now holds the discovered address
    /// - `Err(Error::Noop { .. })`: the record already held it; no update was sent
    /// - `Err(Error)`: the first failure encountered
    pub async fn run(self) -> Result<UpdateOutcome> {
        info!(
            "Updating {} via {} (address from {})",
            self.target.record_name(),
            self.provider.provider_name(),
            self.ip_source.source_name()
        );

        let address = self.discover_address().await?;
        let zone_id = self.resolve_zone().await?;
        let record = self.resolve_record(&zone_id, address).await?;
        self.submit_update(&zone_id, record, address).await
    }

    async fn discover_address(&self) -> Result<Ipv4Addr> {
        let address = self.ip_source.current().await?;
        debug!("Discovered address {}", address);
        self.emit_event(UpdateEvent::AddressDiscovered { address });
        Ok(address)
    }

    async fn resolve_zone(&self) -> Result<String> {
        let zone_id = self.provider.resolve_zone(&self.target.domain).await?;
        debug!("Resolved zone {} for {}", zone_id, self.target.domain);
        self.emit_event(UpdateEvent::ZoneResolved {
            zone_id: zone_id.clone(),
        });
        Ok(zone_id)
    }

    /// Look up the record, ending the run if it already holds `address`
    async fn resolve_record(&self, zone_id: &str, address: Ipv4Addr) -> Result<DnsRecord> {
        let record = self
            .provider
            .find_record(zone_id, self.target.record_name())
            .await?;

        if record.content == address.to_string() {
            info!("Record {} already points at {}", record.name, record.content);
            return Err(Error::noop(record.name, record.content));
        }

        debug!(
            "Record {} ({}) holds {}, needs {}",
            record.name, record.id, record.content, address
        );
        self.emit_event(UpdateEvent::RecordResolved {
            record_id: record.id.clone(),
            name: record.name.clone(),
        });
        Ok(record)
    }

    async fn submit_update(
        &self,
        zone_id: &str,
        record: DnsRecord,
        address: Ipv4Addr,
    ) -> Result<UpdateOutcome> {
        let desired = record.with_content(address.to_string());
        let updated = self.provider.update_record(zone_id, &desired).await?;

        info!("Updated {} -> {} (was: {})", updated.name, updated.content, record.content);
        self.emit_event(UpdateEvent::RecordUpdated {
            name: updated.name.clone(),
            content: updated.content.clone(),
        });

        Ok(UpdateOutcome {
            record: updated,
            previous_content: record.content,
        })
    }

    fn emit_event(&self, event: UpdateEvent) {
        // A closed or full channel only loses progress output, never the run.
        if self.event_tx.try_send(event).is_err() {
            warn!("Event channel full or closed, dropping progress event");
        }
    }
}
