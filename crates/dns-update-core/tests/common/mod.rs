//! Test doubles and common utilities for updater contract tests
//!
//! These doubles record every call so tests can assert which steps ran and
//! what was submitted, without touching the network.

use dns_update_core::error::{Error, Result};
use dns_update_core::traits::{DnsProvider, DnsRecord, IpSource};
use dns_update_core::{Target, UpdaterConfig};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IpSource that returns a fixed address or a discovery failure
pub struct MockIpSource {
    address: Option<Ipv4Addr>,
    current_call_count: Arc<AtomicUsize>,
}

impl MockIpSource {
    pub fn new(address: Ipv4Addr) -> Self {
        Self {
            address: Some(address),
            current_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose every call fails with `Error::Discovery`
    pub fn failing() -> Self {
        Self {
            address: None,
            current_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times current() was called
    pub fn current_call_count(&self) -> usize {
        self.current_call_count.load(Ordering::SeqCst)
    }

    /// Create a new MockIpSource that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            address: other.address,
            current_call_count: Arc::clone(&other.current_call_count),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for MockIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        self.current_call_count.fetch_add(1, Ordering::SeqCst);
        self.address
            .ok_or_else(|| Error::discovery("Unable to read ipify response."))
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}

/// Step at which a MockDnsProvider fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Zone,
    Record,
    Update,
}

/// A mock DnsProvider serving one zone and one record
pub struct MockDnsProvider {
    zone_id: String,
    record: DnsRecord,
    fail_at: Option<FailAt>,
    zone_lookups: Arc<Mutex<Vec<String>>>,
    record_lookups: Arc<Mutex<Vec<(String, String)>>>,
    submitted: Arc<Mutex<Vec<(String, DnsRecord)>>>,
}

impl MockDnsProvider {
    pub fn new(zone_id: &str, record: DnsRecord) -> Self {
        Self {
            zone_id: zone_id.to_string(),
            record,
            fail_at: None,
            zone_lookups: Arc::new(Mutex::new(Vec::new())),
            record_lookups: Arc::new(Mutex::new(Vec::new())),
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make the given step fail
    pub fn failing_at(mut self, step: FailAt) -> Self {
        self.fail_at = Some(step);
        self
    }

    /// Domains passed to resolve_zone()
    pub fn zone_lookups(&self) -> Vec<String> {
        self.zone_lookups.lock().unwrap().clone()
    }

    /// (zone_id, name) pairs passed to find_record()
    pub fn record_lookups(&self) -> Vec<(String, String)> {
        self.record_lookups.lock().unwrap().clone()
    }

    /// (zone_id, record) pairs passed to update_record()
    pub fn submitted(&self) -> Vec<(String, DnsRecord)> {
        self.submitted.lock().unwrap().clone()
    }

    /// Get the number of times update_record() was called
    pub fn update_call_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    /// Create a new MockDnsProvider that shares call logs with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            zone_id: other.zone_id.clone(),
            record: other.record.clone(),
            fail_at: other.fail_at,
            zone_lookups: Arc::clone(&other.zone_lookups),
            record_lookups: Arc::clone(&other.record_lookups),
            submitted: Arc::clone(&other.submitted),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn resolve_zone(&self, domain: &str) -> Result<String> {
        self.zone_lookups.lock().unwrap().push(domain.to_string());
        if self.fail_at == Some(FailAt::Zone) {
            return Err(Error::EmptyResult);
        }
        Ok(self.zone_id.clone())
    }

    async fn find_record(&self, zone_id: &str, name: &str) -> Result<DnsRecord> {
        self.record_lookups
            .lock()
            .unwrap()
            .push((zone_id.to_string(), name.to_string()));
        if self.fail_at == Some(FailAt::Record) {
            return Err(Error::provider("Invalid request headers"));
        }
        Ok(self.record.clone())
    }

    async fn update_record(&self, zone_id: &str, record: &DnsRecord) -> Result<DnsRecord> {
        self.submitted
            .lock()
            .unwrap()
            .push((zone_id.to_string(), record.clone()));
        if self.fail_at == Some(FailAt::Update) {
            return Err(Error::transport("timeout", "operation timed out"));
        }
        Ok(record.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Build a record the way the provider would return it
pub fn record(id: &str, name: &str, content: &str) -> DnsRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "content": content,
        "type": "A",
        "ttl": 120,
        "proxied": false,
        "zone_name": "example.com"
    }))
    .expect("record fixture decodes")
}

/// Helper to create a minimal UpdaterConfig for testing
pub fn minimal_config(domain: &str, subdomain: Option<&str>) -> UpdaterConfig {
    UpdaterConfig::new(Target::new(domain, subdomain.map(str::to_string)))
}
