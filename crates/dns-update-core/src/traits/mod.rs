//! Core traits for the DNS updater
//!
//! - [`IpSource`]: Discover the current public address
//! - [`DnsProvider`]: Look up and update records via a provider API

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::IpSource;
pub use dns_provider::{DnsProvider, DnsRecord};
