// # IP Source Trait
//
// Defines the interface for discovering the caller's public IPv4 address.
//
// ## Implementations
//
// - ipify over HTTPS: `dns-update-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use dns_update_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//     let address = source.current().await?;
//     println!("Public address: {}", address);
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for IP source implementations
///
/// A source is asked exactly once per run. It must not retry or cache:
/// any failure is reported as [`Error::Discovery`](crate::Error::Discovery)
/// and ends the run.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Fetch the current public IPv4 address
    async fn current(&self) -> Result<Ipv4Addr, crate::Error>;

    /// Source name (for logging)
    fn source_name(&self) -> &'static str;
}
