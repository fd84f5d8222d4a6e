// # dns-update-core
//
// Core library for the single-pass DNS A record updater.
//
// ## Architecture Overview
//
// - **IpSource**: Trait for discovering the public IPv4 address
// - **DnsProvider**: Trait for resolving and updating records via a provider API
// - **Updater**: Runs discover → zone → record → update once and stops at the first error
// - **Credentials / Target / UpdaterConfig**: Validated inputs for a run
//
// ## Design Principles
//
// 1. **Single pass**: No retries, no scheduling, no persistent state
// 2. **Typed responses**: Every provider payload is decoded into a schema
// 3. **Library-first**: The binary is a thin layer over this crate

pub mod traits;
pub mod updater;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{IpSource, DnsProvider, DnsRecord};
pub use updater::{Updater, UpdateEvent, UpdateOutcome};
pub use config::{Credentials, Target, UpdaterConfig};
pub use error::{Error, Result, ValidationError};
