//! Configuration types for the DNS updater
//!
//! All values are built once from the command line, validated, and then
//! handed to the provider and the [`Updater`](crate::Updater) unchanged.

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Default capacity of the progress event channel
const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 16;

/// Provider account credentials
///
/// The Debug implementation does NOT expose the API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl Credentials {
    /// Create validated credentials
    ///
    /// The email must look like `local@domain.tld` with a 2-5 letter TLD.
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let email = email.into();
        let api_key = api_key.into();

        if !is_valid_email(&email) {
            return Err(ValidationError::Email(email).into());
        }
        if api_key.is_empty() {
            return Err(ValidationError::EmptyApiKey.into());
        }

        Ok(Self { email, api_key })
    }

    /// Account email address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// API key
    /// ⚠️ NEVER log this value
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Check an email address against `local@domain.tld`
///
/// Local part and domain allow ASCII alphanumerics, `_`, `-` and `.`;
/// the TLD is 2 to 5 ASCII letters.
fn is_valid_email(email: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');

    let Some((local, host)) = email.split_once('@') else {
        return false;
    };
    let Some((domain, tld)) = host.rsplit_once('.') else {
        return false;
    };

    !local.is_empty()
        && local.chars().all(allowed)
        && !domain.is_empty()
        && domain.chars().all(allowed)
        && (2..=5).contains(&tld.len())
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Which DNS record to manage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Domain whose zone holds the record
    pub domain: String,

    /// Full record name, when it differs from the domain
    #[serde(default)]
    pub subdomain: Option<String>,
}

impl Target {
    /// Create a target; an empty subdomain is treated as absent
    pub fn new(domain: impl Into<String>, subdomain: Option<String>) -> Self {
        Self {
            domain: domain.into(),
            subdomain: subdomain.filter(|s| !s.is_empty()),
        }
    }

    /// Name of the A record to look up
    pub fn record_name(&self) -> &str {
        self.subdomain.as_deref().unwrap_or(&self.domain)
    }
}

/// Updater configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Record to manage
    pub target: Target,

    /// Capacity of the progress event channel
    ///
    /// A run emits at most four events; when the channel is full further
    /// events are dropped with a warning.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl UpdaterConfig {
    /// Create a configuration with defaults
    pub fn new(target: Target) -> Self {
        Self {
            target,
            event_channel_capacity: default_event_channel_capacity(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.target.domain.is_empty() {
            return Err(crate::Error::config("Target domain cannot be empty"));
        }
        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config("Event channel capacity must be > 0"));
        }
        Ok(())
    }
}

fn default_event_channel_capacity() -> usize {
    DEFAULT_EVENT_CHANNEL_CAPACITY
}
