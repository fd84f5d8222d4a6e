//! Error types for the DNS updater
//!
//! Every step of a run returns one of these. The first error aborts the run;
//! nothing is retried.

use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// Public address discovery failed
    #[error("Unable to get IP: {0}")]
    Discovery(String),

    /// Zone or record lookup returned a result of the wrong shape
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// The record already holds the discovered address
    ///
    /// This is the expected outcome of most scheduled runs. It travels on the
    /// error path so the run stops before the update call.
    #[error("Record IP {content} for {name} already up to date.")]
    Noop {
        /// Record name
        name: String,
        /// Content the record already holds
        content: String,
    },

    /// The update call returned a result of the wrong shape
    #[error("Update failed: {0}")]
    Update(String),

    /// The HTTP layer failed before a response body could be read
    #[error("An error occurred connecting to Cloudflare.\nError code: {code}\nError: {message}")]
    Transport {
        /// Short classification of the failure (timeout, connect, ...)
        code: String,
        /// Underlying client message
        message: String,
    },

    /// The provider reported `success: false` or sent an unreadable envelope
    #[error("Error: {0}")]
    Provider(String),

    /// The provider reported success with an empty result
    #[error("Error: No record was found.")]
    EmptyResult,

    /// Invalid command-line input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid runtime configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Rejected command-line input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither 3 nor 4 positional arguments were given
    #[error("expected 3 or 4 arguments, got {0}")]
    ArgumentCount(usize),

    /// The email address does not look like `local@domain.tld`
    #[error("Email address {0} invalid")]
    Email(String),

    /// The API key is empty
    #[error("API key cannot be empty")]
    EmptyApiKey,
}

impl Error {
    /// Create a discovery error
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Create an "already up to date" outcome
    pub fn noop(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Noop {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Create a transport error
    pub fn transport(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a provider-reported error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this is the benign "already up to date" outcome
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop { .. })
    }
}
