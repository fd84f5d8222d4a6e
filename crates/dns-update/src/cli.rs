//! Command-line arguments
//!
//! `dns-update <email> <api-key> <domain> [<subdomain>]`

use dns_update_core::{Credentials, Result, Target, ValidationError};

/// Program name used when the argument vector is empty
const DEFAULT_PROGRAM_NAME: &str = "dns-update";

/// A validated invocation
#[derive(Debug)]
pub struct Invocation {
    pub credentials: Credentials,
    pub target: Target,
}

impl Invocation {
    /// Validate positional arguments (program name excluded)
    ///
    /// Exactly 3 or 4 are accepted. The email is checked before anything
    /// touches the network.
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args {
            [email, api_key, domain] => Self::build(email, api_key, domain, None),
            [email, api_key, domain, subdomain] => {
                Self::build(email, api_key, domain, Some(subdomain.clone()))
            }
            _ => Err(ValidationError::ArgumentCount(args.len()).into()),
        }
    }

    fn build(email: &str, api_key: &str, domain: &str, subdomain: Option<String>) -> Result<Self> {
        Ok(Self {
            credentials: Credentials::new(email, api_key)?,
            target: Target::new(domain, subdomain),
        })
    }
}

/// Split an argument vector into program name and positional arguments
pub fn split_program(mut args: Vec<String>) -> (String, Vec<String>) {
    if args.is_empty() {
        return (DEFAULT_PROGRAM_NAME.to_string(), args);
    }
    let program = args.remove(0);
    (program, args)
}

/// Usage text
pub fn usage(program: &str) -> String {
    format!(
        "\
Usage: {program} <email> <API key> <domain> [<subdomain>]

Where:
  email      Is the email address registered with Cloudflare
  API key    Is the Cloudflare API key
  domain     Is the domain to update
  subdomain  Is the subdomain to update (optional)

This application is designed to be run as a cron to automate updating dynamic IP
addresses through Cloudflare's API.

The parameters of this application should be passed in the order as shown above.
The subdomain is optional, if it is not provided the application will assume the
domain is the record to be updated.
"
    )
}
