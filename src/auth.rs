//! Credential loading.
//!
//! The executor only needs an opaque bearer token. Loading follows the usual
//! precedence: OS keyring first, then the `TICKETING_API_TOKEN` environment
//! variable.

use crate::{Error, Result};
use keyring::Entry;
use std::env;
use std::fmt;

const KEYRING_SERVICE: &str = "ticketing-client";
const TOKEN_ENV_VAR: &str = "TICKETING_API_TOKEN";

/// Opaque bearer token for the upstream API.
#[derive(Clone)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Load a credential for the given profile name.
    ///
    /// Tries the OS keyring entry `ticketing-client/<profile>`, then falls back
    /// to `TICKETING_API_TOKEN`.
    pub fn load(profile: &str) -> Result<Self> {
        if let Ok(entry) = Entry::new(KEYRING_SERVICE, profile) {
            if let Ok(token) = entry.get_password() {
                return Ok(Self::new(token));
            }
        }

        env::var(TOKEN_ENV_VAR).map(Self::new).map_err(|_| {
            Error::configuration(format!(
                "no API token found in keyring for profile '{profile}' or in {TOKEN_ENV_VAR}"
            ))
        })
    }
}

// Never leak the token through Debug output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential").field("token", &"***").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let cred = Credential::new("u+very-secret");
        let rendered = format!("{cred:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_token_round_trip() {
        let cred = Credential::new("abc123");
        assert_eq!(cred.token(), "abc123");
    }
}
