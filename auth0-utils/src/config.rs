//! Auth0 tenant configuration.
//!
//! The client needs the tenant domain and the credentials of a
//! machine-to-machine application authorized for the Management API.

use crate::error::{Auth0Error, Result};
use std::fmt;

/// Environment variable holding the tenant domain.
pub const DOMAIN_ENV: &str = "AUTH0_DOMAIN";
/// Environment variable holding the M2M application client ID.
pub const CLIENT_ID_ENV: &str = "AUTH0_M2M_CLIENT_ID";
/// Environment variable holding the M2M application client secret.
pub const CLIENT_SECRET_ENV: &str = "AUTH0_M2M_CLIENT_SECRET";

/// Connection details for an Auth0 tenant.
#[derive(Clone, PartialEq, Eq)]
pub struct Auth0Config {
    /// Tenant domain (e.g., "your-app.us.auth0.com").
    pub domain: String,

    /// Client ID of the M2M application.
    pub client_id: String,

    /// Client secret of the M2M application (keep confidential).
    pub client_secret: String,

    /// Origin requests are sent to.
    ///
    /// Default: `https://{domain}`
    pub base_url: String,
}

impl Auth0Config {
    /// Create configuration for a tenant.
    ///
    /// # Arguments
    ///
    /// * `domain` - Tenant domain without scheme (e.g., "your-app.us.auth0.com")
    /// * `client_id` - M2M application client ID
    /// * `client_secret` - M2M application client secret
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let domain = domain.into();
        Self {
            base_url: format!("https://{domain}"),
            domain,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load configuration from `AUTH0_DOMAIN`, `AUTH0_M2M_CLIENT_ID` and
    /// `AUTH0_M2M_CLIENT_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::MissingConfig` naming the first variable that is
    /// unset or empty.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            require_env(DOMAIN_ENV)?,
            require_env(CLIENT_ID_ENV)?,
            require_env(CLIENT_SECRET_ENV)?,
        ))
    }

    /// Send requests to a different origin.
    ///
    /// The audience still names the tenant domain; only the transport target
    /// changes. Useful for custom domains and local test servers.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Management API audience: `https://{domain}/api/v2/`.
    #[must_use]
    pub fn audience(&self) -> String {
        format!("https://{}/api/v2/", self.domain)
    }

    /// Token endpoint of the Authentication API.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.base_url)
    }

    /// URL of a Management API path (e.g., `"users"` → `.../api/v2/users`).
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v2/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for Auth0Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth0Config")
            .field("domain", &self.domain)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn require_env(name: &'static str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(Auth0Error::MissingConfig(name))
}
