//! Auth0 client implementation

use crate::{
    config::Auth0Config,
    error::Result,
    fetch::normalize,
    token::{AccessToken, ClientCredentialsRequest, TokenCache, fetch_access_token},
};
use reqwest::{
    Client, Method, RequestBuilder, Response,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;

/// Auth0 Authentication and Management API client
///
/// Cloning is cheap; clones share the HTTP connection pool and the cached
/// access token.
#[derive(Clone, Debug)]
pub struct Auth0Client {
    http: Client,
    config: Auth0Config,
    tokens: TokenCache,
}

impl Auth0Client {
    /// Create a new client for a tenant
    #[must_use]
    pub fn new(config: Auth0Config) -> Self {
        Self {
            http: Client::new(),
            config,
            tokens: TokenCache::new(),
        }
    }

    /// Create a client from `AUTH0_DOMAIN`, `AUTH0_M2M_CLIENT_ID` and
    /// `AUTH0_M2M_CLIENT_SECRET`
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::MissingConfig` if a variable is not set
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Auth0Config::from_env()?))
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, ...)
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Tenant configuration
    #[must_use]
    pub const fn config(&self) -> &Auth0Config {
        &self.config
    }

    pub(crate) const fn http(&self) -> &Client {
        &self.http
    }

    /// Make sure a Management API token is cached and return it
    ///
    /// The first call performs a client-credentials exchange; later calls
    /// return the cached token without touching the network.
    ///
    /// # Errors
    ///
    /// Returns `Auth0Error::Auth` if Auth0 does not issue a token or the token
    /// endpoint is unreachable. Nothing is cached in either case.
    pub async fn ensure_token(&self) -> Result<AccessToken> {
        let token_url = self.config.token_url();
        let request = ClientCredentialsRequest::new(
            self.config.audience(),
            &self.config.client_id,
            &self.config.client_secret,
        );

        self.tokens
            .get_or_fetch(|| fetch_access_token(&self.http, &token_url, &request))
            .await
    }

    /// Start an authenticated Management API request to `/api/v2/{path}`
    pub(crate) async fn management(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.ensure_token().await?;

        tracing::debug!(%method, path, "Auth0 Management API request");

        Ok(self
            .http
            .request(method, self.config.api_url(path))
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, token.bearer()))
    }

    /// Send a request and run its response through normalization
    pub(crate) async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        normalize(Self::send(request).await?).await
    }

    pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
        Ok(request.send().await?)
    }
}

/// Percent-encode a path segment (user IDs contain `|`).
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
