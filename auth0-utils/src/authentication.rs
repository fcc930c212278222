//! Authentication API: end-user credential checks

use crate::{
    client::Auth0Client,
    error::{Auth0Error, Result},
    fetch::error_payload,
};
use reqwest::{StatusCode, header::CONTENT_TYPE};
use serde::Serialize;
use std::fmt;

/// Resource owner password grant.
#[derive(Clone, Serialize)]
pub struct PasswordGrantRequest {
    /// `password`, or the password-realm grant when a realm is set
    pub grant_type: &'static str,
    /// User's email or username
    pub username: String,
    /// User's password
    pub password: String,
    /// Requested scopes
    pub scope: String,
    /// API the token would be issued for
    pub audience: String,
    /// Application client ID
    pub client_id: String,
    /// Application client secret
    pub client_secret: String,
    /// Connection to authenticate against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

impl PasswordGrantRequest {
    /// Password grant for `username` using the client's application.
    #[must_use]
    pub fn new(
        client: &Auth0Client,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let config = client.config();
        Self {
            grant_type: "password",
            username: username.into(),
            password: password.into(),
            scope: "openid".to_string(),
            audience: config.audience(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            realm: None,
        }
    }

    /// Builder: Authenticate against a specific connection
    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.grant_type = "http://auth0.com/oauth/grant-type/password-realm";
        self.realm = Some(realm.into());
        self
    }

    /// Builder: Request different scopes
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }
}

impl fmt::Debug for PasswordGrantRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordGrantRequest")
            .field("grant_type", &self.grant_type)
            .field("username", &self.username)
            .field("scope", &self.scope)
            .field("realm", &self.realm)
            .finish_non_exhaustive()
    }
}

impl Auth0Client {
    /// Check a user's email/password against Auth0
    ///
    /// Returns `Ok(false)` when Auth0 answers 403 (wrong credentials). The
    /// token obtained on success is discarded.
    ///
    /// # Errors
    ///
    /// - `Auth0Error::Network` if Auth0 is unreachable
    /// - `Auth0Error::Request` for any other non-2xx answer
    pub async fn validate_user_credentials(&self, username: &str, password: &str) -> Result<bool> {
        self.validate_credentials(&PasswordGrantRequest::new(self, username, password))
            .await
    }

    /// Check credentials with a fully specified password grant
    ///
    /// # Errors
    ///
    /// Same as [`Auth0Client::validate_user_credentials`]
    pub async fn validate_credentials(&self, request: &PasswordGrantRequest) -> Result<bool> {
        let builder = self
            .http()
            .post(self.config().token_url())
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        let response = Self::send(builder).await?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::FORBIDDEN {
            tracing::debug!("Auth0 rejected user credentials");
            return Ok(false);
        }

        let text = response.text().await?;
        tracing::warn!(status = status.as_u16(), "Password grant failed");
        Err(Auth0Error::Request {
            status: status.as_u16(),
            payload: error_payload(&text),
        })
    }
}
