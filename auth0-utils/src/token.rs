//! Machine-to-machine access tokens.
//!
//! A client holds at most one token. It is fetched lazily on first use and
//! then reused for the life of the client. Expiry is recorded but never acted
//! on, so long-lived processes will eventually get 401s from Auth0.

use crate::error::{Auth0Error, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Reason reported when a token response has no usable `access_token`.
const MISSING_TOKEN: &str = "There was a problem with the access token";

/// Token returned by `POST /oauth/token`.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct AccessToken {
    /// Opaque bearer token
    pub access_token: String,
    /// Token type, normally "Bearer"
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds as reported by Auth0 (informational)
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Granted scopes
    #[serde(default)]
    pub scope: Option<String>,
    /// When this process received the token
    #[serde(skip, default = "Utc::now")]
    pub obtained_at: DateTime<Utc>,
}

impl AccessToken {
    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Body of a client-credentials grant.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct ClientCredentialsRequest {
    /// API the token is requested for
    pub audience: String,
    /// Always `client_credentials`
    pub grant_type: &'static str,
    /// M2M application client ID
    pub client_id: String,
    /// M2M application client secret
    pub client_secret: String,
}

impl ClientCredentialsRequest {
    /// Create a client-credentials grant for `audience`.
    #[must_use]
    pub fn new(
        audience: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            audience: audience.into(),
            grant_type: "client_credentials",
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for ClientCredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsRequest")
            .field("audience", &self.audience)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Exchange client credentials for an access token.
///
/// Usable without an [`Auth0Client`](crate::Auth0Client), e.g. to hand a
/// Management API token to another service.
///
/// # Errors
///
/// Returns `Auth0Error::Auth` if the exchange cannot be completed or the
/// response carries no `access_token`
pub async fn fetch_access_token(
    http: &Client,
    token_url: &str,
    request: &ClientCredentialsRequest,
) -> Result<AccessToken> {
    let response = http
        .post(token_url)
        .header(CONTENT_TYPE, "application/json")
        .json(request)
        .send()
        .await
        .map_err(exchange_failed)?;

    let status = response.status();
    let text = response.text().await.map_err(exchange_failed)?;
    parse_token_response(status.as_u16(), &text)
}

fn exchange_failed(error: reqwest::Error) -> Auth0Error {
    tracing::warn!(%error, "Token exchange failed");
    Auth0Error::Auth {
        reason: format!("{MISSING_TOKEN}: {error}"),
        payload: None,
    }
}

fn parse_token_response(status: u16, text: &str) -> Result<AccessToken> {
    let Ok(body) = serde_json::from_str::<Value>(text) else {
        tracing::warn!(status, "Token endpoint returned a non-JSON body");
        return Err(Auth0Error::Auth {
            reason: format!("{MISSING_TOKEN} (status {status})"),
            payload: Some(Value::String(text.to_string())),
        });
    };

    let has_token = body
        .get("access_token")
        .and_then(Value::as_str)
        .is_some_and(|token| !token.is_empty());
    if !has_token {
        let error = body.get("error").and_then(Value::as_str).unwrap_or_default();
        tracing::warn!(status, error, "Token response has no access_token");
        return Err(Auth0Error::Auth {
            reason: MISSING_TOKEN.to_string(),
            payload: Some(body),
        });
    }

    serde_json::from_value(body).map_err(|e| Auth0Error::Auth {
        reason: format!("Malformed token response: {e}"),
        payload: None,
    })
}

/// Single-slot token cache shared by clones of one client.
///
/// The slot is locked for the whole acquisition, so concurrent first callers
/// wait for one exchange instead of racing several.
#[derive(Clone, Default)]
pub struct TokenCache {
    slot: Arc<Mutex<Option<AccessToken>>>,
}

impl TokenCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, running `fetch` only when the slot is empty.
    ///
    /// # Errors
    ///
    /// Propagates the error from `fetch`; the slot stays empty so the next
    /// call tries again.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<AccessToken>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AccessToken>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(token) = slot.as_ref() {
            tracing::debug!("Reusing cached Auth0 access token");
            return Ok(token.clone());
        }

        tracing::debug!("Requesting Auth0 access token");
        let token = fetch().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Currently cached token, if any.
    pub async fn cached(&self) -> Option<AccessToken> {
        self.slot.lock().await.clone()
    }
}

impl fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.slot.try_lock() {
            Ok(slot) if slot.is_some() => "cached",
            Ok(_) => "empty",
            Err(_) => "acquiring",
        };
        f.debug_struct("TokenCache").field("state", &state).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn token(value: &str) -> AccessToken {
        let body = format!(r#"{{"access_token":"{value}","token_type":"Bearer"}}"#);
        parse_token_response(200, &body).unwrap()
    }

    #[test]
    fn test_token_response_is_parsed() {
        let body = serde_json::json!({
            "access_token": "abc",
            "token_type": "Bearer",
            "expires_in": 86400,
            "scope": "read:users"
        });
        let parsed = parse_token_response(200, &body.to_string()).unwrap();

        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.expires_in, Some(86400));
        assert_eq!(parsed.bearer(), "Bearer abc");
    }

    #[test]
    fn test_missing_access_token_is_an_auth_error() {
        let result = parse_token_response(401, r#"{"error":"access_denied"}"#);

        match result {
            Err(Auth0Error::Auth { reason, payload }) => {
                assert_eq!(reason, MISSING_TOKEN);
                assert_eq!(payload.unwrap()["error"], "access_denied");
            }
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_access_token_is_rejected() {
        let result = parse_token_response(200, r#"{"access_token":""}"#);
        assert!(matches!(result, Err(Auth0Error::Auth { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_token_endpoint_is_an_auth_error() {
        let request = ClientCredentialsRequest::new("https://tenant/api/v2/", "id", "secret");
        let url = "http://127.0.0.1:1/oauth/token";
        let result = fetch_access_token(&Client::new(), url, &request).await;

        match result {
            Err(Auth0Error::Auth { reason, payload }) => {
                assert!(reason.starts_with(MISSING_TOKEN));
                assert!(payload.is_none());
            }
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", token("very-secret-token"));
        assert!(!debug.contains("very-secret-token"));
    }

    #[tokio::test]
    async fn test_cache_fetches_once() {
        let cache = TokenCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let fetched = cache
                .get_or_fetch(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(token("abc"))
                })
                .await
                .unwrap();
            assert_eq!(fetched.access_token, "abc");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_empty() {
        let cache = TokenCache::new();

        let result = cache
            .get_or_fetch(|| async {
                Err(Auth0Error::Auth {
                    reason: MISSING_TOKEN.to_string(),
                    payload: None,
                })
            })
            .await;
        assert!(result.is_err());
        assert!(cache.cached().await.is_none());

        let retried = cache.get_or_fetch(|| async { Ok(token("second")) }).await.unwrap();
        assert_eq!(retried.access_token, "second");
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let cache = TokenCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_fetch(|| async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::task::yield_now().await;
                            Ok(token("shared"))
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap().access_token, "shared");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
