//! Shared fixtures for HTTP-level tests against a mock Auth0 tenant.

#![allow(dead_code)]

use auth0_utils::{Auth0Client, Auth0Config};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DOMAIN: &str = "tenant.auth0.com";
pub const CLIENT_ID: &str = "m2m-client-id";
pub const CLIENT_SECRET: &str = "m2m-client-secret";
pub const TOKEN: &str = "mgmt-token";
pub const CONNECTION: &str = "Username-Password-Authentication";

/// Client pointed at the mock server.
pub fn client(server: &MockServer) -> Auth0Client {
    Auth0Client::new(
        Auth0Config::new(DOMAIN, CLIENT_ID, CLIENT_SECRET).with_base_url(server.uri()),
    )
}

/// Client-credentials exchange that must happen exactly `times` times.
pub async fn mount_token(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_partial_json(json!({
            "grant_type": "client_credentials",
            "audience": format!("https://{DOMAIN}/api/v2/"),
            "client_id": CLIENT_ID,
            "client_secret": CLIENT_SECRET,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TOKEN,
            "token_type": "Bearer",
            "expires_in": 86400,
            "scope": "read:users create:users"
        })))
        .expect(times)
        .mount(server)
        .await;
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

pub fn user_json(user_id: &str, email: &str) -> Value {
    json!({
        "user_id": user_id,
        "email": email,
        "email_verified": false,
        "identities": [{ "connection": CONNECTION, "provider": "auth0", "isSocial": false }],
        "created_at": "2024-01-01T00:00:00.000Z"
    })
}

pub fn already_exists() -> Value {
    json!({
        "statusCode": 409,
        "error": "Conflict",
        "message": "The user already exists.",
        "errorCode": "auth0_idp_error"
    })
}
