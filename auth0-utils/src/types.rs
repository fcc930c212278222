//! Request and response types for the Management API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user record as returned by the Management API.
///
/// Only `user_id` is required. Every other field Auth0 sends is kept in
/// `fields` and passed through untouched.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Auth0 user identifier (e.g., "auth0|64f1...")
    pub user_id: String,
    /// Primary email, when the user has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Remaining upstream fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl User {
    /// Look up an upstream field other than `user_id` and `email`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether Auth0 considers the email verified.
    #[must_use]
    pub fn email_verified(&self) -> bool {
        self.fields
            .get("email_verified")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Body of `POST /api/v2/users`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Email of the new user
    pub email: String,
    /// Initial password
    pub password: String,
    /// Database connection the user is created in
    pub connection: String,
    /// Send Auth0's verification email after creation
    pub verify_email: bool,
}

impl CreateUserRequest {
    /// Create a request with a generated password.
    ///
    /// Verification email is off by default.
    #[must_use]
    pub fn new(email: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: crate::password::generate_password(),
            connection: connection.into(),
            verify_email: false,
        }
    }

    /// Builder: Ask Auth0 to send its verification email
    #[must_use]
    pub const fn with_verify_email(mut self, verify_email: bool) -> Self {
        self.verify_email = verify_email;
        self
    }

    /// Builder: Use a caller-chosen password instead of a generated one
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

/// Body of `PATCH /api/v2/users/{id}`. Unset fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[allow(missing_docs)] // Field names mirror the Management API
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_phone_number: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_metadata: Option<Value>,
}

impl UserUpdate {
    /// Update that only sets a new password.
    #[must_use]
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..Self::default()
        }
    }
}

/// Query of `GET /api/v2/users`.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ListUsersQuery {
    /// Zero-based page index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Results per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Lucene query (e.g., `email:"jane@example.com"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Search engine version; Auth0 requires `v3` alongside `q`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<String>,
}

impl ListUsersQuery {
    /// Builder: Select a page
    #[must_use]
    pub const fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// Builder: Filter with a Lucene query
    #[must_use]
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self.search_engine = Some("v3".to_string());
        self
    }

    /// Query matching an exact email address.
    #[must_use]
    pub fn by_email(email: &str) -> Self {
        let escaped = email.replace('\\', "\\\\").replace('"', "\\\"");
        Self::default().with_query(format!("email:\"{escaped}\""))
    }
}

/// Body of `POST /api/v2/tickets/password-change`.
///
/// Auth0 accepts either `user_id` alone or `email` together with
/// `connection_id`. The combination is not checked locally; Auth0 rejects
/// malformed ones.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct PasswordChangeTicket {
    /// User the ticket is issued for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Email of the user (requires `connection_id`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Connection the email belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    /// Where the user is sent after changing the password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    /// Application whose login page the user returns to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Ticket lifetime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_sec: Option<u64>,
    /// Mark the email as verified once the password is changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_email_as_verified: Option<bool>,
    /// Append the email to `result_url`
    #[serde(rename = "includeEmailInRedirect", skip_serializing_if = "Option::is_none")]
    pub include_email_in_redirect: Option<bool>,
}

impl PasswordChangeTicket {
    /// Ticket for a user identified by ID.
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    /// Ticket for a user identified by email within a connection.
    #[must_use]
    pub fn for_email(email: impl Into<String>, connection_id: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            connection_id: Some(connection_id.into()),
            ..Self::default()
        }
    }

    /// Builder: Redirect target after the change
    #[must_use]
    pub fn with_result_url(mut self, result_url: impl Into<String>) -> Self {
        self.result_url = Some(result_url.into());
        self
    }

    /// Builder: Ticket lifetime
    #[must_use]
    pub const fn with_ttl_sec(mut self, ttl_sec: u64) -> Self {
        self.ttl_sec = Some(ttl_sec);
        self
    }

    /// Builder: Mark email verified on completion
    #[must_use]
    pub const fn with_mark_email_as_verified(mut self, mark: bool) -> Self {
        self.mark_email_as_verified = Some(mark);
        self
    }
}

/// Response of the password-change ticket endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TicketResponse {
    /// URL the user opens to reset the password
    pub ticket: String,
}

/// Secondary identity a verification email is sent for.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// User ID at the provider (without the provider prefix)
    pub user_id: String,
    /// Identity provider (e.g., "google-oauth2")
    pub provider: String,
}

/// Body of `POST /api/v2/jobs/verification-email`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VerificationEmailRequest {
    /// Auth0 user ID
    pub user_id: String,
    /// Application the email is sent on behalf of
    pub client_id: String,
    /// Identity to verify, for users with linked accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

/// Job created by the verification-email endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Job {
    /// Job identifier
    pub id: String,
    /// Job state (e.g., "pending", "completed")
    pub status: String,
    /// Job type (e.g., "verification_email")
    #[serde(rename = "type")]
    pub job_type: String,
    /// Remaining upstream fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_keeps_unknown_fields() {
        let user: User = serde_json::from_value(json!({
            "user_id": "auth0|123",
            "email": "jane@example.com",
            "email_verified": true,
            "app_metadata": { "plan": "pro" }
        }))
        .unwrap();

        assert_eq!(user.user_id, "auth0|123");
        assert_eq!(user.email.as_deref(), Some("jane@example.com"));
        assert!(user.email_verified());
        assert_eq!(user.get("app_metadata"), Some(&json!({ "plan": "pro" })));

        let round_tripped = serde_json::to_value(&user).unwrap();
        assert_eq!(round_tripped["app_metadata"]["plan"], "pro");
    }

    #[test]
    fn test_user_update_only_sends_set_fields() {
        let body = serde_json::to_value(UserUpdate::password("n3w-Secret")).unwrap();
        assert_eq!(body, json!({ "password": "n3w-Secret" }));
    }

    #[test]
    fn test_create_user_request_generates_password() {
        let request = CreateUserRequest::new("jane@example.com", "Username-Password-Authentication")
            .with_verify_email(true);

        assert!(request.password.starts_with('*') && request.password.ends_with('*'));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["verify_email"], true);
        assert_eq!(body["connection"], "Username-Password-Authentication");
    }

    #[test]
    fn test_ticket_serializes_redirect_flag_in_camel_case() {
        let ticket = PasswordChangeTicket::for_email("jane@example.com", "con_123")
            .with_ttl_sec(3600);
        let mut body = serde_json::to_value(&ticket).unwrap();
        assert_eq!(
            body,
            json!({ "email": "jane@example.com", "connection_id": "con_123", "ttl_sec": 3600 })
        );

        let flagged = PasswordChangeTicket {
            include_email_in_redirect: Some(true),
            ..PasswordChangeTicket::for_user("auth0|1")
        };
        body = serde_json::to_value(&flagged).unwrap();
        assert_eq!(body["includeEmailInRedirect"], true);
    }

    #[test]
    fn test_email_query_escapes_quotes() {
        let query = ListUsersQuery::by_email("odd\"name@example.com");
        assert_eq!(query.q.as_deref(), Some("email:\"odd\\\"name@example.com\""));
        assert_eq!(query.search_engine.as_deref(), Some("v3"));
    }
}
