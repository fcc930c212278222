//! Error types for the Auth0 client

use serde_json::Value;
use thiserror::Error;

/// Result type alias for Auth0 operations.
pub type Result<T> = std::result::Result<T, Auth0Error>;

/// Message Auth0 returns when creating a user whose email is already taken.
pub(crate) const USER_ALREADY_EXISTS: &str = "The user already exists";

/// Errors that can occur when interacting with the Auth0 APIs
#[derive(Debug, Error)]
pub enum Auth0Error {
    /// Required configuration value is missing
    #[error("Missing {0} environment variable")]
    MissingConfig(&'static str),

    /// HTTP request could not be sent or its body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Access token exchange failed or returned no token
    #[error("Access token error: {reason}")]
    Auth {
        /// What went wrong with the exchange
        reason: String,
        /// Upstream response body, when one was received
        payload: Option<Value>,
    },

    /// Upstream responded with an error signal
    ///
    /// `payload` is the parsed response body as Auth0 sent it, so callers can
    /// inspect fields such as `message` or `errorCode` directly.
    #[error("Auth0 request failed (status {status}): {}", describe(.payload))]
    Request {
        /// HTTP status of the response
        status: u16,
        /// Raw error payload (non-JSON bodies are kept as a string value)
        payload: Value,
    },

    /// No user matched an email lookup
    #[error("No Auth0 user found for email {email}")]
    NotFound {
        /// Email that was looked up
        email: String,
    },

    /// Success response did not match the expected shape
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),
}

impl Auth0Error {
    /// HTTP status of the upstream response, when the error carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream payload attached to this error, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        match self {
            Self::Request { payload, .. } => Some(payload),
            Self::Auth { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Human-readable upstream message.
    ///
    /// Auth0 reports it under `message` for Management API errors and under
    /// `error_description` for Authentication API errors.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        let payload = self.payload()?;
        ["message", "error_description"]
            .iter()
            .find_map(|key| payload.get(key).and_then(Value::as_str))
            .or_else(|| payload.as_str())
    }

    /// Machine-readable upstream code (`errorCode`, falling back to `error`).
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        let payload = self.payload()?;
        payload
            .get("errorCode")
            .and_then(Value::as_str)
            .or_else(|| payload.get("error").and_then(Value::as_str))
    }

    /// Returns `true` if Auth0 rejected a user creation because the user exists.
    #[must_use]
    pub fn is_user_already_exists(&self) -> bool {
        matches!(self, Self::Request { .. })
            && self
                .message()
                .is_some_and(|message| message.contains(USER_ALREADY_EXISTS))
    }
}

impl From<reqwest::Error> for Auth0Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

fn describe(payload: &Value) -> String {
    payload
        .get("message")
        .or_else(|| payload.get("error_description"))
        .or_else(|| payload.get("error"))
        .and_then(Value::as_str)
        .or_else(|| payload.as_str())
        .map_or_else(|| payload.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_error_exposes_upstream_fields() {
        let error = Auth0Error::Request {
            status: 409,
            payload: json!({
                "statusCode": 409,
                "error": "Conflict",
                "message": "The user already exists.",
                "errorCode": "auth0_idp_error"
            }),
        };

        assert_eq!(error.status(), Some(409));
        assert_eq!(error.message(), Some("The user already exists."));
        assert_eq!(error.error_code(), Some("auth0_idp_error"));
        assert!(error.is_user_already_exists());
        assert_eq!(
            error.to_string(),
            "Auth0 request failed (status 409): The user already exists."
        );
    }

    #[test]
    fn test_authentication_api_error_description() {
        let error = Auth0Error::Request {
            status: 401,
            payload: json!({
                "error": "access_denied",
                "error_description": "Unauthorized"
            }),
        };

        assert_eq!(error.message(), Some("Unauthorized"));
        assert_eq!(error.error_code(), Some("access_denied"));
        assert!(!error.is_user_already_exists());
    }

    #[test]
    fn test_non_json_payload_is_its_own_message() {
        let error = Auth0Error::Request {
            status: 502,
            payload: Value::String("Bad Gateway".to_string()),
        };

        assert_eq!(error.message(), Some("Bad Gateway"));
        assert_eq!(error.to_string(), "Auth0 request failed (status 502): Bad Gateway");
    }

    #[test]
    fn test_only_request_errors_signal_existing_user() {
        let error = Auth0Error::Auth {
            reason: "token exchange rejected".to_string(),
            payload: Some(json!({ "message": "The user already exists." })),
        };

        assert!(!error.is_user_already_exists());
        assert_eq!(error.status(), None);
    }
}
