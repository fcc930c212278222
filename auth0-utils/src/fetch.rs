//! Response normalization shared by every endpoint.
//!
//! Auth0 endpoints disagree on how they report failure: some send an `error`
//! field, some a `statusCode`, some only set the HTTP status. Everything is
//! funnelled through [`normalize`] so callers see one contract.

use crate::error::{Auth0Error, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Read a response and decode it, or surface its error payload.
///
/// # Errors
///
/// - `Auth0Error::Network` if the body cannot be read
/// - `Auth0Error::Request` if the response carries an error signal
/// - `Auth0Error::ResponseParseFailed` if a success body is not a `T`
pub async fn normalize<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;
    normalize_body(status, &text)
}

/// Decode an already-read body. See [`normalize`].
///
/// # Errors
///
/// Same as [`normalize`], minus transport failures.
pub fn normalize_body<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T> {
    let body = parse_json(text);

    match body {
        Some(payload) if has_error_signal(&payload) || !status.is_success() => {
            tracing::warn!(status = status.as_u16(), "Auth0 returned an error payload");
            Err(Auth0Error::Request {
                status: status.as_u16(),
                payload,
            })
        }
        Some(payload) => serde_json::from_value(payload)
            .map_err(|e| Auth0Error::ResponseParseFailed(e.to_string())),
        None if !status.is_success() => {
            tracing::warn!(status = status.as_u16(), "Auth0 returned a non-JSON error body");
            Err(Auth0Error::Request {
                status: status.as_u16(),
                payload: error_payload(text),
            })
        }
        None => Err(Auth0Error::ResponseParseFailed(format!(
            "expected JSON body, got: {}",
            truncate(text)
        ))),
    }
}

/// `true` when a body carries an `error` field or a `statusCode` ≥ 400.
#[must_use]
pub fn has_error_signal(body: &Value) -> bool {
    let has_error = body.get("error").is_some_and(|error| !error.is_null());
    let failed_status = body
        .get("statusCode")
        .and_then(Value::as_u64)
        .is_some_and(|code| code >= 400);
    has_error || failed_status
}

/// Parse an error body, keeping non-JSON text as a string value.
pub(crate) fn error_payload(text: &str) -> Value {
    parse_json(text).unwrap_or_else(|| Value::String(text.to_string()))
}

// Empty bodies (204s, some DELETEs) read as `null`.
fn parse_json(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return Some(Value::Null);
    }
    serde_json::from_str(text).ok()
}

fn truncate(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(200)
        .map_or(text.len(), |(index, _)| index);
    &text[..end]
}
