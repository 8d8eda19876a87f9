//! HTTP response handling and error body mapping.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::security::sanitize_error_message;

/// Wrapper around an HTTP response.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Returns true if this is a 204 No Content response.
    pub fn is_no_content(&self) -> bool {
        self.status() == 204
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the Retry-After header as a Duration (seconds form only).
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")?
            .trim()
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.inner.text().await?;
        serde_json::from_str(&body).map_err(Into::into)
    }

    /// Get access to the inner reqwest::Response.
    pub fn into_inner(self) -> reqwest::Response {
        self.inner
    }
}

/// Extension trait for processing API responses.
pub trait ResponseExt {
    /// Check for an error status and convert the body to an appropriate error.
    fn check_api_error(self) -> impl std::future::Future<Output = Result<Response>> + Send;
}

impl ResponseExt for Response {
    async fn check_api_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let retry_after = self.retry_after();
        let body = self.text().await.unwrap_or_default();
        let mut err = parse_error_response(status, &body);
        if let ErrorKind::RateLimited {
            retry_after: ref mut slot,
        } = err.kind
        {
            *slot = retry_after;
        }
        Err(err)
    }
}

/// Map an error status and body to an error.
///
/// Understands the error shapes of the services under test:
/// - Salesforce: `[{"errorCode": "...", "message": "..."}]`
/// - Syndesis: `{"errorCode": 500, "userMsg": "...", "developerMsg": "..."}`
/// - Twitter: `{"errors": [{"code": 34, "message": "..."}]}`
/// - OAuth: `{"error": "...", "error_description": "..."}`
/// - GitHub: `{"message": "..."}`
pub(crate) fn parse_error_response(status: u16, body: &str) -> Error {
    if status == 429 {
        return Error::new(ErrorKind::RateLimited { retry_after: None });
    }

    let parsed = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| extract_api_error(&value));

    let message = match parsed {
        Some((Some(code), message)) => {
            return Error::new(ErrorKind::Api {
                status,
                code,
                message: sanitize_error_message(&message),
            });
        }
        Some((None, message)) => sanitize_error_message(&message),
        None => sanitize_error_message(body),
    };

    let kind = match status {
        401 => ErrorKind::Authentication(message),
        403 => ErrorKind::Authorization(message),
        404 => ErrorKind::NotFound(message),
        _ => ErrorKind::Http { status, message },
    };

    Error::new(kind)
}

/// Pull an (optional code, message) pair out of a JSON error body.
fn extract_api_error(value: &Value) -> Option<(Option<String>, String)> {
    match value {
        Value::Array(items) => items.first().and_then(extract_api_error),
        Value::Object(map) => {
            if let Some(errors) = map.get("errors").filter(|e| e.is_array()) {
                if let Some(found) = extract_api_error(errors) {
                    return Some(found);
                }
            }

            let code = ["errorCode", "code", "error"]
                .iter()
                .find_map(|key| map.get(*key))
                .and_then(scalar_to_string);
            let message = ["message", "userMsg", "error_description", "developerMsg"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string);

            match (code, message) {
                (code, Some(message)) => Some((code, message)),
                (Some(code), None) => Some((Some(code.clone()), code)),
                (None, None) => None,
            }
        }
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
