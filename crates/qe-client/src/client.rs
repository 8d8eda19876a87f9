//! Core HTTP client with retry and error mapping.

use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{is_retryable_status, Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder, RequestMethod};
use crate::response::{Response, ResponseExt};
use crate::retry::RetryPolicy;

/// HTTP client shared by every service client, with retry and error mapping.
#[derive(Debug, Clone)]
pub struct QeHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl QeHttpClient {
    /// Create a new HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Create a PUT request builder.
    pub fn put(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Put, url)
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Delete, url)
    }

    /// Execute a request with automatic retry handling.
    ///
    /// Non-success responses are turned into errors.
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut retry_policy = self
            .config
            .retry
            .as_ref()
            .map(|c| RetryPolicy::new(c.clone()));

        loop {
            match self.execute_once(&request).await {
                Ok(response) => return response.check_api_error().await,
                Err(err) if err.is_retryable() => {
                    let Some(ref mut policy) = retry_policy else {
                        return Err(err);
                    };

                    if let Some(delay) = policy.next_delay(err.retry_after()) {
                        warn!(
                            attempt = policy.attempt(),
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    return Err(Error::with_source(
                        ErrorKind::RetriesExhausted {
                            attempts: policy.attempt(),
                        },
                        err,
                    ));
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Execute a single request without retry logic.
    async fn execute_once(&self, request: &RequestBuilder) -> Result<Response> {
        let url = request.full_url()?;
        let mut req = self.inner.request(request.method.to_reqwest(), &url);

        if let Some(ref authorization) = request.authorization {
            req = req.header("Authorization", authorization.as_str());
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.body(serde_json::to_vec(value)?),
                RequestBody::Text(text) => req.body(text.clone()),
                RequestBody::Form(params) => req.body(serde_urlencoded::to_string(params)?),
            };
        }

        if self.config.enable_tracing {
            debug!(method = ?request.method, url = %request.url, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        if self.config.enable_tracing {
            let content_length = response.content_length();
            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);

            return Err(Error::new(ErrorKind::RateLimited { retry_after }));
        }

        if is_retryable_status(status) {
            return Err(Error::new(ErrorKind::Http {
                status,
                message: format!("Server error: {status}"),
            }));
        }

        Ok(Response::new(response))
    }

    /// Execute a request and deserialize the JSON response.
    pub async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        self.execute(request).await?.json().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn no_retry_client() -> QeHttpClient {
        QeHttpClient::new(ClientConfig::builder().without_retry().build()).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = QeHttpClient::default_client().unwrap();
        assert!(client.config().accept_compressed);
    }

    #[tokio::test]
    async fn test_successful_request_with_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/statuses/user_timeline.json"))
            .and(query_param("screen_name", "talky"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let client = no_retry_client();
        let body: Vec<serde_json::Value> = client
            .send_json(
                client
                    .get(format!("{}/statuses/user_timeline.json", mock_server.uri()))
                    .query("screen_name", "talky")
                    .bearer_auth("test-token"),
            )
            .await
            .unwrap();

        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_form_body_is_encoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string("grant_type=password&username=qe%40example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = no_retry_client();
        let response = client
            .execute(
                client
                    .post(format!("{}/token", mock_server.uri()))
                    .form([("grant_type", "password"), ("username", "qe@example.com")]),
            )
            .await
            .unwrap();

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/error"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!([{
                "errorCode": "MALFORMED_QUERY",
                "message": "unexpected token: FROM",
            }])))
            .mount(&mock_server)
            .await;

        let client = no_retry_client();
        let err = client
            .execute(client.get(format!("{}/error", mock_server.uri())))
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Api { ref code, .. } if code == "MALFORMED_QUERY"));
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/repos/qe/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Not Found"})),
            )
            .mount(&mock_server)
            .await;

        let client = no_retry_client();
        let err = client
            .execute(
                client
                    .delete(format!("{}/repos/qe/missing", mock_server.uri()))
                    .token_auth("t"),
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_rate_limiting() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/limited"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
            .mount(&mock_server)
            .await;

        let client = no_retry_client();
        let err = client
            .execute(client.get(format!("{}/limited", mock_server.uri())))
            .await
            .unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
    }

    #[tokio::test]
    async fn test_retry_on_503() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        let mock_server = MockServer::start().await;
        let call_count = Arc::new(AtomicU32::new(0));
        let call_count_clone = call_count.clone();

        Mock::given(method("GET"))
            .and(path("/retry"))
            .respond_with(move |_: &wiremock::Request| {
                let count = call_count_clone.fetch_add(1, Ordering::SeqCst);
                if count < 2 {
                    ResponseTemplate::new(503)
                } else {
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true}))
                }
            })
            .mount(&mock_server)
            .await;

        let client = QeHttpClient::new(
            ClientConfig::builder()
                .with_retry(
                    crate::RetryConfig::default()
                        .with_max_attempts(3)
                        .with_initial_delay(Duration::from_millis(10)),
                )
                .build(),
        )
        .unwrap();

        let response = client
            .execute(client.get(format!("{}/retry", mock_server.uri())))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(502))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = QeHttpClient::new(
            ClientConfig::builder()
                .with_retry(
                    crate::RetryConfig::default()
                        .with_max_attempts(1)
                        .with_initial_delay(Duration::from_millis(5)),
                )
                .build(),
        )
        .unwrap();

        let err = client
            .execute(client.get(format!("{}/down", mock_server.uri())))
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::RetriesExhausted { attempts: 1 }));
    }
}
