//! Base-URL aware client with typed JSON methods.
//!
//! `ApiClient` binds a [`QeHttpClient`] to one service: a base URL, an
//! authorization scheme and a set of default headers. The service crates
//! (`qe-rest`, `qe-salesforce`, `qe-twitter`, `qe-github`) build on it.
//!
//! ## Security
//!
//! - Tokens are redacted in Debug output
//! - Request bodies are skipped in tracing spans

use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use crate::client::QeHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::RequestBuilder;
use crate::response::Response;

/// Authorization scheme applied to every request of an [`ApiClient`].
#[derive(Clone, Default)]
pub enum Auth {
    /// No Authorization header. Callers may sign requests themselves.
    #[default]
    None,
    /// `Authorization: Bearer <token>`.
    Bearer(String),
    /// `Authorization: token <token>` (GitHub personal access tokens).
    Token(String),
}

impl Auth {
    /// Bearer token authorization.
    pub fn bearer(token: impl Into<String>) -> Self {
        Auth::Bearer(token.into())
    }

    /// GitHub style token authorization.
    pub fn token(token: impl Into<String>) -> Self {
        Auth::Token(token.into())
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Auth::None => request,
            Auth::Bearer(token) => request.bearer_auth(token),
            Auth::Token(token) => request.token_auth(token),
        }
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::None => f.write_str("None"),
            Auth::Bearer(_) => f.write_str("Bearer([REDACTED])"),
            Auth::Token(_) => f.write_str("Token([REDACTED])"),
        }
    }
}

/// HTTP client bound to a single service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: QeHttpClient,
    base_url: String,
    auth: Auth,
    default_headers: Vec<(String, String)>,
}

impl ApiClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>, auth: Auth) -> Result<Self> {
        Self::with_config(base_url, auth, ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(base_url: impl Into<String>, auth: Auth, config: ClientConfig) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)?;

        Ok(Self {
            http: QeHttpClient::new(config)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            default_headers: Vec::new(),
        })
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the underlying HTTP client.
    pub fn http(&self) -> &QeHttpClient {
        &self.http
    }

    /// Build the full URL for a path.
    ///
    /// Absolute URLs are returned unchanged, anything else is joined to the
    /// base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = self
            .default_headers
            .iter()
            .fold(request, |req, (name, value)| req.header(name, value));
        self.auth.apply(request)
    }

    /// Create a GET request builder with authentication.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.prepare(self.http.get(self.url(path)))
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.prepare(self.http.post(self.url(path)))
    }

    /// Create a PUT request builder with authentication.
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.prepare(self.http.put(self.url(path)))
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.prepare(self.http.delete(self.url(path)))
    }

    /// Execute a request and return the raw response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        self.http.execute(request).await
    }

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.get(path)).await?.json().await
    }

    /// GET request that maps a missing resource to `None`.
    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn get_json_opt<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.execute(self.get(path)).await {
            Ok(response) => response.json().await.map(Some),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// POST request with JSON body and response.
    #[instrument(skip(self, body), fields(base = %self.base_url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.post(path).json(body)?;
        self.execute(request).await?.json().await
    }

    /// DELETE request. Success statuses, including 204, yield `Ok(())`.
    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn delete_request(&self, path: &str) -> Result<()> {
        self.execute(self.delete(path)).await.map(|_| ())
    }
}
