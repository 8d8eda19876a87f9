//! HTTP request building.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Upper-case method name, as used in OAuth 1.0a signature base strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
        }
    }
}

/// Builder for HTTP requests.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Option<RequestBody>,
    /// Full value of the Authorization header.
    pub(crate) authorization: Option<String>,
}

/// Request body content.
#[derive(Debug)]
pub enum RequestBody {
    Json(serde_json::Value),
    Text(String),
    Form(Vec<(String, String)>),
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query_params: Vec::new(),
            body: None,
            authorization: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The request URL without query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query parameters added so far.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    /// Form parameters, if the body is a form.
    pub fn form_params(&self) -> &[(String, String)] {
        match &self.body {
            Some(RequestBody::Form(params)) => params,
            _ => &[],
        }
    }

    /// Set the bearer token for authentication.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.authorization(format!("Bearer {}", token.as_ref()))
    }

    /// Set a GitHub style `token` authorization.
    pub fn token_auth(self, token: impl AsRef<str>) -> Self {
        self.authorization(format!("token {}", token.as_ref()))
    }

    /// Set the raw Authorization header value.
    pub fn authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Set JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(RequestBody::Json(value));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    /// Set text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self.headers
            .insert("Content-Type".to_string(), "text/plain".to_string());
        self
    }

    /// Set an `application/x-www-form-urlencoded` body.
    ///
    /// Parameter order is preserved.
    pub fn form<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.body = Some(RequestBody::Form(params));
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        self
    }

    /// The URL including encoded query parameters.
    pub fn full_url(&self) -> Result<String> {
        if self.query_params.is_empty() {
            return Ok(self.url.clone());
        }
        let mut url = url::Url::parse(&self.url)?;
        url.query_pairs_mut().extend_pairs(&self.query_params);
        Ok(url.to_string())
    }
}
