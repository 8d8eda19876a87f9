//! OAuth 2.0 username-password login.
//!
//! All credential types implement custom Debug to redact sensitive data.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{Error, ErrorKind, Result};

/// Default Salesforce login URL.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Connected-app and user credentials for the password grant.
#[derive(Clone)]
pub struct PasswordCredentials {
    login_url: String,
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
}

impl std::fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("login_url", &self.login_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl PasswordCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            login_url: PRODUCTION_LOGIN_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Use a different login URL (sandbox, My Domain, mock server).
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exchange the credentials for an access token.
    #[instrument(skip(self), fields(username = %self.username, login_url = %self.login_url))]
    pub async fn login(&self) -> Result<TokenResponse> {
        let params = [
            ("grant_type", "password"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ];
        let body = serde_urlencoded::to_string(params)?;

        let response = reqwest::Client::new()
            .post(format!("{}/services/oauth2/token", self.login_url))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(body)
            .send()
            .await?;

        let token = handle_token_response(response).await?;
        info!(instance_url = %token.instance_url, "Logged in to Salesforce");
        Ok(token)
    }
}

async fn handle_token_response(response: reqwest::Response) -> Result<TokenResponse> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(match serde_json::from_str::<OAuthErrorResponse>(&body) {
            Ok(error) => Error::new(ErrorKind::OAuth {
                error: error.error,
                description: error.error_description,
            }),
            Err(_) => Error::new(ErrorKind::Http(format!(
                "token endpoint returned {}",
                status.as_u16()
            ))),
        });
    }

    serde_json::from_str(&body).map_err(Into::into)
}

/// Token response from OAuth.
///
/// `access_token` and `signature` are redacted in Debug output.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Instance URL.
    pub instance_url: String,
    /// User ID URL.
    #[serde(default)]
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
    /// Issued at timestamp.
    #[serde(default)]
    pub issued_at: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}
