//! Twitter REST API v1.1 client.

use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use syndesis_qe_client::{ApiClient, Auth, ClientConfig, RequestBuilder};

use crate::error::Result;
use crate::oauth1::OAuth1Credentials;
use crate::types::{Status, User};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1";

/// Statuses fetched per timeline request.
const TIMELINE_COUNT: &str = "200";

/// Twitter client acting as one account. Every request is OAuth 1.0a signed.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: ApiClient,
    credentials: OAuth1Credentials,
    screen_name: String,
}

impl TwitterClient {
    /// Create a client for the account `screen_name`.
    pub fn new(credentials: OAuth1Credentials, screen_name: impl Into<String>) -> Result<Self> {
        Self::with_config(DEFAULT_BASE_URL, credentials, screen_name, ClientConfig::default())
    }

    /// Create a client against a custom base URL with custom HTTP configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        credentials: OAuth1Credentials,
        screen_name: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            client: ApiClient::with_config(base_url, Auth::None, config)?,
            credentials,
            screen_name: screen_name.into(),
        })
    }

    /// Screen name of the account this client acts as.
    pub fn screen_name(&self) -> &str {
        &self.screen_name
    }

    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let params: Vec<(String, String)> = request
            .query_params()
            .iter()
            .chain(request.form_params())
            .cloned()
            .collect();
        let header = self.credentials.authorization_header(
            request.method().as_str(),
            request.url(),
            &params,
        )?;
        Ok(request.authorization(header))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = self.sign(request)?;
        let response = self.client.execute(request).await?;
        response.json().await.map_err(Into::into)
    }

    /// The authenticated user.
    #[instrument(skip(self))]
    pub async fn verify_credentials(&self) -> Result<User> {
        self.send(self.client.get("account/verify_credentials.json")).await
    }

    /// Post a new status.
    #[instrument(skip(self), fields(screen_name = %self.screen_name))]
    pub async fn update_status(&self, text: &str) -> Result<Status> {
        let request = self.client.post("statuses/update.json").form([("status", text)]);
        let status: Status = self.send(request).await?;
        info!(id = status.id, "Posted status");
        Ok(status)
    }

    /// Most recent statuses of a user.
    #[instrument(skip(self))]
    pub async fn user_timeline(&self, screen_name: &str) -> Result<Vec<Status>> {
        let request = self
            .client
            .get("statuses/user_timeline.json")
            .query("screen_name", screen_name)
            .query("count", TIMELINE_COUNT);
        self.send(request).await
    }

    /// Delete one of the account's statuses.
    #[instrument(skip(self))]
    pub async fn destroy_status(&self, id: u64) -> Result<Status> {
        let request = self.client.post(&format!("statuses/destroy/{id}.json"));
        self.send(request).await
    }
}
