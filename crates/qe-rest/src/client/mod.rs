//! Syndesis management REST API client.
//!
//! Wraps an [`ApiClient`] bound to `<syndesis_url>/api/v1`. Every request
//! carries the bearer token and the XSRF header the server expects from
//! API clients.

use syndesis_qe_client::{ApiClient, Auth, ClientConfig};

use crate::error::Result;

mod connections;
mod connectors;
mod integrations;
mod test_support;

/// Header the management API requires on every request.
pub const XSRF_HEADER: &str = "SYNDESIS-XSRF-TOKEN";
/// Value accepted by the server for [`XSRF_HEADER`].
pub const XSRF_VALUE: &str = "awesome";

/// Syndesis management REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use syndesis_qe_rest::SyndesisRestClient;
///
/// let client = SyndesisRestClient::new("https://syndesis.example.com", token)?;
/// let twitter = client.get_connector("twitter").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SyndesisRestClient {
    client: ApiClient,
}

impl SyndesisRestClient {
    /// Create a client for the platform at `syndesis_url`.
    pub fn new(syndesis_url: &str, token: impl Into<String>) -> Result<Self> {
        Self::with_config(syndesis_url, token, ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(
        syndesis_url: &str,
        token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let base_url = format!("{}/api/v1", syndesis_url.trim_end_matches('/'));
        let client = ApiClient::with_config(base_url, Auth::bearer(token), config)?
            .with_header(XSRF_HEADER, XSRF_VALUE);
        Ok(Self { client })
    }

    /// Get the underlying ApiClient.
    pub fn inner(&self) -> &ApiClient {
        &self.client
    }

    /// Base URL of the management API (`.../api/v1`).
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}
