//! Salesforce REST client for queries and deletes.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - SObject names and record ids are validated before they reach a URL

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use syndesis_qe_client::security::{soql, url as url_security};
use syndesis_qe_client::{ApiClient, Auth, ClientConfig};

use crate::error::{Error, ErrorKind, Result};
use crate::oauth::PasswordCredentials;
use crate::DEFAULT_API_VERSION;

/// Salesforce REST API client.
#[derive(Debug, Clone)]
pub struct SalesforceClient {
    client: ApiClient,
    api_version: String,
}

impl SalesforceClient {
    /// Create a client from an instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(instance_url, access_token, ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = ApiClient::with_config(instance_url, Auth::bearer(access_token), config)?;
        Ok(Self {
            client,
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Log in with the password grant and create a client for the
    /// returned instance.
    #[instrument(skip(credentials, config), fields(username = %credentials.username()))]
    pub async fn connect(credentials: &PasswordCredentials, config: ClientConfig) -> Result<Self> {
        let token = credentials.login().await?;
        Self::with_config(token.instance_url, token.access_token, config)
    }

    /// Set the API version (e.g., "41.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn instance_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Path of a REST resource under the versioned data API.
    ///
    /// Example: `rest_path("sobjects/Contact")` -> `/services/data/v41.0/sobjects/Contact`
    pub fn rest_path(&self, path: &str) -> String {
        format!(
            "/services/data/v{}/{}",
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    /// Execute a SOQL query and return the first page.
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let request = self.client.get(&self.rest_path("query")).query("q", soql);
        let response = self.client.execute(request).await?;
        response.json().await.map_err(Into::into)
    }

    /// Execute a SOQL query and follow `nextRecordsUrl` until all records
    /// are fetched.
    #[instrument(skip(self))]
    pub async fn query_all<T: DeserializeOwned>(&self, soql: &str) -> Result<Vec<T>> {
        let mut result: QueryResult<T> = self.query(soql).await?;
        let mut records = std::mem::take(&mut result.records);

        while let Some(next_url) = result.next_records_url.take() {
            result = self.client.get_json(&next_url).await?;
            records.append(&mut result.records);
        }

        Ok(records)
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn delete(&self, sobject: &str, id: &str) -> Result<()> {
        if !soql::is_safe_sobject_name(sobject) {
            return Err(Error::new(ErrorKind::InvalidInput(format!(
                "invalid SObject name: {sobject}"
            ))));
        }
        if !url_security::is_valid_salesforce_id(id) {
            return Err(Error::new(ErrorKind::InvalidInput(format!(
                "invalid record id: {id}"
            ))));
        }

        let path = self.rest_path(&format!("sobjects/{sobject}/{id}"));
        self.client.delete_request(&path).await?;
        info!(sobject, id, "Deleted Salesforce record");
        Ok(())
    }
}

/// Result of a SOQL query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// URL to fetch next batch of results.
    #[serde(rename = "nextRecordsUrl", default)]
    pub next_records_url: Option<String>,

    /// The records.
    pub records: Vec<T>,
}
