use serde::Deserialize;
use tracing::{debug, info, instrument};

use syndesis_qe_client::{ApiClient, Auth, ClientConfig};

use crate::error::{Error, ErrorKind, Result};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// Repository summary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
}

/// GitHub client authenticated with a personal access token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: ApiClient,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_config(DEFAULT_BASE_URL, token, ClientConfig::default())
    }

    pub fn with_config(
        base_url: impl Into<String>,
        token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = ApiClient::with_config(base_url, Auth::token(token), config)?
            .with_header("Accept", ACCEPT_V3);
        Ok(Self { client })
    }

    /// Fetch `owner/name`, or `None` if it does not exist.
    #[instrument(skip(self))]
    pub async fn get_repository(&self, full_name: &str) -> Result<Option<Repository>> {
        let path = repo_path(full_name)?;
        Ok(self.client.get_json_opt(&path).await?)
    }

    /// Delete `owner/name`.
    ///
    /// Returns `false` when the repository did not exist.
    #[instrument(skip(self))]
    pub async fn delete_repository(&self, full_name: &str) -> Result<bool> {
        let path = repo_path(full_name)?;
        match self.client.delete_request(&path).await {
            Ok(()) => {
                info!(repository = full_name, "Deleted repository");
                Ok(true)
            }
            Err(err) if err.is_not_found() => {
                debug!(repository = full_name, "Repository already absent");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn repo_path(full_name: &str) -> Result<String> {
    match full_name.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(format!(
                "repos/{}/{}",
                syndesis_qe_client::security::url::encode_param(owner),
                syndesis_qe_client::security::url::encode_param(name)
            ))
        }
        _ => Err(Error::new(ErrorKind::InvalidInput(format!(
            "repository must be owner/name, got '{full_name}'"
        )))),
    }
}
