//! Suite configuration.
//!
//! Read from the environment:
//!
//! | Variable                  | Default                                      |
//! |---------------------------|----------------------------------------------|
//! | `SYNDESIS_URL`            | required                                     |
//! | `SYNDESIS_TOKEN`          | required                                     |
//! | `SYNDESIS_QE_CREDENTIALS` | `credentials.json`                           |
//! | `SYNDESIS_QE_MAPPING`     | `resources/mappings/twitter-salesforce.json` |

use std::path::PathBuf;

use syndesis_qe_client::ClientConfig;

use crate::error::{Error, ErrorKind, Result};

pub const ENV_SYNDESIS_URL: &str = "SYNDESIS_URL";
pub const ENV_SYNDESIS_TOKEN: &str = "SYNDESIS_TOKEN";
pub const ENV_CREDENTIALS: &str = "SYNDESIS_QE_CREDENTIALS";
pub const ENV_MAPPING: &str = "SYNDESIS_QE_MAPPING";

pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";
pub const DEFAULT_MAPPING_PATH: &str = "resources/mappings/twitter-salesforce.json";

/// Where the platform lives and where the suite finds its inputs.
#[derive(Clone)]
pub struct QeConfig {
    pub syndesis_url: String,
    syndesis_token: String,
    pub credentials_path: PathBuf,
    pub mapping_path: PathBuf,
    /// HTTP settings shared by every client.
    pub http: ClientConfig,
}

impl std::fmt::Debug for QeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QeConfig")
            .field("syndesis_url", &self.syndesis_url)
            .field("syndesis_token", &"[REDACTED]")
            .field("credentials_path", &self.credentials_path)
            .field("mapping_path", &self.mapping_path)
            .field("http", &self.http)
            .finish()
    }
}

impl QeConfig {
    pub fn builder() -> QeConfigBuilder {
        QeConfigBuilder::default()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::new(ErrorKind::Config(format!("{name} is not set"))))
        };

        let mut builder = Self::builder()
            .syndesis_url(required(ENV_SYNDESIS_URL)?)
            .syndesis_token(required(ENV_SYNDESIS_TOKEN)?);
        if let Some(path) = lookup(ENV_CREDENTIALS) {
            builder = builder.credentials_path(path);
        }
        if let Some(path) = lookup(ENV_MAPPING) {
            builder = builder.mapping_path(path);
        }
        builder.build()
    }

    /// Bearer token for the management API.
    pub fn syndesis_token(&self) -> &str {
        &self.syndesis_token
    }
}

/// Builder for [`QeConfig`].
#[derive(Debug)]
pub struct QeConfigBuilder {
    syndesis_url: Option<String>,
    syndesis_token: Option<String>,
    credentials_path: PathBuf,
    mapping_path: PathBuf,
    http: ClientConfig,
}

impl Default for QeConfigBuilder {
    fn default() -> Self {
        Self {
            syndesis_url: None,
            syndesis_token: None,
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            mapping_path: PathBuf::from(DEFAULT_MAPPING_PATH),
            http: ClientConfig::default(),
        }
    }
}

impl QeConfigBuilder {
    pub fn syndesis_url(mut self, url: impl Into<String>) -> Self {
        self.syndesis_url = Some(url.into());
        self
    }

    pub fn syndesis_token(mut self, token: impl Into<String>) -> Self {
        self.syndesis_token = Some(token.into());
        self
    }

    pub fn credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }

    pub fn mapping_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping_path = path.into();
        self
    }

    pub fn http(mut self, config: ClientConfig) -> Self {
        self.http = config;
        self
    }

    pub fn build(self) -> Result<QeConfig> {
        let missing = |name: &str| Error::new(ErrorKind::Config(format!("{name} is required")));
        Ok(QeConfig {
            syndesis_url: self.syndesis_url.ok_or_else(|| missing("syndesis_url"))?,
            syndesis_token: self.syndesis_token.ok_or_else(|| missing("syndesis_token"))?,
            credentials_path: self.credentials_path,
            mapping_path: self.mapping_path,
            http: self.http,
        })
    }
}
