//! A single named account.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};

const SECRET_MARKERS: [&str; 4] = ["secret", "password", "token", "key"];

/// Credentials and settings for one external service account.
///
/// Property values whose key contains `secret`, `password`, `token` or `key`
/// are redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Directory key; filled in when the directory is loaded.
    #[serde(skip)]
    name: String,
    /// Free-form service label (`twitter`, `salesforce`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service: Option<String>,
    #[serde(default)]
    properties: BTreeMap<String, String>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let properties: BTreeMap<&str, &str> = self
            .properties
            .iter()
            .map(|(key, value)| {
                let lower = key.to_ascii_lowercase();
                if SECRET_MARKERS.iter().any(|m| lower.contains(m)) {
                    (key.as_str(), "[REDACTED]")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("Account")
            .field("name", &self.name)
            .field("service", &self.service)
            .field("properties", &properties)
            .finish()
    }
}

impl Account {
    /// Create an account from its name and properties.
    pub fn new<K, V>(name: impl Into<String>, properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            service: None,
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set the service label.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Look up a required property.
    pub fn property(&self, key: &str) -> Result<&str> {
        self.properties
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| self.missing(key))
    }

    /// Copy the given properties into a new map, failing on the first
    /// missing key.
    ///
    /// ```rust
    /// use syndesis_qe_accounts::Account;
    ///
    /// let account = Account::new("twitter_listen", [("consumerKey", "ck"), ("screenName", "qe")]);
    /// let selected = account.select(&["consumerKey"])?;
    /// assert_eq!(selected.len(), 1);
    /// # Ok::<(), syndesis_qe_accounts::Error>(())
    /// ```
    pub fn select(&self, keys: &[&str]) -> Result<BTreeMap<String, String>> {
        keys.iter()
            .map(|key| Ok((key.to_string(), self.property(key)?.to_string())))
            .collect()
    }

    fn missing(&self, key: &str) -> Error {
        Error::new(ErrorKind::MissingProperty {
            account: self.name.clone(),
            property: key.to_string(),
        })
    }
}
