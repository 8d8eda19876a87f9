//! Loading and lookup of accounts by name.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, instrument};

use crate::account::Account;
use crate::error::{Error, ErrorKind, Result};

/// All accounts known to a test run, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct AccountsDirectory {
    accounts: BTreeMap<String, Account>,
}

impl AccountsDirectory {
    /// Load the directory from a JSON credentials file.
    #[instrument]
    pub fn load(path: impl AsRef<Path> + std::fmt::Debug) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let directory = Self::from_json(&content)?;
        debug!(accounts = directory.accounts.len(), "Loaded accounts");
        Ok(directory)
    }

    /// Parse the directory from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut accounts: BTreeMap<String, Account> = serde_json::from_str(json)?;
        for (name, account) in accounts.iter_mut() {
            account.set_name(name);
        }
        Ok(Self { accounts })
    }

    /// Add or replace an account.
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.name().to_string(), account);
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    /// Look up an account that must exist.
    pub fn account(&self, name: &str) -> Result<&Account> {
        self.get(name)
            .ok_or_else(|| Error::new(ErrorKind::UnknownAccount(name.to_string())))
    }

    /// Account names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl FromIterator<Account> for AccountsDirectory {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        let mut directory = Self::default();
        for account in iter {
            directory.insert(account);
        }
        directory
    }
}
