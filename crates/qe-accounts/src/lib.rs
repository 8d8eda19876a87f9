//! # qe-accounts
//!
//! Named credential bags for the services the QE suite talks to.
//!
//! Accounts are loaded from a JSON document keyed by account name:
//!
//! ```json
//! {
//!   "twitter_listen": {
//!     "service": "twitter",
//!     "properties": { "screenName": "fuseqe_listen", "accessToken": "..." }
//!   }
//! }
//! ```
//!
//! ## Security
//!
//! Property values whose key looks like a secret are redacted in Debug
//! output. Error messages name accounts and keys, never values.
//!
//! ## Example
//!
//! ```rust
//! use syndesis_qe_accounts::AccountsDirectory;
//!
//! let accounts = AccountsDirectory::from_json(
//!     r#"{"github": {"service": "github", "properties": {"login": "qe", "token": "t"}}}"#,
//! )?;
//! assert_eq!(accounts.account("github")?.property("login")?, "qe");
//! # Ok::<(), syndesis_qe_accounts::Error>(())
//! ```

mod account;
mod directory;
mod error;

pub use account::Account;
pub use directory::AccountsDirectory;
pub use error::{Error, ErrorKind, Result};

/// Account used to listen for mentions (the integration's Twitter connection).
pub const TWITTER_LISTEN: &str = "twitter_listen";
/// Account used to post the triggering tweet.
pub const TWITTER_TALKY: &str = "twitter_talky";
/// Salesforce account.
pub const SALESFORCE: &str = "salesforce";
/// GitHub account owning the integration repositories.
pub const GITHUB: &str = "github";
