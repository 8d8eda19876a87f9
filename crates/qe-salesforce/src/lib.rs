//! # qe-salesforce
//!
//! Salesforce access for the QE suite: OAuth 2.0 username-password login,
//! SOQL queries with pagination and record deletes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use syndesis_qe_salesforce::{Contact, PasswordCredentials, SalesforceClient};
//!
//! let credentials = PasswordCredentials::new(client_id, client_secret, user, password)
//!     .with_login_url("https://login.salesforce.com");
//! let client = SalesforceClient::connect(&credentials, Default::default()).await?;
//!
//! let contacts: Vec<Contact> = client
//!     .query_all(&Contact::by_twitter_screen_name("fuseqe_talky"))
//!     .await?;
//! for contact in contacts {
//!     client.delete(Contact::SOBJECT, &contact.id).await?;
//! }
//! ```

mod client;
mod contact;
mod error;
mod oauth;

pub use client::{QueryResult, SalesforceClient};
pub use contact::Contact;
pub use error::{Error, ErrorKind, Result};
pub use oauth::{PasswordCredentials, TokenResponse, PRODUCTION_LOGIN_URL};

/// Default Salesforce API version.
pub const DEFAULT_API_VERSION: &str = "41.0";
