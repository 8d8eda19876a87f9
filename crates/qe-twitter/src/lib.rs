//! # qe-twitter
//!
//! Minimal Twitter REST API v1.1 client used to trigger and clean up the
//! mention the integration listens for. Requests are signed with
//! OAuth 1.0a (HMAC-SHA1).
//!
//! ## Example
//!
//! ```rust,ignore
//! use syndesis_qe_twitter::{OAuth1Credentials, TwitterClient};
//!
//! let talky = TwitterClient::new(
//!     OAuth1Credentials::new(consumer_key, consumer_secret, access_token, access_token_secret),
//!     "fuseqe_talky",
//! )?;
//! let status = talky.update_status("Hello @fuseqe_listen").await?;
//! talky.destroy_status(status.id).await?;
//! ```

mod client;
mod error;
pub mod oauth1;
mod types;

pub use client::{TwitterClient, DEFAULT_BASE_URL};
pub use error::{Error, ErrorKind, Result};
pub use oauth1::OAuth1Credentials;
pub use types::{Status, User};
