//! # qe-client
//!
//! Core HTTP client infrastructure shared by every service client of the
//! Syndesis QE suite (management API, Salesforce, Twitter, GitHub).
//!
//! This crate provides:
//! - Automatic retry with exponential backoff and jitter
//! - Compression support (gzip, deflate)
//! - Rate limit detection and handling
//! - Error body parsing for the JSON error shapes of the services under test
//! - Redaction of tokens in error messages
//! - A predicate/supplier polling primitive ([`wait`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Service clients                        │
//! │       (qe-rest, qe-salesforce, qe-twitter, qe-github)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ApiClient                            │
//! │  - Base URL + auth scheme + default headers                 │
//! │  - Typed JSON methods (get_json, post_json, ...)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       QeHttpClient                          │
//! │  - Raw HTTP with retry, compression, rate limiting          │
//! │  - Response error mapping                                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use syndesis_qe_client::{ApiClient, Auth};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), syndesis_qe_client::Error> {
//!     let client = ApiClient::new("https://syndesis.example.com/api/v1", Auth::bearer("token"))?;
//!     let connectors: serde_json::Value = client.get_json("connectors").await?;
//!     println!("{connectors}");
//!     Ok(())
//! }
//! ```

mod api_client;
mod client;
mod config;
mod error;
mod request;
mod response;
mod retry;
pub mod security;
pub mod wait;

pub use api_client::{ApiClient, Auth};
pub use client::QeHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::{Response, ResponseExt};
pub use retry::{BackoffStrategy, RetryConfig, RetryPolicy};
pub use wait::{wait_for_event, wait_for_value, WaitConfig};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("syndesis-qe/", env!("CARGO_PKG_VERSION"));
