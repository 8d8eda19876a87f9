//! # syndesis-qe
//!
//! End-to-end tests for the Syndesis integration platform, driven through
//! its management REST API against real Twitter, Salesforce and GitHub
//! accounts.
//!
//! ## Security
//!
//! - Tokens and secrets are redacted in Debug output
//! - Tracing spans skip credential arguments
//! - HTTP error bodies are sanitized before they reach error messages
//!
//! ## Crates
//!
//! - **syndesis-qe-client** - HTTP infrastructure with retry and the polling primitive
//! - **syndesis-qe-accounts** - Named credential bags loaded from JSON
//! - **syndesis-qe-rest** - Management API: connectors, connections, integrations, test support
//! - **syndesis-qe-salesforce** - Password-grant login, SOQL queries, record deletes
//! - **syndesis-qe-twitter** - OAuth 1.0a signed status updates, timelines and deletes
//! - **syndesis-qe-github** - Repository lookup and delete
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use syndesis_qe::{LiveContext, QeConfig, ScenarioConfig, TwitterSalesforceScenario};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = QeConfig::from_env()?;
//!     let ctx = LiveContext::connect(&config).await?;
//!
//!     let report = TwitterSalesforceScenario::new(&ctx, ScenarioConfig::default())
//!         .run()
//!         .await?;
//!     println!("contact {} created in {:?}", report.contact.id, report.effect_time);
//!     Ok(())
//! }
//! ```

pub mod collaborators;
pub mod config;
pub mod context;
pub mod error;
pub mod scenario;

pub use syndesis_qe_accounts as accounts;
pub use syndesis_qe_client as client;
pub use syndesis_qe_github as github;
pub use syndesis_qe_rest as rest;
pub use syndesis_qe_salesforce as salesforce;
pub use syndesis_qe_twitter as twitter;

pub use collaborators::{find_contact, CrmProvider, ManagementApi, SocialProvider, SourceControl};
pub use config::QeConfig;
pub use context::{LiveContext, QeContext};
pub use error::{Error, ErrorKind, Result};
pub use scenario::{ScenarioConfig, ScenarioReport, ScenarioState, TwitterSalesforceScenario};
