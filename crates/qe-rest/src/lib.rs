//! # qe-rest
//!
//! Client for the Syndesis management REST API (`/api/v1`) and the data
//! model it exchanges.
//!
//! ## Features
//!
//! - **Connectors** - list and fetch connector definitions
//! - **Connections** - create and fetch configured connections
//! - **Integrations** - create, fetch and wait for activation
//! - **Test support** - reset the platform database between runs
//!
//! ## Example
//!
//! ```rust,ignore
//! use syndesis_qe_rest::{Integration, IntegrationStatus, Step, SyndesisRestClient};
//!
//! let client = SyndesisRestClient::new("https://syndesis.example.com", token)?;
//! client.reset_database().await?;
//!
//! let integration = client
//!     .create_integration(
//!         &Integration::builder()
//!             .name("Twitter to salesforce contact rest test")
//!             .steps(steps)
//!             .desired_status(IntegrationStatus::Activated)
//!             .build(),
//!     )
//!     .await?;
//! let active = client.wait_for_activation(&integration, Duration::from_secs(600)).await?;
//! ```

mod activation;
mod client;
mod error;
mod model;
mod names;

pub use activation::{wait_for_activation, ACTIVATION_INTERVAL};
pub use client::{SyndesisRestClient, XSRF_HEADER, XSRF_VALUE};
pub use error::{Error, ErrorKind, Result};
pub use model::{
    Action, Connection, ConnectionBuilder, Connector, Integration, IntegrationBuilder,
    IntegrationStatus, ListResult, Step, StepKind,
};
pub use names::Names;
