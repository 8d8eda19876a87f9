//! # qe-github
//!
//! GitHub REST v3 access limited to what test cleanup needs: looking up and
//! deleting the repositories integrations may have created.

mod client;
mod error;

pub use client::{GitHubClient, Repository, DEFAULT_BASE_URL};
pub use error::{Error, ErrorKind, Result};
