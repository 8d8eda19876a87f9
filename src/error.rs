//! Error types for the scenario layer.
//!
//! Failures of the service crates are wrapped with their message and kept
//! as the source. Scenario outcomes that are not transport failures
//! (timeouts, failed assertions) have kinds of their own.

use std::time::Duration;

/// Result type alias for scenario operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for scenario operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true for activation and effect timeouts.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ActivationTimeout { .. } | ErrorKind::EffectTimeout { .. }
        )
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Account directory error.
    #[error("Accounts error: {0}")]
    Accounts(String),

    /// Management API error.
    #[error("Management API error: {0}")]
    Management(String),

    /// Salesforce error.
    #[error("Salesforce error: {0}")]
    Salesforce(String),

    /// Twitter error.
    #[error("Twitter error: {0}")]
    Twitter(String),

    /// GitHub error.
    #[error("GitHub error: {0}")]
    GitHub(String),

    /// HTTP layer error not attributed to a service.
    #[error("Client error: {0}")]
    Client(String),

    /// The integration did not reach `Activated` in time.
    #[error("Integration not activated after {elapsed:?}")]
    ActivationTimeout { elapsed: Duration },

    /// The expected side effect did not appear in time.
    #[error("Expected effect not observed after {elapsed:?}")]
    EffectTimeout { elapsed: Duration },

    /// External state was not clean before the trigger.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// The produced record carries the wrong description.
    #[error("Description mismatch: expected '{expected}', got '{actual}'")]
    DescriptionMismatch { expected: String, actual: String },

    /// A field of the produced record is missing or empty.
    #[error("Field '{field}' is empty")]
    EmptyField { field: String },

    /// The connector offers no action with the requested prefix.
    #[error("Connector '{connector}' has no action with prefix '{prefix}'")]
    ActionNotFound { connector: String, prefix: String },

    /// The platform offers no connector with the requested id.
    #[error("Connector not found: {0}")]
    ConnectorNotFound(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system error.
    #[error("IO error: {0}")]
    Io(String),
}

impl From<syndesis_qe_accounts::Error> for Error {
    fn from(err: syndesis_qe_accounts::Error) -> Self {
        Error::with_source(ErrorKind::Accounts(err.to_string()), err)
    }
}

impl From<syndesis_qe_rest::Error> for Error {
    fn from(err: syndesis_qe_rest::Error) -> Self {
        let kind = match &err.kind {
            syndesis_qe_rest::ErrorKind::ActionNotFound { connector, prefix } => {
                ErrorKind::ActionNotFound {
                    connector: connector.clone(),
                    prefix: prefix.clone(),
                }
            }
            _ => ErrorKind::Management(err.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<syndesis_qe_salesforce::Error> for Error {
    fn from(err: syndesis_qe_salesforce::Error) -> Self {
        Error::with_source(ErrorKind::Salesforce(err.to_string()), err)
    }
}

impl From<syndesis_qe_twitter::Error> for Error {
    fn from(err: syndesis_qe_twitter::Error) -> Self {
        Error::with_source(ErrorKind::Twitter(err.to_string()), err)
    }
}

impl From<syndesis_qe_github::Error> for Error {
    fn from(err: syndesis_qe_github::Error) -> Self {
        Error::with_source(ErrorKind::GitHub(err.to_string()), err)
    }
}

impl From<syndesis_qe_client::Error> for Error {
    fn from(err: syndesis_qe_client::Error) -> Self {
        Error::with_source(ErrorKind::Client(err.to_string()), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_not_found_is_lifted() {
        let rest = syndesis_qe_rest::Error::new(syndesis_qe_rest::ErrorKind::ActionNotFound {
            connector: "twitter".into(),
            prefix: "twitter-mention".into(),
        });
        let err: Error = rest.into();
        assert!(matches!(
            err.kind,
            ErrorKind::ActionNotFound { ref connector, ref prefix }
                if connector == "twitter" && prefix == "twitter-mention"
        ));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_timeout_classification() {
        let err = Error::new(ErrorKind::ActivationTimeout {
            elapsed: Duration::from_secs(600),
        });
        assert!(err.is_timeout());
        assert!(err.to_string().contains("600s"));
        assert!(!Error::new(ErrorKind::PreconditionFailed("x".into())).is_timeout());
    }

    #[test]
    fn test_accounts_error_keeps_message() {
        let accounts = syndesis_qe_accounts::Error::new(
            syndesis_qe_accounts::ErrorKind::UnknownAccount("github".into()),
        );
        let err: Error = accounts.into();
        assert_eq!(err.to_string(), "Accounts error: Unknown account: github");
    }
}
