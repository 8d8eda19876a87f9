//! Error types for qe-accounts.
//!
//! Messages carry account names and property keys, never property values.

/// Result type alias for qe-accounts operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for qe-accounts operations.
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
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// No account with this name in the directory.
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// The account lacks a required property.
    #[error("Account '{account}' has no property '{property}'")]
    MissingProperty { account: String, property: String },

    /// The credentials file could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// The credentials document is malformed.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}
