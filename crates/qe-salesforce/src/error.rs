//! Error types for qe-salesforce.
//!
//! Error messages are designed to avoid exposing credential data.

/// Result type alias for qe-salesforce operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for qe-salesforce operations.
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
    /// OAuth error response from the token endpoint.
    #[error("OAuth error: {error} - {description}")]
    OAuth { error: String, description: String },

    /// Error from the REST API.
    #[error("Client error: {0}")]
    Client(String),

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Token endpoint URLs never carry secrets, but responses might.
        let message = err.to_string();
        let sanitized = if message.contains("access_token") || message.contains("password=") {
            "HTTP request failed (details redacted for security)".to_string()
        } else {
            message
        };
        Error::with_source(ErrorKind::Http(sanitized), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Serialization(err.to_string()), err)
    }
}

impl From<syndesis_qe_client::Error> for Error {
    fn from(err: syndesis_qe_client::Error) -> Self {
        Error::with_source(ErrorKind::Client(err.to_string()), err)
    }
}
