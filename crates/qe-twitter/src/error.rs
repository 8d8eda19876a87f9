//! Error types for qe-twitter.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Returns true if Twitter reported the status or user as missing.
    pub fn is_not_found(&self) -> bool {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<syndesis_qe_client::Error>())
            .is_some_and(|err| err.is_not_found())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),
    #[error("Signing error: {0}")]
    Signing(String),
}

impl From<syndesis_qe_client::Error> for Error {
    fn from(err: syndesis_qe_client::Error) -> Self {
        Error { kind: ErrorKind::Client(err.to_string()), source: Some(Box::new(err)) }
    }
}
