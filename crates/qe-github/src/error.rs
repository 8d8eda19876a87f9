//! Error types for qe-github.

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
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<syndesis_qe_client::Error> for Error {
    fn from(err: syndesis_qe_client::Error) -> Self {
        Error { kind: ErrorKind::Client(err.to_string()), source: Some(Box::new(err)) }
    }
}
