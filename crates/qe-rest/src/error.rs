//! Error types for qe-rest.

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

    /// The HTTP layer error behind this error, if any.
    pub fn client_error(&self) -> Option<&syndesis_qe_client::Error> {
        self.source.as_deref().and_then(|source| source.downcast_ref())
    }

    /// Returns true if the management API reported a missing resource.
    pub fn is_not_found(&self) -> bool {
        self.client_error().is_some_and(|err| err.is_not_found())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),
    #[error("Connector '{connector}' has no action with prefix '{prefix}'")]
    ActionNotFound { connector: String, prefix: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<syndesis_qe_client::Error> for Error {
    fn from(err: syndesis_qe_client::Error) -> Self {
        Error { kind: ErrorKind::Client(err.to_string()), source: Some(Box::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syndesis_qe_client::ErrorKind as ClientErrorKind;

    #[test]
    fn test_not_found_passthrough() {
        let err: Error =
            syndesis_qe_client::Error::new(ClientErrorKind::NotFound("integration".into())).into();
        assert!(err.is_not_found());
        assert!(err.client_error().is_some());

        let err = Error::new(ErrorKind::Config("no id".into()));
        assert!(!err.is_not_found());
    }
}
