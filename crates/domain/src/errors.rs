use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Failed to encode DNS message: {0}")]
    EncodingError(String),

    #[error("Failed to bind {addr}: {reason}")]
    BindError { addr: String, reason: String },
}

impl DomainError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        DomainError::MalformedMessage(reason.into())
    }

    pub fn encoding(reason: impl Into<String>) -> Self {
        DomainError::EncodingError(reason.into())
    }

    pub fn bind(addr: impl ToString, reason: impl ToString) -> Self {
        DomainError::BindError {
            addr: addr.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Startup failures end the process; everything else is scoped to one datagram.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::BindError { .. })
    }
}
