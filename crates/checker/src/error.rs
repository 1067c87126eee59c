use thiserror::Error;

/// The six error kinds the orchestrator can surface. `CorpusRead` is
/// recovered locally and never returned from [`crate::run_check`]; the
/// other five propagate and move the request to `failed`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no active algorithm parameters")]
    NoActiveParams,

    #[error("normalized document text shorter than k")]
    EmptyOrTooShort,

    #[error("corpus document unreadable: {0}")]
    CorpusRead(String),

    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("per-check deadline exceeded")]
    Deadline,
}

impl CheckError {
    /// Stable kind string surfaced to callers, independent of the
    /// human-readable message.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::InvalidInput(_) => "InvalidInput",
            CheckError::NoActiveParams => "NoActiveParams",
            CheckError::EmptyOrTooShort => "EmptyOrTooShort",
            CheckError::CorpusRead(_) => "CorpusRead",
            CheckError::Persistence(_) => "Persistence",
            CheckError::Deadline => "Deadline",
        }
    }
}

impl From<corpus::PersistenceError> for CheckError {
    fn from(value: corpus::PersistenceError) -> Self {
        CheckError::Persistence(value.to_string())
    }
}
