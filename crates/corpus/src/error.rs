use thiserror::Error;

/// A corpus document's text could not be read.
///
/// Non-fatal to a check: the orchestrator logs and skips the offending
/// document rather than aborting the whole run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("corpus document {doc_id} unreadable: {reason}")]
pub struct CorpusReadError {
    pub doc_id: String,
    pub reason: String,
}

/// The result-transaction boundary failed.
///
/// Fatal: the entire check fails and no partial `CheckResult` is visible.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("check request {0} not found")]
    RequestNotFound(String),
    #[error("transaction failed: {0}")]
    TransactionFailed(String),
}
