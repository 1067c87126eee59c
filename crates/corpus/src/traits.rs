use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{CorpusReadError, PersistenceError};
use crate::types::{AlgorithmParams, CheckRequestStatus, CheckResultRecord, CorpusDocument};

/// Read access to the `algoritma_params` history table.
pub trait AlgorithmParamsStore: Send + Sync {
    /// The most recently activated row whose `[active_from, active_to)`
    /// window contains `now`, or `None` if no row is active.
    fn active_params(&self, now: DateTime<Utc>) -> Option<AlgorithmParams>;
}

/// Read access to corpus membership and text.
pub trait CorpusStore: Send + Sync {
    /// Documents with `is_active = true`, snapshotted once at the start of
    /// a check and treated as immutable for that check's duration.
    fn active_documents(&self) -> Vec<CorpusDocument>;

    /// Read a corpus document's normalized text.
    fn read_text(&self, doc: &CorpusDocument) -> Result<String, CorpusReadError>;
}

/// Write access to the result-transaction boundary.
///
/// `begin_request`/`commit_result`/`mark_failed` model the `check_request →
/// check_result (+ check_match)` lifecycle. `commit_result` is all-or-nothing:
/// either the `CheckResultRecord` and every one of its matches land, or
/// nothing does.
pub trait CheckResultRepository: Send + Sync {
    fn begin_request(
        &self,
        requested_by: &str,
        doc_id: &str,
        params_id: &str,
    ) -> Result<Uuid, PersistenceError>;

    fn mark_processing(&self, request_id: Uuid) -> Result<(), PersistenceError>;

    fn commit_result(
        &self,
        request_id: Uuid,
        result: CheckResultRecord,
    ) -> Result<(), PersistenceError>;

    fn mark_failed(&self, request_id: Uuid, reason: &str) -> Result<(), PersistenceError>;

    fn status(&self, request_id: Uuid) -> Option<CheckRequestStatus>;

    fn result_for(&self, request_id: Uuid) -> Option<CheckResultRecord>;
}
