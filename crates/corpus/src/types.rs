use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The active algorithm parameter row (`algoritma_params` in the persisted
/// schema). Field names mirror the persisted column names so a real
/// SQL-backed `AlgorithmParamsStore` can be dropped in without renaming.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmParams {
    pub id: String,
    pub k: usize,
    pub w: usize,
    pub base: u32,
    pub threshold: f64,
    pub active_from: DateTime<Utc>,
    pub active_to: Option<DateTime<Utc>>,
}

impl AlgorithmParams {
    /// `true` if this row is the active one at `now`: `active_from <= now <
    /// (active_to or +inf)`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.active_from <= now && self.active_to.is_none_or(|to| now < to)
    }
}

/// A corpus document (`corpus_document` in the persisted schema).
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusDocument {
    pub id: String,
    pub title: String,
    pub source_type: SourceType,
    pub source_ref: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Upload,
    Url,
}

/// `check_request.status`. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckRequestStatus {
    Queued,
    Processing,
    Done,
    Failed,
}

/// A `check_request` row.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRequest {
    pub id: Uuid,
    pub requested_by: String,
    pub doc_id: String,
    pub params_id: String,
    pub status: CheckRequestStatus,
    pub queued_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// A `check_match` row, keyed to the `check_result` it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedMatch {
    pub result_id: Uuid,
    pub source_type: SourceType,
    pub source_id: String,
    pub doc_span_start: u32,
    pub doc_span_end: u32,
    pub src_span_start: u32,
    pub src_span_end: u32,
    pub match_score: f64,
    pub snippet_hash: String,
}

/// A `check_result` row plus its owned `check_match` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResultRecord {
    pub id: Uuid,
    pub check_id: Uuid,
    /// `NUMERIC(5,2)` in the persisted schema: two decimal places, `[0,
    /// 100]`.
    pub similarity: f64,
    pub summary_json: String,
    pub created_at: DateTime<Utc>,
    pub matches: Vec<PersistedMatch>,
}
