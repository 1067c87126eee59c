//! In-memory stand-ins for the persisted-state traits.
//!
//! These are explicitly not the relational schema from the external
//! interfaces list. They are what a test or a demo wires up in place of a
//! real database. A SQL-backed implementation of the same traits can be
//! dropped in without the checker noticing, since every field name here
//! mirrors the persisted column name.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{CorpusReadError, PersistenceError};
use crate::traits::{AlgorithmParamsStore, CheckResultRepository, CorpusStore};
use crate::types::{
    AlgorithmParams, CheckRequest, CheckRequestStatus, CheckResultRecord, CorpusDocument,
};

/// Holds a fixed set of `AlgorithmParams` rows and resolves the active one
/// by scanning for the most recently activated matching window.
#[derive(Default)]
pub struct InMemoryParamsStore {
    rows: RwLock<Vec<AlgorithmParams>>,
}

impl InMemoryParamsStore {
    pub fn new(rows: Vec<AlgorithmParams>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub fn insert(&self, params: AlgorithmParams) {
        self.rows.write().expect("params lock poisoned").push(params);
    }
}

impl AlgorithmParamsStore for InMemoryParamsStore {
    fn active_params(&self, now: chrono::DateTime<Utc>) -> Option<AlgorithmParams> {
        self.rows
            .read()
            .expect("params lock poisoned")
            .iter()
            .filter(|p| p.is_active_at(now))
            .max_by_key(|p| p.active_from)
            .cloned()
    }
}

/// Holds corpus documents and their text, keyed by document id.
#[derive(Default)]
pub struct InMemoryCorpusStore {
    documents: RwLock<Vec<CorpusDocument>>,
    texts: RwLock<std::collections::HashMap<String, String>>,
}

impl InMemoryCorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document and its normalized text. Passing an empty
    /// `text` simulates a missing/unreadable file for `CorpusRead` tests.
    pub fn add_document(&self, doc: CorpusDocument, text: Option<String>) {
        if let Some(text) = text {
            self.texts
                .write()
                .expect("texts lock poisoned")
                .insert(doc.id.clone(), text);
        }
        self.documents.write().expect("documents lock poisoned").push(doc);
    }
}

impl CorpusStore for InMemoryCorpusStore {
    fn active_documents(&self) -> Vec<CorpusDocument> {
        self.documents
            .read()
            .expect("documents lock poisoned")
            .iter()
            .filter(|d| d.is_active)
            .cloned()
            .collect()
    }

    fn read_text(&self, doc: &CorpusDocument) -> Result<String, CorpusReadError> {
        self.texts
            .read()
            .expect("texts lock poisoned")
            .get(&doc.id)
            .cloned()
            .ok_or_else(|| CorpusReadError {
                doc_id: doc.id.clone(),
                reason: "text not found in store".to_string(),
            })
    }
}

struct RequestEntry {
    request: CheckRequest,
    result: Option<CheckResultRecord>,
}

/// All-or-nothing in the sense that `commit_result` only ever mutates state
/// after the `CheckResultRecord` (with every match already attached) has
/// been fully constructed by the caller, so there is no partially-written
/// intermediate state to observe.
#[derive(Default)]
pub struct InMemoryResultRepository {
    requests: RwLock<std::collections::HashMap<Uuid, RequestEntry>>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CheckResultRepository for InMemoryResultRepository {
    fn begin_request(
        &self,
        requested_by: &str,
        doc_id: &str,
        params_id: &str,
    ) -> Result<Uuid, PersistenceError> {
        let id = Uuid::new_v4();
        let request = CheckRequest {
            id,
            requested_by: requested_by.to_string(),
            doc_id: doc_id.to_string(),
            params_id: params_id.to_string(),
            status: CheckRequestStatus::Queued,
            queued_at: Utc::now(),
            started_at: None,
            finished_at: None,
        };
        self.requests
            .write()
            .expect("requests lock poisoned")
            .insert(id, RequestEntry { request, result: None });
        Ok(id)
    }

    fn mark_processing(&self, request_id: Uuid) -> Result<(), PersistenceError> {
        let mut guard = self.requests.write().expect("requests lock poisoned");
        let entry = guard
            .get_mut(&request_id)
            .ok_or(PersistenceError::RequestNotFound(request_id.to_string()))?;
        entry.request.status = CheckRequestStatus::Processing;
        entry.request.started_at = Some(Utc::now());
        Ok(())
    }

    fn commit_result(
        &self,
        request_id: Uuid,
        result: CheckResultRecord,
    ) -> Result<(), PersistenceError> {
        let mut guard = self.requests.write().expect("requests lock poisoned");
        let entry = guard
            .get_mut(&request_id)
            .ok_or(PersistenceError::RequestNotFound(request_id.to_string()))?;
        entry.request.status = CheckRequestStatus::Done;
        entry.request.finished_at = Some(Utc::now());
        entry.result = Some(result);
        Ok(())
    }

    fn mark_failed(&self, request_id: Uuid, _reason: &str) -> Result<(), PersistenceError> {
        let mut guard = self.requests.write().expect("requests lock poisoned");
        let entry = guard
            .get_mut(&request_id)
            .ok_or(PersistenceError::RequestNotFound(request_id.to_string()))?;
        entry.request.status = CheckRequestStatus::Failed;
        entry.request.finished_at = Some(Utc::now());
        entry.result = None;
        Ok(())
    }

    fn status(&self, request_id: Uuid) -> Option<CheckRequestStatus> {
        self.requests
            .read()
            .expect("requests lock poisoned")
            .get(&request_id)
            .map(|e| e.request.status)
    }

    fn result_for(&self, request_id: Uuid) -> Option<CheckResultRecord> {
        self.requests
            .read()
            .expect("requests lock poisoned")
            .get(&request_id)
            .and_then(|e| e.result.clone())
    }
}

impl InMemoryResultRepository {
    /// Every request row currently held, for tests that assert on the
    /// repository's full state rather than a single known id.
    pub fn all_requests(&self) -> Vec<CheckRequest> {
        self.requests
            .read()
            .expect("requests lock poisoned")
            .values()
            .map(|e| e.request.clone())
            .collect()
    }
}
