use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use checker::{run_check, CheckDeps, CheckRequestInput, RunCheckOptions};
use corpus::{CheckRequestStatus, CheckResultRecord, PersistedMatch, SourceType};

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;

/// `POST /api/checks` request body.
#[derive(Debug, Deserialize)]
pub struct SubmitCheckRequest {
    pub doc_id: String,
    #[serde(default)]
    pub requested_by: Option<String>,
    pub text: String,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

fn default_max_candidates() -> usize {
    10
}

#[derive(Debug, Serialize)]
pub struct MatchView {
    pub source_type: String,
    pub source_id: String,
    pub doc_span_start: u32,
    pub doc_span_end: u32,
    pub src_span_start: u32,
    pub src_span_end: u32,
    pub match_score: f64,
    pub snippet_hash: String,
}

impl From<&PersistedMatch> for MatchView {
    fn from(m: &PersistedMatch) -> Self {
        Self {
            source_type: source_type_str(m.source_type).to_string(),
            source_id: m.source_id.clone(),
            doc_span_start: m.doc_span_start,
            doc_span_end: m.doc_span_end,
            src_span_start: m.src_span_start,
            src_span_end: m.src_span_end,
            match_score: m.match_score,
            snippet_hash: m.snippet_hash.clone(),
        }
    }
}

fn source_type_str(s: SourceType) -> &'static str {
    match s {
        SourceType::Upload => "upload",
        SourceType::Url => "url",
    }
}

/// `POST /api/checks` response body.
#[derive(Debug, Serialize)]
pub struct SubmitCheckResponse {
    pub check_id: Uuid,
    pub result_id: Uuid,
    pub similarity: f64,
    pub threshold: f64,
    pub candidates_count: usize,
    pub matches_inserted: usize,
}

/// `GET /api/checks/:id` response body.
#[derive(Debug, Serialize)]
pub struct CheckResultResponse {
    pub check_id: Uuid,
    pub result_id: Uuid,
    pub status: String,
    pub similarity: f64,
    pub summary: serde_json::Value,
    pub matches: Vec<MatchView>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl CheckResultResponse {
    fn from_record(record: &CheckResultRecord) -> Self {
        let summary = serde_json::from_str(&record.summary_json)
            .unwrap_or(serde_json::Value::Null);
        let mut matches: Vec<MatchView> = record.matches.iter().map(MatchView::from).collect();
        matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        Self {
            check_id: record.check_id,
            result_id: record.id,
            status: "done".to_string(),
            similarity: record.similarity,
            summary,
            matches,
            created_at: record.created_at,
        }
    }
}

/// Submit a document and run the full similarity-check pipeline
/// synchronously, persisting and returning the result.
pub async fn submit_check(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SubmitCheckRequest>,
) -> ServerResult<impl IntoResponse> {
    if request.doc_id.trim().is_empty() {
        return Err(ServerError::BadRequest("doc_id must not be empty".into()));
    }

    let deps = CheckDeps {
        params: &state.params,
        corpus: &state.corpus,
        results: &state.results,
    };
    let opts = RunCheckOptions {
        deadline: state.config.check_deadline(),
        use_parallel: false,
    };

    let outcome = run_check(
        CheckRequestInput {
            requested_by: request.requested_by.unwrap_or_else(|| "anonymous".to_string()),
            doc_id: request.doc_id,
            doc_text: request.text,
            max_candidates: request.max_candidates,
        },
        &deps,
        chrono::Utc::now(),
        opts,
    )?;

    Ok(Json(SubmitCheckResponse {
        check_id: outcome.check_id,
        result_id: outcome.result_id,
        similarity: outcome.similarity,
        threshold: outcome.threshold,
        candidates_count: outcome.candidates_count,
        matches_inserted: outcome.matches_inserted,
    }))
}

/// Fetch a previously committed result by check id.
pub async fn get_check(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> ServerResult<impl IntoResponse> {
    use corpus::CheckResultRepository;

    match state.results.status(id) {
        None => Err(ServerError::NotFound),
        Some(CheckRequestStatus::Failed) => Ok(Json(serde_json::json!({
            "check_id": id,
            "status": "failed",
        }))
        .into_response()),
        Some(CheckRequestStatus::Queued) | Some(CheckRequestStatus::Processing) => {
            Ok(Json(serde_json::json!({
                "check_id": id,
                "status": "processing",
            }))
            .into_response())
        }
        Some(CheckRequestStatus::Done) => {
            let record = state
                .results
                .result_for(id)
                .ok_or_else(|| ServerError::Internal("done check missing its result row".into()))?;
            Ok(Json(CheckResultResponse::from_record(&record)).into_response())
        }
    }
}
