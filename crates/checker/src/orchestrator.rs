use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use corpus::{
    AlgorithmParams, AlgorithmParamsStore, CheckResultRecord, CheckResultRepository, CorpusStore,
    PersistedMatch, SourceType,
};
use fingerprint::{minhash_signature, winnow, Fingerprint, MinHashSignature};
use lsh::{lsh_buckets, share_bucket, DEFAULT_BANDS};
use normalize::{normalize, NormalizedText};
use similarity::{jaccard, minhash_estimate};
use spans::build_spans;

use crate::error::CheckError;
use crate::observability::{check_logger, check_metrics, CheckEvent, CheckStage};

const NUM_PERM: usize = 100;
const MAX_CANDIDATES_CEILING: usize = 50;
const MAX_MATCHES_CEILING: usize = 50;
const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

/// Input to [`run_check`]: the submitted document and the caller's request.
pub struct CheckRequestInput {
    pub requested_by: String,
    pub doc_id: String,
    pub doc_text: String,
    pub max_candidates: usize,
}

/// Tuning knobs the orchestrator itself owns (not persisted state).
#[derive(Debug, Clone, Copy)]
pub struct RunCheckOptions {
    pub deadline: Duration,
    /// Fan the corpus scan out across a rayon thread pool. Deterministic
    /// candidate ordering is restored afterward regardless of this flag.
    pub use_parallel: bool,
}

impl Default for RunCheckOptions {
    fn default() -> Self {
        Self {
            deadline: DEFAULT_DEADLINE,
            use_parallel: false,
        }
    }
}

/// The collaborators `run_check` reads/writes against.
pub struct CheckDeps<'a> {
    pub params: &'a dyn AlgorithmParamsStore,
    pub corpus: &'a dyn CorpusStore,
    pub results: &'a dyn CheckResultRepository,
}

/// What `POST /api/checks` returns: the wire contract from the external
/// interfaces list.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub check_id: Uuid,
    pub result_id: Uuid,
    pub similarity: f64,
    pub threshold: f64,
    pub candidates_count: usize,
    pub matches_inserted: usize,
}

#[derive(Serialize)]
struct SummaryParams {
    id_params: String,
    k: usize,
    w: usize,
    threshold: f64,
}

#[derive(Serialize)]
struct SummaryCandidate {
    id_corpus: String,
    title: String,
    approx: f64,
}

#[derive(Serialize)]
struct Summary {
    params: SummaryParams,
    candidates: Vec<SummaryCandidate>,
    best_similarity: f64,
    warnings: Vec<String>,
}

struct ScannedCandidate {
    doc_id: String,
    title: String,
    text: NormalizedText,
    approx: f64,
}

/// Run one plagiarism check: load parameters, fingerprint the document,
/// prune the corpus to LSH-candidates, score exact Jaccard against the
/// surviving candidates, build match spans, and persist the result.
///
/// `CorpusRead` failures on individual corpus documents are caught and
/// logged here and never propagate; every other error kind moves the
/// request to `failed` and returns.
pub fn run_check(
    input: CheckRequestInput,
    deps: &CheckDeps<'_>,
    now: DateTime<Utc>,
    opts: RunCheckOptions,
) -> Result<CheckOutcome, CheckError> {
    if input.doc_id.trim().is_empty() {
        return Err(CheckError::InvalidInput("doc_id must not be empty".into()));
    }
    let start = Instant::now();

    let params = stage(CheckStage::Params, || {
        deps.params.active_params(now).ok_or(CheckError::NoActiveParams)
    })?;

    let request_id = deps
        .results
        .begin_request(&input.requested_by, &input.doc_id, &params.id)
        .map_err(CheckError::from)?;
    deps.results.mark_processing(request_id).map_err(CheckError::from)?;

    match run_check_inner(&input, deps, &params, now, opts, request_id, start) {
        Ok(outcome) => {
            log_event(request_id, &input.doc_id, outcome.candidates_count, Some(outcome.similarity), None);
            Ok(outcome)
        }
        Err(err) => {
            let _ = deps.results.mark_failed(request_id, &err.to_string());
            log_event(request_id, &input.doc_id, 0, None, Some(err.to_string()));
            Err(err)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_check_inner(
    input: &CheckRequestInput,
    deps: &CheckDeps<'_>,
    params: &AlgorithmParams,
    now: DateTime<Utc>,
    opts: RunCheckOptions,
    request_id: Uuid,
    start: Instant,
) -> Result<CheckOutcome, CheckError> {
    let t_doc = normalize(&input.doc_text);
    if t_doc.len_chars() < params.k {
        return Err(CheckError::EmptyOrTooShort);
    }

    let (sig_doc, buckets_doc) = stage(CheckStage::Bucket, || {
        let sig = minhash_signature(&t_doc, params.k, NUM_PERM);
        let buckets = lsh_buckets(&sig, DEFAULT_BANDS);
        Ok::<_, CheckError>((sig, buckets))
    })?;

    let max_candidates = input.max_candidates.min(MAX_CANDIDATES_CEILING).max(1);
    let (mut candidates, warnings) = stage(CheckStage::Scan, || {
        scan_corpus(deps.corpus, params.k, &sig_doc, &buckets_doc, opts, start)
    })?;

    candidates.sort_by(|a, b| {
        b.approx
            .partial_cmp(&a.approx)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
    candidates.truncate(max_candidates);
    let candidates_count = candidates.len();

    let fp_doc = winnow(&t_doc, params.k, params.w);
    let mut best_sim = 0.0f64;
    let mut persisted_matches = Vec::new();
    let mut summary_candidates = Vec::with_capacity(candidates.len());

    stage(CheckStage::Spans, || {
        for cand in &candidates {
            if start.elapsed() > opts.deadline {
                return Err(CheckError::Deadline);
            }
            let fp_c = winnow(&cand.text, params.k, params.w);
            let sim = jaccard(&fp_doc, &fp_c);
            best_sim = best_sim.max(sim);
            summary_candidates.push(SummaryCandidate {
                id_corpus: cand.doc_id.clone(),
                title: cand.title.clone(),
                approx: cand.approx,
            });

            if sim >= params.threshold && persisted_matches.len() < MAX_MATCHES_CEILING {
                append_spans(&mut persisted_matches, &fp_doc, &fp_c, params.k, &cand.doc_id);
            }
        }
        Ok::<(), CheckError>(())
    })?;
    persisted_matches.truncate(MAX_MATCHES_CEILING);

    let similarity_percent = (best_sim * 10000.0).round() / 100.0;
    let result_id = Uuid::new_v4();
    for m in persisted_matches.iter_mut() {
        m.result_id = result_id;
    }
    let summary = Summary {
        params: SummaryParams {
            id_params: params.id.clone(),
            k: params.k,
            w: params.w,
            threshold: params.threshold,
        },
        candidates: summary_candidates,
        best_similarity: best_sim,
        warnings,
    };
    let summary_json = serde_json::to_string(&summary).unwrap_or_else(|_| "{}".to_string());

    let matches_inserted = persisted_matches.len();
    stage(CheckStage::Persist, || {
        deps.results
            .commit_result(
                request_id,
                CheckResultRecord {
                    id: result_id,
                    check_id: request_id,
                    similarity: similarity_percent,
                    summary_json,
                    created_at: now,
                    matches: persisted_matches,
                },
            )
            .map_err(CheckError::from)
    })?;

    Ok(CheckOutcome {
        check_id: request_id,
        result_id,
        similarity: similarity_percent,
        threshold: params.threshold,
        candidates_count,
        matches_inserted,
    })
}

fn scan_corpus(
    corpus_store: &dyn CorpusStore,
    k: usize,
    sig_doc: &MinHashSignature,
    buckets_doc: &[String],
    opts: RunCheckOptions,
    start: Instant,
) -> Result<(Vec<ScannedCandidate>, Vec<String>), CheckError> {
    let docs = corpus_store.active_documents();

    let process_one = |doc: &corpus::CorpusDocument| -> Result<Option<ScannedCandidate>, String> {
        match corpus_store.read_text(doc) {
            Err(e) => Err(e.to_string()),
            Ok(text) => {
                let normalized = normalize(&text);
                let sig_c = minhash_signature(&normalized, k, NUM_PERM);
                let buckets_c = lsh_buckets(&sig_c, DEFAULT_BANDS);
                if !share_bucket(buckets_doc, &buckets_c) {
                    return Ok(None);
                }
                let approx = minhash_estimate(sig_doc, &sig_c);
                Ok(Some(ScannedCandidate {
                    doc_id: doc.id.clone(),
                    title: doc.title.clone(),
                    text: normalized,
                    approx,
                }))
            }
        }
    };

    let mut candidates = Vec::new();
    let mut warnings = Vec::new();

    if opts.use_parallel {
        use rayon::prelude::*;
        let outcomes: Vec<Result<Option<ScannedCandidate>, String>> =
            docs.par_iter().map(process_one).collect();
        for outcome in outcomes {
            match outcome {
                Ok(Some(c)) => candidates.push(c),
                Ok(None) => {}
                Err(reason) => {
                    tracing::warn!(reason = %reason, "skipping unreadable corpus document");
                    warnings.push(reason);
                }
            }
        }
    } else {
        for doc in &docs {
            if start.elapsed() > opts.deadline {
                return Err(CheckError::Deadline);
            }
            match process_one(doc) {
                Ok(Some(c)) => candidates.push(c),
                Ok(None) => {}
                Err(reason) => {
                    tracing::warn!(reason = %reason, "skipping unreadable corpus document");
                    warnings.push(reason);
                }
            }
        }
    }

    Ok((candidates, warnings))
}

fn append_spans(
    out: &mut Vec<PersistedMatch>,
    fp_doc: &[Fingerprint],
    fp_src: &[Fingerprint],
    k: usize,
    source_id: &str,
) {
    for span in build_spans(fp_doc, fp_src, k) {
        out.push(PersistedMatch {
            result_id: Uuid::nil(),
            source_type: SourceType::Upload,
            source_id: source_id.to_string(),
            doc_span_start: span.doc_start,
            doc_span_end: span.doc_end,
            src_span_start: span.src_start,
            src_span_end: span.src_end,
            match_score: span.match_score,
            snippet_hash: span.snippet_hash,
        });
    }
}

fn stage<T>(
    which: CheckStage,
    f: impl FnOnce() -> Result<T, CheckError>,
) -> Result<T, CheckError> {
    let span = tracing::info_span!("check_stage", stage = %which);
    let _enter = span.enter();
    let started = Instant::now();
    let result = f();
    let latency = started.elapsed();
    if let Some(recorder) = check_metrics() {
        recorder.record_stage(which, latency, result.as_ref().map(|_| ()).map_err(|e| e));
    }
    match &result {
        Ok(_) => tracing::debug!(stage = %which, latency_us = latency.as_micros(), "stage completed"),
        Err(e) => tracing::warn!(stage = %which, latency_us = latency.as_micros(), error = %e, "stage failed"),
    }
    result
}

fn log_event(
    check_id: Uuid,
    doc_id: &str,
    candidates_count: usize,
    similarity_percent: Option<f64>,
    error: Option<String>,
) {
    if let Some(logger) = check_logger() {
        logger.log(&CheckEvent {
            check_id,
            doc_id: doc_id.to_string(),
            candidates_count,
            similarity_percent,
            error,
        });
    }
}
