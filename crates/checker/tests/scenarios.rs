use chrono::Utc;

use checker::{run_check, CheckDeps, CheckError, CheckRequestInput, RunCheckOptions};
use corpus::{
    AlgorithmParams, CheckResultRepository, CorpusDocument, InMemoryCorpusStore,
    InMemoryParamsStore, InMemoryResultRepository, SourceType,
};

fn params(k: usize, w: usize, threshold: f64) -> InMemoryParamsStore {
    let now = Utc::now();
    InMemoryParamsStore::new(vec![AlgorithmParams {
        id: "p1".into(),
        k,
        w,
        base: 100_000,
        threshold,
        active_from: now - chrono::Duration::days(1),
        active_to: None,
    }])
}

fn doc(id: &str, title: &str) -> CorpusDocument {
    CorpusDocument {
        id: id.into(),
        title: title.into(),
        source_type: SourceType::Upload,
        source_ref: format!("ref-{id}"),
        is_active: true,
    }
}

#[test]
fn scenario_identical_texts_are_a_full_match() {
    let text = "The quick brown fox jumps over the lazy dog near the riverbank at dawn.";
    let params = params(5, 4, 0.8);
    let corpus_store = InMemoryCorpusStore::new();
    corpus_store.add_document(doc("c1", "Source One"), Some(text.to_string()));
    let results = InMemoryResultRepository::new();
    let deps = CheckDeps { params: &params, corpus: &corpus_store, results: &results };

    let outcome = run_check(
        CheckRequestInput {
            requested_by: "u1".into(),
            doc_id: "doc-1".into(),
            doc_text: text.into(),
            max_candidates: 10,
        },
        &deps,
        Utc::now(),
        RunCheckOptions::default(),
    )
    .expect("identical texts should succeed");

    assert_eq!(outcome.similarity, 100.0);
    assert!(outcome.matches_inserted >= 1);

    let record = results.result_for(outcome.check_id).unwrap();
    let full_span = record
        .matches
        .iter()
        .find(|m| m.doc_span_start == 0)
        .expect("a span covering the start of the document");
    assert!(full_span.doc_span_end > full_span.doc_span_start);
}

#[test]
fn scenario_disjoint_vocabularies_never_match() {
    let params = params(5, 4, 0.8);
    let corpus_store = InMemoryCorpusStore::new();
    corpus_store.add_document(doc("c1", "Source One"), Some("bbbb bbbb bbbb".into()));
    let results = InMemoryResultRepository::new();
    let deps = CheckDeps { params: &params, corpus: &corpus_store, results: &results };

    let outcome = run_check(
        CheckRequestInput {
            requested_by: "u1".into(),
            doc_id: "doc-1".into(),
            doc_text: "aaaa aaaa aaaa".into(),
            max_candidates: 10,
        },
        &deps,
        Utc::now(),
        RunCheckOptions::default(),
    )
    .expect("disjoint vocabularies should still succeed with zero similarity");

    assert_eq!(outcome.similarity, 0.0);
    assert_eq!(outcome.matches_inserted, 0);
}

#[test]
fn scenario_partial_overlap_is_strictly_between_zero_and_one() {
    let shared = "zzqxjkvwbnmtpglrduyfh";
    let doc_text = format!("lorem ipsum dolor sit amet consectetur {shared}");
    let source_text = format!("completely different padding around {shared} and more padding");
    let unrelated_text = "nothing in common with anything else at all here";

    let params = params(5, 4, 0.05);
    let corpus_store = InMemoryCorpusStore::new();
    corpus_store.add_document(doc("c1", "Source One"), Some(source_text));
    corpus_store.add_document(doc("c2", "Unrelated"), Some(unrelated_text.into()));
    let results = InMemoryResultRepository::new();
    let deps = CheckDeps { params: &params, corpus: &corpus_store, results: &results };

    let outcome = run_check(
        CheckRequestInput {
            requested_by: "u1".into(),
            doc_id: "doc-1".into(),
            doc_text,
            max_candidates: 10,
        },
        &deps,
        Utc::now(),
        RunCheckOptions::default(),
    )
    .expect("partial overlap should succeed");

    assert!(outcome.similarity > 0.0 && outcome.similarity < 100.0);
}

#[test]
fn scenario_case_and_punctuation_variation_still_matches_fully() {
    let doc_text = "Hello, World! This Is A Test.";
    let source_text = "hello world this is a test";

    let params = params(5, 4, 0.8);
    let corpus_store = InMemoryCorpusStore::new();
    corpus_store.add_document(doc("c1", "Source One"), Some(source_text.into()));
    let results = InMemoryResultRepository::new();
    let deps = CheckDeps { params: &params, corpus: &corpus_store, results: &results };

    let outcome = run_check(
        CheckRequestInput {
            requested_by: "u1".into(),
            doc_id: "doc-1".into(),
            doc_text: doc_text.into(),
            max_candidates: 10,
        },
        &deps,
        Utc::now(),
        RunCheckOptions::default(),
    )
    .expect("case/punctuation variants should still match");

    assert_eq!(outcome.similarity, 100.0);
}

#[test]
fn scenario_empty_corpus_has_no_candidates_but_still_succeeds() {
    let params = params(5, 4, 0.8);
    let corpus_store = InMemoryCorpusStore::new();
    let results = InMemoryResultRepository::new();
    let deps = CheckDeps { params: &params, corpus: &corpus_store, results: &results };

    let outcome = run_check(
        CheckRequestInput {
            requested_by: "u1".into(),
            doc_id: "doc-1".into(),
            doc_text: "some reasonably long document text to satisfy k".into(),
            max_candidates: 10,
        },
        &deps,
        Utc::now(),
        RunCheckOptions::default(),
    )
    .expect("empty corpus should still produce a done result");

    assert_eq!(outcome.similarity, 0.0);
    assert_eq!(outcome.candidates_count, 0);
    assert_eq!(outcome.matches_inserted, 0);
    assert_eq!(
        results.status(outcome.check_id),
        Some(corpus::CheckRequestStatus::Done)
    );
}

#[test]
fn scenario_too_short_document_fails_with_no_result_row() {
    let params = params(5, 4, 0.8);
    let corpus_store = InMemoryCorpusStore::new();
    let results = InMemoryResultRepository::new();
    let deps = CheckDeps { params: &params, corpus: &corpus_store, results: &results };

    let err = run_check(
        CheckRequestInput {
            requested_by: "u1".into(),
            doc_id: "doc-1".into(),
            doc_text: "hi".into(),
            max_candidates: 10,
        },
        &deps,
        Utc::now(),
        RunCheckOptions::default(),
    )
    .unwrap_err();

    assert_eq!(err, CheckError::EmptyOrTooShort);

    // The request row moved to `failed` and no result was ever committed.
    let requests = results.all_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].status, corpus::CheckRequestStatus::Failed);
    assert!(results.result_for(requests[0].id).is_none());
}
