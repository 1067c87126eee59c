use chrono::Utc;

use corpus::{InMemoryCorpusStore, InMemoryParamsStore, InMemoryResultRepository};
use simtext::{check_text, AlgorithmParams, CheckError, CorpusDocument, SourceType};

fn empty_params() -> InMemoryParamsStore {
    InMemoryParamsStore::new(vec![])
}

fn active_params() -> InMemoryParamsStore {
    InMemoryParamsStore::new(vec![AlgorithmParams {
        id: "p1".into(),
        k: 5,
        w: 4,
        base: 100_000,
        threshold: 0.8,
        active_from: Utc::now() - chrono::Duration::days(1),
        active_to: None,
    }])
}

#[test]
fn empty_doc_id_is_rejected_as_invalid_input() {
    let params = active_params();
    let corpus_store = InMemoryCorpusStore::new();
    let results = InMemoryResultRepository::new();

    let err = check_text("some text here", "   ", &params, &corpus_store, &results).unwrap_err();
    assert_eq!(err, CheckError::InvalidInput("doc_id must not be empty".into()));
    assert_eq!(err.kind(), "InvalidInput");
}

#[test]
fn no_active_params_fails_the_check() {
    let params = empty_params();
    let corpus_store = InMemoryCorpusStore::new();
    let results = InMemoryResultRepository::new();

    let err =
        check_text("the quick brown fox jumps", "doc-1", &params, &corpus_store, &results)
            .unwrap_err();
    assert_eq!(err, CheckError::NoActiveParams);
}

#[test]
fn text_shorter_than_k_grams_fails_as_too_short() {
    let params = active_params();
    let corpus_store = InMemoryCorpusStore::new();
    let results = InMemoryResultRepository::new();

    let err = check_text("hi", "doc-1", &params, &corpus_store, &results).unwrap_err();
    assert_eq!(err, CheckError::EmptyOrTooShort);
}

#[test]
fn params_outside_their_active_window_are_ignored() {
    let params = InMemoryParamsStore::new(vec![AlgorithmParams {
        id: "expired".into(),
        k: 5,
        w: 4,
        base: 100_000,
        threshold: 0.8,
        active_from: Utc::now() - chrono::Duration::days(10),
        active_to: Some(Utc::now() - chrono::Duration::days(1)),
    }]);
    let corpus_store = InMemoryCorpusStore::new();
    let results = InMemoryResultRepository::new();

    let err =
        check_text("the quick brown fox jumps", "doc-1", &params, &corpus_store, &results)
            .unwrap_err();
    assert_eq!(err, CheckError::NoActiveParams);
}

#[test]
fn inactive_corpus_documents_are_not_matched_against() {
    let params = active_params();
    let corpus_store = InMemoryCorpusStore::new();
    corpus_store.add_document(
        CorpusDocument {
            id: "c1".into(),
            title: "Inactive Source".into(),
            source_type: SourceType::Upload,
            source_ref: "ref-c1".into(),
            is_active: false,
        },
        Some("the quick brown fox jumps over the lazy dog".into()),
    );
    let results = InMemoryResultRepository::new();

    let outcome = check_text(
        "the quick brown fox jumps over the lazy dog",
        "doc-1",
        &params,
        &corpus_store,
        &results,
    )
    .unwrap();

    assert_eq!(outcome.candidates_count, 0);
    assert_eq!(outcome.similarity, 0.0);
}
