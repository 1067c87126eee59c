use chrono::Utc;

use corpus::{
    CheckRequestStatus, CheckResultRepository, InMemoryCorpusStore, InMemoryParamsStore,
    InMemoryResultRepository,
};
use simtext::{check_text, run_check, AlgorithmParams, CheckDeps, CheckRequestInput,
    CorpusDocument, RunCheckOptions, SourceType};

fn params() -> InMemoryParamsStore {
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

fn seed(store: &InMemoryCorpusStore, id: &str, title: &str, text: &str) {
    store.add_document(
        CorpusDocument {
            id: id.into(),
            title: title.into(),
            source_type: SourceType::Upload,
            source_ref: format!("ref-{id}"),
            is_active: true,
        },
        Some(text.into()),
    );
}

#[test]
fn full_pipeline_matches_the_most_similar_of_several_sources() {
    let params = params();
    let corpus_store = InMemoryCorpusStore::new();
    seed(
        &corpus_store,
        "unrelated",
        "Unrelated Essay",
        "gardening tips for growing tomatoes in cold climates during early spring",
    );
    seed(
        &corpus_store,
        "near-dupe",
        "Near Duplicate",
        "the quick brown fox jumps over the lazy dog near the old wooden fence",
    );
    let results = InMemoryResultRepository::new();

    let outcome = check_text(
        "the quick brown fox jumps over the lazy dog near the old wooden fence",
        "submission-1",
        &params,
        &corpus_store,
        &results,
    )
    .unwrap();

    assert_eq!(outcome.similarity, 100.0);
    assert_eq!(outcome.candidates_count, 2);

    let record = results.result_for(outcome.check_id).unwrap();
    assert_eq!(results.status(outcome.check_id), Some(CheckRequestStatus::Done));
    assert!(!record.matches.is_empty());
}

#[test]
fn dissimilar_submission_persists_a_low_similarity_result_with_no_matches() {
    let params = params();
    let corpus_store = InMemoryCorpusStore::new();
    seed(
        &corpus_store,
        "c1",
        "Cooking",
        "season the cast iron skillet before searing the steak over high heat",
    );
    let results = InMemoryResultRepository::new();

    let deps = CheckDeps { params: &params, corpus: &corpus_store, results: &results };
    let outcome = run_check(
        CheckRequestInput {
            requested_by: "reviewer-1".into(),
            doc_id: "submission-2".into(),
            doc_text: "orbital mechanics govern how satellites maintain geostationary altitude"
                .into(),
            max_candidates: 10,
        },
        &deps,
        Utc::now(),
        RunCheckOptions::default(),
    )
    .unwrap();

    assert_eq!(outcome.matches_inserted, 0);
    assert_eq!(results.status(outcome.check_id), Some(CheckRequestStatus::Done));
}
