//! Umbrella crate for the text-similarity check pipeline.
//!
//! Re-exports the `normalize`, `fingerprint`, `lsh`, `similarity`, `spans`,
//! `corpus`, and `checker` crates so applications can drive the full
//! pipeline through a single dependency, plus [`check_text`], a convenience
//! wrapper around [`checker::run_check`] for callers who don't need to build
//! their own `CheckDeps`.
//!
//! ## Quick start
//!
//! ```
//! use chrono::Utc;
//! use simtext::{check_text, AlgorithmParams, CorpusDocument, SourceType};
//!
//! let params = simtext::corpus::InMemoryParamsStore::new(vec![AlgorithmParams {
//!     id: "p1".into(),
//!     k: 5,
//!     w: 4,
//!     base: 100_000,
//!     threshold: 0.8,
//!     active_from: Utc::now() - chrono::Duration::days(1),
//!     active_to: None,
//! }]);
//! let corpus_store = simtext::corpus::InMemoryCorpusStore::new();
//! corpus_store.add_document(
//!     CorpusDocument {
//!         id: "c1".into(),
//!         title: "Source".into(),
//!         source_type: SourceType::Upload,
//!         source_ref: "ref".into(),
//!         is_active: true,
//!     },
//!     Some("the quick brown fox jumps over the lazy dog".into()),
//! );
//! let results = simtext::corpus::InMemoryResultRepository::new();
//!
//! let outcome = check_text(
//!     "the quick brown fox jumps over the lazy dog",
//!     "doc-1",
//!     &params,
//!     &corpus_store,
//!     &results,
//! ).unwrap();
//! assert_eq!(outcome.similarity, 100.0);
//! ```

pub mod config;

pub use checker::{
    run_check, CheckDeps, CheckError, CheckOutcome, CheckRequestInput, RunCheckOptions,
};
pub use corpus::{
    AlgorithmParams, AlgorithmParamsStore, CheckResultRecord, CheckResultRepository,
    CorpusDocument, CorpusStore, PersistedMatch, SourceType,
};
pub use fingerprint::{h64, h_p, minhash_signature, winnow, Fingerprint, MinHashSignature};
pub use lsh::{lsh_buckets, share_bucket, DEFAULT_BANDS};
pub use normalize::{kgrams, normalize, KGram, NormalizedText};
pub use similarity::{jaccard, minhash_estimate};
pub use spans::{build_spans, MatchSpan};

pub use corpus;

/// Run one check against an anonymous requester, using the pipeline's
/// built-in deadline default. A thin convenience layer over
/// [`checker::run_check`] for callers assembling their own stores inline
/// rather than through [`crate::config::SimtextConfig`].
pub fn check_text(
    doc_text: &str,
    doc_id: &str,
    params: &dyn AlgorithmParamsStore,
    corpus_store: &dyn CorpusStore,
    results: &dyn CheckResultRepository,
) -> Result<CheckOutcome, CheckError> {
    let deps = CheckDeps { params, corpus: corpus_store, results };
    run_check(
        CheckRequestInput {
            requested_by: "anonymous".to_string(),
            doc_id: doc_id.to_string(),
            doc_text: doc_text.to_string(),
            max_candidates: 10,
        },
        &deps,
        chrono::Utc::now(),
        RunCheckOptions::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus::{InMemoryCorpusStore, InMemoryParamsStore, InMemoryResultRepository};

    fn params() -> InMemoryParamsStore {
        InMemoryParamsStore::new(vec![AlgorithmParams {
            id: "p1".into(),
            k: 5,
            w: 4,
            base: 100_000,
            threshold: 0.8,
            active_from: chrono::Utc::now() - chrono::Duration::days(1),
            active_to: None,
        }])
    }

    #[test]
    fn check_text_wires_in_memory_stores_end_to_end() {
        let params = params();
        let corpus_store = InMemoryCorpusStore::new();
        corpus_store.add_document(
            CorpusDocument {
                id: "c1".into(),
                title: "Source".into(),
                source_type: SourceType::Upload,
                source_ref: "ref".into(),
                is_active: true,
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

        assert_eq!(outcome.similarity, 100.0);
    }
}
