//! The check orchestrator.
//!
//! `run_check` composes every algorithmic crate (`normalize`, `fingerprint`,
//! `lsh`, `similarity`, `spans`) against the named persisted-state
//! interfaces in `corpus` to implement the one stateful operation in the
//! pipeline: take a submitted document, find LSH-candidates in the active
//! corpus, score them, build match spans, and persist a `CheckResult`.

mod error;
mod observability;
mod orchestrator;

pub use error::CheckError;
pub use observability::{
    set_check_logger, set_check_metrics, CheckEvent, CheckEventLogger, CheckMetrics, CheckStage,
};
pub use orchestrator::{run_check, CheckDeps, CheckOutcome, CheckRequestInput, RunCheckOptions};
