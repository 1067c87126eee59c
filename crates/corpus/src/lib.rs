//! Named interfaces for the persisted state the checker depends on:
//! algorithm parameters, corpus membership and text, and check results.
//!
//! These traits are the seam the out-of-scope relational persistence layer
//! attaches at. One in-memory implementation of each trait ships for tests
//! and demos; struct field names mirror the persisted column names so a
//! real SQL-backed implementation can be dropped in without renaming.

mod error;
mod in_memory;
mod traits;
mod types;

pub use error::{CorpusReadError, PersistenceError};
pub use in_memory::{InMemoryCorpusStore, InMemoryParamsStore, InMemoryResultRepository};
pub use traits::{AlgorithmParamsStore, CheckResultRepository, CorpusStore};
pub use types::{
    AlgorithmParams, CheckRequest, CheckRequestStatus, CheckResultRecord, CorpusDocument,
    PersistedMatch, SourceType,
};
