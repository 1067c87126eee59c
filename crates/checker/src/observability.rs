//! Optional observability hooks for the orchestrator.
//!
//! Neither hook is required: `run_check` always emits `tracing` spans for
//! its stages regardless of whether a recorder or logger is installed. The
//! hooks exist for callers that want structured metrics/events without
//! scraping log lines.

use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

use crate::error::CheckError;

/// A stage of the check pipeline, for metrics/event attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    Params,
    Bucket,
    Scan,
    Spans,
    Persist,
}

impl fmt::Display for CheckStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckStage::Params => "params",
            CheckStage::Bucket => "bucket",
            CheckStage::Scan => "scan",
            CheckStage::Spans => "spans",
            CheckStage::Persist => "persist",
        };
        f.write_str(name)
    }
}

/// Metrics observer for check stages.
pub trait CheckMetrics: Send + Sync {
    fn record_stage(&self, stage: CheckStage, latency: Duration, result: Result<(), &CheckError>);
}

/// Structured event emitted once a check completes or fails.
#[derive(Debug, Clone)]
pub struct CheckEvent {
    pub check_id: uuid::Uuid,
    pub doc_id: String,
    pub candidates_count: usize,
    pub similarity_percent: Option<f64>,
    pub error: Option<String>,
}

/// Hook for emitting a structured event per completed/failed check.
pub trait CheckEventLogger: Send + Sync {
    fn log(&self, event: &CheckEvent);
}

/// Install or clear the global check metrics recorder.
pub fn set_check_metrics(recorder: Option<Arc<dyn CheckMetrics>>) {
    let mut guard = metrics_lock().write().expect("check metrics lock poisoned");
    *guard = recorder;
}

pub(crate) fn check_metrics() -> Option<Arc<dyn CheckMetrics>> {
    metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn CheckMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn CheckMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

/// Install or clear the global check event logger.
pub fn set_check_logger(logger: Option<Arc<dyn CheckEventLogger>>) {
    let mut guard = logger_lock().write().expect("check logger lock poisoned");
    *guard = logger;
}

pub(crate) fn check_logger() -> Option<Arc<dyn CheckEventLogger>> {
    logger_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

fn logger_lock() -> &'static RwLock<Option<Arc<dyn CheckEventLogger>>> {
    static LOGGER: OnceLock<RwLock<Option<Arc<dyn CheckEventLogger>>>> = OnceLock::new();
    LOGGER.get_or_init(|| RwLock::new(None))
}
