// Metrics hooks for the `screening` crate.
//
// Callers install a global `EvaluationMetrics` implementation via
// [`set_evaluation_metrics`]; every `Evaluator` then reports skipped graphs and
// finished evaluations to it. Fingerprint generation itself never touches
// this slot.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use fingerprint::FingerprintError;
use once_cell::sync::OnceCell;

use crate::types::ConfusionCounts;

/// Metrics observer for evaluation runs.
pub trait EvaluationMetrics: Send + Sync {
    /// Record one completed all-pairs evaluation over `corpus_size` graphs.
    fn record_evaluation(&self, corpus_size: usize, counts: &ConfusionCounts, latency: Duration);

    /// Record a graph that was left out because fingerprinting failed.
    fn record_skipped(&self, id: &str, error: &FingerprintError);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn EvaluationMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn EvaluationMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn EvaluationMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global evaluation metrics recorder.
pub fn set_evaluation_metrics(recorder: Option<Arc<dyn EvaluationMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
