// Metrics hooks for the `matcher` crate.
//
// Callers install a global `AnalysisMetrics` implementation via
// [`set_analysis_metrics`]; every call to [`Matcher::analyze`] then reports
// its latency, candidate count and match count. No metrics backend is
// linked here.
//
// [`Matcher::analyze`]: crate::Matcher::analyze
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for ingredient analyses.
pub trait AnalysisMetrics: Send + Sync {
    /// Record one finished analysis.
    ///
    /// `candidates` is the number of normalized terms extracted from the
    /// text and `matches` the number of results returned after grouping.
    fn record_analysis(&self, latency: Duration, candidates: usize, matches: usize);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn AnalysisMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn AnalysisMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn AnalysisMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global analysis metrics recorder.
pub fn set_analysis_metrics(recorder: Option<Arc<dyn AnalysisMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
