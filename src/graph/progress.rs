//! Progress counting across worker threads and the end-of-run summary

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// Counts completed projects; every `interval`-th completion (and the last
/// one) produces exactly one progress line.
pub struct ProgressTracker {
    completed: AtomicUsize,
    total: usize,
    interval: usize,
}

impl ProgressTracker {
    pub fn new(total: usize, interval: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
            interval: interval.max(1),
        }
    }

    /// Record one completion. Returns true when this call logged.
    pub fn record(&self) -> bool {
        let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        let report = done % self.interval == 0 || done == self.total;
        if report {
            info!("Processed {}/{} projects", done, self.total);
        }
        report
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

/// Timings and failure count of one analysis run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_time: Duration,
    pub analysis_time: Duration,
    pub projects_analyzed: usize,
    pub failed_projects: Vec<String>,
    pub cached_analysis_lookups: usize,
}

impl RunSummary {
    pub fn average_per_project(&self) -> Duration {
        match u32::try_from(self.projects_analyzed) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.analysis_time / n,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed_projects.is_empty()
    }

    pub fn log(&self) {
        info!("Analysis complete");
        info!("  Total time: {}ms", self.total_time.as_millis());
        info!("  Analysis time: {}ms", self.analysis_time.as_millis());
        info!("  Projects analyzed: {}", self.projects_analyzed);
        info!("  Failed projects: {}", self.failed_projects.len());
        info!(
            "  Average per project: {:.2}ms",
            self.average_per_project().as_secs_f64() * 1000.0
        );
        info!("  Cached analysis lookups: {}", self.cached_analysis_lookups);
    }
}
