//! Refresh cycle counters.
//!
//! Execution outcomes only (what was written), kept separate from anything
//! the editor loop tracks about why it asked for a refresh.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RefreshMetrics {
    /// Cycles whose output reached the sink.
    pub cycles: AtomicU64,
    /// Cycles aborted by an output write error.
    pub failed_commits: AtomicU64,
    /// Bytes handed to the sink across all successful cycles.
    pub bytes_written: AtomicU64,
    /// Buffer lines painted by the most recent successful cycle.
    pub last_line_count: AtomicU64,
    /// Duration (ns) of the most recent refresh, successful or not.
    pub last_refresh_ns: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshMetricsSnapshot {
    pub cycles: u64,
    pub failed_commits: u64,
    pub bytes_written: u64,
    pub last_line_count: u64,
    pub last_refresh_ns: u64,
}

impl RefreshMetrics {
    pub(crate) fn record_commit(&self, bytes: usize, lines: usize) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
        self.last_line_count.store(lines as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failed_commits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_refresh_ns(&self, ns: u64) {
        self.last_refresh_ns.store(ns, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RefreshMetricsSnapshot {
        RefreshMetricsSnapshot {
            cycles: self.cycles.load(Ordering::Relaxed),
            failed_commits: self.failed_commits.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            last_line_count: self.last_line_count.load(Ordering::Relaxed),
            last_refresh_ns: self.last_refresh_ns.load(Ordering::Relaxed),
        }
    }
}
