//! Global atomic counters for leaderboard observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. at the end of a render).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters — no allocations, no locking.
pub struct Metrics {
    cells_resolved: AtomicU64,
    cells_failed: AtomicU64,
    fetches_issued: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            cells_resolved: AtomicU64::new(0),
            cells_failed: AtomicU64::new(0),
            fetches_issued: AtomicU64::new(0),
        }
    }

    pub fn inc_cells_resolved(&self) {
        self.cells_resolved.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "cells_resolved", "counter incremented");
    }

    pub fn inc_cells_failed(&self) {
        self.cells_failed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "cells_failed", "counter incremented");
    }

    /// Called by fetcher backends once per request.
    pub fn inc_fetches(&self) {
        self.fetches_issued.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "fetches_issued", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            cells_resolved = self.cells_resolved(),
            cells_failed = self.cells_failed(),
            fetches_issued = self.fetches_issued(),
        );
    }

    pub fn cells_resolved(&self) -> u64 {
        self.cells_resolved.load(Ordering::Relaxed)
    }

    pub fn cells_failed(&self) -> u64 {
        self.cells_failed.load(Ordering::Relaxed)
    }

    pub fn fetches_issued(&self) -> u64 {
        self.fetches_issued.load(Ordering::Relaxed)
    }
}
