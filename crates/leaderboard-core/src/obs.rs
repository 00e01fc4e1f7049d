//! Structured observability hooks for table rendering.
//!
//! This module provides:
//! - A render-scoped tracing span via the `RenderSpan` RAII guard
//! - Emission functions for render start/finish and per-cell outcomes

use tracing::info;

/// RAII guard that enters a render-scoped span.
///
/// ```ignore
/// let _span = RenderSpan::enter("sequential");
/// ```
pub struct RenderSpan {
    _span: tracing::span::EnteredSpan,
}

impl RenderSpan {
    pub fn enter(mode: &str) -> Self {
        let span = tracing::info_span!("leaderboard.render", mode = %mode);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: render started over `rows` table rows.
pub fn emit_render_started(rows: usize, cells: usize) {
    info!(event = "render.started", rows = rows, cells = cells);
}

/// Emit event: a cell resolved.
pub fn emit_cell_resolved(model_id: &str, attack_id: &str, resolver: &str) {
    tracing::debug!(
        event = "render.cell_resolved",
        model_id = %model_id,
        attack_id = %attack_id,
        resolver = %resolver,
    );
}

/// Emit event: a cell failed to resolve (warning level).
pub fn emit_cell_failed(model_id: &str, attack_id: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(
        event = "render.cell_failed",
        model_id = %model_id,
        attack_id = %attack_id,
        error = %error,
    );
}

/// Emit event: render finished.
pub fn emit_render_finished(cells: usize, duration_ms: u64, success: bool) {
    info!(
        event = "render.finished",
        cells = cells,
        duration_ms = duration_ms,
        success = success,
    );
}
