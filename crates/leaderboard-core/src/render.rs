//! Table rendering: resolve every registered cell into display content.
//!
//! Rows are walked in registry order and every row appears in the output,
//! even when it has no cells. The first resolver error aborts the render
//! and is returned to the caller unchanged; no partial table is produced.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use futures::future::try_join_all;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::domain::{CellContent, CellSpec, ExplanationComponent, ResolveError};
use crate::fetch::Fetcher;
use crate::metrics::METRICS;
use crate::obs::{
    emit_cell_failed, emit_cell_resolved, emit_render_finished, emit_render_started, RenderSpan,
};
use crate::registry::{Table, TableRow};

/// How cells are awaited.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// One cell after another.
    #[default]
    Sequential,

    /// Cells of a row concurrently, rows one after another.
    Concurrent,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Sequential => "sequential",
            RenderMode::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(RenderMode::Sequential),
            "concurrent" => Ok(RenderMode::Concurrent),
            other => Err(format!("unknown render mode: {}", other)),
        }
    }
}

/// A resolved cell, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderedCell {
    pub explanation: Option<ExplanationComponent>,
    pub explanation_props: Option<serde_json::Value>,
    pub content: CellContent,
}

/// Resolved cells of one model, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub model_id: String,
    pub cells: Vec<(String, RenderedCell)>,
}

impl RenderedRow {
    pub fn get(&self, attack_id: &str) -> Option<&RenderedCell> {
        self.cells
            .iter()
            .find(|(id, _)| id == attack_id)
            .map(|(_, cell)| cell)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Fully resolved table: model id → attack id → cell.
///
/// Serializes as nested JSON objects keyed by id, in registry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedTable {
    rows: Vec<RenderedRow>,
}

impl RenderedTable {
    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn row(&self, model_id: &str) -> Option<&RenderedRow> {
        self.rows.iter().find(|r| r.model_id == model_id)
    }

    pub fn get(&self, model_id: &str, attack_id: &str) -> Option<&RenderedCell> {
        self.row(model_id).and_then(|r| r.get(attack_id))
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }
}

struct CellsAsMap<'a>(&'a [(String, RenderedCell)]);

impl Serialize for CellsAsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (attack_id, cell) in self.0 {
            map.serialize_entry(attack_id, cell)?;
        }
        map.end()
    }
}

impl Serialize for RenderedTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(&row.model_id, &CellsAsMap(&row.cells))?;
        }
        map.end()
    }
}

/// Resolve every cell of `table` through `fetcher`.
pub async fn render_table(
    table: &Table,
    fetcher: &dyn Fetcher,
    mode: RenderMode,
) -> Result<RenderedTable, ResolveError> {
    let _span = RenderSpan::enter(mode.as_str());
    let started = Instant::now();
    emit_render_started(table.rows().len(), table.cell_count());

    let mut rows = Vec::with_capacity(table.rows().len());
    for row in table.rows() {
        let rendered = match mode {
            RenderMode::Sequential => render_row_sequential(row, fetcher).await,
            RenderMode::Concurrent => render_row_concurrent(row, fetcher).await,
        };
        match rendered {
            Ok(r) => rows.push(r),
            Err(e) => {
                emit_render_finished(0, started.elapsed().as_millis() as u64, false);
                return Err(e);
            }
        }
    }

    let rendered = RenderedTable { rows };
    emit_render_finished(
        rendered.cell_count(),
        started.elapsed().as_millis() as u64,
        true,
    );
    Ok(rendered)
}

async fn render_row_sequential(
    row: &TableRow,
    fetcher: &dyn Fetcher,
) -> Result<RenderedRow, ResolveError> {
    let mut cells = Vec::with_capacity(row.cells.len());
    for (attack_id, spec) in &row.cells {
        let cell = resolve_cell(&row.model_id, attack_id, spec, fetcher).await?;
        cells.push((attack_id.clone(), cell));
    }
    Ok(RenderedRow {
        model_id: row.model_id.clone(),
        cells,
    })
}

async fn render_row_concurrent(
    row: &TableRow,
    fetcher: &dyn Fetcher,
) -> Result<RenderedRow, ResolveError> {
    let futures = row.cells.iter().map(|(attack_id, spec)| async move {
        let cell = resolve_cell(&row.model_id, attack_id, spec, fetcher).await?;
        Ok::<_, ResolveError>((attack_id.clone(), cell))
    });
    let cells = try_join_all(futures).await?;
    Ok(RenderedRow {
        model_id: row.model_id.clone(),
        cells,
    })
}

async fn resolve_cell(
    model_id: &str,
    attack_id: &str,
    spec: &CellSpec,
    fetcher: &dyn Fetcher,
) -> Result<RenderedCell, ResolveError> {
    match spec.resolver.resolve(model_id, attack_id, fetcher).await {
        Ok(content) => {
            METRICS.inc_cells_resolved();
            emit_cell_resolved(model_id, attack_id, spec.resolver.name());
            Ok(RenderedCell {
                explanation: spec.explanation.clone(),
                explanation_props: spec.explanation_props.clone(),
                content,
            })
        }
        Err(e) => {
            METRICS.inc_cells_failed();
            emit_cell_failed(model_id, attack_id, &e);
            Err(e)
        }
    }
}
