//! Sparse, ordered model → attack → cell mapping.

use crate::domain::CellSpec;

/// Cells registered for one model, in column order.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub model_id: String,
    pub cells: Vec<(String, CellSpec)>,
}

impl TableRow {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, attack_id: impl Into<String>, spec: CellSpec) -> Self {
        self.cells.push((attack_id.into(), spec));
        self
    }

    pub fn get(&self, attack_id: &str) -> Option<&CellSpec> {
        self.cells
            .iter()
            .find(|(id, _)| id == attack_id)
            .map(|(_, spec)| spec)
    }
}

/// The leaderboard table. A model may have a row with no cells; a missing
/// (model, attack) pair means "no data".
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<TableRow>,
}

impl Table {
    pub(crate) fn from_rows(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    /// Rows in registry order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row(&self, model_id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.model_id == model_id)
    }

    pub fn cell(&self, model_id: &str, attack_id: &str) -> Option<&CellSpec> {
        self.row(model_id).and_then(|r| r.get(attack_id))
    }

    /// Total number of registered cells.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }
}
