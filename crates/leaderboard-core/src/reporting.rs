use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::registry::Registry;
use crate::render::RenderedTable;

pub const SCHEMA_VERSION: &str = "1";

/// Rendered table artifact handed to the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RenderedTableArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub table: RenderedTable,
}

impl RenderedTableArtifact {
    pub fn new(table: RenderedTable) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            table,
        }
    }
}

/// Write the artifact in pretty JSON format.
pub fn write_rendered_table_json(path: &Path, artifact: &RenderedTableArtifact) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact).context("serialize rendered table")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Render a Markdown preview: one row per model, one column per attack.
pub fn render_table_md(registry: &Registry, rendered: &RenderedTable) -> String {
    let mut out = String::new();
    out.push_str("| Model |");
    for attack in registry.attacks() {
        out.push_str(&format!(" {} |", attack.display_str));
    }
    out.push('\n');
    out.push_str("|---|");
    for _ in registry.attacks() {
        out.push_str("---|");
    }
    out.push('\n');

    for row in rendered.rows() {
        out.push_str(&format!(
            "| {} |",
            registry.model_display_name(&row.model_id)
        ));
        for attack in registry.attacks() {
            match row.get(&attack.id) {
                Some(cell) => out.push_str(&format!(
                    " {} ({}) |",
                    cell.content.value, cell.content.color
                )),
                None => out.push_str("  |"),
            }
        }
        out.push('\n');
    }
    out
}
