//! The published leaderboard.
//!
//! Policy-only models get their `static` column from labeled transcripts;
//! every other populated cell carries hand-entered content.

use std::sync::{Arc, OnceLock};

use crate::domain::{
    Attack, CellContent, CellSpec, Color, ExplanationComponent, Model, RegistryError,
};
use crate::resolve::{FixedContent, PolicyStatic};

use super::{Registry, TableRow};

pub const GROUP_POLICY_ONLY: &str = "policy-only";
pub const GROUP_BASELINE_CLASSIFIERS: &str = "baseline-classifiers";
pub const GROUP_OUR_CLASSIFIERS: &str = "our-classifiers";

static BUILTIN: OnceLock<Registry> = OnceLock::new();

/// Process-wide built-in registry, constructed on first use.
pub fn builtin() -> Result<&'static Registry, RegistryError> {
    if let Some(registry) = BUILTIN.get() {
        return Ok(registry);
    }
    let registry = build_builtin()?;
    Ok(BUILTIN.get_or_init(|| registry))
}

fn fixed(value: impl Into<crate::domain::CellValue>, color: Color) -> CellSpec {
    CellSpec::new(Arc::new(FixedContent(CellContent::new(value, color))))
}

fn policy_static() -> CellSpec {
    CellSpec::new(Arc::new(PolicyStatic::new()))
        .with_explanation(ExplanationComponent::POLICY_STATIC, None)
}

fn policy_models() -> Vec<Model> {
    vec![
        Model::new("claude-3-opus-20240229").with_display("claude-3-opus"),
        Model::new("claude-3-sonnet-20240229").with_display("claude-3-sonnet"),
        Model::new("claude-3-haiku-20240307").with_display("claude-3-haiku"),
        Model::new("gpt-4o-2024-05-13"),
        Model::new("gpt-4-turbo-2024-04-09").with_display("gpt-4-turbo"),
        Model::new("gpt-3.5-turbo-0125"),
        Model::new("gpt-3.5-turbo-1106"),
        Model::new("ft:gpt-3.5-turbo-1106:academicsnyuperez::91cDAREP").with_display("adv-sft-op1"),
        Model::new("ft:gpt-3.5-turbo-1106:academicsnyuperez::91Wjz8Kd").with_display("adv-sft-op2"),
        Model::new("ft:gpt-3.5-turbo-1106:academicsnyuperez::91YW891r").with_display("adv-sft-op3"),
        Model::new("r2d2").with_display("R2D2"),
    ]
}

fn build_builtin() -> Result<Registry, RegistryError> {
    let mut builder = Registry::builder()
        .group(GROUP_POLICY_ONLY, policy_models())
        .group(
            GROUP_BASELINE_CLASSIFIERS,
            vec![
                Model::new("llama-guard-2-s").with_display("LlamaGuard-2-s"),
                Model::new("llama-guard-2-f").with_display("LlamaGuard-2-f"),
                Model::new("harmbench-4o").with_display("HarmBench-4o"),
                Model::new("harmbench-llama").with_display("HarmBench-llama"),
                Model::new("harmbench-mistral").with_display("Harmbench-mistral"),
            ],
        )
        .group(
            GROUP_OUR_CLASSIFIERS,
            vec![
                Model::new("cot-eg-4t").with_display("CoT-eg-4t"),
                Model::new("cot-4o").with_display("CoT-4o"),
            ],
        )
        .attacks([
            Attack::new("static").with_display("Static"),
            Attack::new("dry-ice").with_display("Dry-Ice"),
            Attack::new("prompt-inj").with_display("Prompt Inj."),
            Attack::new("foreign-lang").with_display("Forgn. Lang."),
            Attack::new("rand-search").with_display("Rand. Search"),
            Attack::new("pair").with_display("PAIR"),
        ]);

    // policy only models
    for model in policy_models() {
        let row = TableRow::new(model.id.clone());
        let row = match model.id.as_str() {
            "r2d2" => row,
            "claude-3-opus-20240229" => row
                .cell("static", policy_static())
                .cell("dry-ice", fixed(40.0, Color::Red))
                .cell("pair", fixed(0.03, Color::Red)),
            _ => row.cell("static", policy_static()),
        };
        builder = builder.row(row);
    }

    // baseline classifiers
    builder = builder
        .row(
            TableRow::new("llama-guard-2-s")
                .cell("static", fixed(0.0, Color::Green))
                .cell("dry-ice", fixed(21.73, Color::Red))
                .cell("prompt-inj", fixed(37.88, Color::Red))
                .cell("foreign-lang", fixed(10.93, Color::Red))
                .cell("rand-search", fixed("?", Color::White))
                .cell("pair", fixed(5.83, Color::Red)),
        )
        .row(TableRow::new("llama-guard-2-f"))
        .row(TableRow::new("harmbench-4o"))
        .row(TableRow::new("harmbench-llama"))
        .row(TableRow::new("harmbench-mistral"));

    // our classifiers
    builder = builder
        .row(TableRow::new("cot-eg-4t"))
        .row(TableRow::new("cot-4o").cell("static", fixed("Y", Color::Red)));

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid_and_shared() {
        let a = builtin().unwrap();
        let b = builtin().unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.models().len(), 3);
        assert_eq!(a.attacks().len(), 6);
    }

    #[test]
    fn test_every_model_has_a_row() {
        let registry = builtin().unwrap();
        let row_ids: Vec<&str> = registry
            .table()
            .rows()
            .iter()
            .map(|r| r.model_id.as_str())
            .collect();
        let model_ids: Vec<&str> = registry
            .models()
            .iter()
            .flat_map(|g| g.models.iter())
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(row_ids, model_ids);
    }

    #[test]
    fn test_builtin_display_names() {
        let registry = builtin().unwrap();
        assert_eq!(registry.model_display_name("claude-3-opus-20240229"), "claude-3-opus");
        assert_eq!(registry.model_display_name("gpt-4o-2024-05-13"), "gpt-4o-2024-05-13");
        assert_eq!(registry.model_display_name("harmbench-mistral"), "Harmbench-mistral");
        assert_eq!(registry.attack_display_name("prompt-inj"), "Prompt Inj.");
    }

    #[test]
    fn test_policy_static_cells_carry_explanation() {
        let registry = builtin().unwrap();
        let cell = registry.cell("gpt-3.5-turbo-0125", "static").unwrap();
        assert_eq!(cell.explanation, Some(ExplanationComponent::POLICY_STATIC));
        assert_eq!(cell.resolver.name(), "policy-static");

        let cell = registry.cell("llama-guard-2-s", "rand-search").unwrap();
        assert!(cell.explanation.is_none());
        assert_eq!(cell.resolver.name(), "fixed");
        assert!(registry.cell("r2d2", "static").is_none());
    }
}
