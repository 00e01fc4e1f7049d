//! Behavioral contract of `render_table`.
//!
//! Most tests run against both render modes; the output must not depend
//! on how cells are awaited.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use leaderboard_core::fakes::MemoryFetcher;
use leaderboard_core::{
    render_table, Attack, CellContent, CellResolver, CellSpec, Color, ExplanationComponent,
    Fetcher, FixedContent, Model, Registry, RenderMode, ResolveError, TableRow,
};
use serde_json::json;
use tokio::sync::Barrier;

const MODES: [RenderMode; 2] = [RenderMode::Sequential, RenderMode::Concurrent];

fn fixed(value: f64, color: Color) -> CellSpec {
    CellSpec::new(Arc::new(FixedContent(CellContent::new(value, color))))
}

/// Echoes its inputs back as text so tests can see what it was called with.
struct EchoResolver;

#[async_trait]
impl CellResolver for EchoResolver {
    async fn resolve(
        &self,
        model_id: &str,
        attack_id: &str,
        _fetcher: &dyn Fetcher,
    ) -> Result<CellContent, ResolveError> {
        Ok(CellContent::new(
            format!("{}/{}", model_id, attack_id),
            Color::White,
        ))
    }
}

struct FailingResolver;

#[async_trait]
impl CellResolver for FailingResolver {
    async fn resolve(
        &self,
        _model_id: &str,
        _attack_id: &str,
        _fetcher: &dyn Fetcher,
    ) -> Result<CellContent, ResolveError> {
        Err(ResolveError::Other("transcript store unavailable".to_string()))
    }
}

/// Counts invocations.
#[derive(Default)]
struct CountingResolver {
    calls: AtomicUsize,
}

#[async_trait]
impl CellResolver for CountingResolver {
    async fn resolve(
        &self,
        _model_id: &str,
        _attack_id: &str,
        _fetcher: &dyn Fetcher,
    ) -> Result<CellContent, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CellContent::new(1.0, Color::Red))
    }
}

/// Waits until every other holder of the barrier has arrived.
struct RendezvousResolver {
    barrier: Arc<Barrier>,
}

#[async_trait]
impl CellResolver for RendezvousResolver {
    async fn resolve(
        &self,
        _model_id: &str,
        attack_id: &str,
        _fetcher: &dyn Fetcher,
    ) -> Result<CellContent, ResolveError> {
        self.barrier.wait().await;
        Ok(CellContent::new(attack_id, Color::White))
    }
}

fn base() -> leaderboard_core::RegistryBuilder {
    Registry::builder()
        .group("policy-only", vec![Model::new("m1"), Model::new("m2")])
        .group("classifiers", vec![Model::new("c1")])
        .attacks([Attack::new("static"), Attack::new("pair")])
}

#[tokio::test]
async fn single_cell_scenario() {
    let registry = base()
        .row(TableRow::new("m1").cell("static", fixed(0.0, Color::Green)))
        .build()
        .unwrap();
    let fetcher = MemoryFetcher::new();

    for mode in MODES {
        let rendered = render_table(registry.table(), &fetcher, mode).await.unwrap();
        let cell = rendered.get("m1", "static").expect("cell present");
        assert_eq!(cell.content, CellContent::new(0.0, Color::Green));
    }
}

#[tokio::test]
async fn entries_match_registered_pairs_exactly() {
    let registry = base()
        .row(
            TableRow::new("m1")
                .cell("static", fixed(0.0, Color::Green))
                .cell("pair", fixed(0.03, Color::Red)),
        )
        .row(TableRow::new("c1").cell("pair", fixed(5.83, Color::Red)))
        .build()
        .unwrap();
    let fetcher = MemoryFetcher::new();

    for mode in MODES {
        let rendered = render_table(registry.table(), &fetcher, mode).await.unwrap();

        for model in ["m1", "m2", "c1"] {
            for attack in ["static", "pair"] {
                assert_eq!(
                    rendered.get(model, attack).is_some(),
                    registry.cell(model, attack).is_some(),
                    "{}/{}",
                    model,
                    attack
                );
            }
        }
        assert_eq!(rendered.cell_count(), 3);
        // m2 has no row in the table, so it has no entry either.
        assert!(rendered.row("m2").is_none());
    }
}

#[tokio::test]
async fn empty_row_renders_as_empty_mapping() {
    let registry = base()
        .row(TableRow::new("m1"))
        .row(TableRow::new("c1").cell("static", fixed(0.0, Color::Green)))
        .build()
        .unwrap();
    let fetcher = MemoryFetcher::new();

    for mode in MODES {
        let rendered = render_table(registry.table(), &fetcher, mode).await.unwrap();
        let row = rendered.row("m1").expect("empty row still present");
        assert!(row.is_empty());

        let v = serde_json::to_value(&rendered).unwrap();
        assert_eq!(v["m1"], json!({}));
    }
}

#[tokio::test]
async fn resolver_receives_model_and_attack_ids() {
    let registry = base()
        .row(
            TableRow::new("m2")
                .cell("static", CellSpec::new(Arc::new(EchoResolver)))
                .cell("pair", CellSpec::new(Arc::new(EchoResolver))),
        )
        .build()
        .unwrap();
    let fetcher = MemoryFetcher::new();

    for mode in MODES {
        let rendered = render_table(registry.table(), &fetcher, mode).await.unwrap();
        assert_eq!(
            rendered.get("m2", "pair").unwrap().content,
            CellContent::new("m2/pair", Color::White)
        );
        assert_eq!(
            rendered.get("m2", "static").unwrap().content,
            CellContent::new("m2/static", Color::White)
        );
    }
}

#[tokio::test]
async fn output_follows_registry_order() {
    let registry = base()
        .row(TableRow::new("c1").cell("pair", fixed(1.0, Color::Red)))
        .row(
            TableRow::new("m1")
                .cell("pair", fixed(2.0, Color::Red))
                .cell("static", fixed(3.0, Color::Red)),
        )
        .build()
        .unwrap();
    let fetcher = MemoryFetcher::new();

    for mode in MODES {
        let rendered = render_table(registry.table(), &fetcher, mode).await.unwrap();
        let order: Vec<(&str, Vec<&str>)> = rendered
            .rows()
            .iter()
            .map(|r| {
                (
                    r.model_id.as_str(),
                    r.cells.iter().map(|(a, _)| a.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            order,
            vec![("c1", vec!["pair"]), ("m1", vec!["pair", "static"])]
        );

        let text = serde_json::to_string(&rendered).unwrap();
        let c1 = text.find("\"c1\"").unwrap();
        let m1 = text.find("\"m1\"").unwrap();
        assert!(c1 < m1);
    }
}

#[tokio::test]
async fn explanation_is_carried_through() {
    let spec = fixed(0.0, Color::Green).with_explanation(
        ExplanationComponent::POLICY_STATIC,
        Some(json!({"split": "test"})),
    );
    let registry = base()
        .row(TableRow::new("m1").cell("static", spec))
        .build()
        .unwrap();
    let fetcher = MemoryFetcher::new();

    let rendered = render_table(registry.table(), &fetcher, RenderMode::Sequential)
        .await
        .unwrap();
    let cell = rendered.get("m1", "static").unwrap();
    assert_eq!(cell.explanation, Some(ExplanationComponent::POLICY_STATIC));
    assert_eq!(cell.explanation_props, Some(json!({"split": "test"})));

    let v = serde_json::to_value(&rendered).unwrap();
    assert_eq!(v["m1"]["static"]["explanation"], json!("PolicyStatic"));
    assert_eq!(v["m1"]["static"]["content"], json!({"value": 0.0, "color": "green"}));
}

#[tokio::test]
async fn resolver_error_fails_whole_render() {
    let registry = base()
        .row(TableRow::new("m1").cell("static", fixed(0.0, Color::Green)))
        .row(
            TableRow::new("c1")
                .cell("static", fixed(1.0, Color::Red))
                .cell("pair", CellSpec::new(Arc::new(FailingResolver))),
        )
        .build()
        .unwrap();
    let fetcher = MemoryFetcher::new();

    for mode in MODES {
        let err = render_table(registry.table(), &fetcher, mode)
            .await
            .unwrap_err();
        assert!(
            matches!(err, ResolveError::Other(ref msg) if msg == "transcript store unavailable"),
            "unexpected error: {:?}",
            err
        );
    }
}

#[tokio::test]
async fn error_stops_later_rows_in_sequential_mode() {
    let counter = Arc::new(CountingResolver::default());
    let registry = base()
        .row(TableRow::new("m1").cell("static", CellSpec::new(Arc::new(FailingResolver))))
        .row(TableRow::new("c1").cell("static", CellSpec::new(counter.clone())))
        .build()
        .unwrap();
    let fetcher = MemoryFetcher::new();

    let result = render_table(registry.table(), &fetcher, RenderMode::Sequential).await;
    assert!(result.is_err());
    assert_eq!(counter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn render_does_not_mutate_registry() {
    let counter = Arc::new(CountingResolver::default());
    let registry = base()
        .row(TableRow::new("m1").cell("static", CellSpec::new(counter.clone())))
        .build()
        .unwrap();
    let fetcher = MemoryFetcher::new();

    let first = render_table(registry.table(), &fetcher, RenderMode::Sequential)
        .await
        .unwrap();
    let second = render_table(registry.table(), &fetcher, RenderMode::Concurrent)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(counter.calls.load(Ordering::SeqCst), 2);
    assert_eq!(registry.table().cell_count(), 1);
}

#[tokio::test]
async fn concurrent_mode_overlaps_cells_of_a_row() {
    let barrier = Arc::new(Barrier::new(2));
    let rendezvous = || {
        CellSpec::new(Arc::new(RendezvousResolver {
            barrier: barrier.clone(),
        }))
    };
    let registry = base()
        .row(
            TableRow::new("m1")
                .cell("static", rendezvous())
                .cell("pair", rendezvous()),
        )
        .build()
        .unwrap();
    let fetcher = MemoryFetcher::new();

    let rendered = tokio::time::timeout(
        Duration::from_secs(5),
        render_table(registry.table(), &fetcher, RenderMode::Concurrent),
    )
    .await
    .expect("both cells reach the barrier together")
    .unwrap();
    assert_eq!(
        rendered.get("m1", "pair").unwrap().content,
        CellContent::new("pair", Color::White)
    );

    // One cell at a time never lets the first waiter through.
    let sequential = tokio::time::timeout(
        Duration::from_millis(200),
        render_table(registry.table(), &fetcher, RenderMode::Sequential),
    )
    .await;
    assert!(sequential.is_err(), "sequential render must not overlap cells");
}
