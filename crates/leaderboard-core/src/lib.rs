//! Leaderboard Core Library
//!
//! Registry of models, attacks and cells, plus the asynchronous rendering
//! step that resolves every cell into displayable content.

pub mod config;
pub mod domain;
pub mod fakes;
pub mod fetch;
pub mod metrics;
pub mod obs;
pub mod registry;
pub mod render;
pub mod reporting;
pub mod resolve;
pub mod telemetry;

pub use domain::{
    Attack, CellContent, CellSpec, CellValue, Color, ExplanationComponent, FetchError,
    LeaderboardError, Model, ModelGroup, RegistryError, ResolveError, Result,
};

pub use config::LeaderboardConfig;
pub use fetch::{fetcher_for, FetchRequest, FetchResponse, Fetcher, FsFetcher, HttpFetcher};
pub use registry::{builtin, Registry, RegistryBuilder, Table, TableRow};
pub use render::{render_table, RenderMode, RenderedCell, RenderedRow, RenderedTable};
pub use reporting::{render_table_md, write_rendered_table_json, RenderedTableArtifact};
pub use resolve::{avg_rating, CellResolver, FixedContent, PolicyStatic, TranscriptWithLabels};

pub use metrics::METRICS;
pub use obs::RenderSpan;
pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
