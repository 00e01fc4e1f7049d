//! Leaderboard CLI
//!
//! The `leaderboard` command resolves the built-in leaderboard table and
//! inspects its registry.
//!
//! ## Commands
//!
//! - `render`: Resolve every cell and emit JSON or a Markdown preview
//! - `models`: List model groups with display names
//! - `attacks`: List attacks in column order
//! - `display-name`: Look up a model's display name

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use leaderboard_core::{
    render_table, render_table_md, write_rendered_table_json, Fetcher, LeaderboardConfig,
    Registry, RenderMode, RenderedTableArtifact, METRICS,
};

#[derive(Parser)]
#[command(name = "leaderboard")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Adversarial robustness leaderboard", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every table cell
    ///
    /// Policy-static cells read `<attack>/<model>.json` under the data
    /// source, where `<attack>` and `<model>` are the ids with every character
    /// outside [A-Za-z0-9._-] replaced by `_` (e.g.
    /// `static/ft_gpt-3.5-turbo-1106_academicsnyuperez__91cDAREP.json`).
    /// Each file is a JSON array of
    /// `{"data_hash", "data": {"user_input", "assistant_response"}, "labels": {<labeler>: <label>}}`.
    /// Labels are harmful/unsafe/yes/y, harmless/safe/no/n, or a number in [0, 1].
    /// The repository's `data/` directory holds a sample data set.
    Render {
        /// Directory or http(s) base URL with transcript data [default: data]
        #[arg(long, env = "LEADERBOARD_DATA_SOURCE")]
        data_source: Option<String>,

        /// Cell scheduling: sequential or concurrent
        #[arg(long, env = "LEADERBOARD_RENDER_MODE")]
        mode: Option<RenderMode>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List models by group
    Models,

    /// List attacks in column order
    Attacks,

    /// Print the display name of a model (falls back to the id)
    DisplayName {
        /// Model id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    leaderboard_core::init_tracing(cli.json, level);

    let registry = leaderboard_core::builtin().context("Failed to build leaderboard registry")?;

    match cli.command {
        Commands::Render {
            data_source,
            mode,
            format,
            output,
        } => {
            let mut config = LeaderboardConfig::from_env();
            if let Some(source) = data_source.as_deref() {
                config = config.with_data_source(source);
            }
            if let Some(mode) = mode {
                config = config.with_render_mode(mode);
            }
            let fetcher = config
                .fetcher()
                .with_context(|| format!("invalid data source: {}", config.data_source))?;

            info!(data_source = %config.data_source, mode = %config.render_mode, "rendering leaderboard");
            let result = cmd_render(
                registry,
                fetcher.as_ref(),
                config.render_mode,
                format,
                output.as_deref(),
            )
            .await;
            METRICS.flush();
            result
        }
        Commands::Models => {
            print!("{}", cmd_models(registry));
            Ok(())
        }
        Commands::Attacks => {
            print!("{}", cmd_attacks(registry));
            Ok(())
        }
        Commands::DisplayName { id } => {
            println!("{}", registry.model_display_name(&id));
            Ok(())
        }
    }
}

/// Resolve the table and write it in the requested format
async fn cmd_render(
    registry: &Registry,
    fetcher: &dyn Fetcher,
    mode: RenderMode,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = render_table(registry.table(), fetcher, mode)
        .await
        .context("Failed to render leaderboard")?;

    match (format, output) {
        (OutputFormat::Json, Some(path)) => {
            write_rendered_table_json(path, &RenderedTableArtifact::new(rendered))?;
            println!("Wrote {}", path.display());
        }
        (OutputFormat::Json, None) => {
            let artifact = RenderedTableArtifact::new(rendered);
            println!(
                "{}",
                serde_json::to_string_pretty(&artifact).context("serialize rendered table")?
            );
        }
        (OutputFormat::Markdown, Some(path)) => {
            std::fs::write(path, render_table_md(registry, &rendered))
                .with_context(|| format!("write {:?}", path))?;
            println!("Wrote {}", path.display());
        }
        (OutputFormat::Markdown, None) => {
            print!("{}", render_table_md(registry, &rendered));
        }
    }

    Ok(())
}

fn cmd_models(registry: &Registry) -> String {
    let mut out = String::new();
    for group in registry.models() {
        out.push_str(&format!("{}:\n", group.name));
        for model in &group.models {
            if model.display_str == model.id {
                out.push_str(&format!("  {}\n", model.id));
            } else {
                out.push_str(&format!("  {} ({})\n", model.display_str, model.id));
            }
        }
    }
    out
}

fn cmd_attacks(registry: &Registry) -> String {
    registry
        .attacks()
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {} ({})\n", i + 1, a.display_str, a.id))
        .collect()
}
