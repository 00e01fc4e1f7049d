//! Log subscriber setup for the `leaderboard` binary.
//!
//! Filter directives come from `LEADERBOARD_LOG`, then `RUST_LOG`, then the
//! level picked on the command line. Output always goes to stderr; stdout
//! carries the rendered table.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const ENV_LOG: &str = "LEADERBOARD_LOG";

/// Pick the filter directives: the first non-blank env value wins.
fn filter_directives(leaderboard_log: Option<String>, rust_log: Option<String>, level: Level) -> String {
    [leaderboard_log, rust_log]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| level.as_str().to_lowercase())
}

/// Install the global subscriber. A second call leaves the first one in place.
pub fn init_tracing(json: bool, level: Level) {
    let directives = filter_directives(
        std::env::var(ENV_LOG).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        level,
    );
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("invalid log filter {directives:?}: {e}");
        EnvFilter::new(level.as_str())
    });

    let json_layer = json.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .with_current_span(true)
    });
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init();
}
