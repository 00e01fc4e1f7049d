//! Runtime configuration.
//!
//! Defaults come from environment variables; callers override individual
//! fields with the `with_*` builders (the CLI maps its flags onto them).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::FetchError;
use crate::fetch::{fetcher_for, Fetcher};
use crate::render::RenderMode;

pub const ENV_DATA_SOURCE: &str = "LEADERBOARD_DATA_SOURCE";
pub const ENV_USER_AGENT: &str = "LEADERBOARD_USER_AGENT";
pub const ENV_RENDER_MODE: &str = "LEADERBOARD_RENDER_MODE";

pub const DEFAULT_DATA_SOURCE: &str = "data";

/// Leaderboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardConfig {
    /// Directory or `http(s)://` base URL holding transcript data
    pub data_source: String,
    /// User agent sent by the HTTP fetcher
    pub user_agent: String,
    pub render_mode: RenderMode,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        let render_mode = match std::env::var(ENV_RENDER_MODE) {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring {}", ENV_RENDER_MODE);
                RenderMode::default()
            }),
            Err(_) => RenderMode::default(),
        };

        LeaderboardConfig {
            data_source: std::env::var(ENV_DATA_SOURCE)
                .unwrap_or_else(|_| DEFAULT_DATA_SOURCE.to_string()),
            user_agent: std::env::var(ENV_USER_AGENT)
                .unwrap_or_else(|_| format!("leaderboard/{}", env!("CARGO_PKG_VERSION"))),
            render_mode,
        }
    }
}

impl LeaderboardConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn with_data_source(mut self, data_source: &str) -> Self {
        self.data_source = data_source.to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Build the fetcher matching `data_source`.
    pub fn fetcher(&self) -> Result<Box<dyn Fetcher>, FetchError> {
        fetcher_for(&self.data_source, &self.user_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_override() {
        let config = LeaderboardConfig::from_env()
            .with_data_source("https://example.org/data")
            .with_user_agent("ci")
            .with_render_mode(RenderMode::Concurrent);

        assert_eq!(config.data_source, "https://example.org/data");
        assert_eq!(config.user_agent, "ci");
        assert_eq!(config.render_mode, RenderMode::Concurrent);
        assert!(config.fetcher().is_ok());
    }

    #[test]
    fn test_serde_uses_snake_case_mode() {
        let config = LeaderboardConfig::from_env()
            .with_data_source("static/data")
            .with_render_mode(RenderMode::Concurrent);
        let v = serde_json::to_value(&config).unwrap();
        assert_eq!(v["render_mode"], "concurrent");
    }
}
