//! Domain-level error taxonomy for the leaderboard.

/// Errors produced while assembling a registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate model id: {0}")]
    DuplicateModel(String),

    #[error("duplicate attack id: {0}")]
    DuplicateAttack(String),

    #[error("duplicate table row for model: {0}")]
    DuplicateRow(String),

    #[error("duplicate cell: model {model_id}, attack {attack_id}")]
    DuplicateCell { model_id: String, attack_id: String },

    #[error("ids {first} and {second} share data key {key}")]
    DataKeyCollision {
        first: String,
        second: String,
        key: String,
    },

    #[error("table references unknown model: {0}")]
    UnknownModel(String),

    #[error("table references unknown attack {attack_id} (model {model_id})")]
    UnknownAttack { model_id: String, attack_id: String },
}

/// Errors produced by a [`Fetcher`](crate::fetch::Fetcher).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),

    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request for {path} failed with status {status}")]
    Status { path: String, status: u16 },

    #[error("invalid data source: {0}")]
    InvalidSource(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err.to_string())
    }
}

/// Errors produced while resolving a single cell.
///
/// The renderer hands these back to its caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unknown label {label:?} in transcript {data_hash}")]
    UnknownLabel { data_hash: String, label: String },

    #[error("no labeled transcripts for model {model_id}, attack {attack_id}")]
    NoLabeledTranscripts { model_id: String, attack_id: String },

    #[error("{0}")]
    Other(String),
}

/// Leaderboard errors.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for leaderboard operations.
pub type Result<T> = std::result::Result<T, LeaderboardError>;
