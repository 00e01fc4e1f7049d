//! Cell resolvers.
//!
//! A resolver turns a (model, attack) pair into displayable
//! [`CellContent`], possibly by fetching data through the injected
//! [`Fetcher`]. Resolvers hold no mutable state and may be invoked
//! concurrently for different cells.

pub mod policy_static;
pub mod transcripts;

use async_trait::async_trait;

use crate::domain::{CellContent, ResolveError};
use crate::fetch::Fetcher;

pub use policy_static::PolicyStatic;
pub use transcripts::{avg_rating, label_rating, Transcript, TranscriptWithLabels};

/// Produces the content of one cell.
#[async_trait]
pub trait CellResolver: Send + Sync {
    async fn resolve(
        &self,
        model_id: &str,
        attack_id: &str,
        fetcher: &dyn Fetcher,
    ) -> Result<CellContent, ResolveError>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Author-specified content, returned as-is without any I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedContent(pub CellContent);

#[async_trait]
impl CellResolver for FixedContent {
    async fn resolve(
        &self,
        _model_id: &str,
        _attack_id: &str,
        _fetcher: &dyn Fetcher,
    ) -> Result<CellContent, ResolveError> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
