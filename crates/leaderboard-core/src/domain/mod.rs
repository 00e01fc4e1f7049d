//! Domain models for the leaderboard.
//!
//! Canonical definitions for the core entities:
//! - `Model` / `ModelGroup`: the rows of the table
//! - `Attack`: the columns of the table
//! - `CellSpec` / `CellContent`: what sits at a (model, attack) intersection

pub mod cell;
pub mod error;
pub mod model;

// Re-export main types and errors
pub use cell::{CellContent, CellSpec, CellValue, Color, ExplanationComponent};
pub use error::{FetchError, LeaderboardError, RegistryError, ResolveError, Result};
pub use model::{Attack, Model, ModelGroup};
