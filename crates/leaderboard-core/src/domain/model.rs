//! Models and attacks shown on the leaderboard axes.

use serde::{Deserialize, Serialize};

/// A policy (generative) model or a classifier under evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Model {
    /// Unique key, e.g. the provider's model name.
    pub id: String,

    /// Label shown in the table header.
    pub display_str: String,
}

impl Model {
    /// Create a model whose display string equals its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_str: id.clone(),
            id,
        }
    }

    /// Override the display string.
    pub fn with_display(mut self, display_str: impl Into<String>) -> Self {
        self.display_str = display_str.into();
        self
    }
}

/// Named group of models. Only used for display grouping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelGroup {
    pub name: String,
    pub models: Vec<Model>,
}

impl ModelGroup {
    pub fn new(name: impl Into<String>, models: Vec<Model>) -> Self {
        Self {
            name: name.into(),
            models,
        }
    }
}

/// An adversarial evaluation condition applied against a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attack {
    pub id: String,
    pub display_str: String,
}

impl Attack {
    /// Create an attack whose display string equals its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_str: id.clone(),
            id,
        }
    }

    /// Override the display string.
    pub fn with_display(mut self, display_str: impl Into<String>) -> Self {
        self.display_str = display_str.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_defaults_to_id() {
        let model = Model::new("gpt-4o-2024-05-13");
        assert_eq!(model.display_str, "gpt-4o-2024-05-13");

        let attack = Attack::new("pair");
        assert_eq!(attack.display_str, "pair");
    }

    #[test]
    fn test_with_display_overrides() {
        let model = Model::new("claude-3-opus-20240229").with_display("claude-3-opus");
        assert_eq!(model.id, "claude-3-opus-20240229");
        assert_eq!(model.display_str, "claude-3-opus");
    }
}
