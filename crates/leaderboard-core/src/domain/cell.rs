//! Table cells: what a cell resolves to and how it is described.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::resolve::CellResolver;

/// Presentation-level severity marker.
///
/// Always chosen by whoever authors a cell or resolver; nothing in the
/// renderer derives it from the value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    White,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::White => "white",
        };
        f.write_str(s)
    }
}

/// Displayed value of a cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// Resolved content of one (model, attack) cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CellContent {
    pub value: CellValue,
    pub color: Color,
}

impl CellContent {
    pub fn new(value: impl Into<CellValue>, color: Color) -> Self {
        Self {
            value: value.into(),
            color,
        }
    }
}

/// Opaque reference to the view component explaining a cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ExplanationComponent(Cow<'static, str>);

impl ExplanationComponent {
    /// Explanation attached to policy-static results.
    pub const POLICY_STATIC: ExplanationComponent =
        ExplanationComponent(Cow::Borrowed("PolicyStatic"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExplanationComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry entry for a single cell.
#[derive(Clone)]
pub struct CellSpec {
    pub explanation: Option<ExplanationComponent>,
    pub explanation_props: Option<serde_json::Value>,
    pub resolver: Arc<dyn CellResolver>,
}

impl CellSpec {
    /// A cell without an explanation component.
    pub fn new(resolver: Arc<dyn CellResolver>) -> Self {
        Self {
            explanation: None,
            explanation_props: None,
            resolver,
        }
    }

    /// Attach an explanation component, with optional extra props.
    pub fn with_explanation(
        mut self,
        component: ExplanationComponent,
        props: Option<serde_json::Value>,
    ) -> Self {
        self.explanation = Some(component);
        self.explanation_props = props;
        self
    }
}

impl fmt::Debug for CellSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellSpec")
            .field("explanation", &self.explanation)
            .field("explanation_props", &self.explanation_props)
            .field("resolver", &self.resolver.name())
            .finish()
    }
}
