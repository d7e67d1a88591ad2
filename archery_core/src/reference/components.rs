//! Component weights and overhang choices.

use serde::{Deserialize, Serialize};

/// Where on the arrow a component sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    /// Points, broadheads, inserts
    Point,
    /// Nocks
    Nock,
    /// Vanes and feathers (full set)
    Fletching,
}

impl ComponentCategory {
    /// All categories for UI selection
    pub const ALL: [ComponentCategory; 3] = [
        ComponentCategory::Point,
        ComponentCategory::Nock,
        ComponentCategory::Fletching,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentCategory::Point => "Point",
            ComponentCategory::Nock => "Nock",
            ComponentCategory::Fletching => "Fletching",
        }
    }
}

impl std::fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A component and its weight in grains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeight {
    pub name: String,
    pub weight: f64,
    pub category: ComponentCategory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentTable {
    #[serde(rename = "component", default)]
    pub components: Vec<ComponentWeight>,
}

impl ComponentTable {
    /// All components
    pub fn all(&self) -> &[ComponentWeight] {
        &self.components
    }

    /// Components in one category, in table order
    pub fn in_category(&self, category: ComponentCategory) -> impl Iterator<Item = &ComponentWeight> {
        self.components.iter().filter(move |c| c.category == category)
    }
}

/// A suggested overhang with guidance text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverhangOption {
    pub inches: f64,
    pub label: String,
    pub description: String,
    pub safety: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverhangTable {
    #[serde(rename = "overhang", default)]
    pub options: Vec<OverhangOption>,
}

impl OverhangTable {
    pub fn all(&self) -> &[OverhangOption] {
        &self.options
    }
}
