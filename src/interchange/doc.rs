//! Document types for the program interchange format.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A complete program document: rungs plus HMI widgets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramDoc {
    /// Rungs in program order
    #[serde(default)]
    pub rows: Vec<RungDoc>,
    /// HMI widgets bound to program tags
    #[serde(default)]
    pub widgets: Vec<HmiWidget>,
}

/// One rung of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RungDoc {
    /// Rung id
    pub id: String,
    /// Elements in left-to-right order
    #[serde(default)]
    pub elements: Vec<ElementDoc>,
}

/// One element of a rung.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDoc {
    /// Element id, unique within its rung
    pub id: String,
    /// Element type keyword (`NO_CONTACT`, `TON`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Bound tag name
    #[serde(default)]
    pub variable: String,
    /// Kind-specific parameters (`preset`, `source`)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    /// Ids of elements ORed into this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parallel: Vec<String>,
}

/// HMI widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WidgetKind {
    Button,
    Gauge,
    Led,
    Slider,
    Text,
}

/// A widget on the HMI canvas, bound to one tag.
///
/// Widgets are carried with the program so they are replaced together; the
/// scan never looks at them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HmiWidget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub x: f64,
    pub y: f64,
    pub variable: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
