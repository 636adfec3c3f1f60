//! Program structure: rungs of elements.

use std::collections::HashSet;

use serde_json::Value;

use super::types::{ElementId, ElementKind, RungId};
use crate::error::{LadderError, Result};
use crate::interchange::{ElementDoc, ProgramDoc};
use crate::tags::TagValue;

/// A logic element placed on a rung.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element id, unique within its rung
    pub id: ElementId,
    /// Element kind
    pub kind: ElementKind,
    /// Bound tag name
    pub tag: String,
    /// Timer/counter preset
    pub preset: Option<f64>,
    /// Literal copied by a MOVE block
    pub source: Option<TagValue>,
    /// Elements ORed into this one
    pub parallel: Vec<ElementId>,
}

impl Element {
    /// Create a new element without parameters.
    pub fn new(id: impl Into<ElementId>, kind: ElementKind, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            tag: tag.into(),
            preset: None,
            source: None,
            parallel: Vec::new(),
        }
    }

    /// Set the timer/counter preset.
    pub fn with_preset(mut self, preset: f64) -> Self {
        self.preset = Some(preset);
        self
    }

    /// Set the literal copied by a MOVE block.
    pub fn with_source(mut self, source: impl Into<TagValue>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a parallel sibling reference.
    pub fn with_parallel(mut self, sibling: impl Into<ElementId>) -> Self {
        self.parallel.push(sibling.into());
        self
    }

    /// The preset in effect, falling back to the kind's default.
    pub fn effective_preset(&self) -> f64 {
        self.preset.unwrap_or_else(|| self.kind.default_preset())
    }

    /// The MOVE literal in effect, defaulting to `0`.
    pub fn effective_source(&self) -> TagValue {
        self.source.clone().unwrap_or(TagValue::Number(0.0))
    }

    fn from_doc(rung: &str, doc: ElementDoc) -> Result<Self> {
        let kind = ElementKind::from_keyword(&doc.kind).ok_or_else(|| {
            LadderError::UnknownElementKind {
                rung: rung.to_string(),
                element: doc.id.clone(),
                kind: doc.kind.clone(),
            }
        })?;

        let preset = match doc.params.get("preset") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.as_f64().ok_or_else(|| {
                LadderError::invalid_parameter(&doc.id, "preset", "expected a number")
            })?),
        };

        let source = match doc.params.get("source") {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value::<TagValue>(value.clone()).map_err(
                |_| LadderError::invalid_parameter(&doc.id, "source", "expected a literal"),
            )?),
        };

        Ok(Self {
            id: ElementId(doc.id),
            kind,
            tag: doc.variable,
            preset,
            source,
            parallel: doc.parallel.into_iter().map(ElementId).collect(),
        })
    }
}

/// One row of ladder logic.
#[derive(Debug, Clone, PartialEq)]
pub struct Rung {
    /// Rung id
    pub id: RungId,
    /// Elements in left-to-right order
    pub elements: Vec<Element>,
}

impl Rung {
    /// Create an empty rung.
    pub fn new(id: impl Into<RungId>) -> Self {
        Self {
            id: id.into(),
            elements: Vec::new(),
        }
    }

    /// Append an element (builder form).
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Append an element.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Remove an element and every parallel reference to it.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let idx = self.elements.iter().position(|e| &e.id == id)?;
        let removed = self.elements.remove(idx);
        for element in &mut self.elements {
            element.parallel.retain(|p| p != id);
        }
        Some(removed)
    }

    /// Append `sibling` and link it in parallel with `parent`.
    pub fn add_parallel(&mut self, parent: &ElementId, sibling: Element) -> Result<()> {
        let sibling_id = sibling.id.clone();
        let parent_el = self
            .elements
            .iter_mut()
            .find(|e| &e.id == parent)
            .ok_or_else(|| LadderError::not_found("element", parent.0.clone()))?;
        parent_el.parallel.push(sibling_id);
        self.elements.push(sibling);
        Ok(())
    }

    /// Find an element by id.
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Find an element by id for editing.
    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    /// Ids referenced as a parallel sibling by some element of this rung.
    pub fn sibling_ids(&self) -> HashSet<&ElementId> {
        self.elements.iter().flat_map(|e| e.parallel.iter()).collect()
    }

    /// Elements evaluated in series, left to right.
    ///
    /// Parallel siblings are excluded; they are evaluated by their parent.
    pub fn series_elements(&self) -> impl Iterator<Item = &Element> {
        let siblings = self.sibling_ids();
        self.elements
            .iter()
            .filter(move |e| !siblings.contains(&e.id))
    }
}

/// A complete ladder program ready for scanning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Rungs in scan order
    pub rungs: Vec<Rung>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// The program a fresh session starts with: one empty rung.
    pub fn starter() -> Self {
        Self {
            rungs: vec![Rung::new("row-1")],
        }
    }

    /// Build a program from an interchange document.
    ///
    /// Widgets are not part of the program and are ignored here.
    pub fn from_doc(doc: ProgramDoc) -> Result<Self> {
        let mut rungs = Vec::with_capacity(doc.rows.len());
        for row in doc.rows {
            let elements = row
                .elements
                .into_iter()
                .map(|el| Element::from_doc(&row.id, el))
                .collect::<Result<Vec<_>>>()?;
            rungs.push(Rung {
                id: RungId(row.id),
                elements,
            });
        }
        Ok(Self { rungs })
    }

    /// Append a rung (builder form).
    pub fn with_rung(mut self, rung: Rung) -> Self {
        self.rungs.push(rung);
        self
    }

    /// Append a rung with the next free `row-N` id and return that id.
    pub fn add_rung(&mut self) -> RungId {
        let mut n = self.rungs.len() + 1;
        let taken: HashSet<&str> = self.rungs.iter().map(|r| r.id.0.as_str()).collect();
        while taken.contains(format!("row-{}", n).as_str()) {
            n += 1;
        }
        let id = RungId(format!("row-{}", n));
        self.rungs.push(Rung::new(id.clone()));
        id
    }

    /// Find a rung by id.
    pub fn rung(&self, id: &RungId) -> Option<&Rung> {
        self.rungs.iter().find(|r| &r.id == id)
    }

    /// Find a rung by id for editing.
    pub fn rung_mut(&mut self, id: &RungId) -> Result<&mut Rung> {
        self.rungs
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| LadderError::not_found("rung", id.0.clone()))
    }

    /// Total number of elements across all rungs.
    pub fn element_count(&self) -> usize {
        self.rungs.iter().map(|r| r.elements.len()).sum()
    }

    /// Every tag referenced by the program, in first-reference order, with
    /// the kind of the first element bound to it.
    pub fn referenced_tags(&self) -> Vec<(&str, ElementKind)> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for element in self.rungs.iter().flat_map(|r| r.elements.iter()) {
            if !element.tag.is_empty() && seen.insert(element.tag.as_str()) {
                tags.push((element.tag.as_str(), element.kind));
            }
        }
        tags
    }
}
