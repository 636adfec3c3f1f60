//! Per-element edge memory for counters.

use std::collections::HashMap;

use crate::program::{ElementId, Program, RungId};

/// Previous enabling state of each counter, keyed by rung and element.
///
/// Kept apart from the program so the program can be edited without
/// touching runtime state.
#[derive(Debug, Clone, Default)]
pub struct EdgeMemory {
    previous: HashMap<RungId, HashMap<ElementId, bool>>,
}

impl EdgeMemory {
    /// Create empty edge memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Previous enabling state; `false` if never seen.
    pub fn previous(&self, rung: &RungId, element: &ElementId) -> bool {
        self.previous
            .get(rung)
            .and_then(|elements| elements.get(element))
            .copied()
            .unwrap_or(false)
    }

    /// Record the enabling state for the next scan.
    pub fn record(&mut self, rung: &RungId, element: &ElementId, enable: bool) {
        if let Some(slot) = self
            .previous
            .get_mut(rung)
            .and_then(|elements| elements.get_mut(element))
        {
            *slot = enable;
            return;
        }
        self.previous
            .entry(rung.clone())
            .or_default()
            .insert(element.clone(), enable);
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.previous.clear();
    }

    /// Drop entries for elements no longer in `program`.
    pub fn retain_program(&mut self, program: &Program) {
        self.previous.retain(|rung_id, elements| match program.rung(rung_id) {
            Some(rung) => {
                elements.retain(|element_id, _| rung.element(element_id).is_some());
                !elements.is_empty()
            }
            None => false,
        });
    }

    /// Number of tracked elements.
    pub fn len(&self) -> usize {
        self.previous.values().map(HashMap::len).sum()
    }

    /// Check whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
