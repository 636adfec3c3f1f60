//! Program validation.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::{ElementKind, Program, Rung};
use crate::error::{LadderError, Result};

/// Validate a program before it is handed to the scan engine.
///
/// Rejects:
/// - Duplicate rung ids, duplicate element ids within a rung
/// - Negative or non-finite timer/counter presets
/// - Parallel cycles (an element that is its own parallel ancestor)
/// - Nested parallel groups (a sibling with its own parallel list)
///
/// Tolerated with a warning:
/// - Parallel references to elements that do not exist (skipped by the scan)
/// - More than one coil on a rung (the last one wins)
pub fn validate_program(program: &Program) -> Result<()> {
    let mut rung_ids = HashSet::new();
    for rung in &program.rungs {
        if !rung_ids.insert(&rung.id) {
            return Err(LadderError::DuplicateRung {
                rung: rung.id.0.clone(),
            });
        }
        validate_rung(rung)?;
    }
    Ok(())
}

fn validate_rung(rung: &Rung) -> Result<()> {
    let mut index = HashMap::new();
    for (i, element) in rung.elements.iter().enumerate() {
        if index.insert(&element.id, i).is_some() {
            return Err(LadderError::DuplicateElement {
                rung: rung.id.0.clone(),
                element: element.id.0.clone(),
            });
        }
    }

    for element in &rung.elements {
        if let Some(preset) = element.preset {
            if !element.kind.has_preset() {
                continue;
            }
            if !preset.is_finite() || preset < 0.0 {
                return Err(LadderError::invalid_parameter(
                    &element.id.0,
                    "preset",
                    format!("must be a non-negative number, got {}", preset),
                ));
            }
        }
    }

    // Parallel edges between existing elements, by index
    let mut edges: Vec<Vec<usize>> = vec![Vec::new(); rung.elements.len()];
    for (i, element) in rung.elements.iter().enumerate() {
        for sibling in &element.parallel {
            match index.get(sibling) {
                Some(&j) => edges[i].push(j),
                None => warn!(
                    rung = %rung.id,
                    element = %element.id,
                    sibling = %sibling,
                    "parallel reference to missing element is ignored"
                ),
            }
        }
    }

    if let Some(i) = find_cycle(&edges) {
        return Err(LadderError::ParallelCycle {
            rung: rung.id.0.clone(),
            element: rung.elements[i].id.0.clone(),
        });
    }

    for targets in &edges {
        for &j in targets {
            if !edges[j].is_empty() {
                return Err(LadderError::NestedParallel {
                    rung: rung.id.0.clone(),
                    element: rung.elements[j].id.0.clone(),
                });
            }
        }
    }

    let coils = rung
        .elements
        .iter()
        .filter(|e| e.kind == ElementKind::Coil)
        .count();
    if coils > 1 {
        warn!(
            rung = %rung.id,
            coils,
            "rung has more than one coil; only the last one is driven"
        );
    }

    Ok(())
}

/// Depth-first search for a cycle; returns an element on the cycle.
fn find_cycle(edges: &[Vec<usize>]) -> Option<usize> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    fn visit(node: usize, edges: &[Vec<usize>], marks: &mut [Mark]) -> Option<usize> {
        marks[node] = Mark::InProgress;
        for &next in &edges[node] {
            match marks[next] {
                Mark::InProgress => return Some(next),
                Mark::Unvisited => {
                    if let Some(found) = visit(next, edges, marks) {
                        return Some(found);
                    }
                }
                Mark::Done => {}
            }
        }
        marks[node] = Mark::Done;
        None
    }

    let mut marks = vec![Mark::Unvisited; edges.len()];
    for start in 0..edges.len() {
        if marks[start] == Mark::Unvisited {
            if let Some(found) = visit(start, edges, &mut marks) {
                return Some(found);
            }
        }
    }
    None
}
