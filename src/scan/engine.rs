//! The scan pass.

use tracing::trace;

use super::EdgeMemory;
use crate::blocks::{Counter, CounterDirection, Timer, TimerMode};
use crate::program::{Element, ElementKind, Program, Rung};
use crate::tags::TagTable;

/// Outcome of one scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// Final power state of each rung, in program order
    pub rung_power: Vec<bool>,
}

/// Executes scans and owns the runtime state that is private to elements.
#[derive(Debug, Clone, Default)]
pub struct ScanEngine {
    edges: EdgeMemory,
}

impl ScanEngine {
    /// Create an engine with empty edge memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every rung of `program` once, in order.
    ///
    /// `dt` is the nominal scan period used to advance timers.
    pub fn scan(&mut self, program: &Program, tags: &mut TagTable, dt: f64) -> ScanReport {
        let rung_power = program
            .rungs
            .iter()
            .map(|rung| self.scan_rung(rung, tags, dt))
            .collect();
        ScanReport { rung_power }
    }

    /// Forget all counter edge memory.
    pub fn reset(&mut self) {
        self.edges.clear();
    }

    /// Drop edge memory of elements that are no longer in `program`.
    pub fn retain_program(&mut self, program: &Program) {
        self.edges.retain_program(program);
    }

    /// Read access to the edge memory.
    pub fn edge_memory(&self) -> &EdgeMemory {
        &self.edges
    }

    fn scan_rung(&mut self, rung: &Rung, tags: &mut TagTable, dt: f64) -> bool {
        let mut power = true;
        let mut coil: Option<&str> = None;

        for element in rung.series_elements() {
            // `power` here is the AND of every earlier series element
            match element.kind {
                ElementKind::NoContact | ElementKind::NcContact => {
                    power = power && contact_with_parallel(element, rung, tags);
                }

                ElementKind::Coil => coil = Some(element.tag.as_str()),

                ElementKind::Ton | ElementKind::Tof => {
                    let mode = if element.kind == ElementKind::Ton {
                        TimerMode::OnDelay
                    } else {
                        TimerMode::OffDelay
                    };
                    let timer = Timer::new(mode, element.effective_preset());
                    let out = timer.update(power, tags.number(&element.tag), dt);
                    tags.set(element.tag.as_str(), out.accumulated);
                    power = out.output;
                }

                ElementKind::Ctu | ElementKind::Ctd => {
                    let direction = if element.kind == ElementKind::Ctu {
                        CounterDirection::Up
                    } else {
                        CounterDirection::Down
                    };
                    let counter = Counter::new(direction, element.effective_preset());
                    let previous = self.edges.previous(&rung.id, &element.id);
                    let out = counter.update(power, previous, tags.number(&element.tag));
                    if out.counted {
                        tags.set(element.tag.as_str(), out.count);
                    }
                    self.edges.record(&rung.id, &element.id, power);
                    power = out.output;
                }

                ElementKind::Move => {
                    if power {
                        tags.set(element.tag.as_str(), element.effective_source());
                    }
                }
            }
        }

        if let Some(tag) = coil {
            tags.set(tag, power);
        }

        trace!(rung = %rung.id, power, coil = coil.unwrap_or("-"), "rung scanned");
        power
    }
}

/// State of a contact on its own.
fn contact_state(element: &Element, tags: &TagTable) -> Option<bool> {
    if !element.kind.is_contact() {
        return None;
    }
    let energized = tags.truthy(&element.tag);
    Some(match element.kind {
        ElementKind::NcContact => !energized,
        _ => energized,
    })
}

/// State of a contact ORed with its parallel contacts.
///
/// Non-contact siblings and references to missing elements do not
/// contribute.
fn contact_with_parallel(element: &Element, rung: &Rung, tags: &TagTable) -> bool {
    let mut state = contact_state(element, tags).unwrap_or(true);
    for sibling_id in &element.parallel {
        match rung.element(sibling_id) {
            Some(sibling) => {
                if let Some(sibling_state) = contact_state(sibling, tags) {
                    state = state || sibling_state;
                }
            }
            None => trace!(rung = %rung.id, sibling = %sibling_id, "skipping missing parallel element"),
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagValue;

    const DT: f64 = 100.0;

    fn no(id: &str, tag: &str) -> Element {
        Element::new(id, ElementKind::NoContact, tag)
    }

    fn nc(id: &str, tag: &str) -> Element {
        Element::new(id, ElementKind::NcContact, tag)
    }

    fn coil(id: &str, tag: &str) -> Element {
        Element::new(id, ElementKind::Coil, tag)
    }

    fn single(rung: Rung) -> Program {
        Program::new().with_rung(rung)
    }

    #[test]
    fn test_series_and() {
        let program = single(
            Rung::new("r")
                .with_element(no("a", "A"))
                .with_element(no("b", "B"))
                .with_element(coil("q", "Q")),
        );
        let mut tags = TagTable::new();
        tags.set("A", true);
        tags.set("B", true);

        let mut engine = ScanEngine::new();
        engine.scan(&program, &mut tags, DT);
        assert!(tags.truthy("Q"));

        tags.set("B", false);
        engine.scan(&program, &mut tags, DT);
        assert_eq!(tags.get("Q"), Some(&TagValue::Bool(false)));
    }

    #[test]
    fn test_nc_inverts() {
        let program = single(Rung::new("r").with_element(nc("a", "A")).with_element(coil("q", "Q")));
        let mut tags = TagTable::new();
        tags.set("A", true);

        ScanEngine::new().scan(&program, &mut tags, DT);
        assert_eq!(tags.get("Q"), Some(&TagValue::Bool(false)));
    }

    #[test]
    fn test_parallel_or() {
        let program = single(
            Rung::new("r")
                .with_element(no("a", "A").with_parallel("b"))
                .with_element(no("b", "B"))
                .with_element(coil("q", "Q")),
        );
        let mut tags = TagTable::new();
        tags.set("A", false);
        tags.set("B", true);

        let report = ScanEngine::new().scan(&program, &mut tags, DT);
        assert!(tags.truthy("Q"));
        assert_eq!(report.rung_power, vec![true]);
    }

    #[test]
    fn test_parallel_nc_sibling() {
        // A OR NOT B
        let program = single(
            Rung::new("r")
                .with_element(no("a", "A").with_parallel("b"))
                .with_element(nc("b", "B"))
                .with_element(coil("q", "Q")),
        );
        let mut tags = TagTable::new();
        tags.set("B", false);
        ScanEngine::new().scan(&program, &mut tags, DT);
        assert!(tags.truthy("Q"));
    }

    #[test]
    fn test_dangling_parallel_does_not_block() {
        let program = single(
            Rung::new("r")
                .with_element(no("a", "A").with_parallel("ghost"))
                .with_element(coil("q", "Q")),
        );
        let mut tags = TagTable::new();
        tags.set("A", true);
        ScanEngine::new().scan(&program, &mut tags, DT);
        assert!(tags.truthy("Q"));
    }

    #[test]
    fn test_non_contact_sibling_is_ignored() {
        // A MOVE hung in parallel neither closes the branch nor runs
        let program = single(
            Rung::new("r")
                .with_element(no("a", "A").with_parallel("m"))
                .with_element(Element::new("m", ElementKind::Move, "M").with_source(5))
                .with_element(coil("q", "Q")),
        );
        let mut tags = TagTable::new();
        tags.set("A", false);
        ScanEngine::new().scan(&program, &mut tags, DT);
        assert_eq!(tags.get("Q"), Some(&TagValue::Bool(false)));
        assert!(tags.get("M").is_none());
    }

    #[test]
    fn test_missing_tag_reads_false() {
        let program = single(
            Rung::new("r")
                .with_element(no("a", "NEVER_WRITTEN"))
                .with_element(coil("q", "Q")),
        );
        let mut tags = TagTable::new();
        ScanEngine::new().scan(&program, &mut tags, DT);
        assert_eq!(tags.get("Q"), Some(&TagValue::Bool(false)));
        assert!(tags.get("NEVER_WRITTEN").is_none());
    }

    #[test]
    fn test_last_coil_wins() {
        let program = single(
            Rung::new("r")
                .with_element(coil("q1", "Q1"))
                .with_element(no("a", "A"))
                .with_element(coil("q2", "Q2")),
        );
        let mut tags = TagTable::new();
        tags.set("A", true);
        ScanEngine::new().scan(&program, &mut tags, DT);
        assert!(tags.truthy("Q2"));
        assert!(tags.get("Q1").is_none());
    }

    #[test]
    fn test_coil_gets_final_state_even_if_placed_first() {
        let program = single(
            Rung::new("r")
                .with_element(coil("q", "Q"))
                .with_element(no("a", "A")),
        );
        let mut tags = TagTable::new();
        ScanEngine::new().scan(&program, &mut tags, DT);
        assert_eq!(tags.get("Q"), Some(&TagValue::Bool(false)));
    }

    #[test]
    fn test_later_rungs_see_earlier_writes() {
        let program = Program::new()
            .with_rung(Rung::new("r1").with_element(no("a", "A")).with_element(coil("q", "M")))
            .with_rung(Rung::new("r2").with_element(no("m", "M")).with_element(coil("q", "Q")));
        let mut tags = TagTable::new();
        tags.set("A", true);
        ScanEngine::new().scan(&program, &mut tags, DT);
        assert!(tags.truthy("Q"));
    }

    #[test]
    fn test_ton_timing() {
        let program = single(
            Rung::new("r")
                .with_element(no("a", "START"))
                .with_element(Element::new("t", ElementKind::Ton, "T1").with_preset(300.0))
                .with_element(coil("q", "Q")),
        );
        let mut tags = TagTable::new();
        tags.set("START", true);
        let mut engine = ScanEngine::new();

        let mut timer = Vec::new();
        let mut output = Vec::new();
        for _ in 0..3 {
            engine.scan(&program, &mut tags, DT);
            timer.push(tags.number("T1"));
            output.push(tags.truthy("Q"));
        }
        assert_eq!(timer, vec![100.0, 200.0, 300.0]);
        assert_eq!(output, vec![false, false, true]);

        tags.set("START", false);
        engine.scan(&program, &mut tags, DT);
        assert_eq!(tags.number("T1"), 0.0);
        assert!(!tags.truthy("Q"));
    }

    #[test]
    fn test_ton_default_preset() {
        let program = single(
            Rung::new("r")
                .with_element(Element::new("t", ElementKind::Ton, "T1"))
                .with_element(coil("q", "Q")),
        );
        let mut tags = TagTable::new();
        let mut engine = ScanEngine::new();
        for _ in 0..49 {
            engine.scan(&program, &mut tags, DT);
        }
        assert!(!tags.truthy("Q"));
        engine.scan(&program, &mut tags, DT);
        assert_eq!(tags.number("T1"), 5000.0);
        assert!(tags.truthy("Q"));
    }

    #[test]
    fn test_tof_accumulates_while_off() {
        let program = single(
            Rung::new("r")
                .with_element(no("a", "A"))
                .with_element(Element::new("t", ElementKind::Tof, "T2").with_preset(200.0))
                .with_element(coil("q", "Q")),
        );
        let mut tags = TagTable::new();
        let mut engine = ScanEngine::new();

        tags.set("A", true);
        engine.scan(&program, &mut tags, DT);
        assert_eq!(tags.number("T2"), 0.0);
        assert!(tags.truthy("Q"));

        tags.set("A", false);
        engine.scan(&program, &mut tags, DT);
        engine.scan(&program, &mut tags, DT);
        engine.scan(&program, &mut tags, DT);
        assert_eq!(tags.number("T2"), 200.0);
        assert!(!tags.truthy("Q"));
    }

    #[test]
    fn test_ctu_counts_rising_edges() {
        let program = single(
            Rung::new("r")
                .with_element(no("a", "PULSE"))
                .with_element(Element::new("c", ElementKind::Ctu, "C1").with_preset(2.0))
                .with_element(coil("q", "DONE")),
        );
        let mut tags = TagTable::new();
        let mut engine = ScanEngine::new();

        for pulse in [false, true, false, true] {
            tags.set("PULSE", pulse);
            engine.scan(&program, &mut tags, DT);
        }
        assert_eq!(tags.number("C1"), 2.0);
        assert!(tags.truthy("DONE"));

        // Sustained true does not count again
        for _ in 0..5 {
            engine.scan(&program, &mut tags, DT);
        }
        assert_eq!(tags.number("C1"), 2.0);
    }

    #[test]
    fn test_ctd_counts_down() {
        let program = single(
            Rung::new("r")
                .with_element(no("a", "PULSE"))
                .with_element(Element::new("c", ElementKind::Ctd, "C2"))
                .with_element(coil("q", "EMPTY")),
        );
        let mut tags = TagTable::new();
        tags.set("C2", 2);
        let mut engine = ScanEngine::new();

        for pulse in [true, false, true] {
            tags.set("PULSE", pulse);
            engine.scan(&program, &mut tags, DT);
        }
        assert_eq!(tags.number("C2"), 0.0);
        assert!(tags.truthy("EMPTY"));
    }

    #[test]
    fn test_reset_forgets_edges() {
        let program = single(
            Rung::new("r")
                .with_element(no("a", "PULSE"))
                .with_element(Element::new("c", ElementKind::Ctu, "C1")),
        );
        let mut tags = TagTable::new();
        tags.set("PULSE", true);
        let mut engine = ScanEngine::new();

        engine.scan(&program, &mut tags, DT);
        engine.scan(&program, &mut tags, DT);
        assert_eq!(tags.number("C1"), 1.0);

        engine.reset();
        assert!(engine.edge_memory().is_empty());
        engine.scan(&program, &mut tags, DT);
        assert_eq!(tags.number("C1"), 2.0);
    }

    #[test]
    fn test_move_copies_literal() {
        let program = single(
            Rung::new("r")
                .with_element(no("a", "EN"))
                .with_element(Element::new("m", ElementKind::Move, "TAG").with_source(42)),
        );
        let mut tags = TagTable::new();
        let mut engine = ScanEngine::new();

        tags.set("EN", true);
        engine.scan(&program, &mut tags, DT);
        assert_eq!(tags.get("TAG"), Some(&TagValue::Number(42.0)));

        tags.set("TAG", 7);
        tags.set("EN", false);
        engine.scan(&program, &mut tags, DT);
        assert_eq!(tags.get("TAG"), Some(&TagValue::Number(7.0)));
    }

    #[test]
    fn test_move_without_source_writes_zero() {
        let program = single(Rung::new("r").with_element(Element::new("m", ElementKind::Move, "X")));
        let mut tags = TagTable::new();
        tags.set("X", 9);
        ScanEngine::new().scan(&program, &mut tags, DT);
        assert_eq!(tags.get("X"), Some(&TagValue::Number(0.0)));
    }

    #[test]
    fn test_steady_state_is_fixed_point() {
        let program = Program::new()
            .with_rung(
                Rung::new("r1")
                    .with_element(no("a", "A"))
                    .with_element(Element::new("t", ElementKind::Ton, "T1").with_preset(200.0))
                    .with_element(coil("q", "Q1")),
            )
            .with_rung(
                Rung::new("r2")
                    .with_element(no("a", "Q1"))
                    .with_element(Element::new("c", ElementKind::Ctu, "C1").with_preset(1.0))
                    .with_element(Element::new("m", ElementKind::Move, "SPEED").with_source(1500))
                    .with_element(coil("q", "Q2")),
            );
        let mut tags = TagTable::new();
        tags.set("A", true);
        let mut engine = ScanEngine::new();

        for _ in 0..10 {
            engine.scan(&program, &mut tags, DT);
        }
        let before = tags.clone();
        engine.scan(&program, &mut tags, DT);
        assert_eq!(tags, before);
        assert!(tags.truthy("Q2"));
    }
}
