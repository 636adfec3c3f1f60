//! The locked session state and its tick.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use serde::Serialize;
use tracing::{debug, info};

use super::RuntimeConfig;
use crate::error::Result;
use crate::interchange::{self, HmiWidget, ProgramDoc};
use crate::physics::{self, SimulationParameters, SimulationTelemetry};
use crate::profile::DeviceKind;
use crate::program::{validate_program, Program};
use crate::scan::ScanEngine;
use crate::tags::{TagTable, TagValue};

/// State published after a completed tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSnapshot {
    /// Number of ticks completed so far, this one included
    pub scan: u64,
    /// Tag table as left by the tick
    pub tags: TagTable,
    /// Drive telemetry as left by the tick
    pub telemetry: SimulationTelemetry,
    /// Final power state of each rung
    pub rung_power: Vec<bool>,
}

struct SessionState {
    program: Program,
    widgets: Vec<HmiWidget>,
    tags: TagTable,
    engine: ScanEngine,
    params: SimulationParameters,
    telemetry: SimulationTelemetry,
    run_mode: bool,
    simulation: bool,
    scan_count: u64,
    last_power: Vec<bool>,
}

impl SessionState {
    /// Create the tags the program binds that do not exist yet.
    fn seed_program_tags(&mut self) -> usize {
        let mut created = 0;
        for (name, kind) in self.program.referenced_tags() {
            if !self.tags.contains(name) {
                self.tags.set(name, kind.initial_tag_value());
                created += 1;
            }
        }
        created
    }

    fn snapshot(&self) -> ScanSnapshot {
        ScanSnapshot {
            scan: self.scan_count,
            tags: self.tags.clone(),
            telemetry: self.telemetry,
            rung_power: self.last_power.clone(),
        }
    }
}

/// A runtime session: program, tags and simulation behind one lock.
///
/// Every method is safe to call from any thread. [`tick`](Session::tick)
/// holds the lock for the whole scan and physics step, and every edit
/// takes the same lock, so an edit lands either before or after a tick,
/// never inside one.
pub struct Session {
    state: Mutex<SessionState>,
    subscribers: Mutex<Vec<Sender<ScanSnapshot>>>,
    motor_tag: String,
    scan_period: Duration,
    dt_ms: f64,
}

impl Session {
    /// Create a session with the starter program and default tags.
    ///
    /// Run mode starts disabled.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: Mutex::new(SessionState {
                program: Program::starter(),
                widgets: Vec::new(),
                tags: TagTable::with_defaults(),
                engine: ScanEngine::new(),
                params: config.simulation_params,
                telemetry: SimulationTelemetry::default(),
                run_mode: false,
                simulation: config.simulation,
                scan_count: 0,
                last_power: Vec::new(),
            }),
            subscribers: Mutex::new(Vec::new()),
            dt_ms: config.dt_ms(),
            scan_period: config.scan_period,
            motor_tag: config.motor_tag,
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // A panic in an editor closure leaves the state as it was before the
        // edit, so a poisoned lock is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one tick: scan the program, then step the drive simulation.
    ///
    /// Returns `None` without touching any state when run mode is off.
    /// Timers advance by the configured scan period, whoever calls this.
    pub fn tick(&self) -> Option<ScanSnapshot> {
        let mut guard = self.lock();
        let state = &mut *guard;
        if !state.run_mode {
            return None;
        }

        let report = state.engine.scan(&state.program, &mut state.tags, self.dt_ms);
        if state.simulation {
            let run = state.tags.truthy(&self.motor_tag);
            state.telemetry = physics::step(&state.params, &state.telemetry, run, self.dt_ms);
        }
        state.scan_count += 1;
        state.last_power = report.rung_power;
        let snapshot = state.snapshot();

        // Still under the state lock so subscribers see scans in order
        self.publish(&snapshot);
        Some(snapshot)
    }

    fn publish(&self, snapshot: &ScanSnapshot) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| match tx.try_send(snapshot.clone()) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    /// Receive a snapshot after every tick.
    ///
    /// The channel holds at most `capacity` snapshots; a subscriber that
    /// falls behind misses ticks instead of slowing the scan down.
    pub fn subscribe(&self, capacity: usize) -> Receiver<ScanSnapshot> {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    // ============ Program ============

    /// Install a new program and widget list as a whole.
    ///
    /// Counter edge memory is reset. Tags the new program binds are created
    /// if missing.
    pub fn replace_program(&self, program: Program, widgets: Vec<HmiWidget>) -> Result<()> {
        validate_program(&program)?;
        let mut state = self.lock();
        info!(
            rungs = program.rungs.len(),
            elements = program.element_count(),
            widgets = widgets.len(),
            "installing program"
        );
        state.engine.reset();
        state.program = program;
        state.widgets = widgets;
        let created = state.seed_program_tags();
        debug!(created, "created program tags");
        Ok(())
    }

    /// Install an interchange document.
    pub fn install_doc(&self, mut doc: ProgramDoc) -> Result<()> {
        let widgets = std::mem::take(&mut doc.widgets);
        let program = Program::from_doc(doc)?;
        self.replace_program(program, widgets)
    }

    /// Parse and install a JSON program document.
    pub fn load_json(&self, input: &str) -> Result<()> {
        self.install_doc(interchange::parse(input)?)
    }

    /// Edit the program in place.
    ///
    /// The closure works on a copy. If it fails, or the edited program does
    /// not validate, the session keeps the old program. Edge memory of
    /// elements that survive the edit is kept.
    ///
    /// The closure runs while the session lock is held. It must not call
    /// back into this session; doing so deadlocks.
    pub fn edit_program<F, R>(&self, edit: F) -> Result<R>
    where
        F: FnOnce(&mut Program) -> Result<R>,
    {
        let mut guard = self.lock();
        let state = &mut *guard;
        let mut draft = state.program.clone();
        let out = edit(&mut draft)?;
        validate_program(&draft)?;
        state.engine.retain_program(&draft);
        state.program = draft;
        let created = state.seed_program_tags();
        debug!(
            elements = state.program.element_count(),
            created,
            "program edited"
        );
        Ok(out)
    }

    /// Copy of the installed program.
    pub fn program(&self) -> Program {
        self.lock().program.clone()
    }

    /// Copy of the installed HMI widgets.
    pub fn widgets(&self) -> Vec<HmiWidget> {
        self.lock().widgets.clone()
    }

    // ============ Tags ============

    /// Write a tag, creating it if needed.
    pub fn set_tag(&self, name: impl Into<String>, value: impl Into<TagValue>) {
        self.lock().tags.set(name, value);
    }

    /// Create a tag unless it already exists. Returns `true` if created.
    pub fn add_tag(&self, name: impl Into<String>, value: impl Into<TagValue>) -> bool {
        self.lock().tags.add(name, value)
    }

    /// Remove a tag.
    pub fn remove_tag(&self, name: &str) -> Option<TagValue> {
        self.lock().tags.remove(name)
    }

    /// Read a tag.
    pub fn tag(&self, name: &str) -> Option<TagValue> {
        self.lock().tags.get(name).cloned()
    }

    /// Copy of the whole tag table.
    pub fn tags(&self) -> TagTable {
        self.lock().tags.clone()
    }

    /// Create the tags of a device profile that do not exist yet.
    ///
    /// Digital tags start `false`, analog tags `0`. Returns the number of
    /// tags created.
    pub fn seed_profile(&self, device: DeviceKind) -> usize {
        let profile = device.profile();
        let mut state = self.lock();
        let mut created = 0;
        for name in profile.digital() {
            created += usize::from(state.tags.add(name, false));
        }
        for name in profile.analogs {
            created += usize::from(state.tags.add(*name, 0));
        }
        debug!(%device, created, "seeded device profile");
        created
    }

    // ============ Modes and simulation ============

    /// Enable or disable run mode.
    ///
    /// After disabling returns, no further tick runs. A tick already in
    /// progress finishes first.
    pub fn set_run_mode(&self, run: bool) {
        let mut state = self.lock();
        if state.run_mode != run {
            info!(run, scan = state.scan_count, "run mode changed");
        }
        state.run_mode = run;
    }

    /// Whether run mode is enabled.
    pub fn is_running(&self) -> bool {
        self.lock().run_mode
    }

    /// Enable or disable the drive simulation step.
    pub fn set_simulation_mode(&self, simulation: bool) {
        self.lock().simulation = simulation;
    }

    /// Whether the drive simulation steps after each scan.
    pub fn is_simulating(&self) -> bool {
        self.lock().simulation
    }

    /// Replace the drive ramp parameters.
    pub fn set_simulation_parameters(&self, params: SimulationParameters) {
        self.lock().params = params;
    }

    /// Current drive ramp parameters.
    pub fn simulation_parameters(&self) -> SimulationParameters {
        self.lock().params
    }

    /// Current drive telemetry.
    pub fn telemetry(&self) -> SimulationTelemetry {
        self.lock().telemetry
    }

    /// Number of completed ticks.
    pub fn scan_count(&self) -> u64 {
        self.lock().scan_count
    }

    /// State as left by the last tick.
    pub fn snapshot(&self) -> ScanSnapshot {
        self.lock().snapshot()
    }

    /// Nominal scan period; timers advance by this much per tick.
    pub fn scan_period(&self) -> Duration {
        self.scan_period
    }

    /// Tag whose value runs the drive simulation.
    pub fn motor_tag(&self) -> &str {
        &self.motor_tag
    }
}
