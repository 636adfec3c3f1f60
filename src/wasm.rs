//! WASM bindings for Ladder Core.
//!
//! The browser page owns the clock: it calls `tick()` from its own interval
//! timer, writes inputs from HMI widgets, and reads tags and drive
//! telemetry back as JSON for display.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLadderRuntime } from 'ladder_core';
//!
//! await init();
//!
//! const rt = new WasmLadderRuntime(programJson, 100);
//! rt.set_run_mode(true);
//!
//! const timer = setInterval(() => {
//!   rt.tick();
//!   render(JSON.parse(rt.tags_json()), JSON.parse(rt.telemetry_json()));
//! }, 100);
//!
//! startButton.onmousedown = () => rt.set_bool('I0.1', true);
//! startButton.onmouseup = () => rt.set_bool('I0.1', false);
//! ```

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::error::LadderError;
use crate::physics::SimulationParameters;
use crate::runtime::{RuntimeConfig, Session};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible ladder runtime.
///
/// Wraps a [`Session`]; ticks are driven by the host page.
#[wasm_bindgen]
pub struct WasmLadderRuntime {
    session: Session,
}

#[wasm_bindgen]
impl WasmLadderRuntime {
    /// Create a runtime from a program document.
    ///
    /// # Arguments
    /// * `program_json` - Program document (`rows` and `widgets`)
    /// * `scan_period_ms` - Period the host will call `tick()` at
    #[wasm_bindgen(constructor)]
    pub fn new(program_json: &str, scan_period_ms: u32) -> Result<WasmLadderRuntime, JsValue> {
        let config = RuntimeConfig::new()
            .with_scan_period(Duration::from_millis(u64::from(scan_period_ms)));
        let session = Session::new(config).map_err(js_error)?;
        session.load_json(program_json).map_err(js_error)?;
        Ok(WasmLadderRuntime { session })
    }

    /// Run one tick. Returns `false` when run mode is off.
    #[wasm_bindgen]
    pub fn tick(&self) -> bool {
        self.session.tick().is_some()
    }

    /// Enable or disable run mode.
    #[wasm_bindgen]
    pub fn set_run_mode(&self, run: bool) {
        self.session.set_run_mode(run);
    }

    /// Enable or disable the drive simulation.
    #[wasm_bindgen]
    pub fn set_simulation_mode(&self, simulation: bool) {
        self.session.set_simulation_mode(simulation);
    }

    /// Write a boolean tag.
    #[wasm_bindgen]
    pub fn set_bool(&self, name: &str, value: bool) {
        self.session.set_tag(name, value);
    }

    /// Write a numeric tag.
    #[wasm_bindgen]
    pub fn set_number(&self, name: &str, value: f64) {
        self.session.set_tag(name, value);
    }

    /// Tag table as a JSON object.
    #[wasm_bindgen]
    pub fn tags_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.tags()).map_err(js_error)
    }

    /// Drive telemetry as a JSON object.
    #[wasm_bindgen]
    pub fn telemetry_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.telemetry()).map_err(js_error)
    }

    /// HMI widgets of the installed program as a JSON array.
    #[wasm_bindgen]
    pub fn widgets_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.widgets()).map_err(js_error)
    }

    /// Replace the drive ramp parameters.
    #[wasm_bindgen]
    pub fn set_simulation_params(
        &self,
        accel_time: f64,
        decel_time: f64,
        max_freq: f64,
    ) -> Result<(), JsValue> {
        let params = SimulationParameters::new(accel_time, decel_time, max_freq).map_err(js_error)?;
        self.session.set_simulation_parameters(params);
        Ok(())
    }

    /// Install a new program document as a whole.
    #[wasm_bindgen]
    pub fn replace_program(&self, program_json: &str) -> Result<(), JsValue> {
        self.session.load_json(program_json).map_err(|e| {
            js_error(LadderError::WasmError {
                message: format!("program rejected: {}", e),
            })
        })
    }

    /// Number of completed ticks.
    #[wasm_bindgen(getter)]
    pub fn scan_count(&self) -> f64 {
        self.session.scan_count() as f64
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the default scan period in milliseconds.
#[wasm_bindgen]
pub fn default_scan_period_ms() -> u32 {
    crate::DEFAULT_SCAN_PERIOD_MS as u32
}
