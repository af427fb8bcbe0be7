// Driftnet Simulation Engine
//
// A co-evolving directed network: a scalar quantity diffuses across weighted
// edges while the weights drift randomly each tick. The core is pure Rust;
// the live view is an external renderer consuming per-tick snapshots over
// the wasm boundary below.

pub mod config;
pub mod dynamics;
pub mod naming;
pub mod network;
pub mod simulation;
pub mod types;

pub use config::{Bounds, ConfigError, SimConfig};
pub use network::{NetworkState, ShapeError};
pub use simulation::NetSimulation;
pub use types::*;

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────
//
// The JS host owns the render loop: it calls `tick()` once per animation
// frame, draws the returned snapshot (node sizes from quantity, edge widths
// from weight, the total-quantity readout), and stops calling when the user
// closes the view or `finished()` reports the budget exhausted.

#[wasm_bindgen]
pub struct DriftnetSimulation {
    inner: NetSimulation,
}

#[wasm_bindgen]
impl DriftnetSimulation {
    /// Default configuration with an overridable node count.
    #[wasm_bindgen(constructor)]
    pub fn new(node_count: usize, seed: u64) -> Result<DriftnetSimulation, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let config = SimConfig { nodes: node_count, ..SimConfig::default() };
        let inner = NetSimulation::with_config(config, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Full constants surface: accepts a `SimConfig` as a plain JS object.
    pub fn with_config(config: JsValue, seed: u64) -> Result<DriftnetSimulation, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let config: SimConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let inner = NetSimulation::with_config(config, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Advance one tick; returns the `StepResult` for rendering.
    pub fn tick(&mut self) -> JsValue {
        let result = self.inner.tick_core();
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    /// Current state without advancing, e.g. to draw the initial frame.
    pub fn snapshot(&self) -> JsValue {
        let snap = self.inner.network().snapshot(self.inner.tick());
        serde_wasm_bindgen::to_value(&snap).unwrap_or(JsValue::NULL)
    }

    /// Run N ticks without returning results (fast batch mode).
    pub fn run_batch(&mut self, ticks: u64) {
        self.inner.run_batch(ticks);
    }

    /// Active configuration, including the visual scaling factors the
    /// renderer needs (node size floor and scaling, edge width scaling,
    /// label font size).
    pub fn config(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.config()).unwrap_or(JsValue::NULL)
    }

    pub fn total_quantity(&self) -> f64 {
        self.inner.total_quantity()
    }

    pub fn node_count(&self) -> usize {
        self.inner.network().len()
    }

    pub fn current_tick(&self) -> u64 {
        self.inner.tick()
    }

    /// True once the configured iteration budget is exhausted.
    pub fn finished(&self) -> bool {
        self.inner.finished()
    }

    /// Restart the run from its original (config, seed) pair.
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
