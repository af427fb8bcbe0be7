// Driftnet Simulation Engine - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Activation ──────────────────────────────────────────────────────────────

/// Per-node nonlinearity applied to the inbound transfer term.
///
/// Nodes are assigned `Tanh` or `NegTanh` at initialization, but the hook is
/// inert unless `SimConfig::apply_activation` is set. `Identity` is the
/// effective behavior in the default configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Activation {
    Identity = 0,
    Tanh = 1,
    NegTanh = 2,
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Identity
    }
}

impl Activation {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Tanh => x.tanh(),
            Self::NegTanh => -x.tanh(),
        }
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Full network state in stable node order, consumed by the renderer once
/// per tick. Weights are the dense row-major n×n matrix; a zero entry means
/// no edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub names: Vec<String>,
    pub quantities: Vec<f64>,
    pub weights: Vec<f64>,
    /// Shell-layout positions, one (x, y) on the unit circle per node.
    pub layout: Vec<(f64, f64)>,
    pub total_quantity: f64,
}

// ─── EdgeView ────────────────────────────────────────────────────────────────

/// Derived view of one live edge. Built on demand from the weight matrix;
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeView {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// One edge's rendered stroke width, `weight * link_size_scaling`. Kept
/// separate from `EdgeView` so a `weight` field always means the raw matrix
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeWidth {
    pub from: usize,
    pub to: usize,
    pub width: f64,
}

// ─── StepStats ───────────────────────────────────────────────────────────────

/// Per-tick diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepStats {
    pub tick: u64,
    pub total_quantity: f64,
    pub min_quantity: f64,
    pub max_quantity: f64,
    /// Number of live (nonzero) edges. Constant for the run: drift and
    /// clamping keep nonzero weights nonzero.
    pub edge_count: usize,
    pub mean_weight: f64,
    /// Quantities pinned to a bound this tick.
    pub quantity_clamps: usize,
    /// Weights pinned to a bound this tick.
    pub weight_clamps: usize,
    /// Σ transfer − Σ loss for the step, before clamping. Zero up to float
    /// error: inbound and outbound flow describe the same edge traversals.
    pub flow_balance: f64,
}

// ─── StepResult ──────────────────────────────────────────────────────────────

/// Everything the presentation layer needs after one tick.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub snapshot: Snapshot,
    pub stats: StepStats,
    /// Quantity mapped to visual node size: `max(q, node_size_min) *
    /// node_size_scaling`, matching the renderer contract.
    pub node_sizes: Vec<f64>,
    /// Stroke widths for the live edges, pre-scaled by `link_size_scaling`.
    pub edge_widths: Vec<EdgeWidth>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
