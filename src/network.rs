// Driftnet Simulation Engine - Network State
//
// Holds the quantity vector and the dense weight matrix in a stable node
// ordering. The matrix is the canonical representation; graph-style views
// (edge lists, renderer widths) are derived on demand.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::naming;
use crate::types::{Activation, EdgeView, Snapshot};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Rejected state write-back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("quantity vector has length {got}, expected {expected}")]
    QuantityLen { expected: usize, got: usize },
    #[error("weight matrix has {got} entries, expected {expected}")]
    MatrixLen { expected: usize, got: usize },
    #[error("weight matrix has nonzero diagonal at node {0}")]
    NonzeroDiagonal(usize),
    #[error("weight write would create edge {from}->{to}, topology is frozen")]
    EdgeCreation { from: usize, to: usize },
}

// ---------------------------------------------------------------------------
// NetworkState
// ---------------------------------------------------------------------------

/// A fixed set of named nodes and a directed weighted adjacency matrix.
/// Built once per run; only quantities and existing weights mutate after.
#[derive(Debug, Clone)]
pub struct NetworkState {
    n: usize,
    names: Vec<String>,
    quantities: Vec<f64>,
    /// Row-major n×n; `weights[i * n + j]` is the weight of edge i→j.
    weights: Vec<f64>,
    /// Which ordered pairs can ever be nonzero. Frozen at initialization.
    topology: Vec<bool>,
    activations: Vec<Activation>,
    layout: Vec<(f64, f64)>,
}

impl NetworkState {
    /// Build a fresh network: unique names, quantities uniform in
    /// [0, node_q_init), and an edge for each ordered off-diagonal pair
    /// with probability `link_th`, weighted uniformly in the initial range.
    /// The diagonal is always zero.
    pub fn initialize(config: &SimConfig, rng: &mut ChaCha8Rng) -> Self {
        let n = config.nodes;
        let names = naming::unique_names(rng, n);
        let quantities: Vec<f64> =
            (0..n).map(|_| rng.gen_range(0.0..config.node_q_init)).collect();

        let (w_lo, w_hi) = config.link_w_init_range();
        let mut weights = vec![0.0; n * n];
        let mut topology = vec![false; n * n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                if rng.gen::<f64>() < config.link_th {
                    weights[i * n + j] = rng.gen_range(w_lo..=w_hi);
                    topology[i * n + j] = true;
                }
            }
        }

        let activations: Vec<Activation> = (0..n)
            .map(|_| {
                if rng.gen::<f64>() > 0.5 {
                    Activation::Tanh
                } else {
                    Activation::NegTanh
                }
            })
            .collect();

        Self {
            n,
            names,
            quantities,
            weights,
            topology,
            activations,
            layout: shell_layout(n),
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn quantities(&self) -> &[f64] {
        self.quantities.as_slice()
    }

    pub fn weights(&self) -> &[f64] {
        self.weights.as_slice()
    }

    /// Matrix entry for the ordered pair, `None` when either id is out of
    /// range.
    pub fn weight(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.n || to >= self.n {
            return None;
        }
        Some(self.weights[from * self.n + to])
    }

    pub fn activations(&self) -> &[Activation] {
        self.activations.as_slice()
    }

    pub fn total_quantity(&self) -> f64 {
        self.quantities.iter().sum()
    }

    /// Derived edge-list view of the nonzero entries, row order.
    pub fn edges(&self) -> Vec<EdgeView> {
        let mut out = Vec::new();
        for i in 0..self.n {
            for j in 0..self.n {
                let w = self.weights[i * self.n + j];
                if w != 0.0 {
                    out.push(EdgeView { from: i, to: j, weight: w });
                }
            }
        }
        out
    }

    /// Current state in stable node order, for the renderer.
    pub fn snapshot(&self, tick: u64) -> Snapshot {
        Snapshot {
            tick,
            names: self.names.clone(),
            quantities: self.quantities.clone(),
            weights: self.weights.clone(),
            layout: self.layout.clone(),
            total_quantity: self.total_quantity(),
        }
    }

    /// Replace quantities and weights with the output of a dynamics step.
    /// Shapes must match and the write must not introduce self-loops or new
    /// edges; the topology fixed at initialization is permanent.
    pub fn apply(&mut self, quantities: Vec<f64>, weights: Vec<f64>) -> Result<(), ShapeError> {
        if quantities.len() != self.n {
            return Err(ShapeError::QuantityLen {
                expected: self.n,
                got: quantities.len(),
            });
        }
        if weights.len() != self.n * self.n {
            return Err(ShapeError::MatrixLen {
                expected: self.n * self.n,
                got: weights.len(),
            });
        }
        for i in 0..self.n {
            if weights[i * self.n + i] != 0.0 {
                return Err(ShapeError::NonzeroDiagonal(i));
            }
        }
        for i in 0..self.n {
            for j in 0..self.n {
                if weights[i * self.n + j] != 0.0 && !self.topology[i * self.n + j] {
                    return Err(ShapeError::EdgeCreation { from: i, to: j });
                }
            }
        }
        self.quantities = quantities;
        self.weights = weights;
        Ok(())
    }

    /// Write-back path for the simulation loop. The dynamics step preserves
    /// shape, diagonal, and topology by construction, so the `apply` checks
    /// are skipped.
    pub(crate) fn replace_unchecked(&mut self, quantities: Vec<f64>, weights: Vec<f64>) {
        debug_assert_eq!(quantities.len(), self.n);
        debug_assert_eq!(weights.len(), self.n * self.n);
        self.quantities = quantities;
        self.weights = weights;
    }
}

/// Place all nodes evenly on the unit circle, node 0 at angle zero.
fn shell_layout(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|k| {
            let theta = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
            (theta.cos(), theta.sin())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
