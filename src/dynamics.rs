// Driftnet Simulation Engine - Dynamics Engine
//
// One discrete time step of the co-evolving network: quantity diffuses along
// weighted edges, then every live weight drifts by a random factor, then
// everything is clamped back into bounds. All functions here are pure over
// well-shaped arrays; the caller writes results back into NetworkState.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::{Bounds, SimConfig};
use crate::types::Activation;

// ---------------------------------------------------------------------------
// Step outcome
// ---------------------------------------------------------------------------

/// Result of one full dynamics step, before write-back.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub quantities: Vec<f64>,
    pub weights: Vec<f64>,
    /// Quantities that had to be pinned to a bound.
    pub quantity_clamps: usize,
    /// Weights that had to be pinned to a bound.
    pub weight_clamps: usize,
    /// Σ transfer − Σ loss before clamping. Both sums walk the same set of
    /// edge traversals, so this is zero up to float error.
    pub flow_balance: f64,
}

// ---------------------------------------------------------------------------
// Flow terms
// ---------------------------------------------------------------------------

/// Quantity arriving at each node: `transfer[j] = Σ_i q[i] * W[i][j]`,
/// the vector-matrix product q · W.
pub fn transfer(quantities: &[f64], weights: &[f64]) -> Vec<f64> {
    let n = quantities.len();
    debug_assert_eq!(weights.len(), n * n);
    let mut out = vec![0.0; n];
    for i in 0..n {
        let qi = quantities[i];
        if qi == 0.0 {
            continue;
        }
        let row = &weights[i * n..(i + 1) * n];
        for (j, &w) in row.iter().enumerate() {
            out[j] += qi * w;
        }
    }
    out
}

/// Quantity leaving each node: `loss[i] = q[i] * Σ_j W[i][j]`, the row-sum
/// form of the outbound flow.
pub fn loss(quantities: &[f64], weights: &[f64]) -> Vec<f64> {
    let n = quantities.len();
    debug_assert_eq!(weights.len(), n * n);
    (0..n)
        .map(|i| {
            let row_sum: f64 = weights[i * n..(i + 1) * n].iter().sum();
            quantities[i] * row_sum
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Drift and clamping
// ---------------------------------------------------------------------------

/// Multiply every nonzero weight by an independent factor drawn uniformly
/// from `range`. Zero entries are never touched, so no edge can appear.
pub fn drift_weights(weights: &mut [f64], range: (f64, f64), rng: &mut ChaCha8Rng) {
    let (lo, hi) = range;
    for w in weights.iter_mut() {
        if *w != 0.0 {
            *w *= rng.gen_range(lo..=hi);
        }
    }
}

/// Clamp every value into `bounds`. Returns how many were moved.
pub fn clamp_quantities(quantities: &mut [f64], bounds: Bounds) -> usize {
    let mut clamped = 0;
    for q in quantities.iter_mut() {
        let pinned = bounds.clamp(*q);
        if pinned != *q {
            *q = pinned;
            clamped += 1;
        }
    }
    clamped
}

/// Clamp every nonzero weight into `bounds`. Zeros are structural non-edges
/// and must stay zero: pinning them up to the lower bound would create an
/// edge. Returns how many weights were moved.
pub fn clamp_weights(weights: &mut [f64], bounds: Bounds) -> usize {
    let mut clamped = 0;
    for w in weights.iter_mut() {
        if *w == 0.0 {
            continue;
        }
        let pinned = bounds.clamp(*w);
        if pinned != *w {
            *w = pinned;
            clamped += 1;
        }
    }
    clamped
}

// ---------------------------------------------------------------------------
// Full step
// ---------------------------------------------------------------------------

/// Advance (quantities, weights) by one tick:
/// transfer -> loss -> update -> weight drift -> clamp.
///
/// The activation hook is applied to each node's transfer term only when
/// `config.apply_activation` is set; the default run uses the raw transfer.
pub fn step(
    quantities: &[f64],
    weights: &[f64],
    activations: &[Activation],
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
) -> StepOutcome {
    let n = quantities.len();
    debug_assert_eq!(weights.len(), n * n);
    debug_assert_eq!(activations.len(), n);

    let transfers = transfer(quantities, weights);
    let losses = loss(quantities, weights);
    let flow_balance =
        transfers.iter().sum::<f64>() - losses.iter().sum::<f64>();

    let mut next_q: Vec<f64> = (0..n)
        .map(|i| {
            let inbound = if config.apply_activation {
                activations[i].apply(transfers[i])
            } else {
                transfers[i]
            };
            quantities[i] - losses[i] + inbound
        })
        .collect();

    let mut next_w = weights.to_vec();
    drift_weights(&mut next_w, config.link_mod_range(), rng);

    let quantity_clamps = clamp_quantities(&mut next_q, config.node_q);
    let weight_clamps = clamp_weights(&mut next_w, config.link_w);

    StepOutcome {
        quantities: next_q,
        weights: next_w,
        quantity_clamps,
        weight_clamps,
        flow_balance,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
