// Driftnet Simulation Engine - Simulation Core

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, SimConfig};
use crate::dynamics;
use crate::network::NetworkState;
use crate::types::{EdgeWidth, StepResult, StepStats};

// ─── NetSimulation struct ────────────────────────────────────────────────────

/// Owns the network state, the seeded PRNG, and the tick counter. Strictly
/// sequential: one `tick_core` call is one full read → dynamics → clamp →
/// write-back pass, and there is no other writer.
pub struct NetSimulation {
    config: SimConfig,
    seed: u64,
    rng: ChaCha8Rng,
    net: NetworkState,
    tick: u64,
}

impl NetSimulation {
    /// Validate the config, then build the network from the seeded PRNG.
    /// The same (config, seed) pair always produces the same run.
    pub fn with_config(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let net = NetworkState::initialize(&config, &mut rng);
        Ok(Self { config, seed, rng, net, tick: 0 })
    }

    // ─── Loop body ───────────────────────────────────────────────────────

    /// Advance one tick and report the resulting state plus diagnostics.
    pub fn tick_core(&mut self) -> StepResult {
        self.tick += 1;

        let outcome = dynamics::step(
            self.net.quantities(),
            self.net.weights(),
            self.net.activations(),
            &self.config,
            &mut self.rng,
        );
        let quantity_clamps = outcome.quantity_clamps;
        let weight_clamps = outcome.weight_clamps;
        let flow_balance = outcome.flow_balance;
        self.net.replace_unchecked(outcome.quantities, outcome.weights);

        self.finalize_stats(quantity_clamps, weight_clamps, flow_balance)
    }

    fn finalize_stats(
        &self,
        quantity_clamps: usize,
        weight_clamps: usize,
        flow_balance: f64,
    ) -> StepResult {
        let snapshot = self.net.snapshot(self.tick);
        let edges = self.net.edges();

        let min_quantity = snapshot
            .quantities
            .iter()
            .cloned()
            .fold(f64::INFINITY, f64::min);
        let max_quantity = snapshot
            .quantities
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let mean_weight = if edges.is_empty() {
            0.0
        } else {
            edges.iter().map(|e| e.weight).sum::<f64>() / edges.len() as f64
        };

        let stats = StepStats {
            tick: self.tick,
            total_quantity: snapshot.total_quantity,
            min_quantity,
            max_quantity,
            edge_count: edges.len(),
            mean_weight,
            quantity_clamps,
            weight_clamps,
            flow_balance,
        };

        let node_sizes = snapshot
            .quantities
            .iter()
            .map(|&q| q.max(self.config.node_size_min) * self.config.node_size_scaling)
            .collect();
        let edge_widths = edges
            .iter()
            .map(|e| EdgeWidth {
                from: e.from,
                to: e.to,
                width: e.weight * self.config.link_size_scaling,
            })
            .collect();

        StepResult { snapshot, stats, node_sizes, edge_widths }
    }

    // ─── Run control ─────────────────────────────────────────────────────

    /// Run up to `ticks` iterations without building per-tick results.
    pub fn run_batch(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick_core();
        }
    }

    /// Whether the iteration budget is exhausted. The other termination
    /// path, the viewer closing, is signalled by the host simply not
    /// calling `tick_core` again.
    pub fn finished(&self) -> bool {
        self.tick >= self.config.iterations
    }

    /// Rebuild the run from its original (config, seed) pair.
    pub fn reset(&mut self) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.net = NetworkState::initialize(&self.config, &mut rng);
        self.rng = rng;
        self.tick = 0;
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn network(&self) -> &NetworkState {
        &self.net
    }

    pub fn total_quantity(&self) -> f64 {
        self.net.total_quantity()
    }

    /// Quantity of one node, `None` for an out-of-range id.
    pub fn quantity(&self, node: usize) -> Option<f64> {
        self.net.quantities().get(node).copied()
    }

    /// Weight of the (from, to) matrix entry, `None` when either id is out
    /// of range.
    pub fn edge_weight(&self, from: usize, to: usize) -> Option<f64> {
        self.net.weight(from, to)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(seed: u64) -> NetSimulation {
        NetSimulation::with_config(SimConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let cfg = SimConfig { nodes: 0, ..SimConfig::default() };
        assert!(NetSimulation::with_config(cfg, 0).is_err());
    }

    #[test]
    fn test_nan_parameters_fail_at_construction() {
        // These must surface as ConfigError, not as a sampling panic
        // inside initialization or the first tick.
        let cfg = SimConfig { link_w_base: f64::NAN, ..SimConfig::default() };
        assert!(NetSimulation::with_config(cfg, 0).is_err());
        let cfg = SimConfig { link_mod_base: f64::NAN, ..SimConfig::default() };
        assert!(NetSimulation::with_config(cfg, 0).is_err());
    }

    #[test]
    fn test_tick_increments_counter() {
        let mut sim = sim(0);
        assert_eq!(sim.tick(), 0);
        let result = sim.tick_core();
        assert_eq!(sim.tick(), 1);
        assert_eq!(result.stats.tick, 1);
        assert_eq!(result.snapshot.tick, 1);
    }

    #[test]
    fn test_node_count_constant() {
        let mut sim = sim(1);
        let n = sim.network().len();
        sim.run_batch(50);
        assert_eq!(sim.network().len(), n);
        assert_eq!(sim.network().quantities().len(), n);
        assert_eq!(sim.network().weights().len(), n * n);
    }

    #[test]
    fn test_bounds_hold_every_tick() {
        let mut sim = sim(2);
        let cfg = sim.config().clone();
        for _ in 0..200 {
            let result = sim.tick_core();
            for &q in &result.snapshot.quantities {
                assert!(cfg.node_q.contains(q), "quantity {} out of bounds", q);
            }
            for &w in &result.snapshot.weights {
                assert!(
                    w == 0.0 || cfg.link_w.contains(w),
                    "weight {} out of bounds",
                    w
                );
            }
        }
    }

    #[test]
    fn test_edge_count_never_grows() {
        let mut sim = sim(3);
        let initial = sim.network().edges().len();
        for _ in 0..200 {
            let result = sim.tick_core();
            assert!(result.stats.edge_count <= initial);
        }
    }

    #[test]
    fn test_finished_after_budget() {
        let cfg = SimConfig { iterations: 5, ..SimConfig::default() };
        let mut sim = NetSimulation::with_config(cfg, 0).unwrap();
        assert!(!sim.finished());
        sim.run_batch(5);
        assert!(sim.finished());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut sim = sim(4);
        let before = sim.network().snapshot(0);
        sim.run_batch(30);
        sim.reset();
        let after = sim.network().snapshot(0);
        assert_eq!(before.quantities, after.quantities);
        assert_eq!(before.weights, after.weights);
        assert_eq!(before.names, after.names);
        assert_eq!(sim.tick(), 0);
    }

    #[test]
    fn test_node_sizes_respect_floor() {
        let mut sim = sim(5);
        let result = sim.tick_core();
        let cfg = sim.config();
        let floor = cfg.node_size_min * cfg.node_size_scaling;
        for &s in &result.node_sizes {
            assert!(s >= floor - 1e-9);
        }
    }

    #[test]
    fn test_edge_widths_scaled() {
        let mut sim = sim(6);
        let result = sim.tick_core();
        let scaling = sim.config().link_size_scaling;
        for e in &result.edge_widths {
            let raw = sim.edge_weight(e.from, e.to).unwrap();
            assert!((e.width - raw * scaling).abs() < 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_lookups_return_none() {
        let sim = sim(7);
        let n = sim.network().len();
        assert_eq!(sim.quantity(n), None);
        assert_eq!(sim.edge_weight(n, 0), None);
        assert_eq!(sim.edge_weight(0, n), None);
        assert!(sim.quantity(n - 1).is_some());
        assert!(sim.edge_weight(0, 1).is_some());
    }
}
