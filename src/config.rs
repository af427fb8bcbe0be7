// Driftnet Simulation Engine - Configuration

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Configuration rejected at startup. The engine never runs on a config that
/// could produce malformed matrices.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("node count must be at least 1, got {0}")]
    NoNodes(usize),
    #[error("link threshold must be a probability in [0, 1], got {0}")]
    BadLinkThreshold(f64),
    #[error("{name} bounds inverted: min {min} > max {max}")]
    InvertedBounds { name: &'static str, min: f64, max: f64 },
    #[error("{name} deviation must be non-negative, got {value}")]
    NegativeDeviation { name: &'static str, value: f64 },
    #[error("initial quantity ceiling must be positive, got {0}")]
    BadInitCeiling(f64),
    #[error("link weight range [{lo}, {hi}] includes non-positive weights")]
    NonPositiveWeightRange { lo: f64, hi: f64 },
    #[error("{name} is not finite")]
    NotFinite { name: &'static str },
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// A closed interval used for clamping quantities and weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Pin `value` into the interval. Values already inside pass through
    /// unchanged, so the operation is idempotent.
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NotFinite { name });
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedBounds {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// Immutable simulation parameters, passed into the network constructor and
/// the dynamics step. One value per tunable listed in the constants surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of nodes. Fixed for the lifetime of a run.
    pub nodes: usize,
    /// Probability that an ordered off-diagonal pair (i, j) gets an edge.
    pub link_th: f64,
    /// Center of the initial edge-weight distribution.
    pub link_w_base: f64,
    /// Half-width of the initial edge-weight distribution.
    pub link_w_dev: f64,
    /// Initial quantities are sampled uniformly in [0, node_q_init).
    pub node_q_init: f64,
    /// Tick budget for a full run.
    pub iterations: u64,
    /// Center of the per-tick multiplicative weight drift.
    pub link_mod_base: f64,
    /// Half-width of the per-tick multiplicative weight drift.
    pub link_mod_dev: f64,
    /// Quantity clamp interval.
    pub node_q: Bounds,
    /// Weight clamp interval, applied to nonzero weights only.
    pub link_w: Bounds,
    /// Apply each node's activation to its transfer term. The original
    /// system defines per-node tanh activations but leaves them switched
    /// off; this flag preserves that hook.
    pub apply_activation: bool,

    // Renderer scaling. The engine only forwards these in snapshots.
    pub node_size_min: f64,
    pub node_size_scaling: f64,
    pub link_size_scaling: f64,
    pub node_font_size: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        let node_size_min = 0.4;
        Self {
            nodes: 19,
            link_th: 0.25,
            link_w_base: 0.25,
            link_w_dev: 0.05,
            node_q_init: 2.0,
            iterations: 1000,
            link_mod_base: 1.0,
            link_mod_dev: 0.15,
            node_q: Bounds::new(0.01, 3.0),
            link_w: Bounds::new(0.01, 1.0),
            apply_activation: false,
            node_size_min,
            node_size_scaling: 3000.0,
            link_size_scaling: 10.0,
            node_font_size: 20.0 * node_size_min,
        }
    }
}

impl SimConfig {
    /// Validate every parameter before any matrix is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes == 0 {
            return Err(ConfigError::NoNodes(self.nodes));
        }
        if !self.link_th.is_finite() || !(0.0..=1.0).contains(&self.link_th) {
            return Err(ConfigError::BadLinkThreshold(self.link_th));
        }
        if !self.node_q_init.is_finite() || self.node_q_init <= 0.0 {
            return Err(ConfigError::BadInitCeiling(self.node_q_init));
        }
        // NaN slips through ordered comparisons, so finiteness has to be
        // checked before the range logic below.
        for (name, value) in [
            ("link weight base", self.link_w_base),
            ("link weight deviation", self.link_w_dev),
            ("link drift base", self.link_mod_base),
            ("link drift deviation", self.link_mod_dev),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name });
            }
        }
        if self.link_w_dev < 0.0 {
            return Err(ConfigError::NegativeDeviation {
                name: "link weight",
                value: self.link_w_dev,
            });
        }
        if self.link_mod_dev < 0.0 {
            return Err(ConfigError::NegativeDeviation {
                name: "link drift",
                value: self.link_mod_dev,
            });
        }
        self.node_q.validate("node quantity")?;
        self.link_w.validate("link weight")?;
        let (lo, hi) = self.link_w_init_range();
        if lo <= 0.0 {
            return Err(ConfigError::NonPositiveWeightRange { lo, hi });
        }
        Ok(())
    }

    /// Initial weight sampling interval.
    pub fn link_w_init_range(&self) -> (f64, f64) {
        (
            self.link_w_base - self.link_w_dev,
            self.link_w_base + self.link_w_dev,
        )
    }

    /// Drift factor sampling interval.
    pub fn link_mod_range(&self) -> (f64, f64) {
        (
            self.link_mod_base - self.link_mod_dev,
            self.link_mod_base + self.link_mod_dev,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_nodes_rejected() {
        let cfg = SimConfig { nodes: 0, ..SimConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::NoNodes(0)));
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let cfg = SimConfig { link_th: 1.5, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::BadLinkThreshold(_))));

        let cfg = SimConfig { link_th: -0.1, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::BadLinkThreshold(_))));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let cfg = SimConfig {
            node_q: Bounds::new(3.0, 0.01),
            ..SimConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvertedBounds { name: "node quantity", .. })
        ));
    }

    #[test]
    fn test_negative_deviation_rejected() {
        let cfg = SimConfig { link_mod_dev: -0.1, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::NegativeDeviation { .. })));
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        for cfg in [
            SimConfig { link_w_base: f64::NAN, ..SimConfig::default() },
            SimConfig { link_w_dev: f64::INFINITY, ..SimConfig::default() },
            SimConfig { link_mod_base: f64::NAN, ..SimConfig::default() },
            SimConfig { link_mod_dev: f64::NEG_INFINITY, ..SimConfig::default() },
        ] {
            assert!(matches!(cfg.validate(), Err(ConfigError::NotFinite { .. })));
        }
    }

    #[test]
    fn test_zero_spanning_weight_range_rejected() {
        // base 0.05, dev 0.1 -> initial weights could be zero or negative
        let cfg = SimConfig {
            link_w_base: 0.05,
            link_w_dev: 0.1,
            ..SimConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositiveWeightRange { .. })
        ));
    }

    #[test]
    fn test_clamp_pins_to_nearer_bound() {
        let b = Bounds::new(0.01, 1.0);
        assert_eq!(b.clamp(-5.0), 0.01);
        assert_eq!(b.clamp(2.0), 1.0);
        assert_eq!(b.clamp(0.5), 0.5);
    }

    #[test]
    fn test_clamp_idempotent() {
        let b = Bounds::new(0.01, 3.0);
        for v in [-1.0, 0.0, 0.005, 0.01, 1.7, 3.0, 4.2] {
            let once = b.clamp(v);
            assert_eq!(b.clamp(once), once);
        }
    }

    #[test]
    fn test_clamp_identity_inside_bounds() {
        let b = Bounds::new(0.01, 3.0);
        for v in [0.01, 0.5, 1.0, 2.999, 3.0] {
            assert_eq!(b.clamp(v), v);
        }
    }
}
