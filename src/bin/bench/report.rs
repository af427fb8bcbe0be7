// Benchmark Report Types
// Structured output for offline analysis of simulation invariants

use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub scenario: String,
    pub name: String,
    pub seed: u64,
    pub pass: bool,
    pub ticks: u64,
    pub nodes: usize,
    pub edge_count: usize,
    pub final_total_quantity: f64,
    pub final_mean_weight: f64,
    /// Largest |Σ transfer − Σ loss| observed across all ticks.
    pub max_flow_imbalance: f64,
    /// Largest per-tick change in total quantity on ticks where no
    /// quantity clamp fired (should be ~0: diffusion conserves quantity).
    pub max_unclamped_quantity_change: f64,
    pub bounds_violations: u32,
    pub topology_violations: u32,
    pub nonfinite_values: u32,
    pub quantity_clamps_total: u64,
    pub weight_clamps_total: u64,
    pub elapsed_ms: u128,
    pub ticks_per_sec: f64,
}

// ─── Monte Carlo Report (per-scenario aggregation) ──────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloReport {
    pub scenario_name: String,
    pub label: String,
    pub n_runs: usize,
    pub pass_rate: f64,
    pub final_total_quantity: Stats,
    pub final_mean_weight: Stats,
    pub max_flow_imbalance: Stats,
    pub max_unclamped_quantity_change: Stats,
    pub quantity_clamps_total: Stats,
    pub weight_clamps_total: Stats,
    pub elapsed_ms: Stats,
    pub ticks_per_sec: Stats,
    pub individual_runs: Vec<RunResult>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub summary: Summary,
    pub scenarios: Vec<MonteCarloReport>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}
