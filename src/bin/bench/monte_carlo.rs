// Monte Carlo Infrastructure — N runs per scenario with statistical aggregation
// Each scenario runs N times with seeds base..base+N-1, computing mean ± 95% CI

use driftnet_engine::NetSimulation;

use crate::report::*;
use crate::scenarios::Scenario;
use crate::time_series::TimeSeriesRecorder;

use std::time::Instant;

/// Run a single scenario iteration with a specific seed.
pub fn run_single(
    scenario: &Scenario,
    seed: u64,
    time_series_dir: Option<&std::path::Path>,
) -> RunResult {
    let start = Instant::now();
    let mut sim = match NetSimulation::with_config(scenario.config.clone(), seed) {
        Ok(sim) => sim,
        Err(e) => {
            // Scenario configs are static; a rejection here is a bench bug.
            panic!("scenario {} has invalid config: {}", scenario.name, e);
        }
    };

    let cfg = sim.config().clone();
    let initial_edges = sim.network().edges().len();
    let mut time_series = time_series_dir.map(|_| TimeSeriesRecorder::new());

    let mut max_flow_imbalance: f64 = 0.0;
    let mut max_unclamped_change: f64 = 0.0;
    let mut bounds_violations: u32 = 0;
    let mut topology_violations: u32 = 0;
    let mut nonfinite_values: u32 = 0;
    let mut quantity_clamps_total: u64 = 0;
    let mut weight_clamps_total: u64 = 0;
    let mut prev_total = sim.total_quantity();
    let mut last_stats = None;

    for _ in 0..scenario.ticks {
        let result = sim.tick_core();
        let stats = &result.stats;

        max_flow_imbalance = max_flow_imbalance.max(stats.flow_balance.abs());
        quantity_clamps_total += stats.quantity_clamps as u64;
        weight_clamps_total += stats.weight_clamps as u64;

        if stats.quantity_clamps == 0 {
            let change = (stats.total_quantity - prev_total).abs();
            max_unclamped_change = max_unclamped_change.max(change);
        }
        prev_total = stats.total_quantity;

        for &q in &result.snapshot.quantities {
            if !q.is_finite() {
                nonfinite_values += 1;
            } else if !cfg.node_q.contains(q) {
                bounds_violations += 1;
            }
        }
        for &w in &result.snapshot.weights {
            if !w.is_finite() {
                nonfinite_values += 1;
            } else if w != 0.0 && !cfg.link_w.contains(w) {
                bounds_violations += 1;
            }
        }
        if stats.edge_count != initial_edges {
            topology_violations += 1;
        }

        if let Some(ref mut ts) = time_series {
            ts.record(stats);
        }

        last_stats = Some(stats.clone());
    }

    if let (Some(ts), Some(dir)) = (&time_series, time_series_dir) {
        let path = dir.join(format!("seed-{}.jsonl", seed));
        if let Err(e) = ts.write_jsonl(&path) {
            eprintln!("  Warning: failed to write time series: {}", e);
        }
    }

    let elapsed = start.elapsed();
    let elapsed_ms = elapsed.as_millis();
    let elapsed_secs = elapsed.as_secs_f64().max(0.001);

    let stats = last_stats.expect("no ticks executed");

    let mut pass = bounds_violations == 0 || scenario.criteria.allow_bounds_violations;
    if topology_violations > 0 || nonfinite_values > 0 {
        pass = false;
    }
    if max_flow_imbalance > scenario.criteria.max_flow_imbalance {
        pass = false;
    }
    if let Some(tol) = scenario.criteria.max_unclamped_quantity_change {
        if max_unclamped_change > tol {
            pass = false;
        }
    }

    RunResult {
        scenario: scenario.label.to_string(),
        name: scenario.name.to_string(),
        seed,
        pass,
        ticks: scenario.ticks,
        nodes: cfg.nodes,
        edge_count: stats.edge_count,
        final_total_quantity: stats.total_quantity,
        final_mean_weight: stats.mean_weight,
        max_flow_imbalance,
        max_unclamped_quantity_change: max_unclamped_change,
        bounds_violations,
        topology_violations,
        nonfinite_values,
        quantity_clamps_total,
        weight_clamps_total,
        elapsed_ms,
        ticks_per_sec: scenario.ticks as f64 / elapsed_secs,
    }
}

/// Run Monte Carlo: N runs of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    time_series_base: Option<&std::path::Path>,
) -> MonteCarloReport {
    let ts_dir = time_series_base.map(|base| base.join(scenario.name.to_lowercase()));

    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        let result = run_single(scenario, seed, ts_dir.as_deref());
        results.push(result);
    }

    aggregate(scenario, results)
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(scenario: &Scenario, results: Vec<RunResult>) -> MonteCarloReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let pass_rate = passed as f64 / n as f64;

    let final_total_quantity = Stats::from_samples(
        &results.iter().map(|r| r.final_total_quantity).collect::<Vec<_>>(),
    );
    let final_mean_weight = Stats::from_samples(
        &results.iter().map(|r| r.final_mean_weight).collect::<Vec<_>>(),
    );
    let max_flow_imbalance = Stats::from_samples(
        &results.iter().map(|r| r.max_flow_imbalance).collect::<Vec<_>>(),
    );
    let max_unclamped_quantity_change = Stats::from_samples(
        &results.iter().map(|r| r.max_unclamped_quantity_change).collect::<Vec<_>>(),
    );
    let quantity_clamps_total = Stats::from_samples(
        &results.iter().map(|r| r.quantity_clamps_total as f64).collect::<Vec<_>>(),
    );
    let weight_clamps_total = Stats::from_samples(
        &results.iter().map(|r| r.weight_clamps_total as f64).collect::<Vec<_>>(),
    );
    let elapsed_ms = Stats::from_samples(
        &results.iter().map(|r| r.elapsed_ms as f64).collect::<Vec<_>>(),
    );
    let ticks_per_sec = Stats::from_samples(
        &results.iter().map(|r| r.ticks_per_sec).collect::<Vec<_>>(),
    );

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        n_runs: n,
        pass_rate,
        final_total_quantity,
        final_mean_weight,
        max_flow_imbalance,
        max_unclamped_quantity_change,
        quantity_clamps_total,
        weight_clamps_total,
        elapsed_ms,
        ticks_per_sec,
        individual_runs: results,
    }
}
