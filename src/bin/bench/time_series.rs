// Per-Tick JSONL Time Series Recorder
// Outputs one JSON line per tick for independent analysis

use driftnet_engine::StepStats;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct TickSnapshot {
    pub tick: u64,
    pub total_quantity: f64,
    pub min_quantity: f64,
    pub max_quantity: f64,
    pub edge_count: usize,
    pub mean_weight: f64,
    pub quantity_clamps: usize,
    pub weight_clamps: usize,
    pub flow_balance: f64,
}

impl TickSnapshot {
    pub fn from_stats(stats: &StepStats) -> Self {
        Self {
            tick: stats.tick,
            total_quantity: stats.total_quantity,
            min_quantity: stats.min_quantity,
            max_quantity: stats.max_quantity,
            edge_count: stats.edge_count,
            mean_weight: stats.mean_weight,
            quantity_clamps: stats.quantity_clamps,
            weight_clamps: stats.weight_clamps,
            flow_balance: stats.flow_balance,
        }
    }
}

/// Time series recorder that accumulates snapshots and writes JSONL
pub struct TimeSeriesRecorder {
    snapshots: Vec<TickSnapshot>,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn record(&mut self, stats: &StepStats) {
        self.snapshots.push(TickSnapshot::from_stats(stats));
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}
