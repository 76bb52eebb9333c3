//! CSV output for a routed series: one row per timestep.

use crate::routing::RouteSeries;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct StepRecord {
    step: usize,
    time_s: f64,
    flow: f64,
    velocity: f64,
    depth: f64,
}

/// Write a full run as `step,time_s,flow,velocity,depth` rows.
pub fn write_series(path: &Path, series: &RouteSeries) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to create CSV output: {path:?}"))?;

    for step in 0..series.len() {
        wtr.serialize(StepRecord {
            step,
            time_s: series.time_s[step],
            flow: series.flow[step],
            velocity: series.velocity[step],
            depth: series.depth[step],
        })
        .with_context(|| format!("Failed to write CSV record for step {step}"))?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_row_per_step_with_header() {
        let mut series = RouteSeries::default();
        for step in 0..3 {
            series.time_s.push(step as f64 * 600.0);
            series.flow.push(1.0 + step as f64);
            series.velocity.push(0.5);
            series.depth.push(0.1);
        }

        let dir = std::env::temp_dir();
        let path = dir.join("reach_rs_csv_test.csv");
        write_series(&path, &series).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("step,time_s,flow,velocity,depth"));
        assert_eq!(content.lines().count(), 4);
        std::fs::remove_file(&path).ok();
    }
}
