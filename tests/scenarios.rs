//! End-to-end runs of the two demonstration scenarios through the real
//! Muskingum-Cunge kernel.

use reach_rs::{
    BoundarySeries, MuskingumCunge, Pulse, SegmentGeometry, SegmentState, StepChange,
    TimestepConfig, route_segment,
};

fn demo_geometry() -> SegmentGeometry {
    SegmentGeometry::new(112.0, 448.0, 623.0, 1.40, 0.028, 0.031, 0.0018, 2000.0).unwrap()
}

#[test]
fn step_change_rises_monotonically_and_settles() {
    let geometry = demo_geometry();
    let timesteps = TimestepConfig::new(600.0, 60).unwrap();
    // Upstream flow held at twice the initial downstream flow from step 0.
    let initial = SegmentState::new(1.0, 0.0, 0.0);
    let boundary = StepChange::new(1.0, 2.0, 0);

    let series = route_segment(&MuskingumCunge, &geometry, &timesteps, &boundary, initial)
        .unwrap();
    assert_eq!(series.len(), 60);

    // Monotonically non-decreasing, allowing only secant-tolerance noise.
    for k in 1..60 {
        assert!(
            series.flow[k] >= series.flow[k - 1] - 1e-6,
            "flow dropped at step {k}: {} -> {}",
            series.flow[k - 1],
            series.flow[k]
        );
    }

    // Successive differences shrink toward zero by step 60.
    let early_diff = (series.flow[1] - series.flow[0]).abs();
    let late_diff = (series.flow[59] - series.flow[58]).abs();
    assert!(
        late_diff < early_diff,
        "differences did not shrink: early={early_diff}, late={late_diff}"
    );
    assert!(late_diff < 1e-3, "late difference still large: {late_diff}");

    // The routed flow approaches, and never exceeds, the held inflow.
    let last = *series.flow.last().unwrap();
    assert!(last > 1.5 && last <= 2.0 + 1e-9, "last flow {last}");
}

#[test]
fn pulse_boundary_series_matches_the_demo_scenario_exactly() {
    let boundary = Pulse::new(0.21, 1.0, 6, 9);
    for k in 0..60 {
        let expected = if (6..=9).contains(&k) { 1.0 } else { 0.21 };
        assert_eq!(boundary.upstream(k), expected, "step {k}");
    }
}

#[test]
fn pulse_run_produces_a_transient_wave() {
    let geometry = demo_geometry();
    let timesteps = TimestepConfig::new(600.0, 60).unwrap();
    let initial = SegmentState::new(0.21, 0.0, 0.0);
    let boundary = Pulse::new(0.21, 1.0, 6, 9);

    let series = route_segment(&MuskingumCunge, &geometry, &timesteps, &boundary, initial)
        .unwrap();
    assert_eq!(series.len(), 60);
    assert!(series.flow.iter().all(|q| q.is_finite()));

    // The wave peaks after the pulse enters and decays afterwards.
    let (peak_step, peak_flow) = series
        .flow
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |best, (k, &q)| {
            if q > best.1 { (k, q) } else { best }
        });
    assert!(peak_step >= 6, "peak at step {peak_step}");
    assert!(peak_flow > 0.21, "peak flow {peak_flow}");
    assert!(
        *series.flow.last().unwrap() < peak_flow,
        "wave never receded"
    );
}

#[test]
fn identical_configurations_give_identical_runs() {
    // Construct everything twice: no hidden state may leak between runs.
    let run = || {
        let geometry =
            SegmentGeometry::new(112.0, 448.0, 623.0, 1.40, 0.028, 0.031, 0.0018, 2000.0)
                .unwrap();
        let timesteps = TimestepConfig::new(600.0, 60).unwrap();
        let boundary = Pulse::new(0.21, 1.0, 6, 9);
        route_segment(
            &MuskingumCunge,
            &geometry,
            &timesteps,
            &boundary,
            SegmentState::new(0.21, 0.0, 0.0),
        )
        .unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn zero_step_run_yields_empty_series() {
    let geometry = demo_geometry();
    let timesteps = TimestepConfig::new(600.0, 0).unwrap();
    let boundary = StepChange::new(1.0, 2.0, 0);
    let series = route_segment(
        &MuskingumCunge,
        &geometry,
        &timesteps,
        &boundary,
        SegmentState::default(),
    )
    .unwrap();
    assert!(series.is_empty());
    assert!(series.time_s.is_empty() && series.flow.is_empty());
}
