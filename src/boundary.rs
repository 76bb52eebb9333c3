//! Upstream boundary-condition generators for the demonstration
//! scenarios. Each generator is a pure function of the step index, so a
//! run can be replayed exactly.

use crate::state::BoundaryInput;

/// A per-step upstream boundary series.
pub trait BoundarySeries {
    /// Upstream flow entering the segment at step `step` (m^3/s).
    fn upstream(&self, step: usize) -> f64;

    /// Lateral inflow along the reach at step `step` (m^3/s).
    fn lateral(&self, _step: usize) -> f64 {
        0.0
    }

    /// The full boundary triple for one routing call: the previous-step
    /// upstream flow is the series evaluated one step earlier (the
    /// step-0 value stands in for the pre-run flow).
    fn input_at(&self, step: usize) -> BoundaryInput {
        let qup = if step == 0 {
            self.upstream(0)
        } else {
            self.upstream(step - 1)
        };
        BoundaryInput {
            qup,
            quc: self.upstream(step),
            qlat: self.lateral(step),
        }
    }
}

/// Holds upstream flow at `baseline`, then at `switch_step` switches to
/// `raised` and holds it there for the rest of the run.
#[derive(Debug, Clone, Copy)]
pub struct StepChange {
    pub baseline: f64,
    pub raised: f64,
    pub switch_step: usize,
    pub lateral: f64,
}

impl StepChange {
    pub fn new(baseline: f64, raised: f64, switch_step: usize) -> Self {
        StepChange {
            baseline,
            raised,
            switch_step,
            lateral: 0.0,
        }
    }
}

impl BoundarySeries for StepChange {
    fn upstream(&self, step: usize) -> f64 {
        if step >= self.switch_step {
            self.raised
        } else {
            self.baseline
        }
    }

    fn lateral(&self, _step: usize) -> f64 {
        self.lateral
    }
}

/// Holds upstream flow at `baseline`, raises it to `pulse` for steps
/// `start_step..=end_step`, then back to `baseline`.
///
/// Each step is classified independently: anything outside the pulse
/// window falls through to the baseline branch, so steps after the
/// window always reassert `baseline`.
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    pub baseline: f64,
    pub pulse: f64,
    pub start_step: usize,
    pub end_step: usize,
    pub lateral: f64,
}

impl Pulse {
    pub fn new(baseline: f64, pulse: f64, start_step: usize, end_step: usize) -> Self {
        Pulse {
            baseline,
            pulse,
            start_step,
            end_step,
            lateral: 0.0,
        }
    }
}

impl BoundarySeries for Pulse {
    fn upstream(&self, step: usize) -> f64 {
        if step < self.start_step {
            self.baseline
        } else if step <= self.end_step {
            self.pulse
        } else {
            self.baseline
        }
    }

    fn lateral(&self, _step: usize) -> f64 {
        self.lateral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_demo_scenario_is_exact() {
        // baseline 0.21, pulse 1.0, window [6, 9], 60 steps.
        let series = Pulse::new(0.21, 1.0, 6, 9);
        for step in 0..60 {
            let expected = if (6..=9).contains(&step) { 1.0 } else { 0.21 };
            assert_eq!(series.upstream(step), expected, "step {step}");
        }
    }

    #[test]
    fn pulse_reasserts_baseline_after_the_window() {
        let series = Pulse::new(0.21, 1.0, 6, 9);
        assert_eq!(series.upstream(10), 0.21);
        assert_eq!(series.upstream(59), 0.21);
    }

    #[test]
    fn step_change_switches_and_holds() {
        let series = StepChange::new(1.0, 2.0, 5);
        assert_eq!(series.upstream(0), 1.0);
        assert_eq!(series.upstream(4), 1.0);
        assert_eq!(series.upstream(5), 2.0);
        assert_eq!(series.upstream(100), 2.0);
    }

    #[test]
    fn previous_step_upstream_flow_lags_by_one() {
        let series = Pulse::new(0.21, 1.0, 6, 9);
        // At the leading edge of the pulse, qup is still the baseline.
        let input = series.input_at(6);
        assert_eq!(input.qup, 0.21);
        assert_eq!(input.quc, 1.0);
        // One past the trailing edge, qup is still the pulse value.
        let input = series.input_at(10);
        assert_eq!(input.qup, 1.0);
        assert_eq!(input.quc, 0.21);
    }

    #[test]
    fn step_zero_uses_the_series_start_as_previous_flow() {
        let series = StepChange::new(1.0, 2.0, 0);
        let input = series.input_at(0);
        assert_eq!(input.qup, 2.0);
        assert_eq!(input.quc, 2.0);
    }

    #[test]
    fn lateral_defaults_to_zero() {
        let series = StepChange::new(1.0, 2.0, 0);
        assert_eq!(series.input_at(3).qlat, 0.0);
    }
}
