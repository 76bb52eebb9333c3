//! The single-segment stepping loop.
//!
//! Routing is a strict sequential recurrence: the downstream triple
//! returned at step k is exactly the previous state fed into step k+1,
//! so steps can never be reordered or parallelized within one segment's
//! timeline. A network router would call this loop once per reach, in
//! topological order.

use crate::boundary::BoundarySeries;
use crate::config::{SegmentGeometry, TimestepConfig};
use crate::error::RouteError;
use crate::kernel::RoutingKernel;
use crate::state::SegmentState;

/// Materialized per-step results of one run. The vectors are parallel:
/// index k holds elapsed time `k * dt` and the downstream state at
/// step k.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSeries {
    pub time_s: Vec<f64>,
    pub flow: Vec<f64>,
    pub velocity: Vec<f64>,
    pub depth: Vec<f64>,
}

impl RouteSeries {
    fn with_capacity(tsteps: usize) -> Self {
        RouteSeries {
            time_s: Vec::with_capacity(tsteps),
            flow: Vec::with_capacity(tsteps),
            velocity: Vec::with_capacity(tsteps),
            depth: Vec::with_capacity(tsteps),
        }
    }

    fn push(&mut self, time_s: f64, state: &SegmentState) {
        self.time_s.push(time_s);
        self.flow.push(state.flow);
        self.velocity.push(state.velocity);
        self.depth.push(state.depth);
    }

    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }
}

/// Route one segment for the configured number of steps.
///
/// `initial` is the downstream state at the step before the run. A
/// kernel failure or a non-finite output aborts the run at that step:
/// the recurrence would otherwise thread the corrupted state into every
/// later step.
pub fn route_segment<K, B>(
    kernel: &K,
    geometry: &SegmentGeometry,
    timesteps: &TimestepConfig,
    boundary: &B,
    initial: SegmentState,
) -> Result<RouteSeries, RouteError>
where
    K: RoutingKernel,
    B: BoundarySeries,
{
    route_segment_observed(kernel, geometry, timesteps, boundary, initial, |_, _| {})
}

/// Same loop, with a per-step observer (progress reporting, tracing).
pub fn route_segment_observed<K, B, F>(
    kernel: &K,
    geometry: &SegmentGeometry,
    timesteps: &TimestepConfig,
    boundary: &B,
    initial: SegmentState,
    mut on_step: F,
) -> Result<RouteSeries, RouteError>
where
    K: RoutingKernel,
    B: BoundarySeries,
    F: FnMut(usize, &SegmentState),
{
    let mut series = RouteSeries::with_capacity(timesteps.tsteps);
    let mut previous = initial;

    for step in 0..timesteps.tsteps {
        let input = boundary.input_at(step);
        let state = kernel
            .advance(timesteps.dt, input, geometry, previous)
            .map_err(|source| RouteError::Step { step, source })?;
        if !state.is_finite() {
            return Err(RouteError::NonFinite { step });
        }

        series.push(step as f64 * timesteps.dt, &state);
        on_step(step, &state);
        previous = state;
    }

    Ok(series)
}
