//! Error types for segment routing.
//!
//! Invalid parameters are caught at construction, before the stepping
//! loop starts. Failures inside a run carry the step index, because the
//! recurrence means every later step would inherit the bad state.

use thiserror::Error;

/// Failures from the Muskingum-Cunge kernel itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Degenerate channel coefficients the solver cannot route through.
    #[error("invalid channel coefficients: n={n}, s0={s0}, z={z}, bw={bw}")]
    InvalidChannel { n: f64, s0: f64, z: f64, bw: f64 },

    /// The time-weighting denominator collapsed to zero.
    #[error("zero time-weighting denominator in Muskingum-Cunge coefficients")]
    DegenerateCoefficients,
}

/// Failures from configuring or running a single-segment route.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("invalid segment geometry: {0}")]
    Geometry(String),

    #[error("invalid timestep configuration: {0}")]
    Timestep(String),

    /// The routing kernel failed at a step. The run stops here; no
    /// substitute state is threaded into later steps.
    #[error("routing failed at step {step}")]
    Step {
        step: usize,
        #[source]
        source: KernelError,
    },

    /// The kernel returned a non-finite flow, velocity, or depth.
    #[error("non-finite routing output at step {step}")]
    NonFinite { step: usize },
}
