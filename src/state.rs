/// Downstream hydraulic state of a segment at the end of one timestep.
///
/// Immutable value type: the router constructs a fresh one from each
/// kernel call and threads it into the next, which is the only path by
/// which state advances. Values are physically non-negative but the
/// routine does not enforce that.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentState {
    /// Downstream flow (m^3/s).
    pub flow: f64,
    /// Downstream velocity (m/s).
    pub velocity: f64,
    /// Downstream depth (m).
    pub depth: f64,
}

impl SegmentState {
    pub fn new(flow: f64, velocity: f64, depth: f64) -> Self {
        SegmentState {
            flow,
            velocity,
            depth,
        }
    }

    /// True when every component is a usable number.
    pub fn is_finite(&self) -> bool {
        self.flow.is_finite() && self.velocity.is_finite() && self.depth.is_finite()
    }
}

/// Upstream boundary condition for one timestep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryInput {
    /// Upstream flow at the previous timestep (m^3/s).
    pub qup: f64,
    /// Upstream flow at the current timestep (m^3/s).
    pub quc: f64,
    /// Lateral inflow along the reach for the current timestep (m^3/s).
    pub qlat: f64,
}
