use crate::config::SegmentGeometry;
use crate::error::KernelError;
use crate::mc_kernel;
use crate::state::{BoundaryInput, SegmentState};

/// The routing-step capability a segment router depends on.
///
/// Bound once by the application before a run starts; the router never
/// probes for or loads a solver itself. From the caller's perspective an
/// implementation is a pure function of its inputs.
pub trait RoutingKernel {
    fn advance(
        &self,
        dt: f64,
        input: BoundaryInput,
        geometry: &SegmentGeometry,
        previous: SegmentState,
    ) -> Result<SegmentState, KernelError>;
}

/// Production kernel: the Muskingum-Cunge routing step.
#[derive(Debug, Clone, Copy, Default)]
pub struct MuskingumCunge;

impl RoutingKernel for MuskingumCunge {
    fn advance(
        &self,
        dt: f64,
        input: BoundaryInput,
        geometry: &SegmentGeometry,
        previous: SegmentState,
    ) -> Result<SegmentState, KernelError> {
        let (qdc, velc, depthc) = mc_kernel::advance(
            dt,
            input.qup,
            input.quc,
            previous.flow,
            input.qlat,
            geometry.dx,
            geometry.bw,
            geometry.tw,
            geometry.twcc,
            geometry.n,
            geometry.ncc,
            geometry.cs,
            geometry.s0,
            previous.velocity,
            previous.depth,
        )?;
        Ok(SegmentState::new(qdc, velc, depthc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_state_and_boundary_onto_the_kernel_contract() {
        let geometry =
            SegmentGeometry::new(112.0, 448.0, 623.0, 1.40, 0.028, 0.031, 0.0018, 2000.0).unwrap();
        let input = BoundaryInput {
            qup: 2.0,
            quc: 2.0,
            qlat: 0.0,
        };
        let previous = SegmentState::new(1.0, 0.0, 0.0);

        let next = MuskingumCunge
            .advance(600.0, input, &geometry, previous)
            .unwrap();
        let (qdc, velc, depthc) = mc_kernel::advance(
            600.0, 2.0, 2.0, 1.0, 0.0, 2000.0, 112.0, 448.0, 623.0, 0.028, 0.031, 1.40, 0.0018,
            0.0, 0.0,
        )
        .unwrap();

        assert_eq!(next, SegmentState::new(qdc, velc, depthc));
    }
}
