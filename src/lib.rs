//! Single-segment Muskingum-Cunge flow routing.
//!
//! One river reach, one timestep at a time: a driver supplies fixed
//! channel geometry plus an upstream boundary series, and gets back the
//! downstream (flow, velocity, depth) state for every step. Each step's
//! output is the next step's previous state, so the loop is a strict
//! sequential recurrence.
//!
//! The routing physics sits behind the [`RoutingKernel`] trait and is
//! bound once before a run starts; [`MuskingumCunge`] is the production
//! implementation, built on the NWM routing step in [`mc_kernel`].

pub mod boundary;
pub mod config;
pub mod error;
pub mod io;
pub mod kernel;
pub mod mc_kernel;
pub mod routing;
pub mod state;

pub use boundary::{BoundarySeries, Pulse, StepChange};
pub use config::{SegmentGeometry, TimestepConfig};
pub use error::{KernelError, RouteError};
pub use kernel::{MuskingumCunge, RoutingKernel};
pub use routing::{RouteSeries, route_segment, route_segment_observed};
pub use state::{BoundaryInput, SegmentState};
