use crate::error::RouteError;

/// Channel geometry and roughness for one routed segment.
///
/// Field names follow the NWM channel parameter convention so they line
/// up one-to-one with the routing kernel's call contract. A trapezoidal
/// main channel sits inside a rectangular compound (floodplain) section:
/// flow above bankfull depth spills into the `twcc`/`ncc` section.
///
/// All lengths are meters, slopes are fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentGeometry {
    /// Bottom width.
    pub bw: f64,
    /// Top width at bankfull.
    pub tw: f64,
    /// Top width of the compound (floodplain) section.
    pub twcc: f64,
    /// Channel side slope.
    pub cs: f64,
    /// Manning roughness of the main channel.
    pub n: f64,
    /// Manning roughness of the compound section.
    pub ncc: f64,
    /// Bed slope.
    pub s0: f64,
    /// Segment length.
    pub dx: f64,
}

impl SegmentGeometry {
    /// Build a validated geometry. Rejects anything the routing kernel
    /// cannot handle, so a run never discovers a bad channel mid-loop.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bw: f64,
        tw: f64,
        twcc: f64,
        cs: f64,
        n: f64,
        ncc: f64,
        s0: f64,
        dx: f64,
    ) -> Result<Self, RouteError> {
        let geometry = SegmentGeometry {
            bw,
            tw,
            twcc,
            cs,
            n,
            ncc,
            s0,
            dx,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    fn validate(&self) -> Result<(), RouteError> {
        let fields = [
            self.bw, self.tw, self.twcc, self.cs, self.n, self.ncc, self.s0, self.dx,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(RouteError::Geometry(format!(
                "non-finite field in {self:?}"
            )));
        }
        if self.bw <= 0.0 {
            return Err(RouteError::Geometry(format!(
                "bottom width must be positive, got bw={}",
                self.bw
            )));
        }
        if self.tw < self.bw {
            return Err(RouteError::Geometry(format!(
                "bankfull top width must be at least the bottom width, got tw={} < bw={}",
                self.tw, self.bw
            )));
        }
        if self.twcc < self.tw {
            return Err(RouteError::Geometry(format!(
                "floodplain top width must be at least the bankfull top width, got twcc={} < tw={}",
                self.twcc, self.tw
            )));
        }
        if self.cs < 0.0 {
            return Err(RouteError::Geometry(format!(
                "side slope must be non-negative, got cs={}",
                self.cs
            )));
        }
        if self.n <= 0.0 || self.ncc <= 0.0 {
            return Err(RouteError::Geometry(format!(
                "Manning roughness must be positive, got n={}, ncc={}",
                self.n, self.ncc
            )));
        }
        if self.s0 <= 0.0 {
            return Err(RouteError::Geometry(format!(
                "bed slope must be positive, got s0={}",
                self.s0
            )));
        }
        if self.dx <= 0.0 {
            return Err(RouteError::Geometry(format!(
                "segment length must be positive, got dx={}",
                self.dx
            )));
        }
        Ok(())
    }
}

/// Fixed timestep duration and step count for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimestepConfig {
    /// Routing period in seconds, constant across a run.
    pub dt: f64,
    /// Number of steps. Zero is a valid (empty) run.
    pub tsteps: usize,
}

impl TimestepConfig {
    pub fn new(dt: f64, tsteps: usize) -> Result<Self, RouteError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(RouteError::Timestep(format!(
                "timestep must be positive and finite, got dt={dt}"
            )));
        }
        Ok(TimestepConfig { dt, tsteps })
    }
}
