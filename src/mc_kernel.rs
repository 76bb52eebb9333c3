//! Muskingum-Cunge routing step for a single trapezoidal reach with a
//! rectangular compound (floodplain) section, following the NWM Fortran
//! formulation. Depth is found with a secant iteration on the continuity
//! residual; the routed flow comes from the usual four-coefficient
//! Muskingum form with kinematic-wave K and X.

use crate::error::KernelError;

const MIN_DEPTH: f64 = 0.01;
const RELATIVE_TOLERANCE: f64 = 0.01;
const MAX_BRACKET_WIDENINGS: i32 = 4;

#[inline]
fn pow_2_3(x: f64) -> f64 {
    x.cbrt().powi(2)
}

#[inline]
fn pow_5_3(x: f64) -> f64 {
    x * pow_2_3(x)
}

/// Hydraulic properties of the cross-section at a trial depth.
struct Section {
    /// Water-surface top width of the trapezoid at this depth.
    twl: f64,
    /// In-channel flow area.
    area: f64,
    /// Overbank flow area.
    area_cc: f64,
    /// In-channel wetted perimeter.
    wp: f64,
    /// Overbank wetted perimeter.
    wp_cc: f64,
    /// Hydraulic radius of the full section.
    r: f64,
    /// Kinematic celerity.
    ck: f64,
    overbank: bool,
}

impl Section {
    #[allow(clippy::too_many_arguments)]
    fn at(h: f64, bfd: f64, z: f64, bw: f64, twcc: f64, n: f64, ncc: f64, s0: f64) -> Self {
        let twl = bw + 2.0 * z * h;
        let overbank = h > bfd && twcc > 0.0 && ncc > 0.0;

        let (area, area_cc, wp, wp_cc, r) = if overbank {
            let area = (bw + bfd * z) * bfd;
            let area_cc = twcc * (h - bfd);
            let wp = bw + 2.0 * bfd * (1.0 + z * z).sqrt();
            let wp_cc = twcc + 2.0 * (h - bfd);
            let r = (area + area_cc) / (wp + wp_cc);
            (area, area_cc, wp, wp_cc, r)
        } else {
            let area = (bw + h * z) * h;
            let wp = bw + 2.0 * h * (1.0 + z * z).sqrt();
            let r = if wp > 0.0 { area / wp } else { 0.0 };
            (area, 0.0, wp, 0.0, r)
        };

        let ck = if overbank {
            f64::max(
                0.0,
                ((s0.sqrt() / n)
                    * ((5.0 / 3.0) * pow_2_3(r)
                        - (2.0 / 3.0)
                            * pow_5_3(r)
                            * (2.0 * (1.0 + z * z).sqrt() / (bw + 2.0 * bfd * z)))
                    * area
                    + (s0.sqrt() / ncc) * (5.0 / 3.0) * pow_2_3(h - bfd) * area_cc)
                    / (area + area_cc),
            )
        } else if h > 0.0 {
            f64::max(
                0.0,
                (s0.sqrt() / n)
                    * ((5.0 / 3.0) * pow_2_3(r)
                        - (2.0 / 3.0)
                            * pow_5_3(r)
                            * (2.0 * (1.0 + z * z).sqrt() / (bw + 2.0 * h * z))),
            )
        } else {
            0.0
        };

        Section {
            twl,
            area,
            area_cc,
            wp,
            wp_cc,
            r,
            ck,
            overbank,
        }
    }

    /// Muskingum X weight, clamped to [floor, 0.5]. `ref_flow` is the
    /// current estimate of the routed flow at this bracket.
    fn weighting_x(&self, ref_flow: f64, floor: f64, twcc: f64, s0: f64, dx: f64) -> f64 {
        if self.ck <= 0.0 {
            return 0.5;
        }
        let width = if self.overbank { twcc } else { self.twl };
        (0.5 * (1.0 - ref_flow / (2.0 * width * s0 * self.ck * dx))).clamp(floor, 0.5)
    }

    /// Continuity residual: Muskingum flow minus Manning conveyance at
    /// this depth. Zero at the converged depth.
    fn residual(&self, muskingum_flow: f64, n: f64, ncc: f64, s0: f64) -> Option<f64> {
        let wp_total = self.wp + self.wp_cc;
        if wp_total <= 0.0 {
            return None;
        }
        let n_avg = (self.wp * n + self.wp_cc * ncc) / wp_total;
        Some(
            muskingum_flow
                - (1.0 / n_avg) * (self.area + self.area_cc) * pow_2_3(self.r) * s0.sqrt(),
        )
    }
}

/// Muskingum-Cunge coefficients for a cell travel time `km` and weight
/// `x`, shared by both secant brackets.
fn coefficients(km: f64, x: f64, dt: f64, qlat: f64) -> Result<(f64, f64, f64, f64), KernelError> {
    let d = km * (1.0 - x) + dt / 2.0;
    if d == 0.0 {
        return Err(KernelError::DegenerateCoefficients);
    }
    Ok((
        (km * x + dt / 2.0) / d,
        (dt / 2.0 - km * x) / d,
        (km * (1.0 - x) - dt / 2.0) / d,
        (qlat * dt) / d,
    ))
}

/// Advance one segment by one routing period.
///
/// Parameter order, names, and SI units are the compatibility contract
/// shared with other callers of this routing step: `qup`/`quc` are
/// upstream flow at the previous/current timestep, `qdp`/`velp`/`depthp`
/// are the segment's own previous-step flow/velocity/depth, and `qlat`
/// is lateral inflow. `velp` is accepted for call compatibility only;
/// `depthp` seeds the secant iteration. Returns the downstream
/// `(qdc, velc, depthc)` triple for the current timestep.
#[allow(clippy::too_many_arguments)]
pub fn advance(
    dt: f64,
    qup: f64,
    quc: f64,
    qdp: f64,
    qlat: f64,
    dx: f64,
    bw: f64,
    tw: f64,
    twcc: f64,
    n_manning: f64,
    n_manning_cc: f64,
    cs: f64,
    s0: f64,
    velp: f64,
    depthp: f64,
) -> Result<(f64, f64, f64), KernelError> {
    let _ = velp;
    let n = n_manning;
    let ncc = n_manning_cc;

    // Trapezoid side distance per unit depth.
    let z = if cs == 0.0 { 1.0 } else { 1.0 / cs };

    if n <= 0.0 || s0 <= 0.0 || z <= 0.0 || bw <= 0.0 {
        return Err(KernelError::InvalidChannel { n, s0, z, bw });
    }

    // Bankfull depth from the trapezoid widths.
    let bfd = if bw > tw {
        bw / 0.00001
    } else if bw == tw {
        bw / (2.0 * z)
    } else {
        (tw - bw) / (2.0 * z)
    };

    // Nothing to flux.
    if qlat <= 0.0 && qup <= 0.0 && quc <= 0.0 && qdp <= 0.0 {
        return Ok((0.0, 0.0, 0.0));
    }

    // Secant brackets seeded from the previous depth.
    let seed = f64::max(depthp, 0.0);
    let mut h = seed * 1.33 + MIN_DEPTH;
    let mut h_0 = seed * 0.67;

    let mut c1 = 0.0;
    let mut c2 = 0.0;
    let mut c3 = 0.0;
    let mut c4 = 0.0;
    let mut qj_0 = 0.0;
    let mut qj = 0.0;
    let mut rerror = 1.0;
    let mut aerror = 0.01;
    let mut maxiter = 100;
    let mut tries = 0;

    let qdc: f64;
    let velc: f64;
    let depthc: f64;

    'outer: loop {
        let mut iter = 0;

        while rerror > RELATIVE_TOLERANCE && aerror >= MIN_DEPTH && iter <= maxiter {
            // Lower bracket: X is weighted by the residual carried over
            // from the previous iteration.
            let lower = Section::at(h_0, bfd, z, bw, twcc, n, ncc, s0);
            let km = if lower.ck > 0.0 { dt.max(dx / lower.ck) } else { dt };
            let x = lower.weighting_x(qj_0, 0.0, twcc, s0, dx);
            let (l1, l2, l3, l4) = coefficients(km, x, dt, qlat)?;
            if let Some(res) = lower.residual(l1 * qup + l2 * quc + l3 * qdp + l4, n, ncc, s0) {
                qj_0 = res;
            }

            // Upper bracket: X is weighted by the flow estimate from the
            // lower bracket's coefficients.
            let upper = Section::at(h, bfd, z, bw, twcc, n, ncc, s0);
            let km = if upper.ck > 0.0 { dt.max(dx / upper.ck) } else { dt };
            let flow_ref = l1 * qup + l2 * quc + l3 * qdp + l4;
            let x = upper.weighting_x(flow_ref, 0.25, twcc, s0, dx);
            let (u1, u2, u3, mut u4) = coefficients(km, x, dt, qlat)?;

            // Channel loss cannot draw the reach below zero.
            if u4 < 0.0 && u4.abs() > u1 * qup + u2 * quc + u3 * qdp {
                u4 = -(u1 * qup + u2 * quc + u3 * qdp);
            }

            if let Some(res) = upper.residual(u1 * qup + u2 * quc + u3 * qdp + u4, n, ncc, s0) {
                qj = res;
            }

            c1 = u1;
            c2 = u2;
            c3 = u3;
            c4 = u4;

            // Secant update on depth.
            let h_1 = if qj_0 - qj != 0.0 {
                let candidate = h - qj * (h_0 - h) / (qj_0 - qj);
                if candidate < 0.0 { h } else { candidate }
            } else {
                h
            };

            if h > 0.0 {
                rerror = ((h_1 - h) / h).abs();
                aerror = (h_1 - h).abs();
            } else {
                rerror = 0.0;
                aerror = 0.9;
            }

            h_0 = f64::max(0.0, h);
            h = f64::max(0.0, h_1);
            iter += 1;

            if h < MIN_DEPTH {
                break;
            }
        }

        if iter >= maxiter {
            tries += 1;
            if tries <= MAX_BRACKET_WIDENINGS {
                h *= 1.33;
                h_0 *= 0.67;
                maxiter += 25;
                continue 'outer;
            }
            eprintln!(
                "Muskingum-Cunge warning: failed to converge (rerror={rerror}, iters={iter}, tries={tries})"
            );
        }

        let flow_sum = c1 * qup + c2 * quc + c3 * qdp + c4;
        qdc = if flow_sum < 0.0 {
            if c4 < 0.0 && c4.abs() > c1 * qup + c2 * quc + c3 * qdp {
                0.0
            } else {
                f64::max(c1 * qup + c2 * quc + c4, c1 * qup + c3 * qdp + c4)
            }
        } else {
            flow_sum
        };

        // Velocity from the simplified trapezoid hydraulic radius.
        let twl = bw + 2.0 * z * h;
        let r = (h * (bw + twl) / 2.0)
            / (bw + 2.0 * (((twl - bw) / 2.0).powi(2) + h * h).sqrt());
        velc = (1.0 / n) * pow_2_3(r) * s0.sqrt();
        depthc = h;

        break;
    }

    Ok((qdc, velc, depthc))
}
