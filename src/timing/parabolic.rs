use crate::core::math::{Endpoint, PolynomialFit};
use crate::error::TimingError;
use crate::trajectory::geodesic::GeodesicTrajectory;
use crate::trajectory::spline::Spline;

/// Retimes a geometric path into the time-optimal trajectory that respects
/// per-axis velocity and acceleration limits.
///
/// Each waypoint interval becomes one synchronized multi-axis bang-bang
/// move: maximum acceleration, an optional cruise, maximum deceleration.
/// The slowest axis paces the interval and every other axis is slowed to
/// finish at the same instant, so all axes start and stop together with
/// zero velocity at every waypoint. The output spline starts at the input
/// path's first waypoint time; the input is never mutated.
///
/// The path's space must decompose into independent tangent axes
/// (Euclidean and `Rotation1D` leaves only).
pub fn compute_parabolic_timing(
    path: &GeodesicTrajectory,
    max_velocity: &[f64],
    max_acceleration: &[f64],
) -> Result<Spline, TimingError> {
    // --- Validation, before any numeric work ---
    let count = path.num_waypoints();
    if count < 2 {
        return Err(TimingError::TooFewWaypoints { count });
    }
    let space = path.space();
    let dimension = space.dimension();
    if max_velocity.len() != dimension {
        return Err(TimingError::DimensionMismatch {
            expected: dimension,
            actual: max_velocity.len(),
        });
    }
    if max_acceleration.len() != dimension {
        return Err(TimingError::DimensionMismatch {
            expected: dimension,
            actual: max_acceleration.len(),
        });
    }
    for (axis, &value) in max_velocity.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(TimingError::InvalidVelocityLimit { axis, value });
        }
    }
    for (axis, &value) in max_acceleration.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(TimingError::InvalidAccelerationLimit { axis, value });
        }
    }
    if !space.is_axis_separable() {
        return Err(TimingError::UnsupportedStateSpace);
    }

    let mut spline = Spline::new(space.clone(), path.waypoint(0).time);

    for interval in 0..count - 1 {
        let from = path.waypoint(interval);
        let to = path.waypoint(interval + 1);
        let delta = space.log_map(&from.state, &to.state);

        // 1. Minimum per-axis time under (vmax, amax). An axis that cannot
        //    reach vmax within its displacement runs a triangular profile,
        //    otherwise it cruises at vmax.
        let mut total: f64 = 0.0;
        let mut pacing = 0;
        for axis in 0..dimension {
            let distance = delta[axis].abs();
            let vmax = max_velocity[axis];
            let amax = max_acceleration[axis];
            let t = if distance < vmax * vmax / amax {
                2.0 * (distance / amax).sqrt()
            } else {
                distance / vmax + vmax / amax
            };
            if t > total {
                total = t;
                pacing = axis;
            }
        }

        if total <= 0.0 {
            // Coincident waypoints: zero displacement takes zero time.
            tracing::debug!(interval, "skipping zero-displacement interval");
            continue;
        }

        // 2. The pacing axis fixes the shared phase boundaries.
        let vmax = max_velocity[pacing];
        let amax = max_acceleration[pacing];
        let t_ramp = if delta[pacing].abs() < vmax * vmax / amax {
            total / 2.0
        } else {
            vmax / amax
        };
        let t_cruise = (total - 2.0 * t_ramp).max(0.0);
        let has_cruise = t_cruise > 0.0;

        tracing::debug!(
            interval,
            pacing_axis = pacing,
            duration = total,
            shape = if has_cruise { "trapezoidal" } else { "triangular" },
        );

        // 3. Rescale every axis onto the shared boundaries. The signed peak
        //    velocity v = delta / (T - t_ramp) consumes the displacement
        //    exactly; the ramp acceleration is v / t_ramp.
        let peak: Vec<f64> = delta.iter().map(|d| d / (total - t_ramp)).collect();
        let ramp: Vec<f64> = peak.iter().map(|v| v / t_ramp).collect();
        let zero = vec![0.0; dimension];

        // 4. One quadratic segment per phase, anchored at the interval
        //    start and composed forward across phase boundaries.
        let mut base = from.state.clone();

        let up = phase_fit(t_ramp, dimension, &zero, &ramp)?;
        spline.add_segment(up, t_ramp, base.clone())?;
        let ramp_shift: Vec<f64> = peak.iter().map(|v| 0.5 * v * t_ramp).collect();
        base = space.exp_map(&ramp_shift, &base);

        if has_cruise {
            let cruise = phase_fit(t_cruise, dimension, &peak, &zero)?;
            spline.add_segment(cruise, t_cruise, base.clone())?;
            let cruise_shift: Vec<f64> = peak.iter().map(|v| v * t_cruise).collect();
            base = space.exp_map(&cruise_shift, &base);
        }

        let down_ramp: Vec<f64> = ramp.iter().map(|a| -a).collect();
        let down = phase_fit(t_ramp, dimension, &peak, &down_ramp)?;
        spline.add_segment(down, t_ramp, base)?;
    }

    Ok(spline)
}

/// Fits the quadratic tangent-space law of one phase from its start
/// conditions: zero offset, the phase entry velocity, and a constant
/// acceleration.
fn phase_fit(
    duration: f64,
    dimension: usize,
    velocity: &[f64],
    acceleration: &[f64],
) -> Result<Vec<Vec<f64>>, TimingError> {
    let zero = vec![0.0; dimension];
    let mut fit = PolynomialFit::new(duration, 2, dimension);
    fit.constrain(Endpoint::Start, 0, &zero);
    fit.constrain(Endpoint::Start, 1, velocity);
    fit.constrain(Endpoint::Start, 2, acceleration);
    Ok(fit.solve()?)
}
