use std::sync::Arc;

use crate::core::geometry::{State, StateSpace};
use crate::error::TrajectoryError;

/// A time-stamped state on a geodesic path.
#[derive(Debug, Clone)]
pub struct Waypoint {
    pub time: f64,
    pub state: State,
}

/// An ordered sequence of waypoints with strictly increasing times,
/// connected by geodesic interpolation on the owning state space.
///
/// The trajectory is purely geometric: waypoint times order the path and
/// parameterize interpolation, but carry no dynamics. Retiming consumes
/// this type read-only and produces an independent spline.
#[derive(Debug, Clone)]
pub struct GeodesicTrajectory {
    space: Arc<StateSpace>,
    waypoints: Vec<Waypoint>,
}

impl GeodesicTrajectory {
    pub fn new(space: Arc<StateSpace>) -> Self {
        Self {
            space,
            waypoints: Vec::new(),
        }
    }

    pub fn space(&self) -> &Arc<StateSpace> {
        &self.space
    }

    pub fn num_waypoints(&self) -> usize {
        self.waypoints.len()
    }

    /// Indexed waypoint access.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn waypoint(&self, index: usize) -> &Waypoint {
        &self.waypoints[index]
    }

    pub fn start_time(&self) -> Option<f64> {
        self.waypoints.first().map(|w| w.time)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.waypoints.last().map(|w| w.time)
    }

    /// Appends a waypoint. `time` must be finite and strictly greater than
    /// the last stored waypoint's time; an empty trajectory accepts any
    /// finite time.
    pub fn add_waypoint(&mut self, time: f64, state: State) -> Result<(), TrajectoryError> {
        if !time.is_finite() {
            return Err(TrajectoryError::NonFiniteTime { time });
        }
        if let Some(last) = self.waypoints.last()
            && time <= last.time
        {
            return Err(TrajectoryError::NonMonotonicTime {
                time,
                last: last.time,
            });
        }
        self.waypoints.push(Waypoint { time, state });
        Ok(())
    }

    /// Geodesic interpolation at `time`.
    ///
    /// Locates the bracketing waypoints `(t0, s0), (t1, s1)`, takes the
    /// tangent `v = log(s0, s1)`, and returns
    /// `exp(v * (time - t0) / (t1 - t0), s0)`.
    pub fn interpolate(&self, time: f64) -> Result<State, TrajectoryError> {
        if self.waypoints.len() < 2 {
            return Err(TrajectoryError::TooFewWaypoints {
                count: self.waypoints.len(),
            });
        }
        let start = self.waypoints[0].time;
        let end = self.waypoints[self.waypoints.len() - 1].time;
        if !(start..=end).contains(&time) {
            return Err(TrajectoryError::OutOfDomain { time, start, end });
        }

        let upper = self
            .waypoints
            .partition_point(|w| w.time < time)
            .clamp(1, self.waypoints.len() - 1);
        let (w0, w1) = (&self.waypoints[upper - 1], &self.waypoints[upper]);

        let tangent = self.space.log_map(&w0.state, &w1.state);
        let alpha = (time - w0.time) / (w1.time - w0.time);
        let scaled: Vec<f64> = tangent.iter().map(|v| v * alpha).collect();
        Ok(self.space.exp_map(&scaled, &w0.state))
    }
}
