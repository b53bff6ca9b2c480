use thiserror::Error;

/// Errors raised while building or querying a geodesic waypoint path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("waypoint time {time} is not after the last waypoint time {last}")]
    NonMonotonicTime { time: f64, last: f64 },

    #[error("waypoint time {time} is not finite")]
    NonFiniteTime { time: f64 },

    #[error("trajectory has {count} waypoints, interpolation needs at least 2")]
    TooFewWaypoints { count: usize },

    #[error("time {time} is outside the trajectory domain [{start}, {end}]")]
    OutOfDomain { time: f64, start: f64, end: f64 },
}

/// Errors raised by the boundary-constrained polynomial fit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("fit of degree {degree} needs exactly {expected} constraints, got {actual}")]
    ConstraintCount {
        degree: usize,
        expected: usize,
        actual: usize,
    },

    #[error("constraint value has {actual} components, fit dimension is {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("constraints are linearly dependent, system has no unique solution")]
    SingularSystem,
}

/// Errors raised while building or evaluating a piecewise-polynomial spline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("segment duration {duration} must be positive and finite")]
    BadDuration { duration: f64 },

    #[error("coefficient matrix has {actual} rows, state space dimension is {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("spline has no segments")]
    Empty,

    #[error("time {time} is outside the spline domain [{start}, {end}]")]
    OutOfDomain { time: f64, start: f64, end: f64 },

    #[error(transparent)]
    Fit(#[from] FitError),
}

/// Errors raised by the parabolic retiming entry point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimingError {
    #[error("input path has {count} waypoints, retiming needs at least 2")]
    TooFewWaypoints { count: usize },

    #[error("limit vector has {actual} components, state space dimension is {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("velocity limit for axis {axis} is {value}, limits must be positive")]
    InvalidVelocityLimit { axis: usize, value: f64 },

    #[error("acceleration limit for axis {axis} is {value}, limits must be positive")]
    InvalidAccelerationLimit { axis: usize, value: f64 },

    #[error("state space contains a leaf that is not Euclidean or Rotation1D")]
    UnsupportedStateSpace,

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    Spline(#[from] SplineError),
}
