//! kinema: configuration-manifold motion core
//!
//! - `core::geometry`: state spaces (Euclidean bundles, rotation groups,
//!   Cartesian products) with exponential/logarithm maps
//! - `core::math`: boundary-constrained polynomial fitting
//! - `trajectory`: geodesic waypoint paths and piecewise-polynomial splines
//! - `timing`: time-optimal parabolic retiming under per-axis limits

pub mod core {
    pub mod geometry;
    pub mod math;
}

pub mod trajectory {
    pub mod geodesic;
    pub mod spline;

    pub use geodesic::{GeodesicTrajectory, Waypoint};
    pub use spline::{Knot, Spline};
}

pub mod timing {
    pub mod parabolic;

    pub use parabolic::compute_parabolic_timing;
}

pub mod error;
