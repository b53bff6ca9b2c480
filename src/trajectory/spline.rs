use std::sync::Arc;

use crate::core::geometry::{State, StateSpace};
use crate::core::math::polyfit::{Endpoint, PolynomialFit, falling_factorial};
use crate::error::SplineError;

/// One polynomial piece: `p(s), s in [0, duration]`, expressed in the
/// tangent space at `base`. The absolute state at `s` is
/// `exp_map(p(s), base)`.
#[derive(Debug, Clone)]
struct Segment {
    /// One row per tangent axis, ascending powers of `s`.
    coefficients: Vec<Vec<f64>>,
    duration: f64,
    base: State,
}

/// A time-stamped tangent-space sample used to build a spline from a
/// discrete path.
#[derive(Debug, Clone)]
pub struct Knot {
    pub time: f64,
    pub coordinates: Vec<f64>,
}

/// A piecewise-polynomial trajectory: contiguous time-stamped segments,
/// each anchored to a base state on the owning space.
///
/// Position queries compose the local polynomial onto the segment base via
/// the exponential map; derivative queries stay in the tangent space.
#[derive(Debug, Clone)]
pub struct Spline {
    space: Arc<StateSpace>,
    start_time: f64,
    segments: Vec<Segment>,
    /// Cumulative end offsets relative to `start_time`, one per segment.
    /// Kept incrementally so evaluation is a binary search, not a rescan.
    ends: Vec<f64>,
}

impl Spline {
    pub fn new(space: Arc<StateSpace>, start_time: f64) -> Self {
        Self {
            space,
            start_time,
            segments: Vec::new(),
            ends: Vec::new(),
        }
    }

    pub fn space(&self) -> &Arc<StateSpace> {
        &self.space
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Sum of all segment durations.
    pub fn duration(&self) -> f64 {
        self.ends.last().copied().unwrap_or(0.0)
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration()
    }

    /// Highest derivative order the stored polynomials support (the
    /// maximum segment degree). Derivatives above this order evaluate to
    /// the zero tangent.
    pub fn num_derivatives(&self) -> usize {
        self.segments
            .iter()
            .flat_map(|segment| segment.coefficients.iter())
            .map(|row| row.len().saturating_sub(1))
            .max()
            .unwrap_or(0)
    }

    /// Appends a segment. The coefficient matrix needs one row per tangent
    /// axis and the duration must be positive and finite.
    pub fn add_segment(
        &mut self,
        coefficients: Vec<Vec<f64>>,
        duration: f64,
        base: State,
    ) -> Result<(), SplineError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SplineError::BadDuration { duration });
        }
        let dimension = self.space.dimension();
        if coefficients.len() != dimension {
            return Err(SplineError::DimensionMismatch {
                expected: dimension,
                actual: coefficients.len(),
            });
        }
        self.ends.push(self.duration() + duration);
        self.segments.push(Segment {
            coefficients,
            duration,
            base,
        });
        Ok(())
    }

    /// Absolute state at `time`: evaluates the owning segment's polynomial
    /// and composes the result onto the segment base.
    pub fn evaluate(&self, time: f64) -> Result<State, SplineError> {
        let (index, s) = self.locate(time)?;
        let segment = &self.segments[index];
        let displacement: Vec<f64> = segment
            .coefficients
            .iter()
            .map(|row| eval_polynomial(row, s))
            .collect();
        Ok(self.space.exp_map(&displacement, &segment.base))
    }

    /// Tangent-space derivative of the given order at `time`.
    ///
    /// Order 1 is velocity, order 2 acceleration; orders above the stored
    /// degree are zero. Order 0 returns the local displacement from the
    /// owning segment's base, not an absolute state — use [`evaluate`]
    /// for positions.
    ///
    /// [`evaluate`]: Self::evaluate
    pub fn evaluate_derivative(&self, time: f64, order: usize) -> Result<Vec<f64>, SplineError> {
        let (index, s) = self.locate(time)?;
        let segment = &self.segments[index];
        Ok(segment
            .coefficients
            .iter()
            .map(|row| eval_polynomial_derivative(row, s, order))
            .collect())
    }

    /// Builds a spline from time-stamped tangent coordinates: one linear
    /// segment per knot interval, each anchored at the exp-mapped knot.
    pub fn from_knots(space: Arc<StateSpace>, knots: &[Knot]) -> Result<Self, SplineError> {
        if knots.len() < 2 {
            return Err(SplineError::Empty);
        }
        let dimension = space.dimension();
        for knot in knots {
            if knot.coordinates.len() != dimension {
                return Err(SplineError::DimensionMismatch {
                    expected: dimension,
                    actual: knot.coordinates.len(),
                });
            }
        }

        let identity = space.identity();
        let zero = vec![0.0; dimension];
        let mut spline = Spline::new(space.clone(), knots[0].time);
        for pair in knots.windows(2) {
            let duration = pair[1].time - pair[0].time;
            if !duration.is_finite() || duration <= 0.0 {
                return Err(SplineError::BadDuration { duration });
            }
            let delta: Vec<f64> = pair[1]
                .coordinates
                .iter()
                .zip(&pair[0].coordinates)
                .map(|(next, current)| next - current)
                .collect();

            let mut fit = PolynomialFit::new(duration, 1, dimension);
            fit.constrain(Endpoint::Start, 0, &zero);
            fit.constrain(Endpoint::End, 0, &delta);
            let coefficients = fit.solve()?;

            let base = space.exp_map(&pair[0].coordinates, &identity);
            spline.add_segment(coefficients, duration, base)?;
        }
        Ok(spline)
    }

    /// Maps `time` to (segment index, local offset). Ties at interior
    /// segment boundaries resolve to the later segment.
    fn locate(&self, time: f64) -> Result<(usize, f64), SplineError> {
        let total = match self.ends.last() {
            Some(&total) => total,
            None => return Err(SplineError::Empty),
        };
        let offset = time - self.start_time;
        if !(offset >= 0.0 && offset <= total) {
            return Err(SplineError::OutOfDomain {
                time,
                start: self.start_time,
                end: self.start_time + total,
            });
        }
        let index = self
            .ends
            .partition_point(|&end| end <= offset)
            .min(self.segments.len() - 1);
        let segment_start = if index == 0 { 0.0 } else { self.ends[index - 1] };
        // Clamp away the rounding spill at the very end of the last segment.
        let s = (offset - segment_start).min(self.segments[index].duration);
        Ok((index, s))
    }
}

fn eval_polynomial(coefficients: &[f64], s: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |sum, &c| sum * s + c)
}

fn eval_polynomial_derivative(coefficients: &[f64], s: f64, order: usize) -> f64 {
    let mut sum = 0.0;
    for (power, &c) in coefficients.iter().enumerate().skip(order) {
        sum += c * falling_factorial(power, order) * s.powi((power - order) as i32);
    }
    sum
}
