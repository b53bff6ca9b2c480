use crate::error::FitError;

/// Which end of the fit domain `[0, duration]` a constraint anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

struct Constraint {
    endpoint: Endpoint,
    derivative: usize,
    value: Vec<f64>,
}

/// Solves for piecewise-polynomial coefficients from boundary constraints.
///
/// One scalar polynomial per dimension, all sharing the domain
/// `[0, duration]` and the same constraint structure. Each constraint pins
/// the `derivative`-th derivative at one endpoint to a vector in `R^dim`;
/// a degree-`k` fit needs exactly `k + 1` constraints for a unique
/// solution.
///
/// The per-dimension systems share one left-hand side, so the dense solve
/// factors it once and back-substitutes a right-hand column per dimension.
pub struct PolynomialFit {
    duration: f64,
    degree: usize,
    dimension: usize,
    constraints: Vec<Constraint>,
}

impl PolynomialFit {
    pub fn new(duration: f64, degree: usize, dimension: usize) -> Self {
        Self {
            duration,
            degree,
            dimension,
            constraints: Vec::with_capacity(degree + 1),
        }
    }

    /// Adds the constraint "the `derivative`-th derivative at `endpoint`
    /// equals `value`".
    pub fn constrain(&mut self, endpoint: Endpoint, derivative: usize, value: &[f64]) {
        self.constraints.push(Constraint {
            endpoint,
            derivative,
            value: value.to_vec(),
        });
    }

    /// Solves for the coefficient matrix: one row per dimension, ascending
    /// powers of the local time `s`.
    pub fn solve(&self) -> Result<Vec<Vec<f64>>, FitError> {
        let n = self.degree + 1;
        if self.constraints.len() != n {
            return Err(FitError::ConstraintCount {
                degree: self.degree,
                expected: n,
                actual: self.constraints.len(),
            });
        }
        for constraint in &self.constraints {
            if constraint.value.len() != self.dimension {
                return Err(FitError::DimensionMismatch {
                    expected: self.dimension,
                    actual: constraint.value.len(),
                });
            }
        }

        // Augmented system [A | B]: row r encodes the r-th constraint,
        // column j the monomial s^j, B one column per dimension.
        let mut rows = vec![vec![0.0; n + self.dimension]; n];
        for (row, constraint) in rows.iter_mut().zip(&self.constraints) {
            let s = match constraint.endpoint {
                Endpoint::Start => 0.0,
                Endpoint::End => self.duration,
            };
            let k = constraint.derivative;
            for j in k..n {
                // d^k/ds^k s^j = j * (j-1) * ... * (j-k+1) * s^(j-k)
                row[j] = falling_factorial(j, k) * s.powi((j - k) as i32);
            }
            row[n..].copy_from_slice(&constraint.value);
        }

        gaussian_eliminate(&mut rows, n)?;

        // Back substitution, one right-hand column per dimension.
        let mut coefficients = vec![vec![0.0; n]; self.dimension];
        for dim in 0..self.dimension {
            for j in (0..n).rev() {
                let mut sum = rows[j][n + dim];
                for jj in (j + 1)..n {
                    sum -= rows[j][jj] * coefficients[dim][jj];
                }
                coefficients[dim][j] = sum / rows[j][j];
            }
        }
        Ok(coefficients)
    }
}

pub(crate) fn falling_factorial(j: usize, k: usize) -> f64 {
    let mut product = 1.0;
    for i in 0..k {
        product *= (j - i) as f64;
    }
    product
}

/// Forward elimination with partial pivoting over the first `n` columns of
/// the augmented rows. Leaves the system upper-triangular.
fn gaussian_eliminate(rows: &mut [Vec<f64>], n: usize) -> Result<(), FitError> {
    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| {
                rows[a][col]
                    .abs()
                    .partial_cmp(&rows[b][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if rows[pivot_row][col].abs() < 1e-12 {
            return Err(FitError::SingularSystem);
        }
        rows.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = rows[row][col] / rows[col][col];
            if factor == 0.0 {
                continue;
            }
            let (upper, lower) = rows.split_at_mut(row);
            let pivot = &upper[col];
            for j in col..pivot.len() {
                lower[0][j] -= factor * pivot[j];
            }
        }
    }
    Ok(())
}
