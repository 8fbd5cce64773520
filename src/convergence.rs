//! One-dimensional root finder for construction residuals.
//!
//! Under-constrained constructions expose one free angle. A residual closure
//! rebuilds the dependent vertices for a trial angle and returns the signed
//! mismatch between two inclinations that must agree; the finder walks the
//! angle until that mismatch vanishes.
//!
//! The walk is a sign-tracking step search:
//! - keep stepping while the residual shrinks without changing sign
//! - step back and reverse when it grows
//! - step back, reverse and halve when it changes sign

use tracing::{debug, warn};

use crate::config::{DEFAULT_INITIAL_STEP, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::error::Result;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn linear_residual_converges() {
        let finder = RootFinder::default();
        let mut x = 0.0;
        let outcome = finder.solve(&mut x, |x| Ok(x - 0.1)).unwrap();
        assert!(outcome.is_converged());
        assert!(outcome.residual() <= DEFAULT_TOLERANCE);
        assert_abs_diff_eq!(x, 0.1, epsilon = 1e-10);
    }

    #[test]
    fn varied_seeds_and_slopes() {
        let finder = RootFinder::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let root: f64 = rng.random_range(-0.2..0.2);
            let offset: f64 = rng.random_range(-0.25..0.25);
            let magnitude: f64 = rng.random_range(0.5..3.0);
            let slope = if rng.random_bool(0.5) {
                magnitude
            } else {
                -magnitude
            };

            let mut x = root + offset;
            let outcome = finder.solve(&mut x, |x| Ok(slope * (x - root))).unwrap();
            assert!(
                outcome.is_converged(),
                "root {} offset {} slope {}: {:?}",
                root,
                offset,
                slope,
                outcome
            );
            assert!((slope * (x - root)).abs() <= DEFAULT_TOLERANCE);
        }
    }

    #[test]
    fn seed_already_at_root() {
        let finder = RootFinder::default();
        let mut x = 0.3;
        let outcome = finder.solve(&mut x, |x| Ok(x - 0.3)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Converged {
                residual: 0.0,
                iterations: 1
            }
        );
        assert_eq!(x, 0.3);
    }

    #[test]
    fn cap_is_reported_as_exhausted() {
        let finder = RootFinder {
            max_iterations: 10,
            ..RootFinder::default()
        };
        let mut x = 0.0;
        let mut calls = 0;
        // no root: the residual never drops below 1
        let outcome = finder
            .solve(&mut x, |x| {
                calls += 1;
                Ok(1.0 + x * x)
            })
            .unwrap();
        assert!(!outcome.is_converged());
        assert_eq!(outcome.iterations(), 10);
        assert_eq!(calls, 10);
        assert!(outcome.residual() >= 1.0);
    }

    #[test]
    fn residual_errors_propagate() {
        use crate::error::SolveError;
        use crate::symmetry::Sector;
        use crate::vertex::VertexId;

        let finder = RootFinder::default();
        let mut x = 0.0;
        let result = finder.solve(&mut x, |_| {
            Err(SolveError::Unpopulated {
                vertex: VertexId::V0,
                sector: Sector::S0,
            })
        });
        assert!(result.is_err());
    }

    #[test]
    fn step_is_converted_from_degrees() {
        let finder = RootFinder::new(1e-9, 50, 2.0);
        assert_abs_diff_eq!(finder.initial_step, 2f64.to_radians());
    }
}

/// Result of one root find.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The residual fell within tolerance.
    Converged { residual: f64, iterations: usize },
    /// The iteration cap was reached; the seed holds the last trial value.
    Exhausted { residual: f64, iterations: usize },
}

impl Outcome {
    /// Absolute residual at exit.
    pub fn residual(&self) -> f64 {
        match self {
            Outcome::Converged { residual, .. } | Outcome::Exhausted { residual, .. } => *residual,
        }
    }

    pub fn iterations(&self) -> usize {
        match self {
            Outcome::Converged { iterations, .. } | Outcome::Exhausted { iterations, .. } => {
                *iterations
            }
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, Outcome::Converged { .. })
    }
}

/// Parameters of the step search. Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFinder {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub initial_step: f64,
}

impl RootFinder {
    /// Creates a finder. `initial_step` is given in degrees.
    pub fn new(tolerance: f64, max_iterations: usize, initial_step: f64) -> Self {
        Self {
            tolerance,
            max_iterations,
            initial_step: initial_step.to_radians(),
        }
    }

    /// Drives `residual` towards zero by adjusting `seed` in place.
    ///
    /// **Context**: The residual closure usually rebuilds part of a vertex
    /// table for each trial value, so it is `FnMut` and the seed is the only
    /// output besides the table the closure mutates.
    ///
    /// **How it Works**: Each iteration evaluates the residual at `seed` and
    /// stops once its magnitude is within tolerance. Otherwise the residual
    /// is compared with the previous one:
    /// - same sign, smaller magnitude: take another step
    /// - same sign, larger magnitude: undo the step and reverse direction
    /// - sign change: undo the step, reverse and halve the step
    ///
    /// Hitting the iteration cap is not an error: it is logged and returned as
    /// [`Outcome::Exhausted`] with the last seed left in place. Errors from the
    /// closure are propagated.
    pub fn solve<F>(&self, seed: &mut f64, mut residual: F) -> Result<Outcome>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        let mut delta = self.initial_step;
        let mut last: Option<f64> = None;
        let mut iterations = 0;

        loop {
            iterations += 1;
            let diff = residual(*seed)?;

            if diff.abs() <= self.tolerance {
                debug!(
                    "root found after {} iterations: seed {:.12}, residual {:e}",
                    iterations, seed, diff
                );
                return Ok(Outcome::Converged {
                    residual: diff.abs(),
                    iterations,
                });
            }

            if iterations >= self.max_iterations {
                warn!(
                    "root finder exceeded {} iterations, current residual {:.10}",
                    self.max_iterations, diff
                );
                return Ok(Outcome::Exhausted {
                    residual: diff.abs(),
                    iterations,
                });
            }

            match last {
                Some(prev) if diff.signum() == prev.signum() => {
                    if diff.abs() >= prev.abs() {
                        *seed -= delta;
                        delta = -delta;
                    }
                    *seed += delta;
                }
                Some(_) => {
                    *seed -= delta;
                    delta /= -2.0;
                    *seed += delta;
                }
                None => *seed += delta,
            }

            last = Some(diff);
        }
    }
}

impl Default for RootFinder {
    fn default() -> Self {
        Self::new(
            DEFAULT_TOLERANCE,
            DEFAULT_MAX_ITERATIONS,
            DEFAULT_INITIAL_STEP,
        )
    }
}
