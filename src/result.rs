use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    convergence::Outcome,
    settings::Settings,
    solution::{Mesh, Solution},
};

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn root(outcome: Outcome) -> RootSolve {
        RootSolve {
            label: "test",
            seed: 0.1,
            outcome,
        }
    }

    #[test]
    fn converged_needs_every_root() {
        let ok = Outcome::Converged {
            residual: 1e-12,
            iterations: 40,
        };
        let cap = Outcome::Exhausted {
            residual: 1e-3,
            iterations: 200,
        };
        let result = SolveResult {
            solution: Solution::Icosa70B,
            roots: vec![root(ok), root(ok)],
        };
        assert!(result.converged());
        assert_eq!(result.max_residual(), 1e-12);

        let result = SolveResult {
            solution: Solution::Icosa70B,
            roots: vec![root(ok), root(cap)],
        };
        assert!(!result.converged());
        assert_eq!(result.max_residual(), 1e-3);
    }

    #[test]
    fn report_json_shape() {
        let result = SolveResult {
            solution: Solution::Icosa50,
            roots: vec![root(Outcome::Converged {
                residual: 0.0,
                iterations: 3,
            })],
        };
        let mesh = Mesh {
            vertices: vec![Point3::new(0.0, 0.0, 1.0)],
            faces: vec![],
        };
        let report = SolutionReport::new(&result, &mesh);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stem"], "icosa50");
        assert_eq!(json["frequency"], "(5,0)");
        assert_eq!(json["vertices"], 1);
        assert_eq!(json["roots"][0]["outcome"]["status"], "converged");
        assert!(json["output"].is_null());
    }
}

/// One root find performed while building a solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RootSolve {
    pub label: &'static str,
    /// Final value of the free angle, in radians.
    pub seed: f64,
    pub outcome: Outcome,
}

impl RootSolve {
    pub fn seed_degrees(&self) -> f64 {
        self.seed.to_degrees()
    }
}

/// Outcome of [`Problem::run`](crate::problem::Problem::run).
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub solution: Solution,
    pub roots: Vec<RootSolve>,
}

impl SolveResult {
    /// True when every root find met its tolerance. Solutions without a
    /// free angle are always converged.
    pub fn converged(&self) -> bool {
        self.roots.iter().all(|r| r.outcome.is_converged())
    }

    pub fn max_residual(&self) -> f64 {
        self.roots
            .iter()
            .map(|r| r.outcome.residual())
            .fold(0.0, f64::max)
    }
}

/// Per-solution entry of the run summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionReport {
    pub stem: &'static str,
    pub frequency: String,
    pub variant: Option<char>,
    pub roots: Vec<RootSolve>,
    pub vertices: usize,
    pub faces: usize,
    pub max_radius_error: f64,
    /// Path of the written mesh, once exported.
    pub output: Option<PathBuf>,
    /// Why the solution could not be solved or exported.
    pub error: Option<String>,
}

impl SolutionReport {
    pub fn new(result: &SolveResult, mesh: &Mesh) -> Self {
        Self {
            roots: result.roots.clone(),
            vertices: mesh.vertices.len(),
            faces: mesh.faces.len(),
            max_radius_error: mesh.max_radius_error(),
            ..Self::empty(result.solution)
        }
    }

    pub fn failed(solution: Solution, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::empty(solution)
        }
    }

    fn empty(solution: Solution) -> Self {
        Self {
            stem: solution.stem(),
            frequency: solution.frequency().to_string(),
            variant: solution.variant(),
            roots: vec![],
            vertices: 0,
            faces: 0,
            max_radius_error: 0.0,
            output: None,
            error: None,
        }
    }
}

/// Contents of `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<'a> {
    pub timestamp: DateTime<Local>,
    pub elapsed_seconds: f64,
    pub settings: &'a Settings,
    pub solutions: &'a [SolutionReport],
}
