//! Sequencing of all requested solutions and their export.
//!
//! The multi-solution driver provides:
//! - Parallel solving with rayon, one [`Problem`] per solution
//! - Progress tracking for the run
//! - OFF export per solution, skipping files that cannot be written
//! - A JSON summary of residuals, mesh counts and output paths

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::{
    output,
    problem::Problem,
    result::{RunSummary, SolutionReport},
    settings::Settings,
    solution::{Mesh, Solution},
    symmetry::FaceSymmetry,
};

/// Name of the run summary written next to the meshes.
pub const SUMMARY_FILE: &str = "summary.json";

/// A solved solution awaiting export.
#[derive(Debug, Clone)]
pub struct SolvedMesh {
    pub solution: Solution,
    pub mesh: Option<Mesh>,
    pub report: SolutionReport,
}

/// All solutions of one run.
///
/// **Context**: The (6,0) and (7,0) truncations have several valid closings,
/// each of which needs its own construction and mesh. They are independent
/// once the face transforms exist.
///
/// **How it Works**: The face symmetry is built once and shared. Each
/// solution gets a fresh [`Problem`], which repeats any base construction the
/// closings have in common, so solving in parallel gives the same meshes as
/// solving in sequence.
#[derive(Debug)]
pub struct MultiProblem {
    pub settings: Settings,
    pub symmetry: Arc<FaceSymmetry>,
    pub solutions: Vec<Solution>,
    pub results: Vec<SolvedMesh>,
    started: DateTime<Local>,
    elapsed_seconds: f64,
}

impl MultiProblem {
    /// Creates a driver for the solutions selected by the settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let solutions = settings.solutions()?;
        Ok(Self {
            settings,
            symmetry: Arc::new(FaceSymmetry::new()),
            solutions,
            results: Vec::new(),
            started: Local::now(),
            elapsed_seconds: 0.0,
        })
    }

    /// Solves every selected solution.
    ///
    /// A solution whose construction fails is recorded with its error and
    /// skipped at export; the others are unaffected.
    pub fn solve(&mut self) {
        let start = Instant::now();
        self.started = Local::now();
        info!("Solving {} solutions...", self.solutions.len());

        let pb = ProgressBar::new(self.solutions.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {bar:40.green/blue} {pos:>3}/{len:3} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▇▆▅▄▃▂▁"),
        );
        pb.set_message("solution".to_string());

        let solve = |solution: &Solution| {
            let solved = self.solve_one(*solution);
            pb.inc(1);
            solved
        };

        self.results = if self.settings.parallel {
            self.solutions.par_iter().map(solve).collect()
        } else {
            self.solutions.iter().map(solve).collect()
        };

        pb.finish_and_clear();

        let duration = start.elapsed();
        self.elapsed_seconds = duration.as_secs_f64();
        info!(
            "Time taken: {:.2?}, Time per solution: {:.2?}",
            duration,
            duration / self.solutions.len().max(1) as u32
        );
    }

    /// Builds one solution in a fresh problem and collects its mesh.
    pub fn solve_one(&self, solution: Solution) -> SolvedMesh {
        let mut problem = Problem::from_settings(Arc::clone(&self.symmetry), &self.settings);

        let solved = problem
            .run(solution)
            .and_then(|result| Ok((problem.mesh(solution)?, result)));

        match solved {
            Ok((mesh, result)) => {
                if !result.converged() {
                    warn!(
                        "{} did not converge, largest residual {:e}",
                        solution,
                        result.max_residual()
                    );
                }
                let report = SolutionReport::new(&result, &mesh);
                SolvedMesh {
                    solution,
                    mesh: Some(mesh),
                    report,
                }
            }
            Err(err) => {
                error!("Failed to solve {}: {}", solution, err);
                SolvedMesh {
                    solution,
                    mesh: None,
                    report: SolutionReport::failed(solution, err.to_string()),
                }
            }
        }
    }

    /// Writes every mesh to `<stem>.off` in the output directory, then the
    /// summary if enabled.
    ///
    /// Meshes that cannot be written are reported and skipped; a summary that
    /// cannot be written is an error, returned after every mesh was tried.
    pub fn writeup(&mut self) -> Result<()> {
        if let Err(err) = output::ensure_dir(&self.settings.output_dir) {
            error!(
                "Could not create output directory {}: {}",
                self.settings.output_dir.display(),
                err
            );
        }

        for solved in self.results.iter_mut() {
            let Some(mesh) = &solved.mesh else {
                continue;
            };
            let path = self
                .settings
                .output_path(&format!("{}.off", solved.solution.stem()));
            match output::write_off(&path, mesh) {
                Ok(()) => {
                    println!("\tGeometry output: {}", path.display());
                    solved.report.output = Some(path);
                }
                Err(err) => {
                    error!("Skipping {}: {}", path.display(), err);
                    solved.report.error = Some(err.to_string());
                }
            }
        }

        if self.settings.summary {
            let reports = self.reports();
            let summary = RunSummary {
                timestamp: self.started,
                elapsed_seconds: self.elapsed_seconds,
                settings: &self.settings,
                solutions: &reports,
            };
            let path = self.settings.output_path(SUMMARY_FILE);
            output::write_json(&path, &summary)
                .with_context(|| format!("Failed to write summary {}", path.display()))?;
            info!("Summary written to {}", path.display());
        }

        Ok(())
    }

    pub fn reports(&self) -> Vec<SolutionReport> {
        self.results.iter().map(|s| s.report.clone()).collect()
    }
}
