use anyhow::{anyhow, bail, ensure, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{DEFAULT_INITIAL_STEP, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::convergence::RootFinder;
use crate::solution::{Frequency, Solution};

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Settings {
        Settings {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_step: DEFAULT_INITIAL_STEP,
            output_dir: PathBuf::from("."),
            frequencies: vec![2, 3, 4, 5, 6, 7],
            parallel: true,
            summary: true,
        }
    }

    #[test]
    fn default_file_loads() {
        let settings = load_default_config().unwrap();
        assert_eq!(settings.tolerance, 1e-11);
        assert_eq!(settings.max_iterations, 200);
        assert_eq!(settings.initial_step, 0.5);
        assert_eq!(settings.frequencies, vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn solutions_follow_frequencies() {
        let mut settings = defaults();
        settings.frequencies = vec![7, 2];
        let solutions = settings.solutions().unwrap();
        assert_eq!(
            solutions,
            vec![
                Solution::Icosa70A,
                Solution::Icosa70B,
                Solution::Icosa70C,
                Solution::Icosa20
            ]
        );
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert!(validate_config(&defaults()).is_ok());

        let mut s = defaults();
        s.tolerance = 0.0;
        assert!(validate_config(&s).is_err());

        let mut s = defaults();
        s.max_iterations = 0;
        assert!(validate_config(&s).is_err());

        let mut s = defaults();
        s.initial_step = -1.0;
        assert!(validate_config(&s).is_err());

        let mut s = defaults();
        s.frequencies = vec![3, 8];
        assert!(validate_config(&s).is_err());

        let mut s = defaults();
        s.frequencies = vec![];
        assert!(validate_config(&s).is_err());
    }

    #[test]
    fn cli_overrides() {
        let args = CliArgs::try_parse_from([
            "icosa",
            "--tolerance",
            "1e-9",
            "-f",
            "5",
            "6",
            "-o",
            "meshes",
            "--serial",
            "--no-summary",
        ])
        .unwrap();
        let mut settings = defaults();
        args.apply(&mut settings);
        assert_eq!(settings.tolerance, 1e-9);
        assert_eq!(settings.frequencies, vec![5, 6]);
        assert_eq!(settings.output_dir, PathBuf::from("meshes"));
        assert!(!settings.parallel);
        assert!(!settings.summary);
        assert_eq!(settings.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn display_lists_every_setting() {
        let text = defaults().to_string();
        assert!(text.starts_with("Settings:\n"));
        assert!(text.contains("  - Tolerance: 1e-11\n"));
        assert!(text.contains("  - Max Iterations: 200\n"));
        assert!(text.contains("  - Initial Step: 0.500°\n"));
        assert!(text.contains("  - Output Directory: .\n"));
        assert!(text.contains("  - Frequencies: [2, 3, 4, 5, 6, 7]\n"));
        assert!(text.contains("  - Parallel: true\n"));
        assert!(text.contains("  - Summary: true\n"));
    }

    #[test]
    fn root_finder_uses_radians() {
        let finder = defaults().root_finder();
        assert_eq!(finder.max_iterations, 200);
        assert!((finder.initial_step - 0.5f64.to_radians()).abs() < 1e-15);
    }
}

/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    /// Residual tolerance of every root find, in radians.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Residual evaluations allowed per root find.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// First step of the root finder, in degrees.
    #[serde(default = "default_initial_step")]
    pub initial_step: f64,
    /// Directory receiving the OFF files and the summary.
    pub output_dir: PathBuf,
    /// Frequencies b of the (b,0) truncations to solve.
    pub frequencies: Vec<u8>,
    /// Solve independent solutions on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
    /// Write `summary.json` after the run.
    #[serde(default)]
    pub summary: bool,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_initial_step() -> f64 {
    DEFAULT_INITIAL_STEP
}

impl Settings {
    pub fn root_finder(&self) -> RootFinder {
        RootFinder::new(self.tolerance, self.max_iterations, self.initial_step)
    }

    /// All solutions of the configured frequencies, in the configured order.
    pub fn solutions(&self) -> Result<Vec<Solution>> {
        let mut solutions = Vec::new();
        for &b in &self.frequencies {
            let frequency = Frequency::try_from(b).map_err(|e| anyhow!(e))?;
            solutions.extend_from_slice(frequency.solutions());
        }
        Ok(solutions)
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("Error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads settings from the configuration files, the environment and the
/// command line, in increasing order of precedence.
pub fn load_config() -> Result<Settings> {
    load_config_with_args(CliArgs::parse())
}

pub fn load_config_with_args(args: CliArgs) -> Result<Settings> {
    let root = retrieve_project_root()?;

    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    let mut builder =
        Config::builder().add_source(File::from(default_config_file.clone()).required(true));

    if local_config.exists() {
        info!("Using local configuration: {:?}", local_config);
        builder = builder.add_source(File::from(local_config).required(true));
    } else {
        info!("Using default configuration: {:?}", default_config_file);
    }

    let settings = builder
        .add_source(
            Environment::with_prefix("icosa")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("frequencies"),
        )
        .build()
        .context("Error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    args.apply(&mut config);

    validate_config(&config)?;

    debug!(
        "effective settings:\n{}",
        toml::to_string_pretty(&config).unwrap_or_default()
    );

    Ok(config)
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the ICOSA_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("ICOSA_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("Failed to get current executable path")?;
    let start = exe_path
        .parent()
        .context("Failed to get executable directory")?;

    start
        .ancestors()
        .find(|dir| dir.join("config").is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("Could not find project root directory"))
}

fn validate_config(config: &Settings) -> Result<()> {
    ensure!(config.tolerance > 0.0, "Tolerance must be greater than 0");
    ensure!(
        config.initial_step > 0.0,
        "Initial root finder step must be greater than 0"
    );
    ensure!(
        config.max_iterations > 0,
        "Maximum iterations must be at least 1"
    );
    if config.frequencies.is_empty() {
        bail!("At least one frequency must be requested");
    }
    for &b in &config.frequencies {
        ensure!(
            (2..=7).contains(&b),
            "Frequency ({},0) is not supported, expected 2 to 7",
            b
        );
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "ICOSA - equal-ring truncations of class I icosahedral geodesics"
)]
pub struct CliArgs {
    /// Residual tolerance for the root finder, in radians.
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Maximum residual evaluations per root find.
    #[arg(short = 'n', long)]
    max_iterations: Option<usize>,

    /// Initial root finder step, in degrees.
    #[arg(long)]
    step: Option<f64>,

    /// Directory for the OFF meshes and the run summary.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Frequencies to solve, separated by spaces. Each b in 2..=7 selects
    /// every (b,0) solution.
    #[arg(short, long, num_args = 1.., value_delimiter = ' ')]
    frequencies: Option<Vec<u8>>,

    /// Solve one solution at a time instead of in parallel.
    #[arg(long)]
    serial: bool,

    /// Skip writing summary.json.
    #[arg(long)]
    no_summary: bool,
}

impl CliArgs {
    /// Overrides settings with any values given on the command line.
    pub fn apply(self, config: &mut Settings) {
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(step) = self.step {
            config.initial_step = step;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(frequencies) = self.frequencies {
            config.frequencies = frequencies;
        }
        if self.serial {
            config.parallel = false;
        }
        if self.no_summary {
            config.summary = false;
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Tolerance: {:e}
  - Max Iterations: {}
  - Initial Step: {:.3}°
  - Output Directory: {}
  - Frequencies: {:?}
  - Parallel: {}
  - Summary: {}
  ",
            self.tolerance,
            self.max_iterations,
            self.initial_step,
            self.output_dir.display(),
            self.frequencies,
            self.parallel,
            self.summary,
        )
    }
}
