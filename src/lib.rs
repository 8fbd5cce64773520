//! Exact vertex positions for class I (b,0) icosahedral geodesic truncations.
//!
//! Each construction places vertices on the unit sphere with spherical
//! trigonometry, replicates them through the six-fold symmetry of an
//! icosahedron face and, where a frequency leaves an angle free, closes the
//! configuration with a one-dimensional root find. Solved faces are exported
//! as OFF meshes.
//!
//! # Key Types
//!
//! - [`problem::Problem`]: vertex table and placement primitives for one solve
//! - [`solution::Solution`]: catalogue of the nine solvable configurations
//! - [`symmetry::FaceSymmetry`]: face frames and the sector exchange table
//! - [`convergence::RootFinder`]: step search driving residuals to zero
//! - [`multiproblem::MultiProblem`]: runs and exports a set of solutions

pub mod config;
pub mod convergence;
pub mod error;
pub mod geom;
pub mod graphs;
pub mod multiproblem;
pub mod output;
pub mod problem;
pub mod result;
pub mod settings;
pub mod solution;
pub mod spherical;
pub mod symmetry;
pub mod trig;
pub mod vertex;
