//! Error types for the truncation solver.

use thiserror::Error;

use crate::symmetry::Sector;
use crate::vertex::VertexId;

/// Result type for solver operations
pub type Result<T> = std::result::Result<T, SolveError>;

/// Errors that can occur while building or exporting a solution.
#[derive(Error, Debug)]
pub enum SolveError {
    /// A construction read a vertex slot that no placement has filled yet.
    #[error("vertex {vertex:?} is not populated (read in sector {sector:?})")]
    Unpopulated { vertex: VertexId, sector: Sector },

    /// I/O error while writing a mesh or summary
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
