/// Coordinates and radii at or below this magnitude are treated as zero.
pub const ZERO_EPSILON: f64 = 1e-14;
/// Residual tolerance for the constraint root finder, in radians.
pub const DEFAULT_TOLERANCE: f64 = 1e-11;
/// Maximum residual evaluations per root find.
pub const DEFAULT_MAX_ITERATIONS: usize = 200;
/// Initial root finder step, in degrees.
pub const DEFAULT_INITIAL_STEP: f64 = 0.5;
/// Decimal places written for each OFF coordinate.
pub const OFF_PRECISION: usize = 9;
/// Number of vertex slots any construction may use.
pub const VERTEX_SLOTS: usize = 8;
