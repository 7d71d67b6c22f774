use serde::{Deserialize, Serialize};

/// Hard cap on fixed-point iterations; the only bound on runtime.
pub const MAX_ITERATIONS: usize = 100;

/// Two angle values within this many degrees are the same value.
pub const ANGLE_TOLERANCE: f64 = 0.5;

/// Tunables for the fixed-point driver. Defaults match the editor's
/// shipped behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub max_iterations: usize,
    /// Degrees; comparisons and the triangle-sum check both use it.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            tolerance: ANGLE_TOLERANCE,
        }
    }
}
