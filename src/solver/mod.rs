pub mod checker;
pub mod config;
pub mod driver;
pub mod guard;

pub use checker::{Solvability, SolvabilityDetails};
pub use config::{SolverConfig, ANGLE_TOLERANCE, MAX_ITERATIONS};
pub use driver::{AngleSolver, SolveError, SolveSummary, TriangleValidation};
pub use guard::{AngleChange, ChangeSink, ConstraintGuard, NullSink, RecordingSink, SolveStep};

#[cfg(test)]
mod tests_guard;
#[cfg(test)]
mod tests_driver;
#[cfg(test)]
mod tests_checker;
