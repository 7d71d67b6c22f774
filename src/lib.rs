//! protractor-core
//!
//! Angle-inference engine for a plane-geometry diagram editor. The editor
//! hands over a topological snapshot (points, adjacency, collinear runs,
//! circles, triangles, angle markers); the engine deduces unknown angle
//! values by iterating classical theorems to a fixed point, never touching
//! user-locked values and reporting (not repairing) contradictions.

pub mod diagram;
pub mod rules;
pub mod solver;

pub use diagram::{
    Angle, AngleId, Circle, Diagram, GraphIndex, GraphView, Line, Point, PointId, SnapshotError,
    Triangle,
};
pub use rules::{all_rules, RuleError, TheoremRule};
pub use solver::{
    AngleChange, AngleSolver, ChangeSink, ConstraintGuard, NullSink, RecordingSink, Solvability,
    SolvabilityDetails, SolveError, SolveStep, SolveSummary, SolverConfig, TriangleValidation,
};

pub fn version() -> &'static str {
    "0.1.0"
}
