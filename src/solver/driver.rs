//! Fixed-point driver.
//!
//! Applies every rule once per iteration in priority order, ORing their
//! changed flags, until nothing moves, everything is known, a known
//! contradiction would only be compounded, or the iteration cap hits.
//! Contradictions are tallied by a read-only validation pass and
//! reported, never repaired.

use crate::diagram::{Angle, Diagram, GraphIndex, GraphView};
use crate::rules::{all_rules, TheoremRule};
use crate::solver::config::SolverConfig;
use crate::solver::guard::{ChangeSink, ConstraintGuard, NullSink, SolveStep};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Read-only tally over every registered triangle: complete and summing
/// to 180°±tolerance, complete and violating it, or incomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleValidation {
    pub valid: usize,
    pub invalid: usize,
    pub incomplete: usize,
    /// One human-readable entry per violating triangle.
    pub violations: Vec<String>,
}

impl TriangleValidation {
    pub fn has_contradictions(&self) -> bool {
        self.invalid > 0
    }
}

/// Completion summary of one solve call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveSummary {
    /// Fixed-point iterations performed (each runs every rule once).
    pub iterations: usize,
    /// Angles with a known value when the call returned.
    pub solved_count: usize,
    /// Audit trail of every committed write, in commit order.
    pub history: Vec<SolveStep>,
    pub execution_time_ms: f64,
    /// Final read-only triangle validation tally.
    pub triangles: TriangleValidation,
}

/// Failure outcome: an unexpected error inside a rule. Distinct from
/// "completed with unsolved angles"; values committed before the error
/// remain valid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("rule {rule} failed: {message}")]
    RuleFailed {
        rule: &'static str,
        message: String,
    },
}

/// The engine: a rule registry plus driver configuration. Stateless
/// between calls; indices are rebuilt per call.
pub struct AngleSolver {
    config: SolverConfig,
    rules: Vec<Box<dyn TheoremRule>>,
}

impl Default for AngleSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AngleSolver {
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            rules: all_rules(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Deduce unknown angle values in place, announcing each committed
    /// write to `sink`. Callers serialize invocations; `&mut Diagram`
    /// makes that structural in-process.
    pub fn solve(
        &self,
        diagram: &mut Diagram,
        sink: &mut dyn ChangeSink,
    ) -> Result<SolveSummary, SolveError> {
        let started = Instant::now();
        let index = GraphIndex::build(diagram);
        let Diagram {
            ref adjacency,
            ref lines,
            ref circles,
            ref triangles,
            ref mut angles,
            ..
        } = *diagram;
        let view = GraphView {
            adjacency,
            lines,
            circles,
            triangles,
            index: &index,
        };

        seed_locked_values(angles);
        let mut guard = ConstraintGuard::new(sink, self.config.tolerance);
        let iterations = self.run_fixed_point(&view, angles, &mut guard)?;

        let triangle_tally = validate_triangles(&view, angles, self.config.tolerance);
        if triangle_tally.has_contradictions() {
            warn!(
                invalid = triangle_tally.invalid,
                "solve finished with contradictory triangles"
            );
        }

        Ok(SolveSummary {
            iterations,
            solved_count: angles.iter().filter(|a| a.is_known()).count(),
            history: guard.into_history(),
            execution_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            triangles: triangle_tally,
        })
    }

    /// `solve` without a listening editor.
    pub fn solve_silent(&self, diagram: &mut Diagram) -> Result<SolveSummary, SolveError> {
        let mut sink = NullSink;
        self.solve(diagram, &mut sink)
    }

    /// Read-only triangle validation over the diagram's current values.
    pub fn validate(&self, diagram: &Diagram) -> TriangleValidation {
        let index = GraphIndex::build(diagram);
        let view = GraphView {
            adjacency: &diagram.adjacency,
            lines: &diagram.lines,
            circles: &diagram.circles,
            triangles: &diagram.triangles,
            index: &index,
        };
        validate_triangles(&view, &diagram.angles, self.config.tolerance)
    }

    /// Shared loop body for the live solve and the dry-run checker.
    pub(crate) fn run_fixed_point(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<usize, SolveError> {
        let mut iterations = 0;
        while iterations < self.config.max_iterations {
            if angles.iter().all(|a| a.is_known()) {
                debug!(iterations, "all angles known");
                break;
            }
            let tally = validate_triangles(view, angles, self.config.tolerance);
            if tally.has_contradictions() {
                warn!(
                    invalid = tally.invalid,
                    "stopping early: known triangle sums already contradict"
                );
                break;
            }

            let mut changed = false;
            for rule in &self.rules {
                match rule.apply(view, angles, guard) {
                    Ok(rule_changed) => changed |= rule_changed,
                    Err(err) => {
                        error!(rule = rule.id(), %err, "rule failed; aborting solve");
                        return Err(SolveError::RuleFailed {
                            rule: rule.id(),
                            message: err.to_string(),
                        });
                    }
                }
            }
            iterations += 1;
            if !changed {
                break;
            }
        }
        Ok(iterations)
    }
}

/// A locked angle's value is the constraint value, always. Seeding here
/// (not through the guard, which refuses locked writes) keeps snapshots
/// valid even when the editor sent the lock without the value.
pub(crate) fn seed_locked_values(angles: &mut [Angle]) {
    for angle in angles.iter_mut() {
        if let Some(locked) = angle.constraint_value {
            if angle.value != Some(locked) {
                debug!(angle = %angle.name(), locked, "seeding locked value");
                angle.value = Some(locked);
            }
        }
    }
}

/// Tally every registered triangle against the 180° sum. Never mutates.
pub(crate) fn validate_triangles(
    view: &GraphView<'_>,
    angles: &[Angle],
    tolerance: f64,
) -> TriangleValidation {
    let mut tally = TriangleValidation::default();
    for triangle in view.triangles {
        let [a, b, c] = triangle.corners();
        let values = [
            interior_value(view, angles, a, b, c),
            interior_value(view, angles, b, a, c),
            interior_value(view, angles, c, a, b),
        ];
        if values.iter().any(Option::is_none) {
            tally.incomplete += 1;
            continue;
        }
        let sum: f64 = values.iter().map(|v| v.unwrap_or(0.0)).sum();
        if (sum - 180.0).abs() <= tolerance {
            tally.valid += 1;
        } else {
            tally.invalid += 1;
            tally
                .violations
                .push(format!("triangle {triangle}: angles sum to {sum:.1}°"));
        }
    }
    tally
}

fn interior_value(
    view: &GraphView<'_>,
    angles: &[Angle],
    vertex: crate::diagram::PointId,
    n1: crate::diagram::PointId,
    n2: crate::diagram::PointId,
) -> Option<f64> {
    let slot = view.index.find_angle(vertex, n1, n2)?;
    angles.get(slot).and_then(|a| a.value)
}
