//! Read-only solvability check.
//!
//! Runs the same fixed-point loop as a real solve, but over a clone of
//! the angle list and with a discarding sink, so live state is never
//! touched on any exit path. Topology (adjacency, lines, circles,
//! triangles) is shared by reference — only angles carry mutable state.

use crate::diagram::{Diagram, GraphIndex, GraphView};
use crate::solver::driver::{seed_locked_values, validate_triangles, AngleSolver};
use crate::solver::guard::{ConstraintGuard, NullSink};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolvabilityDetails {
    pub iterations: usize,
    pub solved_angles: usize,
    pub total_angles: usize,
    pub has_contradictions: bool,
    pub contradictions: Vec<String>,
}

/// Answer to "can this diagram be fully and consistently solved?".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solvability {
    pub solvable: bool,
    pub reason: String,
    pub details: SolvabilityDetails,
}

impl AngleSolver {
    /// Dry-run the solver against `diagram` without mutating it.
    /// Safe to call any number of times before a real solve.
    pub fn can_be_solved(&self, diagram: &Diagram) -> Solvability {
        let index = GraphIndex::build(diagram);
        let view = GraphView {
            adjacency: &diagram.adjacency,
            lines: &diagram.lines,
            circles: &diagram.circles,
            triangles: &diagram.triangles,
            index: &index,
        };

        // The one clone: the angle list. Everything else stays shared.
        let mut scratch = diagram.angles.clone();
        seed_locked_values(&mut scratch);

        let mut sink = NullSink;
        let mut guard = ConstraintGuard::new(&mut sink, self.config().tolerance);
        let iterations = match self.run_fixed_point(&view, &mut scratch, &mut guard) {
            Ok(iterations) => iterations,
            Err(err) => {
                return Solvability {
                    solvable: false,
                    reason: format!("solver error during dry run: {err}"),
                    details: SolvabilityDetails {
                        total_angles: scratch.len(),
                        solved_angles: scratch.iter().filter(|a| a.is_known()).count(),
                        ..SolvabilityDetails::default()
                    },
                };
            }
        };

        let tally = validate_triangles(&view, &scratch, self.config().tolerance);
        let total_angles = scratch.len();
        let solved_angles = scratch.iter().filter(|a| a.is_known()).count();
        let all_solved = solved_angles == total_angles;
        let has_contradictions = tally.has_contradictions();
        debug!(
            iterations,
            solved_angles, total_angles, has_contradictions, "dry run finished"
        );

        let reason = if has_contradictions {
            format!(
                "contradictory constraints: {} triangle(s) violate the 180° sum",
                tally.invalid
            )
        } else if all_solved {
            "all angles solved consistently".to_string()
        } else {
            format!("{solved_angles} of {total_angles} angles could be solved")
        };

        Solvability {
            solvable: all_solved && !has_contradictions,
            reason,
            details: SolvabilityDetails {
                iterations,
                solved_angles,
                total_angles,
                has_contradictions,
                contradictions: tally.violations,
            },
        }
    }
}
