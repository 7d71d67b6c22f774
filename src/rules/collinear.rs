//! Directional equality across collinear point-pairs.

use super::{commit, RuleError, TheoremRule, Write};
use crate::diagram::index::vertices_in_order;
use crate::diagram::relations::is_overlapping;
use crate::diagram::{Angle, GraphView};
use crate::solver::guard::ConstraintGuard;

/// Two angle records at one vertex that reach different point-pairs on
/// a line while expressing the same directional relationship measure
/// the same angle. Covers both shapes the overlap predicate detects:
/// the far points collinear through the vertex (vertex on the line,
/// external target), and the far points collinear with the shared ray
/// point on a line that misses the vertex (vertex off the line).
/// Propagates known values into unknown records; never corrects.
pub struct CollinearPointAngles;

impl TheoremRule for CollinearPointAngles {
    fn id(&self) -> &'static str {
        "collinear_point_angles"
    }

    fn theorem(&self) -> &'static str {
        "Collinear Point Angles"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let mut writes = Vec::new();
        for vertex in vertices_in_order(angles) {
            let at = view.index.angles_at(vertex);
            for x in 0..at.len() {
                for y in (x + 1)..at.len() {
                    let (i, j) = (at[x], at[y]);
                    let (a, b) = (&angles[i], &angles[j]);
                    if !is_overlapping(view, a, b) {
                        continue;
                    }
                    match (a.value, b.value) {
                        (Some(va), None) => {
                            writes.push(Write::new(
                                j,
                                va,
                                format!("same direction along the line as {}", a.name()),
                            ));
                        }
                        (None, Some(vb)) => {
                            writes.push(Write::new(
                                i,
                                vb,
                                format!("same direction along the line as {}", b.name()),
                            ));
                        }
                        _ => {}
                    }
                }
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}
