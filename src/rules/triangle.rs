//! Triangle interior-angle completion.

use super::{commit, RuleError, TheoremRule, Write};
use crate::diagram::{Angle, GraphView};
use crate::solver::guard::ConstraintGuard;

/// For every registered triangle with exactly two known interior angles,
/// the third is 180° minus their sum. Results outside (0°, 180°) are
/// rejected rather than written.
pub struct TriangleAngleSum;

impl TheoremRule for TriangleAngleSum {
    fn id(&self) -> &'static str {
        "triangle_angle_sum"
    }

    fn theorem(&self) -> &'static str {
        "Triangle Angle Sum"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let mut writes = Vec::new();
        for triangle in view.triangles {
            let [a, b, c] = triangle.corners();
            let corners = [(a, b, c), (b, a, c), (c, a, b)];
            let slots: Vec<Option<usize>> = corners
                .iter()
                .map(|&(vertex, n1, n2)| view.index.find_angle(vertex, n1, n2))
                .collect();
            let values: Vec<Option<f64>> = slots
                .iter()
                .map(|slot| slot.and_then(|s| angles[s].value))
                .collect();

            let known_sum: f64 = values.iter().flatten().sum();
            if values.iter().flatten().count() != 2 {
                continue;
            }
            let open = values.iter().position(Option::is_none).unwrap_or(0);
            let Some(slot) = slots[open] else {
                continue;
            };
            let third = 180.0 - known_sum;
            if third <= 0.0 || third >= 180.0 {
                continue;
            }
            writes.push(Write::new(
                slot,
                third,
                format!("interior angles of triangle {triangle} sum to 180°"),
            ));
        }
        commit(writes, angles, guard, self.theorem())
    }
}
