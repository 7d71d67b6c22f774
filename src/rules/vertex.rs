//! Vertex-local rules: vertical angles at a crossing, the complementary
//! placeholder, and angle addition around a shared middle ray.

use super::{commit, RuleError, TheoremRule, Write};
use crate::diagram::index::vertices_in_order;
use crate::diagram::relations::{shared_ray, shares_edge};
use crate::diagram::{Angle, GraphView};
use crate::solver::guard::ConstraintGuard;
use std::collections::HashSet;
use tracing::{debug, warn};

/// At a vertex with four or more neighbors, two angle records whose ray
/// pairs are completely disjoint sit across the crossing from each
/// other: propagate a known value to its unknown counterpart.
pub struct VerticalAngles;

impl TheoremRule for VerticalAngles {
    fn id(&self) -> &'static str {
        "vertical_angles"
    }

    fn theorem(&self) -> &'static str {
        "Vertical Angles"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let mut writes = Vec::new();
        for vertex in vertices_in_order(angles) {
            if view.degree(vertex) < 4 {
                continue;
            }
            let at = view.index.angles_at(vertex);
            for x in 0..at.len() {
                for y in (x + 1)..at.len() {
                    let (i, j) = (at[x], at[y]);
                    let (a, b) = (&angles[i], &angles[j]);
                    let disjoint = !b.has_ray(a.rays[0]) && !b.has_ray(a.rays[1]);
                    if !disjoint {
                        continue;
                    }
                    match (a.value, b.value) {
                        (Some(va), None) => {
                            writes.push(Write::new(j, va, format!("vertical to {}", a.name())));
                        }
                        (None, Some(vb)) => {
                            writes.push(Write::new(i, vb, format!("vertical to {}", b.name())));
                        }
                        _ => {}
                    }
                }
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}

/// Detection-only placeholder. Pairs sharing an edge are counted so the
/// pass is observable in logs, but no inference is drawn: a bare shared
/// edge does not pin either angle's value.
pub struct ComplementaryAngles;

impl TheoremRule for ComplementaryAngles {
    fn id(&self) -> &'static str {
        "complementary_angles"
    }

    fn theorem(&self) -> &'static str {
        "Complementary Angles"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        _guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let mut pairs = 0usize;
        for vertex in vertices_in_order(angles) {
            let at = view.index.angles_at(vertex);
            for x in 0..at.len() {
                for y in (x + 1)..at.len() {
                    if shares_edge(&angles[at[x]], &angles[at[y]]) {
                        pairs += 1;
                    }
                }
            }
        }
        if pairs > 0 {
            debug!(pairs, "complementary candidates detected; no inference drawn");
        }
        Ok(false)
    }
}

/// Around a vertex with three or more neighbors, a middle ray splits an
/// outer angle into two inner ones: inner + inner = outer. Both inners
/// known fills or corrects the outer (unless the outer is a protected
/// subdivision allocation); outer plus one inner fills the other inner.
pub struct AngleAddition;

impl TheoremRule for AngleAddition {
    fn id(&self) -> &'static str {
        "angle_addition"
    }

    fn theorem(&self) -> &'static str {
        "Angle Addition"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let tolerance = guard.tolerance();
        let mut writes: Vec<Write> = Vec::new();
        // First planned write per slot wins; later conflicting triples are
        // suppressed instead of fighting over the same angle.
        let mut planned: HashSet<usize> = HashSet::new();
        for vertex in vertices_in_order(angles) {
            if view.degree(vertex) < 3 {
                continue;
            }
            let at = view.index.angles_at(vertex);
            for x in 0..at.len() {
                for y in (x + 1)..at.len() {
                    let (i, j) = (at[x], at[y]);
                    let (a, b) = (&angles[i], &angles[j]);
                    let Some(middle) = shared_ray(a, b) else {
                        continue;
                    };
                    let (Some(p), Some(q)) = (a.other_ray(middle), b.other_ray(middle)) else {
                        continue;
                    };
                    if p == q {
                        continue;
                    }
                    let Some(o) = view.index.find_angle(vertex, p, q) else {
                        continue;
                    };
                    let outer = &angles[o];
                    match (a.value, b.value, outer.value) {
                        (Some(va), Some(vb), None) => {
                            if planned.insert(o) {
                                writes.push(Write::new(
                                    o,
                                    va + vb,
                                    format!("{} plus {}", a.name(), b.name()),
                                ));
                            }
                        }
                        (Some(va), Some(vb), Some(vo)) => {
                            // The numbers alone decide which ray is the
                            // middle: if they also fit with the "outer" as
                            // one of the parts, the triple is ambiguous and
                            // must not be corrected.
                            let inconsistent = (va + vb - vo).abs() > tolerance;
                            let ambiguous = ((va - vb).abs() - vo).abs() <= tolerance;
                            if inconsistent
                                && !ambiguous
                                && !outer.is_subdivision_result
                                && planned.insert(o)
                            {
                                warn!(
                                    outer = %outer.name(),
                                    expected = va + vb,
                                    actual = vo,
                                    "outer angle disagrees with its parts; correcting"
                                );
                                writes.push(Write::new(
                                    o,
                                    va + vb,
                                    format!("{} plus {}", a.name(), b.name()),
                                ));
                            }
                        }
                        (Some(va), None, Some(vo)) => {
                            let diff = vo - va;
                            if diff > 0.0 && !b.is_subdivision_result && planned.insert(j) {
                                writes.push(Write::new(
                                    j,
                                    diff,
                                    format!("{} minus {}", outer.name(), a.name()),
                                ));
                            }
                        }
                        (None, Some(vb), Some(vo)) => {
                            let diff = vo - vb;
                            if diff > 0.0 && !a.is_subdivision_result && planned.insert(i) {
                                writes.push(Write::new(
                                    i,
                                    diff,
                                    format!("{} minus {}", outer.name(), b.name()),
                                ));
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}
