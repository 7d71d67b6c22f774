//! Straight-line rules: supplements across a vertex, linear pairs found
//! from line interiors, and even division of a straight angle.

use super::{commit, commit_subdivision, RuleError, TheoremRule, Write};
use crate::diagram::index::vertices_in_order;
use crate::diagram::relations::{find_angles_in_sector, is_linear_pair, is_overlapping, shared_ray};
use crate::diagram::{Angle, GraphView};
use crate::solver::guard::ConstraintGuard;
use tracing::warn;

/// Common label over a slot set: every slot must carry the same
/// non-empty label for this to return it.
fn common_label<'a>(angles: &'a [Angle], slots: &[usize]) -> Option<&'a str> {
    let mut label: Option<&str> = None;
    for &slot in slots {
        let l = angles[slot].equivalence_label()?;
        match label {
            None => label = Some(l),
            Some(prev) if prev != l => return None,
            _ => {}
        }
    }
    label
}

/// Pairwise pass at every vertex: overlapping records are forced equal
/// (they denote the same angle); genuine linear pairs fill the unknown
/// side with 180° minus the known side, or correct the second record
/// when both are known and the sum is off.
pub struct SupplementaryAngles;

impl TheoremRule for SupplementaryAngles {
    fn id(&self) -> &'static str {
        "supplementary_angles"
    }

    fn theorem(&self) -> &'static str {
        "Supplementary Angles"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let tolerance = guard.tolerance();
        let mut writes = Vec::new();
        for vertex in vertices_in_order(angles) {
            let at = view.index.angles_at(vertex);
            for x in 0..at.len() {
                for y in (x + 1)..at.len() {
                    let (i, j) = (at[x], at[y]);
                    let (a, b) = (&angles[i], &angles[j]);
                    if is_overlapping(view, a, b) {
                        match (a.value, b.value) {
                            (Some(va), Some(vb)) => {
                                if (va - vb).abs() >= tolerance {
                                    warn!(
                                        first = %a.name(),
                                        second = %b.name(),
                                        "overlapping records disagree; first value wins"
                                    );
                                    writes.push(Write::new(
                                        j,
                                        va,
                                        format!("same angle as {}", a.name()),
                                    ));
                                }
                            }
                            (Some(va), None) => {
                                writes.push(Write::new(j, va, format!("same angle as {}", a.name())));
                            }
                            (None, Some(vb)) => {
                                writes.push(Write::new(i, vb, format!("same angle as {}", b.name())));
                            }
                            (None, None) => {}
                        }
                    } else if is_linear_pair(view, a, b) {
                        match (a.value, b.value) {
                            (Some(va), Some(vb)) => {
                                if (va + vb - 180.0).abs() > tolerance {
                                    warn!(
                                        first = %a.name(),
                                        second = %b.name(),
                                        sum = va + vb,
                                        "linear pair does not sum to 180°; correcting second"
                                    );
                                    writes.push(Write::new(
                                        j,
                                        180.0 - va,
                                        format!("supplement of {}", a.name()),
                                    ));
                                }
                            }
                            (Some(va), None) if va < 180.0 => {
                                writes.push(Write::new(
                                    j,
                                    180.0 - va,
                                    format!("supplement of {}", a.name()),
                                ));
                            }
                            (None, Some(vb)) if vb < 180.0 => {
                                writes.push(Write::new(
                                    i,
                                    180.0 - vb,
                                    format!("supplement of {}", b.name()),
                                ));
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}

/// Line-driven variant of [`SupplementaryAngles`]: every interior point
/// of a line with at least 3 points anchors linear pairs between angles
/// whose far rays sit on opposite sides of it.
pub struct LinearPairs;

impl TheoremRule for LinearPairs {
    fn id(&self) -> &'static str {
        "linear_pairs"
    }

    fn theorem(&self) -> &'static str {
        "Linear Pairs"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let tolerance = guard.tolerance();
        let mut writes = Vec::new();
        for (li, line) in view.lines.iter().enumerate() {
            if line.points.len() < 3 {
                continue;
            }
            for pos in 1..line.points.len() - 1 {
                let vertex = line.points[pos];
                let at = view.index.angles_at(vertex);
                for x in 0..at.len() {
                    for y in (x + 1)..at.len() {
                        let (i, j) = (at[x], at[y]);
                        let (a, b) = (&angles[i], &angles[j]);
                        let Some(s) = shared_ray(a, b) else {
                            continue;
                        };
                        let (Some(ra), Some(rb)) = (a.other_ray(s), b.other_ray(s)) else {
                            continue;
                        };
                        let (Some(pa), Some(pb)) = (
                            view.index.position_on(li, ra),
                            view.index.position_on(li, rb),
                        ) else {
                            continue;
                        };
                        if !((pa < pos && pb > pos) || (pa > pos && pb < pos)) {
                            continue;
                        }
                        match (a.value, b.value) {
                            (Some(va), Some(vb)) => {
                                if (va + vb - 180.0).abs() > tolerance {
                                    warn!(
                                        first = %a.name(),
                                        second = %b.name(),
                                        "linear pair off 180°; correcting second"
                                    );
                                    writes.push(Write::new(
                                        j,
                                        180.0 - va,
                                        format!("supplement of {}", a.name()),
                                    ));
                                }
                            }
                            (Some(va), None) if va < 180.0 => {
                                writes.push(Write::new(
                                    j,
                                    180.0 - va,
                                    format!("supplement of {}", a.name()),
                                ));
                            }
                            (None, Some(vb)) if vb < 180.0 => {
                                writes.push(Write::new(
                                    i,
                                    180.0 - vb,
                                    format!("supplement of {}", b.name()),
                                ));
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}

/// A straight angle at an interior line point is partitioned by the
/// angles in the sector between its two line-neighbors. When every
/// sector angle is unknown and at least three share one label, 180° is
/// split evenly and propagated to every angle carrying that label; when
/// only the unknowns share one label, they split the remainder left by
/// the known angles.
pub struct LinearAngleDivision;

impl TheoremRule for LinearAngleDivision {
    fn id(&self) -> &'static str {
        "linear_angle_division"
    }

    fn theorem(&self) -> &'static str {
        "Linear Angle Division"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let mut writes = Vec::new();
        for line in view.lines.iter() {
            if line.points.len() < 3 {
                continue;
            }
            for pos in 1..line.points.len() - 1 {
                let vertex = line.points[pos];
                let n1 = line.points[pos - 1];
                let n2 = line.points[pos + 1];
                let sector = find_angles_in_sector(view, angles, vertex, n1, n2);
                if sector.is_empty() {
                    continue;
                }

                let mut known_sum = 0.0;
                let mut unknowns = Vec::new();
                for &slot in &sector {
                    match angles[slot].value {
                        Some(v) => known_sum += v,
                        None => unknowns.push(slot),
                    }
                }

                if sector.len() >= 3 && unknowns.len() == sector.len() {
                    if let Some(label) = common_label(angles, &sector) {
                        let share = 180.0 / sector.len() as f64;
                        for (slot, angle) in angles.iter().enumerate() {
                            if angle.equivalence_label() == Some(label) {
                                writes.push(Write::new(
                                    slot,
                                    share,
                                    format!(
                                        "straight angle at {vertex} split into {} equal parts",
                                        sector.len()
                                    ),
                                ));
                            }
                        }
                        continue;
                    }
                }

                if !unknowns.is_empty() {
                    if common_label(angles, &unknowns).is_some() {
                        let share = (180.0 - known_sum) / unknowns.len() as f64;
                        if share > 0.0 {
                            for &slot in &unknowns {
                                writes.push(Write::new(
                                    slot,
                                    share,
                                    format!(
                                        "remaining {:.1}° at {vertex} split into {} equal parts",
                                        180.0 - known_sum,
                                        unknowns.len()
                                    ),
                                ));
                            }
                        }
                    }
                }
            }
        }
        commit_subdivision(writes, angles, guard, self.theorem())
    }
}
