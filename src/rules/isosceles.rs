//! Rules built on the circle-as-equal-radius proxy: isosceles apex/base
//! propagation, the apex-bisector perpendicular, and right-angle halves.

use super::{commit, RuleError, TheoremRule, Write};
use crate::diagram::{Angle, GraphView};
use crate::solver::guard::ConstraintGuard;
use tracing::warn;

/// Two rim points of a circle form an isosceles triangle with the
/// center as apex (the radii are the equal sides). Apex known gives
/// base = (180° − apex) / 2 on both base corners; a known base gives
/// apex = 180° − 2·base and equalizes the other base. Inconsistent
/// bases are corrected to the first-discovered one. Only fires when the
/// triangle itself is registered.
pub struct IsoscelesTriangles;

impl TheoremRule for IsoscelesTriangles {
    fn id(&self) -> &'static str {
        "isosceles_triangles"
    }

    fn theorem(&self) -> &'static str {
        "Isosceles Triangle"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let mut writes = Vec::new();
        for circle in view.circles {
            let center = circle.center;
            for x in 0..circle.points.len() {
                for y in (x + 1)..circle.points.len() {
                    let (p1, p2) = (circle.points[x], circle.points[y]);
                    if p1 == p2 || view.index.find_triangle(center, p1, p2).is_none() {
                        continue;
                    }
                    let apex = view.index.find_angle(center, p1, p2);
                    let base1 = view.index.find_angle(p1, center, p2);
                    let base2 = view.index.find_angle(p2, center, p1);
                    let apex_value = apex.and_then(|s| angles[s].value);
                    let base_value = base1
                        .and_then(|s| angles[s].value)
                        .or_else(|| base2.and_then(|s| angles[s].value));

                    if let Some(av) = apex_value {
                        let base = (180.0 - av) / 2.0;
                        if base > 0.0 {
                            for slot in [base1, base2].into_iter().flatten() {
                                writes.push(Write::new(
                                    slot,
                                    base,
                                    format!("base angle under apex {}", center),
                                ));
                            }
                        }
                    } else if let Some(bv) = base_value {
                        let apex_val = 180.0 - 2.0 * bv;
                        if apex_val > 0.0 {
                            if let Some(slot) = apex {
                                writes.push(Write::new(
                                    slot,
                                    apex_val,
                                    format!("apex over equal base angles at {p1} and {p2}"),
                                ));
                            }
                            for slot in [base1, base2].into_iter().flatten() {
                                writes.push(Write::new(
                                    slot,
                                    bv,
                                    "base angles of an isosceles triangle are equal".to_string(),
                                ));
                            }
                        }
                    }
                }
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}

/// When an isosceles apex angle is split by a base point D into two
/// sub-angles asserted equal (one shared label, or equal known values),
/// the split halves are equalized, apex and bases recomputed, and the
/// bisector meets the base at exactly 90° on both sides of D.
pub struct IsoscelesAngleBisectorPerpendicular;

impl TheoremRule for IsoscelesAngleBisectorPerpendicular {
    fn id(&self) -> &'static str {
        "isosceles_angle_bisector_perpendicular"
    }

    fn theorem(&self) -> &'static str {
        "Isosceles Angle Bisector"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let tolerance = guard.tolerance();
        let mut writes = Vec::new();
        for circle in view.circles {
            let center = circle.center;
            for x in 0..circle.points.len() {
                for y in (x + 1)..circle.points.len() {
                    let (p1, p2) = (circle.points[x], circle.points[y]);
                    if p1 == p2 || view.index.find_triangle(center, p1, p2).is_none() {
                        continue;
                    }
                    let Some(li) = view.index.line_with(p1, p2) else {
                        continue;
                    };
                    let (Some(pos1), Some(pos2)) = (
                        view.index.position_on(li, p1),
                        view.index.position_on(li, p2),
                    ) else {
                        continue;
                    };
                    let (lo, hi) = if pos1 < pos2 { (pos1, pos2) } else { (pos2, pos1) };
                    for dpos in (lo + 1)..hi {
                        let d = view.lines[li].points[dpos];
                        let Some(s1) = view.index.find_angle(center, p1, d) else {
                            continue;
                        };
                        let Some(s2) = view.index.find_angle(center, d, p2) else {
                            continue;
                        };
                        let (h1, h2) = (&angles[s1], &angles[s2]);
                        let same_label = matches!(
                            (h1.equivalence_label(), h2.equivalence_label()),
                            (Some(l1), Some(l2)) if l1 == l2
                        );
                        let equal_known = match (h1.value, h2.value) {
                            (Some(v1), Some(v2)) => (v1 - v2).abs() < tolerance,
                            _ => false,
                        };
                        if !(same_label || equal_known) {
                            continue;
                        }

                        match (h1.value, h2.value) {
                            (Some(v), None) => writes.push(Write::new(
                                s2,
                                v,
                                "equal halves of the split apex angle".to_string(),
                            )),
                            (None, Some(v)) => writes.push(Write::new(
                                s1,
                                v,
                                "equal halves of the split apex angle".to_string(),
                            )),
                            _ => {}
                        }

                        if let Some(half) = h1.value.or(h2.value) {
                            let apex_val = 2.0 * half;
                            let base_val = 90.0 - half;
                            if apex_val < 180.0 {
                                if let Some(slot) = view.index.find_angle(center, p1, p2) {
                                    writes.push(Write::new(
                                        slot,
                                        apex_val,
                                        "sum of the two equal apex halves".to_string(),
                                    ));
                                }
                            }
                            if base_val > 0.0 {
                                for (corner, other) in [(p1, p2), (p2, p1)] {
                                    if let Some(slot) =
                                        view.index.find_angle(corner, center, other)
                                    {
                                        writes.push(Write::new(
                                            slot,
                                            base_val,
                                            "base angle under the bisected apex".to_string(),
                                        ));
                                    }
                                }
                            }
                        }

                        // The bisector of an isosceles apex meets the base
                        // at right angles, whatever the apex measures.
                        for corner in [p1, p2] {
                            if let Some(slot) = view.index.find_angle(d, corner, center) {
                                writes.push(Write::new(
                                    slot,
                                    90.0,
                                    "apex bisector is perpendicular to the base".to_string(),
                                ));
                            }
                        }
                    }
                }
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}

/// A known right angle split into exactly two sub-angles that are tied
/// together (one shared label, or both unlabeled and unknown) forces
/// each half to 45°.
pub struct RightAngleBisector;

impl TheoremRule for RightAngleBisector {
    fn id(&self) -> &'static str {
        "right_angle_bisector"
    }

    fn theorem(&self) -> &'static str {
        "Right Angle Bisector"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let tolerance = guard.tolerance();
        let mut writes = Vec::new();
        for (slot, right) in angles.iter().enumerate() {
            let Some(v) = right.value else {
                continue;
            };
            if (v - 90.0).abs() >= tolerance {
                continue;
            }
            let vertex = right.vertex;
            let [a, b] = right.rays;
            for &i in view.index.angles_at(vertex) {
                if i == slot {
                    continue;
                }
                let first = &angles[i];
                let Some(m) = first.other_ray(a) else {
                    continue;
                };
                if m == b {
                    continue;
                }
                let Some(j) = view.index.find_angle(vertex, m, b) else {
                    continue;
                };
                if j == slot {
                    continue;
                }
                let second = &angles[j];
                let same_label = matches!(
                    (first.equivalence_label(), second.equivalence_label()),
                    (Some(l1), Some(l2)) if l1 == l2
                );
                let both_blank_unknown = first.equivalence_label().is_none()
                    && second.equivalence_label().is_none()
                    && !first.is_known()
                    && !second.is_known();
                if !(same_label || both_blank_unknown) {
                    continue;
                }
                if let (Some(v1), Some(v2)) = (first.value, second.value) {
                    if (v1 - 45.0).abs() >= tolerance || (v2 - 45.0).abs() >= tolerance {
                        warn!(
                            first = %first.name(),
                            second = %second.name(),
                            "halves of a right angle are off 45°"
                        );
                    }
                    continue;
                }
                for half in [i, j] {
                    if !angles[half].is_known() {
                        writes.push(Write::new(
                            half,
                            45.0,
                            format!("half of right angle {}", right.name()),
                        ));
                    }
                }
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{Diagram, GraphIndex};
    use crate::solver::guard::NullSink;

    fn run(rule: &dyn TheoremRule, diagram: &mut Diagram) -> bool {
        let index = GraphIndex::build(diagram);
        let view = GraphView {
            adjacency: &diagram.adjacency,
            lines: &diagram.lines,
            circles: &diagram.circles,
            triangles: &diagram.triangles,
            index: &index,
        };
        let mut sink = NullSink;
        let mut guard = ConstraintGuard::new(&mut sink, 0.5);
        rule.apply(&view, &mut diagram.angles, &mut guard).unwrap()
    }

    #[test]
    fn apex_fixes_both_bases() {
        let mut diagram = Diagram::new();
        let c = diagram.add_named_point("C");
        let a = diagram.add_named_point("A");
        let b = diagram.add_named_point("B");
        diagram.add_circle(c, vec![a, b]);
        diagram.add_triangle(c, a, b);

        diagram.add_angle(Angle::new(c, a, b).with_value(40.0));
        let base1 = diagram.add_angle(Angle::new(a, c, b));
        let base2 = diagram.add_angle(Angle::new(b, c, a));

        assert!(run(&IsoscelesTriangles, &mut diagram));
        assert_eq!(diagram.angle_value(base1), Some(70.0));
        assert_eq!(diagram.angle_value(base2), Some(70.0));
    }

    #[test]
    fn base_fixes_apex_and_other_base() {
        let mut diagram = Diagram::new();
        let c = diagram.add_named_point("C");
        let a = diagram.add_named_point("A");
        let b = diagram.add_named_point("B");
        diagram.add_circle(c, vec![a, b]);
        diagram.add_triangle(c, a, b);

        let apex = diagram.add_angle(Angle::new(c, a, b));
        diagram.add_angle(Angle::new(a, c, b).with_value(70.0));
        let base2 = diagram.add_angle(Angle::new(b, c, a));

        assert!(run(&IsoscelesTriangles, &mut diagram));
        assert_eq!(diagram.angle_value(apex), Some(40.0));
        assert_eq!(diagram.angle_value(base2), Some(70.0));
    }

    #[test]
    fn bisector_foot_is_perpendicular() {
        let mut diagram = Diagram::new();
        let c = diagram.add_named_point("C");
        let a = diagram.add_named_point("A");
        let b = diagram.add_named_point("B");
        let d = diagram.add_named_point("D");
        diagram.add_circle(c, vec![a, b]);
        diagram.add_triangle(c, a, b);
        diagram.add_line(vec![a, d, b]);
        diagram.connect(c, d);

        diagram.add_angle(Angle::new(c, a, d).with_label("h"));
        diagram.add_angle(Angle::new(c, d, b).with_label("h"));
        let foot1 = diagram.add_angle(Angle::new(d, a, c));
        let foot2 = diagram.add_angle(Angle::new(d, b, c));

        assert!(run(&IsoscelesAngleBisectorPerpendicular, &mut diagram));
        assert_eq!(diagram.angle_value(foot1), Some(90.0));
        assert_eq!(diagram.angle_value(foot2), Some(90.0));
    }

    #[test]
    fn right_angle_halves_are_45() {
        let mut diagram = Diagram::new();
        let v = diagram.add_named_point("V");
        let a = diagram.add_named_point("A");
        let m = diagram.add_named_point("M");
        let b = diagram.add_named_point("B");
        for p in [a, m, b] {
            diagram.connect(v, p);
        }

        diagram.add_angle(Angle::new(v, a, b).with_value(90.0));
        let h1 = diagram.add_angle(Angle::new(v, a, m));
        let h2 = diagram.add_angle(Angle::new(v, m, b));

        assert!(run(&RightAngleBisector, &mut diagram));
        assert_eq!(diagram.angle_value(h1), Some(45.0));
        assert_eq!(diagram.angle_value(h2), Some(45.0));
    }
}
