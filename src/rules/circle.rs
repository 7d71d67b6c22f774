//! Circle rules: equilateral detection from central angles, the
//! inscribed-angle theorem, and equal central angles between adjacent
//! rim points.

use super::{commit, RuleError, TheoremRule, Write};
use crate::diagram::{Angle, GraphView};
use crate::solver::guard::ConstraintGuard;

/// A registered triangle whose three corners sit on one circle, with
/// mutually-equal 120° central angles, is equilateral: all interior
/// angles are 60°.
pub struct EquilateralTriangle;

impl TheoremRule for EquilateralTriangle {
    fn id(&self) -> &'static str {
        "equilateral_triangle"
    }

    fn theorem(&self) -> &'static str {
        "Equilateral Triangle"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let tolerance = guard.tolerance();
        let mut writes = Vec::new();
        for triangle in view.triangles {
            let [p, q, r] = triangle.corners();
            for circle in view.circles {
                if !(circle.on_rim(p) && circle.on_rim(q) && circle.on_rim(r)) {
                    continue;
                }
                let center = circle.center;
                let centrals = [(p, q), (q, r), (p, r)];
                let all_120 = centrals.iter().all(|&(m, n)| {
                    view.index
                        .find_angle(center, m, n)
                        .and_then(|slot| angles[slot].value)
                        .is_some_and(|v| (v - 120.0).abs() < tolerance)
                });
                if !all_120 {
                    continue;
                }
                for &(vertex, n1, n2) in &[(p, q, r), (q, p, r), (r, p, q)] {
                    if let Some(slot) = view.index.find_angle(vertex, n1, n2) {
                        if !angles[slot].is_known() {
                            writes.push(Write::new(
                                slot,
                                60.0,
                                format!("equilateral triangle {triangle} inscribed in a circle"),
                            ));
                        }
                    }
                }
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}

/// Central angle over an arc is twice any inscribed angle over the same
/// arc; propagates in both directions between existing records.
pub struct InscribedAngle;

impl TheoremRule for InscribedAngle {
    fn id(&self) -> &'static str {
        "inscribed_angle"
    }

    fn theorem(&self) -> &'static str {
        "Inscribed Angle"
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
                    let (p, q) = (circle.points[x], circle.points[y]);
                    if p == q {
                        continue;
                    }
                    let central = view.index.find_angle(center, p, q);
                    for &w in &circle.points {
                        if w == p || w == q || w == center {
                            continue;
                        }
                        let Some(inscribed) = view.index.find_angle(w, p, q) else {
                            continue;
                        };
                        let central_value = central.and_then(|s| angles[s].value);
                        let inscribed_value = angles[inscribed].value;
                        match (central, central_value, inscribed_value) {
                            (Some(_), Some(cv), None) => {
                                let half = cv / 2.0;
                                if half > 0.0 {
                                    writes.push(Write::new(
                                        inscribed,
                                        half,
                                        format!("half the central angle over arc {p}–{q}"),
                                    ));
                                }
                            }
                            (Some(slot), None, Some(iv)) => {
                                let doubled = 2.0 * iv;
                                if doubled < 360.0 {
                                    writes.push(Write::new(
                                        slot,
                                        doubled,
                                        format!("twice the inscribed angle over arc {p}–{q}"),
                                    ));
                                }
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

/// Central angles between consecutive rim points are equal; the first
/// known one propagates to the unknown rest.
pub struct CircleRadiusAngles;

impl TheoremRule for CircleRadiusAngles {
    fn id(&self) -> &'static str {
        "circle_radius_angles"
    }

    fn theorem(&self) -> &'static str {
        "Circle Radius Angles"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let mut writes = Vec::new();
        for circle in view.circles {
            let rim = &circle.points;
            if rim.len() < 2 {
                continue;
            }
            let mut slots = Vec::new();
            let pair_count = if rim.len() > 2 { rim.len() } else { 1 };
            for k in 0..pair_count {
                let (p, q) = (rim[k], rim[(k + 1) % rim.len()]);
                if p == q {
                    continue;
                }
                if let Some(slot) = view.index.find_angle(circle.center, p, q) {
                    slots.push(slot);
                }
            }
            let Some(primary) = slots.iter().find_map(|&s| angles[s].value) else {
                continue;
            };
            for &slot in &slots {
                if !angles[slot].is_known() {
                    writes.push(Write::new(
                        slot,
                        primary,
                        "equal central angles between adjacent rim points".to_string(),
                    ));
                }
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}
