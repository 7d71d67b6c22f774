//! Label-driven rules: user-asserted equality classes and even splits
//! of a known angle across labeled sub-angles.

use super::{commit, commit_subdivision, RuleError, TheoremRule, Write};
use crate::diagram::relations::subdivision_chain;
use crate::diagram::{Angle, GraphView};
use crate::solver::guard::ConstraintGuard;
use std::collections::HashMap;

/// All angles sharing a non-empty label are one equivalence class: once
/// any member is known, every other member is forced to match. This is
/// the only rule allowed to overwrite an existing unlocked value — a
/// label is a user assertion, so the first-discovered value wins over
/// anything a later deduction left behind.
pub struct SameLabelAngles;

impl TheoremRule for SameLabelAngles {
    fn id(&self) -> &'static str {
        "same_label_angles"
    }

    fn theorem(&self) -> &'static str {
        "Same Label Angles"
    }

    fn apply(
        &self,
        _view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        // Group by label in first-appearance order for determinism.
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (slot, angle) in angles.iter().enumerate() {
            if let Some(label) = angle.equivalence_label() {
                if !groups.contains_key(label) {
                    order.push(label.to_string());
                }
                groups.entry(label.to_string()).or_default().push(slot);
            }
        }

        let mut writes = Vec::new();
        for label in &order {
            let members = &groups[label];
            let primary = members
                .iter()
                .copied()
                .find_map(|slot| angles[slot].value.map(|v| (slot, v)));
            let Some((primary_slot, primary_value)) = primary else {
                continue;
            };
            for &slot in members {
                if slot == primary_slot {
                    continue;
                }
                writes.push(Write::new(
                    slot,
                    primary_value,
                    format!("angles labeled '{label}' are equal"),
                ));
            }
        }
        commit(writes, angles, guard, self.theorem())
    }
}

/// A known "large" angle whose span is walked by a chain of sub-angle
/// records: when every labeled sub-angle carries one common label and is
/// unknown, and every unlabeled sub-angle is known, the remainder
/// (large minus known sum) is divided evenly among the labeled ones.
/// Mixed labels or a non-positive remainder skip the split. Written
/// angles are flagged as subdivision results.
pub struct AngleSubdivision;

impl TheoremRule for AngleSubdivision {
    fn id(&self) -> &'static str {
        "angle_subdivision"
    }

    fn theorem(&self) -> &'static str {
        "Angle Subdivision"
    }

    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError> {
        let mut writes = Vec::new();
        for (slot, large) in angles.iter().enumerate() {
            let Some(total) = large.value else {
                continue;
            };
            let [from, to] = large.rays;
            let Some(chain) = subdivision_chain(view, angles, large.vertex, from, to, slot)
            else {
                continue;
            };
            if chain.len() < 2 {
                continue;
            }

            let mut label: Option<&str> = None;
            let mut mixed = false;
            let mut labeled: Vec<usize> = Vec::new();
            let mut known_sum = 0.0;
            let mut blocked = false;
            for &sub in &chain {
                let angle = &angles[sub];
                match angle.equivalence_label() {
                    Some(l) => {
                        if *label.get_or_insert(l) != l {
                            mixed = true;
                        }
                        if angle.is_known() {
                            blocked = true;
                        }
                        labeled.push(sub);
                    }
                    None => match angle.value {
                        Some(v) => known_sum += v,
                        None => blocked = true,
                    },
                }
            }
            if mixed || blocked || labeled.is_empty() {
                continue;
            }

            let share = (total - known_sum) / labeled.len() as f64;
            if share <= 0.0 {
                continue;
            }
            for &sub in &labeled {
                writes.push(Write::new(
                    sub,
                    share,
                    format!(
                        "{} split into {} equal unknown parts",
                        large.name(),
                        labeled.len()
                    ),
                ));
            }
        }
        commit_subdivision(writes, angles, guard, self.theorem())
    }
}
