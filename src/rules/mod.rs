//! Theorem rules: independent deduction passes over the diagram.
//!
//! Each rule reads topology through a [`GraphView`], writes values only
//! through the [`ConstraintGuard`], and reports whether it changed
//! anything. Rules are idempotent: re-running one on a fixed point is a
//! no-op. The registry order below is the priority order the driver uses
//! (cheap, safe propagation first; heavier geometric rules later).

pub mod circle;
pub mod collinear;
pub mod isosceles;
pub mod labels;
pub mod linear;
pub mod triangle;
pub mod vertex;

use crate::diagram::{Angle, GraphView};
use crate::solver::guard::ConstraintGuard;
use thiserror::Error;

/// Internal inconsistencies a rule can hit; anything here aborts the
/// whole solve and is reported as a failure distinct from "unsolved".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("angle slot {0} is out of sync with the index")]
    IndexOutOfSync(usize),
}

/// A deduction rule. Implementations must be pure over the view (no
/// hidden state) and write exclusively through the guard.
pub trait TheoremRule: Send + Sync {
    /// Stable identifier for logs and failure reports.
    fn id(&self) -> &'static str;

    /// Human-readable theorem name recorded in the audit trail.
    fn theorem(&self) -> &'static str;

    /// Run one pass. Returns true iff any angle value changed.
    fn apply(
        &self,
        view: &GraphView<'_>,
        angles: &mut [Angle],
        guard: &mut ConstraintGuard<'_>,
    ) -> Result<bool, RuleError>;
}

/// All rules in driver priority order.
pub fn all_rules() -> Vec<Box<dyn TheoremRule>> {
    vec![
        Box::new(labels::SameLabelAngles),
        Box::new(labels::AngleSubdivision),
        Box::new(linear::SupplementaryAngles),
        Box::new(linear::LinearPairs),
        Box::new(linear::LinearAngleDivision),
        Box::new(vertex::VerticalAngles),
        Box::new(vertex::ComplementaryAngles),
        Box::new(triangle::TriangleAngleSum),
        Box::new(vertex::AngleAddition),
        Box::new(isosceles::IsoscelesTriangles),
        Box::new(isosceles::IsoscelesAngleBisectorPerpendicular),
        Box::new(isosceles::RightAngleBisector),
        Box::new(circle::EquilateralTriangle),
        Box::new(circle::InscribedAngle),
        Box::new(circle::CircleRadiusAngles),
        Box::new(collinear::CollinearPointAngles),
    ]
}

/// A planned value write; rules plan while borrowing the angle slice
/// immutably, then commit through the guard.
pub(crate) struct Write {
    pub slot: usize,
    pub value: f64,
    pub reason: String,
}

impl Write {
    pub fn new(slot: usize, value: f64, reason: impl Into<String>) -> Self {
        Self {
            slot,
            value,
            reason: reason.into(),
        }
    }
}

/// Apply planned writes through the guard. Returns true iff any landed.
pub(crate) fn commit(
    writes: Vec<Write>,
    angles: &mut [Angle],
    guard: &mut ConstraintGuard<'_>,
    theorem: &'static str,
) -> Result<bool, RuleError> {
    commit_inner(writes, angles, guard, theorem, false)
}

/// Like [`commit`], but flags written angles as subdivision results so
/// later addition rules treat them as protected allocations.
pub(crate) fn commit_subdivision(
    writes: Vec<Write>,
    angles: &mut [Angle],
    guard: &mut ConstraintGuard<'_>,
    theorem: &'static str,
) -> Result<bool, RuleError> {
    commit_inner(writes, angles, guard, theorem, true)
}

fn commit_inner(
    writes: Vec<Write>,
    angles: &mut [Angle],
    guard: &mut ConstraintGuard<'_>,
    theorem: &'static str,
    flag_subdivision: bool,
) -> Result<bool, RuleError> {
    let mut changed = false;
    for write in writes {
        let angle = angles
            .get_mut(write.slot)
            .ok_or(RuleError::IndexOutOfSync(write.slot))?;
        if guard.set_angle_value(angle, write.value, theorem, write.reason) {
            if flag_subdivision {
                angle.is_subdivision_result = true;
            }
            changed = true;
        }
    }
    Ok(changed)
}
