//! The value-write guard: every angle mutation in the engine funnels
//! through [`ConstraintGuard::set_angle_value`]. That single choke point
//! enforces the lock invariant, rounds committed values, builds the audit
//! trail, and notifies the editor's change sink — so every rule gets all
//! four for free.

use crate::diagram::{Angle, AngleId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Per-change notification payload; the editor re-renders exactly the
/// one angle named here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleChange {
    pub angle_id: AngleId,
    pub new_value: f64,
    pub reason: String,
}

/// One audit-trail entry, appended for every committed write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveStep {
    pub angle_id: AngleId,
    pub angle_name: String,
    pub value: f64,
    pub theorem: String,
    pub reason: String,
}

/// Injected change listener. The editor supplies a rendering sink; tests
/// substitute [`RecordingSink`]; the dry-run checker uses [`NullSink`].
pub trait ChangeSink {
    fn angle_changed(&mut self, change: AngleChange);
}

/// Sink that drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ChangeSink for NullSink {
    fn angle_changed(&mut self, _change: AngleChange) {}
}

/// Sink that keeps every notification, for tests and editor playback.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub changes: Vec<AngleChange>,
}

impl ChangeSink for RecordingSink {
    fn angle_changed(&mut self, change: AngleChange) {
        self.changes.push(change);
    }
}

/// Sole mutation point for angle values.
pub struct ConstraintGuard<'a> {
    sink: &'a mut dyn ChangeSink,
    tolerance: f64,
    history: Vec<SolveStep>,
}

impl<'a> ConstraintGuard<'a> {
    pub fn new(sink: &'a mut dyn ChangeSink, tolerance: f64) -> Self {
        Self {
            sink,
            tolerance,
            history: Vec::new(),
        }
    }

    /// Write `value` into `angle` unless the angle is locked or already
    /// holds a consistent value. Committed values are rounded to one
    /// decimal, recorded in the history, and announced to the sink.
    /// Returns true iff the value was written.
    pub fn set_angle_value(
        &mut self,
        angle: &mut Angle,
        value: f64,
        theorem: &'static str,
        reason: impl Into<String>,
    ) -> bool {
        if let Some(locked) = angle.constraint_value {
            if (locked - value).abs() >= self.tolerance {
                warn!(
                    angle = %angle.name(),
                    locked,
                    attempted = value,
                    theorem,
                    "skipping write to locked angle"
                );
            } else {
                debug!(angle = %angle.name(), theorem, "locked angle already consistent");
            }
            return false;
        }

        if let Some(current) = angle.value {
            if (current - value).abs() < self.tolerance {
                return false;
            }
        }

        let rounded = (value * 10.0).round() / 10.0;
        let reason = reason.into();
        angle.value = Some(rounded);
        debug!(angle = %angle.name(), value = rounded, theorem, "angle value set");
        self.history.push(SolveStep {
            angle_id: angle.id,
            angle_name: angle.name(),
            value: rounded,
            theorem: theorem.to_string(),
            reason: reason.clone(),
        });
        self.sink.angle_changed(AngleChange {
            angle_id: angle.id,
            new_value: rounded,
            reason,
        });
        true
    }

    /// The value-equality tolerance in degrees, shared with the rules so
    /// their consistency checks agree with the guard's.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn history(&self) -> &[SolveStep] {
        &self.history
    }

    pub fn into_history(self) -> Vec<SolveStep> {
        self.history
    }
}
