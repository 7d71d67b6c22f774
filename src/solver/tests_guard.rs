use super::guard::{ConstraintGuard, NullSink, RecordingSink};
use crate::diagram::{Angle, Diagram};

fn fixture_angle() -> Angle {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let a = diagram.add_named_point("A");
    let b = diagram.add_named_point("B");
    Angle::new(v, a, b)
}

#[test]
fn write_rounds_records_and_notifies() {
    let mut angle = fixture_angle();
    let mut sink = RecordingSink::default();
    let mut guard = ConstraintGuard::new(&mut sink, 0.5);

    assert!(guard.set_angle_value(&mut angle, 33.3333, "Test Theorem", "because"));
    assert_eq!(angle.value, Some(33.3));

    assert_eq!(guard.history().len(), 1);
    let step = &guard.history()[0];
    assert_eq!(step.value, 33.3);
    assert_eq!(step.theorem, "Test Theorem");
    assert_eq!(step.reason, "because");

    assert_eq!(sink.changes.len(), 1);
    assert_eq!(sink.changes[0].angle_id, angle.id);
    assert_eq!(sink.changes[0].new_value, 33.3);
}

#[test]
fn locked_angles_are_never_written() {
    let mut angle = fixture_angle().locked(60.0);
    let mut sink = RecordingSink::default();
    let mut guard = ConstraintGuard::new(&mut sink, 0.5);

    assert!(!guard.set_angle_value(&mut angle, 45.0, "Test Theorem", "attempt"));
    assert_eq!(angle.value, Some(60.0));
    assert!(guard.history().is_empty());
    assert!(sink.changes.is_empty());
}

#[test]
fn consistent_values_are_not_rewritten() {
    let mut angle = fixture_angle().with_value(70.0);
    let mut sink = NullSink;
    let mut guard = ConstraintGuard::new(&mut sink, 0.5);

    assert!(!guard.set_angle_value(&mut angle, 70.2, "Test Theorem", "close enough"));
    assert_eq!(angle.value, Some(70.0));
    assert!(guard.history().is_empty());
}

#[test]
fn differing_unlocked_values_are_overwritten() {
    let mut angle = fixture_angle().with_value(70.0);
    let mut sink = NullSink;
    let mut guard = ConstraintGuard::new(&mut sink, 0.5);

    assert!(guard.set_angle_value(&mut angle, 85.0, "Test Theorem", "correction"));
    assert_eq!(angle.value, Some(85.0));
    assert_eq!(guard.history().len(), 1);
}
