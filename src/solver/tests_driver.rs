use super::driver::AngleSolver;
use super::guard::RecordingSink;
use crate::diagram::{Angle, Diagram};

fn triangle_fixture() -> (Diagram, crate::diagram::AngleId) {
    let mut diagram = Diagram::new();
    let p = diagram.add_named_point("P");
    let q = diagram.add_named_point("Q");
    let r = diagram.add_named_point("R");
    diagram.add_triangle(p, q, r);
    diagram.add_angle(Angle::new(p, q, r).with_value(50.0));
    diagram.add_angle(Angle::new(q, p, r).with_value(60.0));
    let third = diagram.add_angle(Angle::new(r, p, q));
    (diagram, third)
}

#[test]
fn triangle_closure_tags_the_theorem() {
    let (mut diagram, third) = triangle_fixture();
    let solver = AngleSolver::new();
    let mut sink = RecordingSink::default();

    let summary = solver.solve(&mut diagram, &mut sink).expect("solve");
    assert_eq!(diagram.angle_value(third), Some(70.0));
    assert_eq!(summary.solved_count, 3);
    assert_eq!(summary.triangles.valid, 1);
    assert_eq!(summary.triangles.invalid, 0);

    let step = summary
        .history
        .iter()
        .find(|s| s.angle_id == third)
        .expect("third angle must appear in the history");
    assert_eq!(step.theorem, "Triangle Angle Sum");
    assert_eq!(step.value, 70.0);

    // Per-change events mirror the history.
    assert!(sink.changes.iter().any(|c| c.angle_id == third && c.new_value == 70.0));
}

#[test]
fn unrelated_angles_terminate_after_one_iteration() {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let a = diagram.add_named_point("A");
    let b = diagram.add_named_point("B");
    let c = diagram.add_named_point("C");
    let d = diagram.add_named_point("D");

    diagram.add_angle(Angle::new(v, a, b).with_value(30.0));
    diagram.add_angle(Angle::new(v, c, d));

    let solver = AngleSolver::new();
    let summary = solver.solve_silent(&mut diagram).expect("solve");
    assert_eq!(summary.iterations, 1);
    assert_eq!(summary.solved_count, 1, "only the pre-supplied known value");
    assert!(summary.history.is_empty());
}

#[test]
fn contradictory_locked_triangle_is_reported_not_repaired() {
    let mut diagram = Diagram::new();
    let p = diagram.add_named_point("P");
    let q = diagram.add_named_point("Q");
    let r = diagram.add_named_point("R");
    diagram.add_triangle(p, q, r);
    diagram.add_angle(Angle::new(p, q, r).locked(90.0));
    diagram.add_angle(Angle::new(q, p, r).locked(80.0));
    let third = diagram.add_angle(Angle::new(r, p, q).locked(70.0));

    let solver = AngleSolver::new();
    let summary = solver.solve_silent(&mut diagram).expect("solve must not fail");
    assert_eq!(summary.triangles.invalid, 1);
    assert_eq!(summary.triangles.violations.len(), 1);
    assert_eq!(diagram.angle_value(third), Some(70.0), "locked value untouched");
}

#[test]
fn second_solve_produces_no_new_history() {
    let (mut diagram, _) = triangle_fixture();
    let solver = AngleSolver::new();

    let first = solver.solve_silent(&mut diagram).expect("first solve");
    assert!(!first.history.is_empty());
    let values_after_first: Vec<_> = diagram.angles.iter().map(|a| a.value).collect();

    let second = solver.solve_silent(&mut diagram).expect("second solve");
    assert!(second.history.is_empty(), "fixed point already reached");
    let values_after_second: Vec<_> = diagram.angles.iter().map(|a| a.value).collect();
    assert_eq!(values_after_first, values_after_second);
}

#[test]
fn locked_value_is_seeded_when_the_editor_omits_it() {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let a = diagram.add_named_point("A");
    let b = diagram.add_named_point("B");
    let mut angle = Angle::new(v, a, b);
    angle.constraint_value = Some(42.0);
    let id = diagram.add_angle(angle);

    let solver = AngleSolver::new();
    solver.solve_silent(&mut diagram).expect("solve");
    assert_eq!(diagram.angle_value(id), Some(42.0));
}
