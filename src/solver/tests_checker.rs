use super::driver::AngleSolver;
use crate::diagram::{Angle, Diagram};

fn solvable_triangle() -> Diagram {
    let mut diagram = Diagram::new();
    let p = diagram.add_named_point("P");
    let q = diagram.add_named_point("Q");
    let r = diagram.add_named_point("R");
    diagram.add_triangle(p, q, r);
    diagram.add_angle(Angle::new(p, q, r).with_value(50.0));
    diagram.add_angle(Angle::new(q, p, r).with_value(60.0));
    diagram.add_angle(Angle::new(r, p, q));
    diagram
}

#[test]
fn reports_a_fully_solvable_diagram() {
    let diagram = solvable_triangle();
    let solver = AngleSolver::new();

    let result = solver.can_be_solved(&diagram);
    assert!(result.solvable, "{}", result.reason);
    assert_eq!(result.details.solved_angles, 3);
    assert_eq!(result.details.total_angles, 3);
    assert!(!result.details.has_contradictions);
}

#[test]
fn dry_run_never_touches_the_diagram() {
    let diagram = solvable_triangle();
    let before = diagram.clone();
    let solver = AngleSolver::new();

    for _ in 0..3 {
        solver.can_be_solved(&diagram);
    }
    assert_eq!(diagram, before, "dry runs must not mutate live state");
}

#[test]
fn dry_runs_do_not_change_the_eventual_solve() {
    let mut with_dry_runs = solvable_triangle();
    let mut direct = solvable_triangle();
    let solver = AngleSolver::new();

    solver.can_be_solved(&with_dry_runs);
    solver.can_be_solved(&with_dry_runs);
    solver.solve_silent(&mut with_dry_runs).expect("solve");
    solver.solve_silent(&mut direct).expect("solve");

    let a: Vec<_> = with_dry_runs.angles.iter().map(|x| x.value).collect();
    let b: Vec<_> = direct.angles.iter().map(|x| x.value).collect();
    assert_eq!(a, b);
}

#[test]
fn underconstrained_diagram_is_not_solvable() {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let a = diagram.add_named_point("A");
    let b = diagram.add_named_point("B");
    let c = diagram.add_named_point("C");
    diagram.add_angle(Angle::new(v, a, b).with_value(30.0));
    diagram.add_angle(Angle::new(v, b, c));

    let solver = AngleSolver::new();
    let result = solver.can_be_solved(&diagram);
    assert!(!result.solvable);
    assert_eq!(result.details.solved_angles, 1);
    assert_eq!(result.details.total_angles, 2);
    assert!(result.reason.contains("1 of 2"));
}

#[test]
fn contradiction_is_reported_with_details() {
    let mut diagram = Diagram::new();
    let p = diagram.add_named_point("P");
    let q = diagram.add_named_point("Q");
    let r = diagram.add_named_point("R");
    diagram.add_triangle(p, q, r);
    diagram.add_angle(Angle::new(p, q, r).locked(90.0));
    diagram.add_angle(Angle::new(q, p, r).locked(80.0));
    diagram.add_angle(Angle::new(r, p, q).locked(70.0));

    let solver = AngleSolver::new();
    let result = solver.can_be_solved(&diagram);
    assert!(!result.solvable);
    assert!(result.details.has_contradictions);
    assert_eq!(result.details.contradictions.len(), 1);
}
