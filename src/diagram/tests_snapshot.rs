use super::types::{Angle, Diagram, PointId};

fn uuid_of(name: &str) -> String {
    PointId::new_deterministic(name).0.to_string()
}

#[test]
fn parses_a_camel_case_editor_snapshot() {
    let (a, v, b) = (uuid_of("A"), uuid_of("V"), uuid_of("B"));
    let json = format!(
        r#"{{
            "points": [{{"id": "{a}"}}, {{"id": "{v}"}}, {{"id": "{b}"}}],
            "adjacentPoints": {{"{v}": ["{a}", "{b}"]}},
            "lines": [["{a}", "{v}", "{b}"]],
            "circles": [{{"centerPointId": "{v}", "pointsOnLine": ["{a}", "{b}"]}}],
            "triangles": [],
            "angles": [
                {{"id": "{angle}", "vertex": "{v}", "rayPair": ["{a}", "{b}"], "value": "?", "label": "x", "constraintValue": 90.0}}
            ]
        }}"#,
        angle = uuid_of("angle-1"),
    );

    let diagram = Diagram::from_json(&json).expect("snapshot should parse");
    assert_eq!(diagram.points.len(), 3);
    assert_eq!(diagram.lines[0].points.len(), 3);
    assert_eq!(diagram.circles[0].points.len(), 2);

    let angle = &diagram.angles[0];
    assert_eq!(angle.value, None, "the '?' sentinel means unknown");
    assert_eq!(angle.constraint_value, Some(90.0));
    assert_eq!(angle.equivalence_label(), Some("x"));
}

#[test]
fn rejects_angles_at_unregistered_points() {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let a = diagram.add_named_point("A");
    let ghost = PointId::new_deterministic("ghost");
    diagram.add_angle(Angle::new(v, a, ghost));

    assert!(diagram.validate().is_err());
}

#[test]
fn rejects_duplicate_angle_keys() {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let a = diagram.add_named_point("A");
    let b = diagram.add_named_point("B");
    diagram.add_angle(Angle::new(v, a, b));
    diagram.add_angle(Angle::new(v, b, a));

    assert!(diagram.validate().is_err());
}

#[test]
fn diagram_round_trips_through_json() {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let a = diagram.add_named_point("A");
    let b = diagram.add_named_point("B");
    diagram.add_line(vec![a, v, b]);
    diagram.add_angle(Angle::new(v, a, b).with_value(110.0));

    let json = serde_json::to_string(&diagram).expect("serialize");
    let back = Diagram::from_json(&json).expect("parse");
    assert_eq!(diagram, back);
}
