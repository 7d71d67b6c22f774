use super::index::{GraphIndex, GraphView};
use super::relations::{
    find_angles_in_sector, is_linear_pair, is_overlapping, shared_ray, shares_edge,
    subdivision_chain,
};
use super::types::{Angle, Diagram};

#[test]
fn shared_ray_requires_exactly_one_common_point() {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let a = diagram.add_named_point("A");
    let b = diagram.add_named_point("B");
    let c = diagram.add_named_point("C");

    let ab = Angle::new(v, a, b);
    let bc = Angle::new(v, b, c);
    let ac = Angle::new(v, a, c);

    assert_eq!(shared_ray(&ab, &bc), Some(b));
    assert_eq!(shared_ray(&ab, &ac), Some(a));
    assert!(shares_edge(&bc, &ac));
}

#[test]
fn linear_pair_needs_opposite_sides_of_the_vertex() {
    let mut diagram = Diagram::new();
    let a = diagram.add_named_point("A");
    let v = diagram.add_named_point("V");
    let b = diagram.add_named_point("B");
    let x = diagram.add_named_point("X");
    diagram.add_line(vec![a, v, b]);
    diagram.connect(v, x);

    diagram.add_angle(Angle::new(v, a, x));
    diagram.add_angle(Angle::new(v, x, b));
    let index = GraphIndex::build(&diagram);
    let view = GraphView {
        adjacency: &diagram.adjacency,
        lines: &diagram.lines,
        circles: &diagram.circles,
        triangles: &diagram.triangles,
        index: &index,
    };

    let (left, right) = (&diagram.angles[0], &diagram.angles[1]);
    assert!(is_linear_pair(&view, left, right));
    assert!(!is_overlapping(&view, left, right));
}

#[test]
fn overlap_on_the_same_side_of_the_vertex() {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let p = diagram.add_named_point("P");
    let q = diagram.add_named_point("Q");
    let x = diagram.add_named_point("X");
    diagram.add_line(vec![v, p, q]);
    diagram.connect(v, x);

    diagram.add_angle(Angle::new(v, x, p));
    diagram.add_angle(Angle::new(v, x, q));
    let index = GraphIndex::build(&diagram);
    let view = GraphView {
        adjacency: &diagram.adjacency,
        lines: &diagram.lines,
        circles: &diagram.circles,
        triangles: &diagram.triangles,
        index: &index,
    };

    let (near, far) = (&diagram.angles[0], &diagram.angles[1]);
    assert!(is_overlapping(&view, near, far));
    assert!(!is_linear_pair(&view, near, far));
}

#[test]
fn overlap_along_a_line_missing_the_vertex() {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let p = diagram.add_named_point("P");
    let q = diagram.add_named_point("Q");
    let r = diagram.add_named_point("R");
    diagram.add_line(vec![p, q, r]);
    for t in [p, q, r] {
        diagram.connect(v, t);
    }

    diagram.add_angle(Angle::new(v, p, q));
    diagram.add_angle(Angle::new(v, p, r));
    let index = GraphIndex::build(&diagram);
    let view = GraphView {
        adjacency: &diagram.adjacency,
        lines: &diagram.lines,
        circles: &diagram.circles,
        triangles: &diagram.triangles,
        index: &index,
    };

    assert!(is_overlapping(&view, &diagram.angles[0], &diagram.angles[1]));
}

#[test]
fn sector_excludes_the_straight_angle_and_far_line_points() {
    let mut diagram = Diagram::new();
    let far = diagram.add_named_point("F");
    let a = diagram.add_named_point("A");
    let v = diagram.add_named_point("V");
    let b = diagram.add_named_point("B");
    let p = diagram.add_named_point("P");
    let q = diagram.add_named_point("Q");
    diagram.add_line(vec![far, a, v, b]);
    diagram.connect(v, p);
    diagram.connect(v, q);

    let s1 = diagram.add_angle(Angle::new(v, a, p));
    let s2 = diagram.add_angle(Angle::new(v, p, q));
    let s3 = diagram.add_angle(Angle::new(v, q, b));
    let straight = diagram.add_angle(Angle::new(v, a, b));
    let beyond = diagram.add_angle(Angle::new(v, far, p));

    let index = GraphIndex::build(&diagram);
    let view = GraphView {
        adjacency: &diagram.adjacency,
        lines: &diagram.lines,
        circles: &diagram.circles,
        triangles: &diagram.triangles,
        index: &index,
    };

    let sector = find_angles_in_sector(&view, &diagram.angles, v, a, b);
    let ids: Vec<_> = sector.iter().map(|&s| diagram.angles[s].id).collect();
    assert!(ids.contains(&s1));
    assert!(ids.contains(&s2));
    assert!(ids.contains(&s3));
    assert!(!ids.contains(&straight), "spanning angle is not its own part");
    assert!(!ids.contains(&beyond), "angles using farther line points are out");
}

#[test]
fn chain_walks_ray_to_ray() {
    let mut diagram = Diagram::new();
    let v = diagram.add_named_point("V");
    let a = diagram.add_named_point("A");
    let m = diagram.add_named_point("M");
    let n = diagram.add_named_point("N");
    let b = diagram.add_named_point("B");

    let large = diagram.add_angle(Angle::new(v, a, b));
    diagram.add_angle(Angle::new(v, a, m));
    diagram.add_angle(Angle::new(v, m, n));
    diagram.add_angle(Angle::new(v, n, b));

    let index = GraphIndex::build(&diagram);
    let view = GraphView {
        adjacency: &diagram.adjacency,
        lines: &diagram.lines,
        circles: &diagram.circles,
        triangles: &diagram.triangles,
        index: &index,
    };

    let large_slot = diagram.angles.iter().position(|x| x.id == large).unwrap();
    let chain = subdivision_chain(&view, &diagram.angles, v, a, b, large_slot)
        .expect("chain should exist");
    assert_eq!(chain.len(), 3);
}
