//! Pure topological predicates shared by the theorem rules.
//!
//! Every test here reasons over registered lines and index positions —
//! never coordinates. "Side" always means side of a pivot point along a
//! registered line, decided by comparing positions.

use super::index::GraphView;
use super::types::{Angle, PointId};
use std::collections::{HashMap, HashSet};

/// The single ray point the two angles share, provided they sit at the
/// same vertex and share exactly one of their two rays.
pub fn shared_ray(a: &Angle, b: &Angle) -> Option<PointId> {
    if a.vertex != b.vertex {
        return None;
    }
    let mut common = a.rays.iter().copied().filter(|&r| b.has_ray(r));
    match (common.next(), common.next()) {
        (Some(r), None) => Some(r),
        _ => None,
    }
}

/// Vertex plus one common ray, irrespective of any collinearity.
pub fn shares_edge(a: &Angle, b: &Angle) -> bool {
    shared_ray(a, b).is_some()
}

fn opposite_sides(view: &GraphView<'_>, line: usize, pivot: PointId, p: PointId, q: PointId) -> bool {
    match (
        view.index.position_on(line, pivot),
        view.index.position_on(line, p),
        view.index.position_on(line, q),
    ) {
        (Some(pivot), Some(p), Some(q)) => (p < pivot && q > pivot) || (p > pivot && q < pivot),
        _ => false,
    }
}

fn same_side(view: &GraphView<'_>, line: usize, pivot: PointId, p: PointId, q: PointId) -> bool {
    match (
        view.index.position_on(line, pivot),
        view.index.position_on(line, p),
        view.index.position_on(line, q),
    ) {
        (Some(pivot), Some(p), Some(q)) => {
            p != q && ((p < pivot && q < pivot) || (p > pivot && q > pivot))
        }
        _ => false,
    }
}

/// Two angles at one vertex whose unshared rays run through the vertex
/// along a registered line, one to each side. Such a pair sums to 180°.
pub fn is_linear_pair(view: &GraphView<'_>, a: &Angle, b: &Angle) -> bool {
    let Some(s) = shared_ray(a, b) else {
        return false;
    };
    let (Some(ra), Some(rb)) = (a.other_ray(s), b.other_ray(s)) else {
        return false;
    };
    if ra == rb {
        return false;
    }
    view.index
        .lines_through(a.vertex)
        .iter()
        .any(|&li| opposite_sides(view, li, a.vertex, ra, rb))
}

/// Two records that denote the same geometric angle: same vertex, one
/// shared ray, and the unshared rays on the same side — either of the
/// vertex along a line through it, or of the shared ray point along a
/// line that misses the vertex. Overlapping angles must be forced equal,
/// never summed.
pub fn is_overlapping(view: &GraphView<'_>, a: &Angle, b: &Angle) -> bool {
    let Some(s) = shared_ray(a, b) else {
        return false;
    };
    let (Some(ra), Some(rb)) = (a.other_ray(s), b.other_ray(s)) else {
        return false;
    };
    if ra == rb {
        return false;
    }
    let vertex = a.vertex;
    if view
        .index
        .lines_through(vertex)
        .iter()
        .any(|&li| same_side(view, li, vertex, ra, rb))
    {
        return true;
    }
    view.index.lines_through(s).iter().any(|&li| {
        view.index.position_on(li, vertex).is_none() && same_side(view, li, s, ra, rb)
    })
}

/// All angles at `vertex` lying between the two extreme collinear rays
/// `n1` and `n2` (consecutive line-neighbors of the vertex): angles that
/// touch an extreme ray, and purely-interior angles between two off-line
/// rays. The straight `n1`–`n2` angle itself and anything using a farther
/// on-line point are excluded. Used to partition a straight angle.
pub fn find_angles_in_sector(
    view: &GraphView<'_>,
    angles: &[Angle],
    vertex: PointId,
    n1: PointId,
    n2: PointId,
) -> Vec<usize> {
    let Some(line) = view.index.line_with_all(vertex, n1, n2) else {
        return Vec::new();
    };
    view.index
        .angles_at(vertex)
        .iter()
        .copied()
        .filter(|&slot| {
            let angle = &angles[slot];
            if angle.has_ray(n1) && angle.has_ray(n2) {
                return false;
            }
            angle
                .rays
                .iter()
                .all(|&r| r == n1 || r == n2 || view.index.position_on(line, r).is_none())
        })
        .collect()
}

/// Chain of angle records at `vertex` that walks ray-to-ray from `from`
/// to `to`, excluding the spanning record itself. This is how a "large"
/// angle finds the sub-angles nested inside it without coordinates.
/// Deterministic: neighbors are explored in slot order.
pub fn subdivision_chain(
    view: &GraphView<'_>,
    angles: &[Angle],
    vertex: PointId,
    from: PointId,
    to: PointId,
    exclude: usize,
) -> Option<Vec<usize>> {
    let mut edges: HashMap<PointId, Vec<(PointId, usize)>> = HashMap::new();
    for &slot in view.index.angles_at(vertex) {
        if slot == exclude {
            continue;
        }
        let angle = &angles[slot];
        let [r1, r2] = angle.rays;
        edges.entry(r1).or_default().push((r2, slot));
        edges.entry(r2).or_default().push((r1, slot));
    }
    for next in edges.values_mut() {
        next.sort_by_key(|&(_, slot)| slot);
    }

    let mut visited = HashSet::from([from]);
    let mut path = Vec::new();
    if walk(&edges, from, to, &mut visited, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn walk(
    edges: &HashMap<PointId, Vec<(PointId, usize)>>,
    at: PointId,
    to: PointId,
    visited: &mut HashSet<PointId>,
    path: &mut Vec<usize>,
) -> bool {
    if at == to {
        return true;
    }
    let Some(nexts) = edges.get(&at) else {
        return false;
    };
    for &(np, slot) in nexts {
        if !visited.insert(np) {
            continue;
        }
        path.push(slot);
        if walk(edges, np, to, visited, path) {
            return true;
        }
        path.pop();
        visited.remove(&np);
    }
    false
}
