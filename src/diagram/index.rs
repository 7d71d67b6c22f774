//! Per-solve lookup indices.
//!
//! Rebuilt once per solve call from the snapshot. Angle topology (vertex,
//! rays) never changes during a solve — only values do — so slot indices
//! stay valid for the whole call.

use super::types::{Angle, Circle, Diagram, Line, PointId, Triangle};
use std::collections::{HashMap, HashSet};
use tracing::warn;

const NO_ANGLES: &[usize] = &[];
const NO_LINES: &[usize] = &[];

/// O(1) lookups over one diagram: angles by vertex, angles by canonical
/// key, triangles by sorted corner triple, and line membership with
/// positions (order along a line answers betweenness by index compare).
#[derive(Debug, Default)]
pub struct GraphIndex {
    angles_by_vertex: HashMap<PointId, Vec<usize>>,
    angle_by_key: HashMap<(PointId, PointId, PointId), usize>,
    triangle_by_key: HashMap<[PointId; 3], usize>,
    line_positions: Vec<HashMap<PointId, usize>>,
    lines_through: HashMap<PointId, Vec<usize>>,
}

impl GraphIndex {
    pub fn build(diagram: &Diagram) -> Self {
        let mut index = GraphIndex::default();

        for (slot, angle) in diagram.angles.iter().enumerate() {
            index
                .angles_by_vertex
                .entry(angle.vertex)
                .or_default()
                .push(slot);
            if index.angle_by_key.insert(angle.key(), slot).is_some() {
                warn!(angle = %angle.name(), "duplicate angle key; later record wins");
            }
        }

        for (slot, triangle) in diagram.triangles.iter().enumerate() {
            index.triangle_by_key.insert(triangle.key(), slot);
        }

        for (slot, line) in diagram.lines.iter().enumerate() {
            let mut positions = HashMap::new();
            for (pos, &p) in line.points.iter().enumerate() {
                positions.insert(p, pos);
                index.lines_through.entry(p).or_default().push(slot);
            }
            index.line_positions.push(positions);
        }

        index
    }

    /// Slots of all angles at `vertex`, in snapshot order.
    pub fn angles_at(&self, vertex: PointId) -> &[usize] {
        self.angles_by_vertex
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or(NO_ANGLES)
    }

    /// Exact angle lookup by vertex and unordered ray pair.
    pub fn find_angle(&self, vertex: PointId, r1: PointId, r2: PointId) -> Option<usize> {
        let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        self.angle_by_key.get(&(vertex, lo, hi)).copied()
    }

    /// Triangle lookup by its three corners in any order.
    pub fn find_triangle(&self, a: PointId, b: PointId, c: PointId) -> Option<usize> {
        let mut key = [a, b, c];
        key.sort();
        self.triangle_by_key.get(&key).copied()
    }

    /// Indices of lines passing through `p`.
    pub fn lines_through(&self, p: PointId) -> &[usize] {
        self.lines_through
            .get(&p)
            .map(Vec::as_slice)
            .unwrap_or(NO_LINES)
    }

    /// Position of `p` along line `line`, if it lies on it.
    pub fn position_on(&self, line: usize, p: PointId) -> Option<usize> {
        self.line_positions.get(line)?.get(&p).copied()
    }

    /// First line containing both points, if any.
    pub fn line_with(&self, a: PointId, b: PointId) -> Option<usize> {
        self.lines_through(a)
            .iter()
            .copied()
            .find(|&li| self.position_on(li, b).is_some())
    }

    /// First line containing all three points, if any.
    pub fn line_with_all(&self, a: PointId, b: PointId, c: PointId) -> Option<usize> {
        self.lines_through(a).iter().copied().find(|&li| {
            self.position_on(li, b).is_some() && self.position_on(li, c).is_some()
        })
    }
}

/// Read-only view of one diagram's topology plus its per-solve index.
/// Rules receive this alongside the mutable angle slice, which keeps the
/// dry-run checker able to share topology while cloning only angles.
pub struct GraphView<'a> {
    pub adjacency: &'a HashMap<PointId, HashSet<PointId>>,
    pub lines: &'a [Line],
    pub circles: &'a [Circle],
    pub triangles: &'a [Triangle],
    pub index: &'a GraphIndex,
}

impl<'a> GraphView<'a> {
    pub fn degree(&self, p: PointId) -> usize {
        self.adjacency.get(&p).map_or(0, |n| n.len())
    }
}

/// Slot-order iteration over the distinct vertices that carry angles,
/// deterministic because it follows the snapshot's angle order.
pub fn vertices_in_order(angles: &[Angle]) -> Vec<PointId> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for angle in angles {
        if seen.insert(angle.vertex) {
            out.push(angle.vertex);
        }
    }
    out
}
