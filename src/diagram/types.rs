//! Core data model for the solver-facing diagram.
//!
//! Everything here is identity and topology: the engine never sees
//! coordinates. Points are bare ids; lines are ordered runs of collinear
//! points; circles stand in for "these points are equidistant from the
//! center"; angles carry the only mutable state (their value).

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a point. We wrap Uuid to ensure strong typing
/// against angle ids and to keep the editor's stable-naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub Uuid);

impl PointId {
    /// Generate a new random PointId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an id from a specific UUID (useful for restoration).
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a deterministic id from a display label (e.g. "A").
    /// Editors and tests mint stable ids from labels this way.
    pub fn new_deterministic(seed: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()))
    }

    /// Short 8-hex form for audit trails and logs.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for PointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

/// Unique identifier for an angle marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AngleId(pub Uuid);

impl AngleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn new_deterministic(seed: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()))
    }

    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for AngleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AngleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

/// A point is identity only; the editor owns its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
}

/// Ordered run of collinear points. Index order is position along the
/// line, so betweenness and side-of queries reduce to index comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line {
    pub points: Vec<PointId>,
}

impl Line {
    pub fn new(points: Vec<PointId>) -> Self {
        Self { points }
    }

    pub fn contains(&self, p: PointId) -> bool {
        self.points.contains(&p)
    }

    pub fn position(&self, p: PointId) -> Option<usize> {
        self.points.iter().position(|&q| q == p)
    }
}

/// Equal-radius proxy: every point in `points` is the same distance from
/// `center`. Substitutes for side-length equality in isosceles/equilateral
/// and inscribed-angle reasoning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(alias = "centerPointId")]
    pub center: PointId,
    #[serde(alias = "pointsOnLine")]
    pub points: Vec<PointId>,
}

impl Circle {
    pub fn new(center: PointId, points: Vec<PointId>) -> Self {
        Self { center, points }
    }

    pub fn on_rim(&self, p: PointId) -> bool {
        self.points.contains(&p)
    }
}

/// Unordered triple of pairwise-adjacent, non-collinear points.
/// Corners are kept sorted so the triple itself is the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[PointId; 3]", into = "[PointId; 3]")]
pub struct Triangle {
    corners: [PointId; 3],
}

impl Triangle {
    pub fn new(a: PointId, b: PointId, c: PointId) -> Self {
        Self::from([a, b, c])
    }

    pub fn corners(&self) -> [PointId; 3] {
        self.corners
    }

    pub fn key(&self) -> [PointId; 3] {
        self.corners
    }

    pub fn contains(&self, p: PointId) -> bool {
        self.corners.contains(&p)
    }

    /// The two corners opposite `vertex`, or None if `vertex` is not a corner.
    pub fn others(&self, vertex: PointId) -> Option<(PointId, PointId)> {
        if !self.contains(vertex) {
            return None;
        }
        let rest: Vec<PointId> = self
            .corners
            .iter()
            .copied()
            .filter(|&p| p != vertex)
            .collect();
        Some((rest[0], rest[1]))
    }
}

impl From<[PointId; 3]> for Triangle {
    fn from(mut corners: [PointId; 3]) -> Self {
        corners.sort();
        Self { corners }
    }
}

impl From<Triangle> for [PointId; 3] {
    fn from(t: Triangle) -> Self {
        t.corners
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.corners[0], self.corners[1], self.corners[2]
        )
    }
}

/// An angle marker at `vertex` between the rays towards `rays[0]` and
/// `rays[1]`. The ray pair is unordered and kept sorted, so
/// `(vertex, rays)` is canonical and unique per diagram.
///
/// `value` is the only field the engine ever mutates. A present
/// `constraint_value` locks the angle: no rule may write to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub id: AngleId,
    pub vertex: PointId,
    #[serde(alias = "rayPair")]
    pub rays: [PointId; 2],
    #[serde(default, deserialize_with = "de_angle_value")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, alias = "constraintValue", skip_serializing_if = "Option::is_none")]
    pub constraint_value: Option<f64>,
    #[serde(default, alias = "isSubdivisionResult")]
    pub is_subdivision_result: bool,
}

impl Angle {
    pub fn new(vertex: PointId, r1: PointId, r2: PointId) -> Self {
        let mut rays = [r1, r2];
        rays.sort();
        Self {
            id: AngleId::new(),
            vertex,
            rays,
            value: None,
            label: None,
            constraint_value: None,
            is_subdivision_result: false,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// User-asserted value: locks the angle and seeds its value.
    pub fn locked(mut self, value: f64) -> Self {
        self.constraint_value = Some(value);
        self.value = Some(value);
        self
    }

    /// Canonical `(vertex, sorted ray pair)` key.
    pub fn key(&self) -> (PointId, PointId, PointId) {
        (self.vertex, self.rays[0], self.rays[1])
    }

    pub fn is_known(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.constraint_value.is_some()
    }

    pub fn has_ray(&self, p: PointId) -> bool {
        self.rays[0] == p || self.rays[1] == p
    }

    /// The ray point that is not `p`, if `p` is one of the two rays.
    pub fn other_ray(&self, p: PointId) -> Option<PointId> {
        if self.rays[0] == p {
            Some(self.rays[1])
        } else if self.rays[1] == p {
            Some(self.rays[0])
        } else {
            None
        }
    }

    /// Non-empty label, treated as an equivalence-class tag.
    pub fn equivalence_label(&self) -> Option<&str> {
        match self.label.as_deref() {
            Some(l) if !l.trim().is_empty() => Some(l),
            _ => None,
        }
    }

    /// Display name for the audit trail: the label when present, else a
    /// `∠ray-vertex-ray` form built from the ids' short display.
    pub fn name(&self) -> String {
        match self.equivalence_label() {
            Some(l) => l.to_string(),
            None => format!("∠{}-{}-{}", self.rays[0], self.vertex, self.rays[1]),
        }
    }
}

/// Accepts a number, `null`, or the legacy `"?"` sentinel as "unknown".
fn de_angle_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => {
            let t = s.trim();
            if t == "?" || t.is_empty() {
                Ok(None)
            } else {
                t.parse::<f64>().map(Some).map_err(|_| {
                    serde::de::Error::custom(format!("invalid angle value '{s}'"))
                })
            }
        }
    }
}

/// The full editor snapshot: topology plus the mutable angle list.
///
/// The editor constructs every entity; the engine mutates only
/// `Angle::value` (in place for a real solve, on a clone for a dry run)
/// and creates or destroys nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default, alias = "adjacentPoints")]
    pub adjacency: HashMap<PointId, HashSet<PointId>>,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub circles: Vec<Circle>,
    #[serde(default)]
    pub triangles: Vec<Triangle>,
    #[serde(default)]
    pub angles: Vec<Angle>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self) -> PointId {
        let id = PointId::new();
        self.points.push(Point { id });
        self.adjacency.entry(id).or_default();
        id
    }

    /// Register a point with a deterministic id derived from `name`.
    pub fn add_named_point(&mut self, name: &str) -> PointId {
        let id = PointId::new_deterministic(name);
        self.points.push(Point { id });
        self.adjacency.entry(id).or_default();
        id
    }

    /// Record the undirected edge a—b.
    pub fn connect(&mut self, a: PointId, b: PointId) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    pub fn neighbors(&self, p: PointId) -> Option<&HashSet<PointId>> {
        self.adjacency.get(&p)
    }

    pub fn degree(&self, p: PointId) -> usize {
        self.adjacency.get(&p).map_or(0, |n| n.len())
    }

    /// Register an ordered collinear run and connect consecutive points,
    /// mirroring how the editor draws a polyline.
    pub fn add_line(&mut self, points: Vec<PointId>) {
        for pair in points.windows(2) {
            self.connect(pair[0], pair[1]);
        }
        self.lines.push(Line::new(points));
    }

    pub fn add_circle(&mut self, center: PointId, points: Vec<PointId>) {
        self.circles.push(Circle::new(center, points));
    }

    /// Register a triangle and its three edges.
    pub fn add_triangle(&mut self, a: PointId, b: PointId, c: PointId) {
        self.connect(a, b);
        self.connect(b, c);
        self.connect(a, c);
        self.triangles.push(Triangle::new(a, b, c));
    }

    pub fn add_angle(&mut self, angle: Angle) -> AngleId {
        let id = angle.id;
        self.angles.push(angle);
        id
    }

    pub fn angle(&self, id: AngleId) -> Option<&Angle> {
        self.angles.iter().find(|a| a.id == id)
    }

    pub fn angle_mut(&mut self, id: AngleId) -> Option<&mut Angle> {
        self.angles.iter_mut().find(|a| a.id == id)
    }

    pub fn angle_value(&self, id: AngleId) -> Option<f64> {
        self.angle(id).and_then(|a| a.value)
    }

    /// Number of angles with a known value.
    pub fn known_count(&self) -> usize {
        self.angles.iter().filter(|a| a.is_known()).count()
    }
}
