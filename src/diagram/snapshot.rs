//! Snapshot parsing and structural validation.
//!
//! The editor serializes its scene as JSON (camelCase field names are
//! accepted as aliases on the types themselves). Parsing always runs the
//! structural validation below, so the solver can assume every id it
//! meets resolves to a registered point and every angle key is unique.

use super::types::{Diagram, PointId};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while ingesting an editor snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{context} references unregistered point {id}")]
    UnknownPoint { context: String, id: PointId },

    #[error("angle {name} repeats the (vertex, ray pair) key of another angle")]
    DuplicateAngle { name: String },

    #[error("angle {name} is degenerate: {detail}")]
    DegenerateAngle { name: String, detail: String },

    #[error("line {index} has fewer than 2 points")]
    ShortLine { index: usize },

    #[error("triangle {index} repeats a corner")]
    DegenerateTriangle { index: usize },
}

impl Diagram {
    /// Parse a JSON snapshot and validate it structurally.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let diagram: Diagram = serde_json::from_str(json)?;
        diagram.validate()?;
        Ok(diagram)
    }

    /// Check that every referenced point id is registered, lines are
    /// non-trivial, triangles have distinct corners, and angle keys are
    /// unique and non-degenerate.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let ids: HashSet<PointId> = self.points.iter().map(|p| p.id).collect();
        let check = |context: &str, id: PointId| -> Result<(), SnapshotError> {
            if ids.contains(&id) {
                Ok(())
            } else {
                Err(SnapshotError::UnknownPoint {
                    context: context.to_string(),
                    id,
                })
            }
        };

        for (&p, neighbors) in &self.adjacency {
            check("adjacency", p)?;
            for &n in neighbors {
                check("adjacency", n)?;
            }
        }

        for (index, line) in self.lines.iter().enumerate() {
            if line.points.len() < 2 {
                return Err(SnapshotError::ShortLine { index });
            }
            for &p in &line.points {
                check("line", p)?;
            }
        }

        for circle in &self.circles {
            check("circle center", circle.center)?;
            for &p in &circle.points {
                check("circle rim", p)?;
            }
        }

        for (index, triangle) in self.triangles.iter().enumerate() {
            let [a, b, c] = triangle.corners();
            if a == b || b == c || a == c {
                return Err(SnapshotError::DegenerateTriangle { index });
            }
            for p in triangle.corners() {
                check("triangle", p)?;
            }
        }

        let mut keys = HashSet::new();
        for angle in &self.angles {
            check("angle vertex", angle.vertex)?;
            for &r in &angle.rays {
                check("angle ray", r)?;
            }
            if angle.rays[0] == angle.rays[1] {
                return Err(SnapshotError::DegenerateAngle {
                    name: angle.name(),
                    detail: "both rays point at the same point".to_string(),
                });
            }
            if angle.has_ray(angle.vertex) {
                return Err(SnapshotError::DegenerateAngle {
                    name: angle.name(),
                    detail: "a ray points at the vertex".to_string(),
                });
            }
            if !keys.insert(angle.key()) {
                return Err(SnapshotError::DuplicateAngle { name: angle.name() });
            }
        }

        Ok(())
    }
}
