pub mod index;
pub mod relations;
pub mod snapshot;
pub mod types;

pub use index::{GraphIndex, GraphView};
pub use snapshot::SnapshotError;
pub use types::{Angle, AngleId, Circle, Diagram, Line, Point, PointId, Triangle};

#[cfg(test)]
mod tests_relations;
#[cfg(test)]
mod tests_snapshot;
