//! Interactive skeleton editor
//!
//! This module is organized into submodules:
//! - `geometry`: layout projection and hit-testing in render space
//! - `graph`: the editable points, connections and angles with their dependency index
//! - `tools`: the per-tool pointer state machine

mod geometry;
mod graph;
mod tools;

use std::fmt;

pub use geometry::{
    EditorLayout, angle_label_position, distance_point_to_segment, hit_test_angle, hit_test_connection,
    hit_test_point, unsigned_angle,
};
pub use graph::{EditorAngle, EditorConnection, EditorGraph, EditorPoint, LIMBS, Removed};
pub use tools::{Edit, Editor, EditorSettings, Tool, ToolState};

/// Identifier of an [`EditorPoint`], unique within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AngleId(pub u32);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl fmt::Display for AngleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}
