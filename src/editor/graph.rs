//! The editable graph of points, connections and angles
//!
//! Storage is ordered: insertion order is hit-test priority. A dependency
//! index is kept next to the storage so duplicate checks and cascading
//! deletes never scan the whole graph.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use glam::DVec2;

use super::geometry::{self, EditorLayout};
use super::{AngleId, ConnectionId, PointId};
use crate::errors::GraphError;
use crate::skeleton::{Keypoint, Side, SkeletonData};
use crate::types::{Degrees, Point};

/// Limb segments drawn between detected keypoints (COCO pose skeleton).
pub const LIMBS: [(Keypoint, Keypoint); 19] = [
    (Keypoint::LeftAnkle, Keypoint::LeftKnee),
    (Keypoint::LeftKnee, Keypoint::LeftHip),
    (Keypoint::RightAnkle, Keypoint::RightKnee),
    (Keypoint::RightKnee, Keypoint::RightHip),
    (Keypoint::LeftHip, Keypoint::RightHip),
    (Keypoint::LeftShoulder, Keypoint::LeftHip),
    (Keypoint::RightShoulder, Keypoint::RightHip),
    (Keypoint::LeftShoulder, Keypoint::RightShoulder),
    (Keypoint::LeftShoulder, Keypoint::LeftElbow),
    (Keypoint::RightShoulder, Keypoint::RightElbow),
    (Keypoint::LeftElbow, Keypoint::LeftWrist),
    (Keypoint::RightElbow, Keypoint::RightWrist),
    (Keypoint::LeftEye, Keypoint::RightEye),
    (Keypoint::Nose, Keypoint::LeftEye),
    (Keypoint::Nose, Keypoint::RightEye),
    (Keypoint::LeftEye, Keypoint::LeftEar),
    (Keypoint::RightEye, Keypoint::RightEar),
    (Keypoint::LeftEar, Keypoint::LeftShoulder),
    (Keypoint::RightEar, Keypoint::RightShoulder),
];

/// A draggable point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorPoint {
    pub id: PointId,
    pub x: f64,
    pub y: f64,
    /// Set for points seeded from a detected skeleton.
    pub keypoint: Option<Keypoint>,
}

impl EditorPoint {
    pub fn new(id: PointId, position: Point) -> Self {
        EditorPoint {
            id,
            x: position.x,
            y: position.y,
            keypoint: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A line between two points. Stored with a direction, compared without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConnection {
    pub id: ConnectionId,
    pub from: PointId,
    pub to: PointId,
}

impl EditorConnection {
    pub fn new(id: ConnectionId, from: PointId, to: PointId) -> Self {
        EditorConnection { id, from, to }
    }
}

/// An angle at `center` between the arms toward `p1` and `p2`. Its value is
/// always measured from the current point positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorAngle {
    pub id: AngleId,
    pub p1: PointId,
    pub center: PointId,
    pub p2: PointId,
}

impl EditorAngle {
    pub fn points(&self) -> [PointId; 3] {
        [self.p1, self.center, self.p2]
    }
}

/// Everything one removal took out of the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removed {
    pub points: Vec<PointId>,
    pub connections: Vec<ConnectionId>,
    pub angles: Vec<AngleId>,
}

impl Removed {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.connections.is_empty() && self.angles.is_empty()
    }
}

/// Order-insensitive key of two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Pair(PointId, PointId);

impl Pair {
    fn new(a: PointId, b: PointId) -> Self {
        if a <= b { Pair(a, b) } else { Pair(b, a) }
    }
}

/// Center plus unordered arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct AngleKey {
    center: PointId,
    arms: Pair,
}

impl AngleKey {
    fn of(angle: &EditorAngle) -> Self {
        AngleKey {
            center: angle.center,
            arms: Pair::new(angle.p1, angle.p2),
        }
    }
}

/// Reverse references from points and point pairs to what depends on them.
#[derive(Debug, Clone, Default)]
struct DependencyIndex {
    point_connections: HashMap<PointId, Vec<ConnectionId>>,
    point_angles: HashMap<PointId, Vec<AngleId>>,
    /// Angles with `center` on one point of the pair and an arm on the other;
    /// removing a connection over that pair removes them.
    pair_angles: HashMap<Pair, Vec<AngleId>>,
    connection_pairs: HashMap<Pair, ConnectionId>,
    angle_keys: HashSet<AngleKey>,
}

impl DependencyIndex {
    fn link_connection(&mut self, c: &EditorConnection) {
        self.point_connections.entry(c.from).or_default().push(c.id);
        self.point_connections.entry(c.to).or_default().push(c.id);
        self.connection_pairs.insert(Pair::new(c.from, c.to), c.id);
    }

    fn unlink_connection(&mut self, c: &EditorConnection) {
        for p in [c.from, c.to] {
            detach(&mut self.point_connections, p, c.id);
        }
        self.connection_pairs.remove(&Pair::new(c.from, c.to));
    }

    fn link_angle(&mut self, a: &EditorAngle) {
        for p in a.points() {
            self.point_angles.entry(p).or_default().push(a.id);
        }
        for arm in [a.p1, a.p2] {
            self.pair_angles.entry(Pair::new(a.center, arm)).or_default().push(a.id);
        }
        self.angle_keys.insert(AngleKey::of(a));
    }

    fn unlink_angle(&mut self, a: &EditorAngle) {
        for p in a.points() {
            detach(&mut self.point_angles, p, a.id);
        }
        for arm in [a.p1, a.p2] {
            detach(&mut self.pair_angles, Pair::new(a.center, arm), a.id);
        }
        self.angle_keys.remove(&AngleKey::of(a));
    }

    fn unlink_point(&mut self, p: PointId) {
        self.point_connections.remove(&p);
        self.point_angles.remove(&p);
    }

    fn is_empty(&self) -> bool {
        self.point_connections.is_empty()
            && self.point_angles.is_empty()
            && self.pair_angles.is_empty()
            && self.connection_pairs.is_empty()
            && self.angle_keys.is_empty()
    }
}

/// Drop `id` from the list under `key`, and the entry once it is empty.
fn detach<K, V>(map: &mut HashMap<K, Vec<V>>, key: K, id: V)
where
    K: Eq + Hash,
    V: PartialEq,
{
    if let Some(list) = map.get_mut(&key) {
        list.retain(|v| *v != id);
        if list.is_empty() {
            map.remove(&key);
        }
    }
}

/// Points, connections and angles under edit.
#[derive(Debug, Clone, Default)]
pub struct EditorGraph {
    points: Vec<EditorPoint>,
    connections: Vec<EditorConnection>,
    angles: Vec<EditorAngle>,
    index: DependencyIndex,
    next_point: u32,
    next_connection: u32,
    next_angle: u32,
}

impl EditorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// One tagged point per present keypoint plus every limb whose two
    /// endpoints are present. Positions are taken as normalized.
    pub fn from_skeleton(skeleton: &SkeletonData) -> Self {
        let mut graph = EditorGraph::new();
        let mut ids = HashMap::new();
        for (keypoint, position) in skeleton.iter() {
            let id = graph.insert_point(position, Some(keypoint));
            ids.insert(keypoint, id);
        }
        for (a, b) in LIMBS {
            if let (Some(from), Some(to)) = (ids.get(&a), ids.get(&b)) {
                graph.insert_connection(*from, *to);
            }
        }
        crate::log::debug!(
            points = graph.points.len(),
            connections = graph.connections.len(),
            "seeded editor graph from skeleton"
        );
        graph
    }

    /// Keypoint-tagged points back as a skeleton; untagged points are left out.
    pub fn to_skeleton(&self) -> SkeletonData {
        let mut skeleton = SkeletonData::new();
        for p in &self.points {
            if let Some(keypoint) = p.keypoint {
                skeleton.set(keypoint, Some(p.position()));
            }
        }
        skeleton
    }

    pub fn points(&self) -> &[EditorPoint] {
        &self.points
    }

    pub fn connections(&self) -> &[EditorConnection] {
        &self.connections
    }

    pub fn angles(&self) -> &[EditorAngle] {
        &self.angles
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, id: PointId) -> Option<&EditorPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&EditorConnection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn angle(&self, id: AngleId) -> Option<&EditorAngle> {
        self.angles.iter().find(|a| a.id == id)
    }

    pub fn position(&self, id: PointId) -> Option<Point> {
        self.point(id).map(EditorPoint::position)
    }

    /// The connection between two points, in either direction.
    pub fn find_connection(&self, a: PointId, b: PointId) -> Option<ConnectionId> {
        self.index.connection_pairs.get(&Pair::new(a, b)).copied()
    }

    /// Whether an angle at `center` with these arms exists, in either arm order.
    pub fn has_angle(&self, p1: PointId, center: PointId, p2: PointId) -> bool {
        self.index.angle_keys.contains(&AngleKey {
            center,
            arms: Pair::new(p1, p2),
        })
    }

    pub fn connections_of(&self, point: PointId) -> &[ConnectionId] {
        self.index.point_connections.get(&point).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn angles_of(&self, point: PointId) -> &[AngleId] {
        self.index.point_angles.get(&point).map(Vec::as_slice).unwrap_or(&[])
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    pub fn add_point(&mut self, position: Point) -> PointId {
        self.insert_point(position, None)
    }

    /// Connect two existing points. `Ok(None)` when they are the same point
    /// or already connected in either direction.
    pub fn add_connection(&mut self, from: PointId, to: PointId) -> Result<Option<ConnectionId>, GraphError> {
        self.require_point(from)?;
        self.require_point(to)?;
        if from == to || self.find_connection(from, to).is_some() {
            return Ok(None);
        }
        Ok(Some(self.insert_connection(from, to)))
    }

    /// Add an angle at `center`. `Ok(None)` when two references coincide or
    /// an angle with the same center and arms exists.
    pub fn add_angle(&mut self, p1: PointId, center: PointId, p2: PointId) -> Result<Option<AngleId>, GraphError> {
        for p in [p1, center, p2] {
            self.require_point(p)?;
        }
        if p1 == center || p2 == center || p1 == p2 || self.has_angle(p1, center, p2) {
            return Ok(None);
        }
        let id = AngleId(self.next_angle);
        self.next_angle += 1;
        let angle = EditorAngle { id, p1, center, p2 };
        self.index.link_angle(&angle);
        self.angles.push(angle);
        crate::log::debug!(%id, %p1, %center, %p2, "added angle");
        Ok(Some(id))
    }

    /// Reposition a point. Coordinates are not clamped to the image.
    pub fn move_point(&mut self, id: PointId, position: Point) -> Result<(), GraphError> {
        let point = self
            .points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GraphError::UnknownPoint(id))?;
        point.x = position.x;
        point.y = position.y;
        Ok(())
    }

    /// Remove a point with every connection and angle that references it.
    pub fn remove_point(&mut self, id: PointId) -> Result<Removed, GraphError> {
        self.require_point(id)?;
        let mut removed = Removed::default();
        for angle in self.angles_of(id).to_vec() {
            self.take_angle(angle, &mut removed);
        }
        for connection in self.connections_of(id).to_vec() {
            self.take_connection(connection, &mut removed);
        }
        self.points.retain(|p| p.id != id);
        self.index.unlink_point(id);
        removed.points.push(id);
        crate::log::debug!(%id, connections = removed.connections.len(), angles = removed.angles.len(), "removed point");
        Ok(removed)
    }

    /// Remove a connection and the angles built on it: those centered on one
    /// of its endpoints with an arm on the other.
    pub fn remove_connection(&mut self, id: ConnectionId) -> Result<Removed, GraphError> {
        let connection = *self.connection(id).ok_or(GraphError::UnknownConnection(id))?;
        let mut removed = Removed::default();
        let derived = self
            .index
            .pair_angles
            .get(&Pair::new(connection.from, connection.to))
            .cloned()
            .unwrap_or_default();
        for angle in derived {
            self.take_angle(angle, &mut removed);
        }
        self.take_connection(id, &mut removed);
        crate::log::debug!(%id, angles = removed.angles.len(), "removed connection");
        Ok(removed)
    }

    pub fn remove_angle(&mut self, id: AngleId) -> Result<Removed, GraphError> {
        if self.angle(id).is_none() {
            return Err(GraphError::UnknownAngle(id));
        }
        let mut removed = Removed::default();
        self.take_angle(id, &mut removed);
        Ok(removed)
    }

    // ------------------------------------------------------------------------
    // Queries for the tools
    // ------------------------------------------------------------------------

    /// The angle two connections form at their shared vertex, as
    /// `(p1, center, p2)`. `p1` is the far end of `a`, `p2` the far end of `b`.
    pub fn shared_vertex(&self, a: ConnectionId, b: ConnectionId) -> Option<(PointId, PointId, PointId)> {
        let a = self.connection(a)?;
        let b = self.connection(b)?;
        [
            (a.from, b.from, a.to, b.to),
            (a.from, b.to, a.to, b.from),
            (a.to, b.from, a.from, b.to),
            (a.to, b.to, a.from, b.from),
        ]
        .into_iter()
        .find(|(va, vb, _, _)| va == vb)
        .map(|(center, _, p1, p2)| (p1, center, p2))
    }

    /// Side used to color a connection: left or right when both endpoints are
    /// keypoints of that side, center otherwise.
    pub fn connection_side(&self, id: ConnectionId) -> Option<Side> {
        let c = self.connection(id)?;
        let side_of = |p: PointId| self.point(p).and_then(|p| p.keypoint).map(Keypoint::side);
        Some(match (side_of(c.from), side_of(c.to)) {
            (Some(Side::Left), Some(Side::Left)) => Side::Left,
            (Some(Side::Right), Some(Side::Right)) => Side::Right,
            _ => Side::Center,
        })
    }

    /// Display value of an angle, measured in render space.
    pub fn angle_degrees(&self, id: AngleId, layout: &EditorLayout) -> Option<Degrees> {
        let a = self.angle(id)?;
        let project = |p: PointId| self.position(p).map(|pos| layout.project(pos));
        Some(geometry::unsigned_angle(project(a.p1)?, project(a.center)?, project(a.p2)?))
    }

    pub fn hit_point(&self, cursor: DVec2, layout: &EditorLayout, tolerance: f64) -> Option<PointId> {
        geometry::hit_test_point(cursor, &self.points, layout, tolerance)
    }

    pub fn hit_connection(&self, cursor: DVec2, layout: &EditorLayout, tolerance: f64) -> Option<ConnectionId> {
        geometry::hit_test_connection(cursor, &self.connections, |p| self.position(p), layout, tolerance)
    }

    pub fn hit_angle(&self, cursor: DVec2, layout: &EditorLayout, tolerance: f64, radius: f64) -> Option<AngleId> {
        geometry::hit_test_angle(cursor, &self.angles, |p| self.position(p), layout, tolerance, radius)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn require_point(&self, id: PointId) -> Result<(), GraphError> {
        match self.point(id) {
            Some(_) => Ok(()),
            None => Err(GraphError::UnknownPoint(id)),
        }
    }

    fn insert_point(&mut self, position: Point, keypoint: Option<Keypoint>) -> PointId {
        let id = PointId(self.next_point);
        self.next_point += 1;
        self.points.push(EditorPoint {
            keypoint,
            ..EditorPoint::new(id, position)
        });
        id
    }

    fn insert_connection(&mut self, from: PointId, to: PointId) -> ConnectionId {
        let id = ConnectionId(self.next_connection);
        self.next_connection += 1;
        let connection = EditorConnection::new(id, from, to);
        self.index.link_connection(&connection);
        self.connections.push(connection);
        id
    }

    fn take_connection(&mut self, id: ConnectionId, removed: &mut Removed) {
        if let Some(pos) = self.connections.iter().position(|c| c.id == id) {
            let connection = self.connections.remove(pos);
            self.index.unlink_connection(&connection);
            removed.connections.push(id);
        }
    }

    fn take_angle(&mut self, id: AngleId, removed: &mut Removed) {
        if let Some(pos) = self.angles.iter().position(|a| a.id == id) {
            let angle = self.angles.remove(pos);
            self.index.unlink_angle(&angle);
            removed.angles.push(id);
        }
    }
}
