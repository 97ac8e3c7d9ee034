//! Pointer handling per editing tool
//!
//! Each tool owns its transient state (a drag, a pending connection start,
//! a connection selection) inside one [`ToolState`] value. Switching tools
//! replaces that value, so nothing carries over between tools.

use glam::DVec2;

use super::geometry::EditorLayout;
use super::graph::{EditorGraph, Removed};
use super::{AngleId, ConnectionId, PointId};
use crate::defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Move,
    AddPoint,
    Connect,
    Angle,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolState {
    Move { dragging: Option<PointId> },
    AddPoint,
    Connect { pending: Option<PointId> },
    Angle { selected: Vec<ConnectionId> },
    Delete,
}

impl ToolState {
    /// Fresh state for `tool` with nothing in progress.
    pub fn idle(tool: Tool) -> Self {
        match tool {
            Tool::Move => ToolState::Move { dragging: None },
            Tool::AddPoint => ToolState::AddPoint,
            Tool::Connect => ToolState::Connect { pending: None },
            Tool::Angle => ToolState::Angle { selected: Vec::new() },
            Tool::Delete => ToolState::Delete,
        }
    }

    pub fn tool(&self) -> Tool {
        match self {
            ToolState::Move { .. } => Tool::Move,
            ToolState::AddPoint => Tool::AddPoint,
            ToolState::Connect { .. } => Tool::Connect,
            ToolState::Angle { .. } => Tool::Angle,
            ToolState::Delete => Tool::Delete,
        }
    }
}

/// Pick tolerances and label placement, in render-space pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    pub point_tolerance: f64,
    pub drag_tolerance: f64,
    pub connection_tolerance: f64,
    pub angle_label_tolerance: f64,
    pub angle_label_radius: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            point_tolerance: defaults::POINT_TOLERANCE,
            drag_tolerance: defaults::DRAG_TOLERANCE,
            connection_tolerance: defaults::CONNECTION_TOLERANCE,
            angle_label_tolerance: defaults::ANGLE_LABEL_TOLERANCE,
            angle_label_radius: defaults::ANGLE_LABEL_RADIUS,
        }
    }
}

/// What a pointer event changed, so the host knows what to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    PointAdded(PointId),
    PointMoved(PointId),
    ConnectionAdded(ConnectionId),
    AngleAdded(AngleId),
    Removed(Removed),
    /// Only the tool's transient state changed (drag, pending start, selection).
    Selection,
}

/// An editing session: the graph, how it is laid out, and the active tool.
#[derive(Debug, Clone)]
pub struct Editor {
    graph: EditorGraph,
    layout: EditorLayout,
    settings: EditorSettings,
    state: ToolState,
}

impl Editor {
    pub fn new(graph: EditorGraph, layout: EditorLayout) -> Self {
        Editor {
            graph,
            layout,
            settings: EditorSettings::default(),
            state: ToolState::idle(Tool::default()),
        }
    }

    pub fn with_settings(mut self, settings: EditorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn graph(&self) -> &EditorGraph {
        &self.graph
    }

    pub fn into_graph(self) -> EditorGraph {
        self.graph
    }

    pub fn layout(&self) -> &EditorLayout {
        &self.layout
    }

    /// Called when the image or the viewport is resized.
    pub fn set_layout(&mut self, layout: EditorLayout) {
        self.layout = layout;
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn tool(&self) -> Tool {
        self.state.tool()
    }

    /// Activate `tool`, dropping whatever the previous tool had in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        crate::log::debug!(?tool, "tool switched");
        self.state = ToolState::idle(tool);
    }

    pub fn pointer_down(&mut self, cursor: DVec2) -> Option<Edit> {
        match self.state.tool() {
            Tool::Move => self.begin_drag(cursor),
            Tool::AddPoint => self.add_point(cursor),
            Tool::Connect => self.connect(cursor),
            Tool::Angle => self.select_for_angle(cursor),
            Tool::Delete => self.delete(cursor),
        }
    }

    /// Drags the active point under MOVE. Positions may leave the image.
    pub fn pointer_move(&mut self, cursor: DVec2) -> Option<Edit> {
        let ToolState::Move { dragging: Some(id) } = self.state else {
            return None;
        };
        self.graph.move_point(id, self.layout.unproject(cursor)).ok()?;
        Some(Edit::PointMoved(id))
    }

    /// Ends any drag, whatever the tool.
    pub fn pointer_up(&mut self) -> Option<Edit> {
        match &mut self.state {
            ToolState::Move { dragging } => dragging.take().map(|_| Edit::Selection),
            _ => None,
        }
    }

    fn begin_drag(&mut self, cursor: DVec2) -> Option<Edit> {
        let hit = self.graph.hit_point(cursor, &self.layout, self.settings.drag_tolerance)?;
        self.state = ToolState::Move { dragging: Some(hit) };
        Some(Edit::Selection)
    }

    fn add_point(&mut self, cursor: DVec2) -> Option<Edit> {
        if self.graph.hit_point(cursor, &self.layout, self.settings.point_tolerance).is_some() {
            return None;
        }
        let position = self.layout.unproject(cursor);
        if !position.is_normalized() {
            return None;
        }
        let id = self.graph.add_point(position);
        crate::log::debug!(%id, x = position.x, y = position.y, "added point");
        Some(Edit::PointAdded(id))
    }

    fn connect(&mut self, cursor: DVec2) -> Option<Edit> {
        let hit = self.graph.hit_point(cursor, &self.layout, self.settings.point_tolerance);
        let ToolState::Connect { pending } = &mut self.state else {
            return None;
        };
        let Some(hit) = hit else {
            return pending.take().map(|_| Edit::Selection);
        };
        let Some(start) = pending.take() else {
            *pending = Some(hit);
            return Some(Edit::Selection);
        };
        // The pending start clears whether or not a connection results
        match self.graph.add_connection(start, hit) {
            Ok(Some(id)) => {
                crate::log::debug!(%id, from = %start, to = %hit, "added connection");
                Some(Edit::ConnectionAdded(id))
            }
            Ok(None) | Err(_) => Some(Edit::Selection),
        }
    }

    fn select_for_angle(&mut self, cursor: DVec2) -> Option<Edit> {
        let hit = self
            .graph
            .hit_connection(cursor, &self.layout, self.settings.connection_tolerance);
        let ToolState::Angle { selected } = &mut self.state else {
            return None;
        };
        let Some(hit) = hit else {
            if selected.is_empty() {
                return None;
            }
            selected.clear();
            return Some(Edit::Selection);
        };

        if let Some(i) = selected.iter().position(|c| *c == hit) {
            selected.remove(i);
            return Some(Edit::Selection);
        }
        selected.push(hit);
        let [first, second] = selected[..] else {
            return Some(Edit::Selection);
        };

        let Some((p1, center, p2)) = self.graph.shared_vertex(first, second) else {
            // Keep the latest pick so the user can pair it with another
            *selected = vec![hit];
            return Some(Edit::Selection);
        };
        selected.clear();
        match self.graph.add_angle(p1, center, p2) {
            Ok(Some(id)) => Some(Edit::AngleAdded(id)),
            Ok(None) | Err(_) => Some(Edit::Selection),
        }
    }

    /// Angle labels win over points, points over connections.
    fn delete(&mut self, cursor: DVec2) -> Option<Edit> {
        let s = &self.settings;
        let removed = if let Some(id) =
            self.graph
                .hit_angle(cursor, &self.layout, s.angle_label_tolerance, s.angle_label_radius)
        {
            self.graph.remove_angle(id)
        } else if let Some(id) = self.graph.hit_point(cursor, &self.layout, s.point_tolerance) {
            self.graph.remove_point(id)
        } else if let Some(id) = self.graph.hit_connection(cursor, &self.layout, s.connection_tolerance) {
            self.graph.remove_connection(id)
        } else {
            return None;
        };
        removed.ok().map(Edit::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::angle_label_position;
    use crate::types::Point;
    use glam::dvec2;

    /// 1000×1000 px canvas: normalized 0.1 is 100 px.
    fn editor_with(points: &[(f64, f64)]) -> (Editor, Vec<PointId>) {
        let mut graph = EditorGraph::new();
        let ids = points.iter().map(|&(x, y)| graph.add_point(Point::new(x, y))).collect();
        (Editor::new(graph, EditorLayout::new(1000.0, 1000.0, 0.0, 0.0)), ids)
    }

    #[test]
    fn switching_tools_drops_transient_state() {
        let (mut editor, _) = editor_with(&[(0.1, 0.1)]);
        editor.set_tool(Tool::Connect);
        editor.pointer_down(dvec2(100.0, 100.0));
        assert_eq!(editor.state(), &ToolState::Connect { pending: Some(PointId(0)) });
        editor.set_tool(Tool::Angle);
        editor.set_tool(Tool::Connect);
        assert_eq!(editor.state(), &ToolState::Connect { pending: None });
    }

    #[test]
    fn drag_moves_point_without_clamping() {
        let (mut editor, ids) = editor_with(&[(0.1, 0.1)]);
        // 18 px away is inside the drag tolerance but outside the point tolerance
        assert_eq!(editor.pointer_down(dvec2(118.0, 100.0)), Some(Edit::Selection));
        assert_eq!(editor.pointer_move(dvec2(-50.0, 300.0)), Some(Edit::PointMoved(ids[0])));
        assert_eq!(editor.graph().position(ids[0]), Some(Point::new(-0.05, 0.3)));

        assert_eq!(editor.pointer_up(), Some(Edit::Selection));
        assert_eq!(editor.pointer_move(dvec2(500.0, 500.0)), None);
        assert_eq!(editor.pointer_up(), None);
    }

    #[test]
    fn add_point_only_on_empty_image_area() {
        let (mut editor, _) = editor_with(&[(0.1, 0.1)]);
        editor.set_tool(Tool::AddPoint);
        assert_eq!(editor.pointer_down(dvec2(110.0, 100.0)), None);
        assert_eq!(editor.pointer_down(dvec2(1200.0, 100.0)), None);
        assert_eq!(editor.pointer_down(dvec2(500.0, 250.0)), Some(Edit::PointAdded(PointId(1))));
        assert_eq!(editor.graph().position(PointId(1)), Some(Point::new(0.5, 0.25)));
    }

    #[test]
    fn connect_clears_pending_on_same_point_and_miss() {
        let (mut editor, _) = editor_with(&[(0.1, 0.1), (0.5, 0.1)]);
        editor.set_tool(Tool::Connect);
        editor.pointer_down(dvec2(100.0, 100.0));
        assert_eq!(editor.pointer_down(dvec2(100.0, 100.0)), Some(Edit::Selection));
        assert_eq!(editor.state(), &ToolState::Connect { pending: None });

        editor.pointer_down(dvec2(100.0, 100.0));
        assert_eq!(editor.pointer_down(dvec2(700.0, 700.0)), Some(Edit::Selection));
        assert_eq!(editor.state(), &ToolState::Connect { pending: None });
        assert_eq!(editor.pointer_down(dvec2(700.0, 700.0)), None);
        assert!(editor.graph().connections().is_empty());
    }

    #[test]
    fn angle_selection_toggles() {
        let (editor, ids) = editor_with(&[(0.1, 0.1), (0.5, 0.1), (0.5, 0.5)]);
        let mut graph = editor.into_graph();
        let ab = graph.add_connection(ids[0], ids[1]).unwrap().unwrap();
        let mut editor = Editor::new(graph, EditorLayout::new(1000.0, 1000.0, 0.0, 0.0));
        editor.set_tool(Tool::Angle);

        editor.pointer_down(dvec2(300.0, 100.0));
        assert_eq!(editor.state(), &ToolState::Angle { selected: vec![ab] });
        editor.pointer_down(dvec2(300.0, 103.0));
        assert_eq!(editor.state(), &ToolState::Angle { selected: vec![] });
    }

    #[test]
    fn unrelated_connections_keep_latest_selection() {
        let (editor, ids) = editor_with(&[(0.1, 0.1), (0.3, 0.1), (0.1, 0.6), (0.3, 0.6)]);
        let mut graph = editor.into_graph();
        let top = graph.add_connection(ids[0], ids[1]).unwrap().unwrap();
        let bottom = graph.add_connection(ids[2], ids[3]).unwrap().unwrap();
        let mut editor = Editor::new(graph, EditorLayout::new(1000.0, 1000.0, 0.0, 0.0));
        editor.set_tool(Tool::Angle);

        editor.pointer_down(dvec2(200.0, 100.0));
        assert_eq!(editor.state(), &ToolState::Angle { selected: vec![top] });
        assert_eq!(editor.pointer_down(dvec2(200.0, 600.0)), Some(Edit::Selection));
        assert_eq!(editor.state(), &ToolState::Angle { selected: vec![bottom] });
        assert!(editor.graph().angles().is_empty());

        // a miss clears
        editor.pointer_down(dvec2(900.0, 900.0));
        assert_eq!(editor.state(), &ToolState::Angle { selected: vec![] });
    }

    #[test]
    fn delete_prefers_angle_label_over_point() {
        let (editor, ids) = editor_with(&[(0.1, 0.1), (0.5, 0.1), (0.5, 0.5)]);
        let mut graph = editor.into_graph();
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        graph.add_connection(a, b).unwrap();
        graph.add_connection(b, c).unwrap();
        let abc = graph.add_angle(a, b, c).unwrap().unwrap();
        // a stray point right on the label
        let label = angle_label_position(
            dvec2(100.0, 100.0),
            dvec2(500.0, 100.0),
            dvec2(500.0, 500.0),
            defaults::ANGLE_LABEL_RADIUS,
        );
        graph.add_point(Point::new(label.x / 1000.0, label.y / 1000.0));
        let mut editor = Editor::new(graph, EditorLayout::new(1000.0, 1000.0, 0.0, 0.0));
        editor.set_tool(Tool::Delete);

        let edit = editor.pointer_down(label);
        assert_eq!(
            edit,
            Some(Edit::Removed(Removed {
                angles: vec![abc],
                ..Removed::default()
            }))
        );
        assert_eq!(editor.graph().points().len(), 4);
        assert_eq!(editor.graph().connections().len(), 2);
    }

    #[test]
    fn delete_point_before_connection() {
        let (editor, ids) = editor_with(&[(0.1, 0.1), (0.5, 0.1)]);
        let mut graph = editor.into_graph();
        graph.add_connection(ids[0], ids[1]).unwrap();
        let mut editor = Editor::new(graph, EditorLayout::new(1000.0, 1000.0, 0.0, 0.0));
        editor.set_tool(Tool::Delete);

        let Some(Edit::Removed(removed)) = editor.pointer_down(dvec2(100.0, 100.0)) else {
            panic!("expected a removal");
        };
        assert_eq!(removed.points, vec![ids[0]]);
        assert_eq!(removed.connections.len(), 1);
        assert_eq!(editor.pointer_down(dvec2(300.0, 100.0)), None);
    }

    #[test]
    fn delete_connection_takes_angle_built_on_it() {
        let (editor, ids) = editor_with(&[(0.1, 0.1), (0.5, 0.1), (0.5, 0.5)]);
        let mut graph = editor.into_graph();
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        let ab = graph.add_connection(a, b).unwrap().unwrap();
        let bc = graph.add_connection(b, c).unwrap().unwrap();
        let abc = graph.add_angle(a, b, c).unwrap().unwrap();
        let mut editor = Editor::new(graph, EditorLayout::new(1000.0, 1000.0, 0.0, 0.0));
        editor.set_tool(Tool::Delete);

        // middle of a-b, away from every point and the label at b
        assert_eq!(
            editor.pointer_down(dvec2(300.0, 102.0)),
            Some(Edit::Removed(Removed {
                points: vec![],
                connections: vec![ab],
                angles: vec![abc],
            }))
        );
        let graph = editor.graph();
        assert_eq!(graph.points().len(), 3);
        assert_eq!(graph.connections().iter().map(|c| c.id).collect::<Vec<_>>(), vec![bc]);
        assert!(graph.angles().is_empty());
    }
}
