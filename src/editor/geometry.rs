//! Layout projection and hit-testing
//!
//! Editor positions are normalized to the image (`[0,1]²` while on it); the
//! host draws into a render space measured in pixels. All tolerances are in
//! render-space pixels, so hit-testing always projects first.

use std::f64::consts::{PI, TAU};

use glam::{DVec2, dvec2};

use super::graph::{EditorAngle, EditorConnection, EditorPoint};
use super::{AngleId, ConnectionId, PointId};
use crate::errors::LayoutError;
use crate::skeleton::FaceBox;
use crate::types::{Degrees, Point, Size};

/// Affine mapping from normalized editor space to render space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorLayout {
    pub render_w: f64,
    pub render_h: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl EditorLayout {
    pub const fn new(render_w: f64, render_h: f64, offset_x: f64, offset_y: f64) -> Self {
        EditorLayout {
            render_w,
            render_h,
            offset_x,
            offset_y,
        }
    }

    /// Scale an image uniformly to fit the viewport and center it, leaving
    /// bars on the axis with spare room.
    pub fn fit(image: (f64, f64), viewport: (f64, f64)) -> Result<Self, LayoutError> {
        let image = Size::try_new(image.0, image.1).map_err(|source| LayoutError::InvalidImage {
            width: image.0,
            height: image.1,
            source,
        })?;
        let viewport = Size::try_new(viewport.0, viewport.1).map_err(|source| LayoutError::InvalidViewport {
            width: viewport.0,
            height: viewport.1,
            source,
        })?;

        let scale = (viewport.w / image.w).min(viewport.h / image.h);
        let render_w = image.w * scale;
        let render_h = image.h * scale;
        Ok(EditorLayout {
            render_w,
            render_h,
            offset_x: (viewport.w - render_w) / 2.0,
            offset_y: (viewport.h - render_h) / 2.0,
        })
    }

    #[inline]
    pub fn offset(&self) -> DVec2 {
        dvec2(self.offset_x, self.offset_y)
    }

    #[inline]
    pub fn scale(&self) -> DVec2 {
        dvec2(self.render_w, self.render_h)
    }

    /// Normalized position to render-space pixels.
    #[inline]
    pub fn project(&self, p: Point) -> DVec2 {
        self.offset() + p.to_vec() * self.scale()
    }

    /// Render-space pixels back to a normalized position.
    #[inline]
    pub fn unproject(&self, cursor: DVec2) -> Point {
        Point::from((cursor - self.offset()) / self.scale())
    }

    /// Top-left and bottom-right render-space corners of a face box.
    pub fn project_face(&self, face: &FaceBox) -> (DVec2, DVec2) {
        (
            self.project(Point::new(face.xmin, face.ymin)),
            self.project(Point::new(face.xmax, face.ymax)),
        )
    }
}

/// Distance from `p` to the segment `v`–`w`. A zero-length segment is a point.
pub fn distance_point_to_segment(p: DVec2, v: DVec2, w: DVec2) -> f64 {
    let seg = w - v;
    let len_sq = seg.length_squared();
    if len_sq == 0.0 {
        return p.distance(v);
    }
    let t = ((p - v).dot(seg) / len_sq).clamp(0.0, 1.0);
    p.distance(v + seg * t)
}

/// First point, in slice order, within `tolerance` of the cursor.
pub fn hit_test_point(cursor: DVec2, points: &[EditorPoint], layout: &EditorLayout, tolerance: f64) -> Option<PointId> {
    points
        .iter()
        .find(|p| layout.project(p.position()).distance(cursor) < tolerance)
        .map(|p| p.id)
}

/// First connection, in slice order, whose segment passes within `tolerance`.
/// Connections with an unresolvable endpoint are skipped.
pub fn hit_test_connection<F>(
    cursor: DVec2,
    connections: &[EditorConnection],
    position: F,
    layout: &EditorLayout,
    tolerance: f64,
) -> Option<ConnectionId>
where
    F: Fn(PointId) -> Option<Point>,
{
    connections
        .iter()
        .find(|c| {
            let (Some(from), Some(to)) = (position(c.from), position(c.to)) else {
                return false;
            };
            distance_point_to_segment(cursor, layout.project(from), layout.project(to)) < tolerance
        })
        .map(|c| c.id)
}

/// First angle, in slice order, whose value label sits within `tolerance`.
pub fn hit_test_angle<F>(
    cursor: DVec2,
    angles: &[EditorAngle],
    position: F,
    layout: &EditorLayout,
    tolerance: f64,
    label_radius: f64,
) -> Option<AngleId>
where
    F: Fn(PointId) -> Option<Point>,
{
    angles
        .iter()
        .find(|a| {
            let (Some(p1), Some(center), Some(p2)) = (position(a.p1), position(a.center), position(a.p2)) else {
                return false;
            };
            let label = angle_label_position(
                layout.project(p1),
                layout.project(center),
                layout.project(p2),
                label_radius,
            );
            label.distance(cursor) < tolerance
        })
        .map(|a| a.id)
}

/// Where an angle's value label goes: `radius` out from the center along the
/// middle of the shorter arc between the two arms.
pub fn angle_label_position(p1: DVec2, center: DVec2, p2: DVec2, radius: f64) -> DVec2 {
    let start = bearing(p1 - center);
    let mut sweep = bearing(p2 - center) - start;
    // shorter arc: (-PI, PI]
    while sweep > PI {
        sweep -= TAU;
    }
    while sweep <= -PI {
        sweep += TAU;
    }
    let mid = start + sweep / 2.0;
    center + DVec2::from_angle(mid) * radius
}

/// Display value of the angle at `center`, in whole degrees within `[0, 180]`.
pub fn unsigned_angle(p1: DVec2, center: DVec2, p2: DVec2) -> Degrees {
    let diff = Degrees::from_radians((bearing(p2 - center) - bearing(p1 - center)).abs()).raw();
    let folded = if diff > 180.0 { 360.0 - diff } else { diff };
    Degrees(folded.round())
}

#[inline]
fn bearing(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}
