//! Default tolerances and settings (editor values are render-space pixels)

/// Pick radius for ADD_POINT/CONNECT/DELETE point hits.
pub const POINT_TOLERANCE: f64 = 15.0;
/// Pick radius for starting a drag under MOVE; larger so points are easy to grab.
pub const DRAG_TOLERANCE: f64 = 20.0;
/// Distance from a connection segment that still counts as a hit.
pub const CONNECTION_TOLERANCE: f64 = 8.0;
/// Pick radius around an angle's value label.
pub const ANGLE_LABEL_TOLERANCE: f64 = 20.0;
/// Distance of an angle's value label from its center point.
pub const ANGLE_LABEL_RADIUS: f64 = 45.0;

/// Detections below this confidence are treated as absent.
pub const CONFIDENCE_THRESHOLD: f32 = 0.3;

/// Body height assumed when converting ear-to-ankle pixel shifts into centimetres.
pub const BODY_HEIGHT_CM: f64 = 170.0;

/// Score at or above which an assessment reports the "good" outcome.
pub const GOOD_SCORE: u8 = 80;
