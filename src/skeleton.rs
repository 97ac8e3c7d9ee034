//! Keypoint vocabulary, raw skeletons and derived landmarks.

use std::fmt;
use std::str::FromStr;

use crate::defaults;
use crate::errors::ParseError;
use crate::types::Point;

/// Which half of the body a landmark belongs to (drives left/right/center coloring).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Center,
}

/// The fixed keypoint vocabulary produced by the pose estimator (COCO order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keypoint {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Keypoint {
    pub const COUNT: usize = 17;

    pub const ALL: [Keypoint; Keypoint::COUNT] = [
        Keypoint::Nose,
        Keypoint::LeftEye,
        Keypoint::RightEye,
        Keypoint::LeftEar,
        Keypoint::RightEar,
        Keypoint::LeftShoulder,
        Keypoint::RightShoulder,
        Keypoint::LeftElbow,
        Keypoint::RightElbow,
        Keypoint::LeftWrist,
        Keypoint::RightWrist,
        Keypoint::LeftHip,
        Keypoint::RightHip,
        Keypoint::LeftKnee,
        Keypoint::RightKnee,
        Keypoint::LeftAnkle,
        Keypoint::RightAnkle,
    ];

    /// Position in `ALL`, also the storage slot in `SkeletonData`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Keypoint::Nose => "nose",
            Keypoint::LeftEye => "leftEye",
            Keypoint::RightEye => "rightEye",
            Keypoint::LeftEar => "leftEar",
            Keypoint::RightEar => "rightEar",
            Keypoint::LeftShoulder => "leftShoulder",
            Keypoint::RightShoulder => "rightShoulder",
            Keypoint::LeftElbow => "leftElbow",
            Keypoint::RightElbow => "rightElbow",
            Keypoint::LeftWrist => "leftWrist",
            Keypoint::RightWrist => "rightWrist",
            Keypoint::LeftHip => "leftHip",
            Keypoint::RightHip => "rightHip",
            Keypoint::LeftKnee => "leftKnee",
            Keypoint::RightKnee => "rightKnee",
            Keypoint::LeftAnkle => "leftAnkle",
            Keypoint::RightAnkle => "rightAnkle",
        }
    }

    pub fn side(self) -> Side {
        match self {
            Keypoint::Nose => Side::Center,
            Keypoint::LeftEye
            | Keypoint::LeftEar
            | Keypoint::LeftShoulder
            | Keypoint::LeftElbow
            | Keypoint::LeftWrist
            | Keypoint::LeftHip
            | Keypoint::LeftKnee
            | Keypoint::LeftAnkle => Side::Left,
            _ => Side::Right,
        }
    }
}

impl fmt::Display for Keypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Keypoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kp) = Keypoint::ALL.iter().find(|kp| kp.name() == s) {
            return Ok(*kp);
        }
        let suggestion = Keypoint::ALL
            .iter()
            .find(|kp| kp.name().eq_ignore_ascii_case(s))
            .map(|kp| format!("did you mean `{}`?", kp.name()));
        Err(ParseError::unknown_keypoint(s, suggestion))
    }
}

/// A point the resolver can look up: a raw keypoint or a derived midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    Keypoint(Keypoint),
    /// Sternal midpoint, between the shoulders
    Manubrium,
    /// Pelvic midpoint, between the hips
    Pubis,
}

impl From<Keypoint> for Landmark {
    fn from(kp: Keypoint) -> Self {
        Landmark::Keypoint(kp)
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Landmark::Keypoint(kp) => f.write_str(kp.name()),
            Landmark::Manubrium => f.write_str("manubrium"),
            Landmark::Pubis => f.write_str("pubis"),
        }
    }
}

/// Raw keypoints from one photo. Absent entries were not confidently detected.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkeletonData {
    points: [Option<Point>; Keypoint::COUNT],
}

impl SkeletonData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, convenient for literals and tests.
    pub fn with(mut self, keypoint: Keypoint, x: f64, y: f64) -> Self {
        self.set(keypoint, Some(Point::new(x, y)));
        self
    }

    pub fn set(&mut self, keypoint: Keypoint, point: Option<Point>) {
        self.points[keypoint.index()] = point;
    }

    pub fn get(&self, keypoint: Keypoint) -> Option<Point> {
        self.points[keypoint.index()]
    }

    /// Present keypoints in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (Keypoint, Point)> + '_ {
        Keypoint::ALL
            .iter()
            .filter_map(|&kp| self.get(kp).map(|p| (kp, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    /// Derive the composite landmarks.
    pub fn enrich(&self) -> EnrichedSkeleton {
        enrich(self)
    }
}

impl FromIterator<(Keypoint, Point)> for SkeletonData {
    fn from_iter<I: IntoIterator<Item = (Keypoint, Point)>>(iter: I) -> Self {
        let mut skeleton = SkeletonData::new();
        for (kp, p) in iter {
            skeleton.set(kp, Some(p));
        }
        skeleton
    }
}

/// Raw keypoints plus derived midpoints. Recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichedSkeleton {
    raw: SkeletonData,
    manubrium: Option<Point>,
    pubis: Option<Point>,
}

impl EnrichedSkeleton {
    pub fn get(&self, landmark: Landmark) -> Option<Point> {
        match landmark {
            Landmark::Keypoint(kp) => self.raw.get(kp),
            Landmark::Manubrium => self.manubrium,
            Landmark::Pubis => self.pubis,
        }
    }

    pub fn raw(&self) -> &SkeletonData {
        &self.raw
    }
}

fn midpoint_of(skeleton: &SkeletonData, a: Keypoint, b: Keypoint) -> Option<Point> {
    Some(skeleton.get(a)?.midpoint(skeleton.get(b)?))
}

/// Add `manubrium` and `pubis` when both of their source points exist.
pub fn enrich(skeleton: &SkeletonData) -> EnrichedSkeleton {
    EnrichedSkeleton {
        raw: *skeleton,
        manubrium: midpoint_of(skeleton, Keypoint::LeftShoulder, Keypoint::RightShoulder),
        pubis: midpoint_of(skeleton, Keypoint::LeftHip, Keypoint::RightHip),
    }
}

// ============================================================================
// Estimator input
// ============================================================================

/// One keypoint as reported by the pose estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub keypoint: Keypoint,
    pub position: Point,
    pub confidence: f32,
}

/// Face bounding box in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl FaceBox {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }
}

/// A filtered estimator result ready for analysis and editing.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseEstimate {
    pub skeleton: SkeletonData,
    pub score: f32,
    pub face: Option<FaceBox>,
}

impl PoseEstimate {
    /// Keep detections at or above `threshold`; a later detection of the same
    /// keypoint overrides an earlier one.
    pub fn from_detections<I>(detections: I, score: f32, face: Option<FaceBox>, threshold: f32) -> Self
    where
        I: IntoIterator<Item = Detection>,
    {
        let mut skeleton = SkeletonData::new();
        for det in detections {
            if det.confidence >= threshold {
                skeleton.set(det.keypoint, Some(det.position));
            } else {
                crate::log::debug!(keypoint = %det.keypoint, confidence = det.confidence, "dropping low-confidence keypoint");
            }
        }
        PoseEstimate { skeleton, score, face }
    }

    /// Same as `from_detections` with the default confidence threshold.
    pub fn with_default_threshold<I>(detections: I, score: f32, face: Option<FaceBox>) -> Self
    where
        I: IntoIterator<Item = Detection>,
    {
        Self::from_detections(detections, score, face, defaults::CONFIDENCE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypoint_names_round_trip() {
        for kp in Keypoint::ALL {
            assert_eq!(kp.name().parse::<Keypoint>().ok(), Some(kp));
        }
    }

    #[test]
    fn keypoint_parse_suggests_case_fix() {
        let err = "LeftShoulder".parse::<Keypoint>().unwrap_err();
        match err {
            ParseError::UnknownKeypoint { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("did you mean `leftShoulder`?"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn keypoint_sides() {
        assert_eq!(Keypoint::Nose.side(), Side::Center);
        assert_eq!(Keypoint::LeftAnkle.side(), Side::Left);
        assert_eq!(Keypoint::RightEye.side(), Side::Right);
    }

    #[test]
    fn enrich_derives_midpoints() {
        let skeleton = SkeletonData::new()
            .with(Keypoint::LeftShoulder, 0.6, 0.3)
            .with(Keypoint::RightShoulder, 0.4, 0.3)
            .with(Keypoint::LeftHip, 0.58, 0.6)
            .with(Keypoint::RightHip, 0.42, 0.62);
        let enriched = skeleton.enrich();
        assert_eq!(enriched.get(Landmark::Manubrium), Some(Point::new(0.5, 0.3)));
        let pubis = enriched.get(Landmark::Pubis).unwrap();
        assert!((pubis.x - 0.5).abs() < 1e-12);
        assert!((pubis.y - 0.61).abs() < 1e-12);
    }

    #[test]
    fn enrich_omits_midpoint_without_both_sources() {
        let skeleton = SkeletonData::new().with(Keypoint::LeftShoulder, 0.6, 0.3);
        let enriched = enrich(&skeleton);
        assert_eq!(enriched.get(Landmark::Manubrium), None);
        assert_eq!(enriched.get(Landmark::Pubis), None);
        assert_eq!(
            enriched.get(Landmark::Keypoint(Keypoint::LeftShoulder)),
            Some(Point::new(0.6, 0.3))
        );
    }

    #[test]
    fn detections_below_threshold_are_absent() {
        let detections = [
            Detection { keypoint: Keypoint::Nose, position: Point::new(0.5, 0.1), confidence: 0.9 },
            Detection { keypoint: Keypoint::LeftEar, position: Point::new(0.55, 0.1), confidence: 0.1 },
        ];
        let pose = PoseEstimate::with_default_threshold(detections, 0.8, None);
        assert_eq!(pose.skeleton.get(Keypoint::Nose), Some(Point::new(0.5, 0.1)));
        assert_eq!(pose.skeleton.get(Keypoint::LeftEar), None);
        assert_eq!(pose.skeleton.len(), 1);
    }

    #[test]
    fn face_box_contains() {
        let face = FaceBox { xmin: 0.4, ymin: 0.05, xmax: 0.6, ymax: 0.2 };
        assert!(face.contains(Point::new(0.5, 0.1)));
        assert!(!face.contains(Point::new(0.7, 0.1)));
        assert!((face.width() - 0.2).abs() < 1e-12);
    }
}
