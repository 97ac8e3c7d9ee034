//! Pose geometry, clinical scoring and an editable skeleton model.
//!
//! A pose estimator produces named 2-D keypoints ([`SkeletonData`]). The
//! [`engine`] turns them into signed angles between anatomical vectors and
//! scores them; [`analysis`] applies clinical definitions and writes
//! [`HealthReport`]s. Independently, the [`editor`] lets a user correct a
//! detected skeleton by dragging points and drawing connections and angles.
//!
//! ```
//! use posescore::{Assess, Catalog, Keypoint, ShoulderLevel, SkeletonData};
//!
//! let photo = SkeletonData::new()
//!     .with(Keypoint::LeftShoulder, 0.3, 0.4)
//!     .with(Keypoint::RightShoulder, 0.7, 0.42);
//! let report = ShoulderLevel.analyze(&[photo], &Catalog::english()).unwrap();
//! assert_eq!(report.score, 90);
//! ```

pub mod analysis;
pub mod defaults;
pub mod editor;
pub mod engine;
pub mod errors;
pub mod log;
pub mod report;
pub mod skeleton;
pub mod types;

pub use analysis::{
    Assess, Assessment, Category, KneeAlignment, NeckMobility, PelvicLevel, SagittalAlignment, ShoulderLevel,
    ShoulderMobility, TestId, WristMobility,
};
pub use editor::{Edit, Editor, EditorGraph, EditorLayout, Tool};
pub use errors::{GraphError, LayoutError, ParseError};
pub use report::{Catalog, HealthReport, Translate, Warning, WarningLevel};
pub use skeleton::{Detection, FaceBox, Keypoint, Landmark, PoseEstimate, Side, SkeletonData};
pub use types::{Degrees, Point};

/// Run every assessment that can read `photos` and collect the reports.
///
/// Assessments with nothing to measure are skipped.
pub fn analyze_all(photos: &[SkeletonData], tr: &dyn Translate) -> Vec<HealthReport> {
    Assessment::all()
        .iter()
        .filter_map(|assessment| assessment.analyze(photos, tr))
        .collect()
}
