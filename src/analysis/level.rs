//! Shoulder and pelvic level: how far a left/right pair tilts off horizontal
//! in a frontal photo.

use super::{Assess, Category, TestId, band, side_name, warning, whole};
use crate::engine::{line_tilt, linear_score};
use crate::report::{HealthReport, Translate, WarningLevel};
use crate::skeleton::{Keypoint, Side, SkeletonData};

const WORST_TILT: f64 = 30.0;
const TILT_BANDS: [(f64, WarningLevel); 3] = [
    (10.0, WarningLevel::High),
    (5.0, WarningLevel::Medium),
    (2.0, WarningLevel::Low),
];

/// One left/right keypoint pair measured against the horizon.
struct LevelCheck {
    test: TestId,
    left: Keypoint,
    right: Keypoint,
    prefix: &'static str,
}

const SHOULDERS: LevelCheck = LevelCheck {
    test: TestId::ShoulderLevel,
    left: Keypoint::LeftShoulder,
    right: Keypoint::RightShoulder,
    prefix: "shoulderLevel",
};

const HIPS: LevelCheck = LevelCheck {
    test: TestId::PelvicLevel,
    left: Keypoint::LeftHip,
    right: Keypoint::RightHip,
    prefix: "pelvicLevel",
};

fn describe(deviation: f64) -> &'static str {
    if deviation < 2.0 {
        "balanced"
    } else if deviation < 5.0 {
        "mild"
    } else if deviation < 10.0 {
        "moderate"
    } else {
        "severe"
    }
}

impl LevelCheck {
    fn analyze(&self, photos: &[SkeletonData], tr: &dyn Translate) -> Option<HealthReport> {
        let photo = photos.first()?;
        let (left, right) = match (photo.get(self.left), photo.get(self.right)) {
            (Some(l), Some(r)) => (l, r),
            _ => {
                crate::log::debug!(test = %self.test, "level check: pair incomplete");
                return None;
            }
        };

        let deviation = line_tilt(left, right).raw().round();
        let score = linear_score(Some(deviation), WORST_TILT, 0.0);
        let higher = if left.y < right.y {
            Some(Side::Left)
        } else if right.y < left.y {
            Some(Side::Right)
        } else {
            None
        };

        let outcome = if super::is_good(score) { "good" } else { "imbalanced" };
        let title = tr.translate(&format!("{}.title.{outcome}", self.prefix), &[]);
        let description = tr.translate(&format!("level.description.{}", describe(deviation)), &[whole(deviation)]);

        let mut details = vec![tr.translate(&format!("{}.detail.tilt", self.prefix), &[whole(deviation)])];
        if let Some(side) = higher {
            details.push(tr.translate(&format!("{}.detail.higher", self.prefix), &[side_name(tr, side)]));
        }

        let warnings = band(deviation, &TILT_BANDS)
            .map(|level| {
                warning(
                    tr,
                    level,
                    &format!("{}.warning", self.prefix),
                    &format!("{}.risk", self.prefix),
                    &[side_name(tr, higher.unwrap_or(Side::Center)), whole(deviation)],
                )
            })
            .into_iter()
            .collect();

        Some(HealthReport {
            test: self.test,
            score,
            title,
            description,
            details,
            warnings,
            available: true,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShoulderLevel;

impl Assess for ShoulderLevel {
    fn id(&self) -> TestId {
        TestId::ShoulderLevel
    }

    fn category(&self) -> Category {
        Category::Posture
    }

    fn photos(&self) -> usize {
        1
    }

    fn analyze(&self, photos: &[SkeletonData], tr: &dyn Translate) -> Option<HealthReport> {
        SHOULDERS.analyze(photos, tr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PelvicLevel;

impl Assess for PelvicLevel {
    fn id(&self) -> TestId {
        TestId::PelvicLevel
    }

    fn category(&self) -> Category {
        Category::Posture
    }

    fn photos(&self) -> usize {
        1
    }

    fn analyze(&self, photos: &[SkeletonData], tr: &dyn Translate) -> Option<HealthReport> {
        HIPS.analyze(photos, tr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Catalog;

    #[test]
    fn slightly_dropped_right_shoulder() {
        let photo = SkeletonData::new()
            .with(Keypoint::LeftShoulder, 0.3, 0.4)
            .with(Keypoint::RightShoulder, 0.7, 0.42);
        let report = ShoulderLevel.analyze(&[photo], &Catalog::english()).unwrap();
        assert_eq!(report.score, 90);
        assert_eq!(report.title, "Shoulders are level");
        assert_eq!(report.description, "Mild deviation of 3°.");
        assert_eq!(report.details, vec!["Shoulder tilt: 3°", "Higher shoulder: left"]);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].level, WarningLevel::Low);
        assert_eq!(report.warnings[0].message, "The left shoulder sits 3° higher");
    }

    #[test]
    fn level_hips_have_no_warning() {
        let photo = SkeletonData::new()
            .with(Keypoint::LeftHip, 0.6, 0.6)
            .with(Keypoint::RightHip, 0.4, 0.6);
        let report = PelvicLevel.analyze(&[photo], &Catalog::english()).unwrap();
        assert_eq!(report.score, 100);
        assert_eq!(report.details, vec!["Pelvic tilt: 0°"]);
        assert!(report.warnings.is_empty());
        assert_eq!(report.description, "Deviation of 0° is within the normal range.");
    }

    #[test]
    fn steep_hips_are_severe() {
        // tan(45°): 45° is past the worst tilt, so the score bottoms out
        let photo = SkeletonData::new()
            .with(Keypoint::LeftHip, 0.6, 0.7)
            .with(Keypoint::RightHip, 0.4, 0.5);
        let report = PelvicLevel.analyze(&[photo], &Catalog::english()).unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.title, "Pelvic imbalance");
        assert_eq!(report.description, "Severe deviation of 45°.");
        assert_eq!(report.worst_level(), Some(WarningLevel::High));
        assert_eq!(report.warnings[0].message, "The right hip sits 45° higher");
    }

    #[test]
    fn one_shoulder_is_not_enough() {
        let photo = SkeletonData::new().with(Keypoint::LeftShoulder, 0.3, 0.4);
        assert_eq!(ShoulderLevel.analyze(&[photo], &Catalog::english()), None);
    }

    #[test]
    fn description_bands() {
        assert_eq!(describe(1.0), "balanced");
        assert_eq!(describe(2.0), "mild");
        assert_eq!(describe(5.0), "moderate");
        assert_eq!(describe(10.0), "severe");
    }
}
