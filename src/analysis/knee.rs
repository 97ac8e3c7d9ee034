//! Frontal knee alignment: knock-knee (valgus) and bow-leg (varus).

use super::{Assess, Category, TestId, band, side_name, sub_score_of, verdict, warning, whole};
use crate::engine::{AngleDefinition, Joint, VectorToken, average_score};
use crate::report::{HealthReport, Translate, WarningLevel};
use crate::skeleton::{Keypoint, Landmark, Side, SkeletonData};

const LEFT_KNEE: AngleDefinition = AngleDefinition::new(
    Landmark::Keypoint(Keypoint::LeftKnee),
    VectorToken::joint(Joint::LeftShin),
    VectorToken::joint(Joint::LeftThigh).inverted(),
    20.0,
    0.0,
);

const RIGHT_KNEE: AngleDefinition = AngleDefinition::new(
    Landmark::Keypoint(Keypoint::RightKnee),
    VectorToken::joint(Joint::RightThigh).inverted(),
    VectorToken::joint(Joint::RightShin),
    20.0,
    0.0,
);

const DEVIATION_BANDS: [(f64, WarningLevel); 3] = [
    (15.0, WarningLevel::High),
    (10.0, WarningLevel::Medium),
    (5.0, WarningLevel::Low),
];

/// A straight leg reads 180°; below that the knee falls inward.
fn direction_key(angle: f64) -> &'static str {
    if angle < 180.0 {
        "kneeAlignment.valgus"
    } else {
        "kneeAlignment.varus"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KneeAlignment;

impl Assess for KneeAlignment {
    fn id(&self) -> TestId {
        TestId::KneeAlignment
    }

    fn category(&self) -> Category {
        Category::Alignment
    }

    fn photos(&self) -> usize {
        1
    }

    fn analyze(&self, photos: &[SkeletonData], tr: &dyn Translate) -> Option<HealthReport> {
        let skeleton = photos.first()?.enrich();
        let knees = [
            (Side::Left, LEFT_KNEE.evaluate(&skeleton).map(|a| a.raw())),
            (Side::Right, RIGHT_KNEE.evaluate(&skeleton).map(|a| a.raw())),
        ];
        if knees.iter().all(|(_, v)| v.is_none()) {
            crate::log::debug!("knee alignment: no leg keypoints");
            return None;
        }

        let deviations = knees.map(|(_, angle)| angle.map(|a| (180.0 - a).abs()));
        let knee_score = sub_score_of(&deviations, LEFT_KNEE.min, LEFT_KNEE.max);
        let score = average_score(&[knee_score]);
        let (title, description) = verdict(tr, "kneeAlignment", "imbalanced", score);

        let mut details = Vec::new();
        let mut warnings = Vec::new();
        for (side, angle) in knees.iter().filter_map(|(s, v)| Some((*s, (*v)?))) {
            details.push(tr.translate("kneeAlignment.detail.knee", &[side_name(tr, side), whole(angle)]));
            let deviation = (180.0 - angle).abs();
            if let Some(level) = band(deviation, &DEVIATION_BANDS) {
                warnings.push(warning(
                    tr,
                    level,
                    "kneeAlignment.warning",
                    "kneeAlignment.risk",
                    &[side_name(tr, side), whole(deviation), tr.translate(direction_key(angle), &[])],
                ));
            }
        }

        Some(HealthReport {
            test: self.id(),
            score,
            title,
            description,
            details,
            warnings,
            available: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Catalog;

    /// Frontal photo; each knee is shifted `dx` toward the image center
    /// (negative moves it outward).
    fn legs(left_dx: f64, right_dx: f64) -> SkeletonData {
        SkeletonData::new()
            .with(Keypoint::LeftHip, 0.6, 0.5)
            .with(Keypoint::LeftKnee, 0.6 - left_dx, 0.7)
            .with(Keypoint::LeftAnkle, 0.6, 0.9)
            .with(Keypoint::RightHip, 0.4, 0.5)
            .with(Keypoint::RightKnee, 0.4 + right_dx, 0.7)
            .with(Keypoint::RightAnkle, 0.4, 0.9)
    }

    #[test]
    fn straight_legs_read_180() {
        let skeleton = legs(0.0, 0.0).enrich();
        assert!((LEFT_KNEE.evaluate(&skeleton).unwrap().raw() - 180.0).abs() < 1e-9);
        assert!((RIGHT_KNEE.evaluate(&skeleton).unwrap().raw() - 180.0).abs() < 1e-9);

        let report = KneeAlignment.analyze(&[legs(0.0, 0.0)], &Catalog::english()).unwrap();
        assert_eq!(report.score, 100);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn knock_knees_read_below_180() {
        let skeleton = legs(0.05, 0.05).enrich();
        let left = LEFT_KNEE.evaluate(&skeleton).unwrap().raw();
        let right = RIGHT_KNEE.evaluate(&skeleton).unwrap().raw();
        assert!((left - 151.93).abs() < 0.01, "{left}");
        assert!((left - right).abs() < 1e-9);

        let report = KneeAlignment.analyze(&[legs(0.05, 0.05)], &Catalog::english()).unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.title, "Knee misalignment");
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings[0].level, WarningLevel::High);
        assert_eq!(report.warnings[0].message, "The left knee deviates 28° inward (knock-knee)");
    }

    #[test]
    fn mild_bow_leg_on_one_side() {
        // 2·atan(0.07) ≈ 8°
        let report = KneeAlignment.analyze(&[legs(-0.014, 0.0)], &Catalog::english()).unwrap();
        assert_eq!(report.score, 80);
        assert_eq!(report.title, "Good knee alignment");
        assert_eq!(report.details, vec!["Knee angle (left): 188°", "Knee angle (right): 180°"]);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].level, WarningLevel::Low);
        assert_eq!(report.warnings[0].message, "The left knee deviates 8° outward (bow-leg)");
    }

    #[test]
    fn missing_legs_give_no_report() {
        let photo = SkeletonData::new().with(Keypoint::LeftHip, 0.6, 0.5);
        assert_eq!(KneeAlignment.analyze(&[photo], &Catalog::english()), None);
    }
}
