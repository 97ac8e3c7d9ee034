//! Shoulder mobility: arms raised sideways overhead, frontal photo.

use super::{Assess, Category, TestId, band_below, side_name, sub_score_of, verdict, warning, whole};
use crate::engine::{AngleDefinition, Joint, VectorToken, average_score};
use crate::report::{HealthReport, Translate, WarningLevel};
use crate::skeleton::{Keypoint, Landmark, Side, SkeletonData};
use crate::types::Degrees;

const LEFT_ABDUCTION: AngleDefinition = AngleDefinition::new(
    Landmark::Keypoint(Keypoint::LeftShoulder),
    VectorToken::joint(Joint::LeftChest),
    VectorToken::joint(Joint::LeftUpperArm),
    0.0,
    180.0,
);

const RIGHT_ABDUCTION: AngleDefinition = AngleDefinition::new(
    Landmark::Keypoint(Keypoint::RightShoulder),
    VectorToken::joint(Joint::RightUpperArm),
    VectorToken::joint(Joint::RightChest),
    0.0,
    180.0,
);

// Elbows should stay straight: scored on the bend away from 0°
const LEFT_ELBOW: AngleDefinition = AngleDefinition::new(
    Landmark::Keypoint(Keypoint::LeftElbow),
    VectorToken::joint(Joint::LeftUpperArm),
    VectorToken::joint(Joint::LeftForearm),
    45.0,
    0.0,
);

const RIGHT_ELBOW: AngleDefinition = AngleDefinition::new(
    Landmark::Keypoint(Keypoint::RightElbow),
    VectorToken::joint(Joint::RightForearm),
    VectorToken::joint(Joint::RightUpperArm),
    45.0,
    0.0,
);

const RESTRICTION_BANDS: [(f64, WarningLevel); 2] = [(120.0, WarningLevel::High), (150.0, WarningLevel::Medium)];
const ASYMMETRY_THRESHOLD: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShoulderMobility;

impl Assess for ShoulderMobility {
    fn id(&self) -> TestId {
        TestId::ShoulderMobility
    }

    fn category(&self) -> Category {
        Category::Mobility
    }

    fn photos(&self) -> usize {
        1
    }

    fn analyze(&self, photos: &[SkeletonData], tr: &dyn Translate) -> Option<HealthReport> {
        let skeleton = photos.first()?.enrich();

        let abduction = [
            (Side::Left, LEFT_ABDUCTION.evaluate(&skeleton).map(Degrees::raw)),
            (Side::Right, RIGHT_ABDUCTION.evaluate(&skeleton).map(Degrees::raw)),
        ];
        let elbows = [
            (Side::Left, LEFT_ELBOW.evaluate(&skeleton).map(|a| a.reflex_deviation().raw())),
            (Side::Right, RIGHT_ELBOW.evaluate(&skeleton).map(|a| a.reflex_deviation().raw())),
        ];

        if abduction.iter().chain(&elbows).all(|(_, v)| v.is_none()) {
            crate::log::debug!("shoulder mobility: no arm keypoints");
            return None;
        }

        let abduction_score = sub_score_of(&[abduction[0].1, abduction[1].1], LEFT_ABDUCTION.min, LEFT_ABDUCTION.max);
        let elbow_score = sub_score_of(&[elbows[0].1, elbows[1].1], LEFT_ELBOW.min, LEFT_ELBOW.max);
        let score = average_score(&[abduction_score, elbow_score]);
        let (title, description) = verdict(tr, "shoulderMobility", "restricted", score);

        let mut details = Vec::new();
        for (side, value) in abduction.iter().filter_map(|(s, v)| Some((*s, (*v)?))) {
            details.push(tr.translate(
                "shoulderMobility.detail.abduction",
                &[side_name(tr, side), whole(value)],
            ));
        }
        for (side, value) in elbows.iter().filter_map(|(s, v)| Some((*s, (*v)?))) {
            details.push(tr.translate("shoulderMobility.detail.elbow", &[side_name(tr, side), whole(value)]));
        }

        let mut warnings = Vec::new();
        for (side, value) in abduction.iter().filter_map(|(s, v)| Some((*s, (*v)?))) {
            if let Some(level) = band_below(value, &RESTRICTION_BANDS) {
                warnings.push(warning(
                    tr,
                    level,
                    "shoulderMobility.warning.restricted",
                    "shoulderMobility.risk.restricted",
                    &[side_name(tr, side), whole(value)],
                ));
            }
        }
        if let [(_, Some(left)), (_, Some(right))] = abduction {
            let diff = (left - right).abs();
            if diff >= ASYMMETRY_THRESHOLD {
                warnings.push(warning(
                    tr,
                    WarningLevel::Low,
                    "shoulderMobility.warning.asymmetry",
                    "shoulderMobility.risk.asymmetry",
                    &[whole(diff)],
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
