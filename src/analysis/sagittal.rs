//! Sagittal alignment from a side photo: head over ankle, trunk over hip.

use super::{Assess, Category, TestId, band, side_name, sub_score_of, verdict, warning, whole};
use crate::defaults;
use crate::engine::{AngleDefinition, Joint, VectorToken, average_score, linear_score, sub_score};
use crate::report::{HealthReport, Translate, WarningLevel};
use crate::skeleton::{Keypoint, Landmark, Side, SkeletonData};

const LEFT_LEAN: AngleDefinition = AngleDefinition::new(
    Landmark::Keypoint(Keypoint::LeftHip),
    VectorToken::VERTICAL,
    VectorToken::joint(Joint::LeftChest),
    20.0,
    0.0,
);

const RIGHT_LEAN: AngleDefinition = AngleDefinition::new(
    Landmark::Keypoint(Keypoint::RightHip),
    VectorToken::VERTICAL,
    VectorToken::joint(Joint::RightChest),
    20.0,
    0.0,
);

const WORST_SHIFT_CM: f64 = 15.0;
const SHIFT_BANDS: [(f64, WarningLevel); 3] = [
    (15.0, WarningLevel::High),
    (10.0, WarningLevel::Medium),
    (5.0, WarningLevel::Low),
];
const LEAN_WARNING: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SagittalAlignment {
    /// Converts the ear-to-ankle pixel ratio into centimetres.
    pub body_height_cm: f64,
}

impl Default for SagittalAlignment {
    fn default() -> Self {
        SagittalAlignment {
            body_height_cm: defaults::BODY_HEIGHT_CM,
        }
    }
}

impl SagittalAlignment {
    /// Horizontal ear-to-ankle offset in centimetres, from the first side
    /// (left, then right) where both points are visible.
    pub fn shift_cm(&self, photo: &SkeletonData) -> Option<f64> {
        [
            (Keypoint::LeftEar, Keypoint::LeftAnkle),
            (Keypoint::RightEar, Keypoint::RightAnkle),
        ]
        .into_iter()
        .find_map(|(ear, ankle)| {
            let ear = photo.get(ear)?;
            let ankle = photo.get(ankle)?;
            let height = (ankle.y - ear.y).abs();
            (height > 0.0).then(|| (ear.x - ankle.x).abs() * self.body_height_cm / height)
        })
    }
}

impl Assess for SagittalAlignment {
    fn id(&self) -> TestId {
        TestId::SagittalAlignment
    }

    fn category(&self) -> Category {
        Category::Posture
    }

    fn photos(&self) -> usize {
        1
    }

    fn analyze(&self, photos: &[SkeletonData], tr: &dyn Translate) -> Option<HealthReport> {
        let photo = photos.first()?;
        let skeleton = photo.enrich();

        let shift = self.shift_cm(photo);
        let leans = [
            (Side::Left, LEFT_LEAN.evaluate(&skeleton).map(|a| a.reflex_deviation().raw())),
            (Side::Right, RIGHT_LEAN.evaluate(&skeleton).map(|a| a.reflex_deviation().raw())),
        ];
        if shift.is_none() && leans.iter().all(|(_, v)| v.is_none()) {
            crate::log::debug!("sagittal alignment: no ear/ankle or trunk keypoints");
            return None;
        }

        let shift_score = sub_score(shift.map(|cm| linear_score(Some(cm), WORST_SHIFT_CM, 0.0)));
        let lean_score = sub_score_of(&[leans[0].1, leans[1].1], LEFT_LEAN.min, LEFT_LEAN.max);
        let score = average_score(&[shift_score, lean_score]);
        let (title, description) = verdict(tr, "sagittal", "imbalanced", score);

        let mut details = Vec::new();
        let mut warnings = Vec::new();
        if let Some(cm) = shift {
            details.push(tr.translate("sagittal.detail.shift", &[whole(cm)]));
            if let Some(level) = band(cm, &SHIFT_BANDS) {
                warnings.push(warning(tr, level, "sagittal.warning.shift", "sagittal.risk.shift", &[whole(cm)]));
            }
        }

        let present: Vec<(Side, f64)> = leans.iter().filter_map(|(s, v)| Some((*s, (*v)?))).collect();
        for (side, value) in &present {
            details.push(tr.translate("sagittal.detail.lean", &[side_name(tr, *side), whole(*value)]));
        }
        // One warning for the trunk, from the side that leans most
        let worst = present.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        if worst >= LEAN_WARNING {
            warnings.push(warning(
                tr,
                WarningLevel::Medium,
                "sagittal.warning.lean",
                "sagittal.risk.lean",
                &[whole(worst)],
            ));
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
