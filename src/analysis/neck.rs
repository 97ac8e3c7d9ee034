//! Neck lateral flexion: two frontal photos, head tilted to the subject's
//! left and then to the right.

use super::{Assess, Category, TestId, band_below, side_name, sub_score_of, verdict, warning, whole};
use crate::engine::{AngleDefinition, Joint, VectorToken, average_score};
use crate::report::{HealthReport, Translate, WarningLevel};
use crate::skeleton::{Landmark, Side, SkeletonData};
use crate::types::Degrees;

const LEFT_TILT: AngleDefinition = AngleDefinition::new(
    Landmark::Manubrium,
    VectorToken::joint(Joint::NeckNose),
    VectorToken::UP,
    0.0,
    30.0,
);

const RIGHT_TILT: AngleDefinition = AngleDefinition::new(
    Landmark::Manubrium,
    VectorToken::UP,
    VectorToken::joint(Joint::NeckNose),
    0.0,
    30.0,
);

const RESTRICTION_BANDS: [(f64, WarningLevel); 2] = [(8.0, WarningLevel::High), (15.0, WarningLevel::Medium)];
const ASYMMETRY_THRESHOLD: f64 = 10.0;

/// A reflex reading means the head went the other way; that counts as no tilt.
fn tilt(definition: &AngleDefinition, photo: Option<&SkeletonData>) -> Option<f64> {
    let angle = definition.evaluate(&photo?.enrich())?;
    Some(if angle.raw() > 180.0 { 0.0 } else { angle.raw() })
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NeckMobility;

impl Assess for NeckMobility {
    fn id(&self) -> TestId {
        TestId::NeckMobility
    }

    fn category(&self) -> Category {
        Category::Mobility
    }

    fn photos(&self) -> usize {
        2
    }

    fn analyze(&self, photos: &[SkeletonData], tr: &dyn Translate) -> Option<HealthReport> {
        let tilts = [
            (Side::Left, tilt(&LEFT_TILT, photos.first())),
            (Side::Right, tilt(&RIGHT_TILT, photos.get(1))),
        ];
        if tilts.iter().all(|(_, v)| v.is_none()) {
            crate::log::debug!(photos = photos.len(), "neck mobility: no head keypoints");
            return None;
        }

        let tilt_score = sub_score_of(&[tilts[0].1, tilts[1].1], LEFT_TILT.min, LEFT_TILT.max);
        let score = average_score(&[tilt_score]);
        let (title, description) = verdict(tr, "neckMobility", "restricted", score);

        let present: Vec<(Side, f64)> = tilts.iter().filter_map(|(s, v)| Some((*s, (*v)?))).collect();
        let details = present
            .iter()
            .map(|(side, value)| tr.translate("neckMobility.detail.tilt", &[side_name(tr, *side), whole(*value)]))
            .collect();

        let mut warnings = Vec::new();
        for (side, value) in &present {
            if let Some(level) = band_below(*value, &RESTRICTION_BANDS) {
                warnings.push(warning(
                    tr,
                    level,
                    "neckMobility.warning.restricted",
                    "neckMobility.risk.restricted",
                    &[side_name(tr, *side), whole(*value)],
                ));
            }
        }
        if let [(_, left), (_, right)] = present[..] {
            let diff = (left - right).abs();
            if diff >= ASYMMETRY_THRESHOLD {
                warnings.push(warning(
                    tr,
                    WarningLevel::Low,
                    "neckMobility.warning.asymmetry",
                    "neckMobility.risk.asymmetry",
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

/// Tilt of the head in one photo, exposed for live feedback while posing.
pub fn head_tilt(photo: &SkeletonData, side: Side) -> Option<Degrees> {
    let definition = match side {
        Side::Left => &LEFT_TILT,
        Side::Right => &RIGHT_TILT,
        Side::Center => return None,
    };
    tilt(definition, Some(photo)).map(Degrees)
}
