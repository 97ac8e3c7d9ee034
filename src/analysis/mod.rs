//! Clinical assessments
//!
//! Each assessment hard-codes its angle definitions and clinical ranges and
//! turns one or more skeletons into a [`HealthReport`]. Missing keypoints
//! never fail an assessment: an assessment with nothing to measure returns
//! `None`, partially measurable ones average whatever is present.

mod knee;
mod level;
mod neck;
mod sagittal;
mod shoulder;
mod wrist;

use std::fmt;

use enum_dispatch::enum_dispatch;

pub use knee::KneeAlignment;
pub use level::{PelvicLevel, ShoulderLevel};
pub use neck::{NeckMobility, head_tilt};
pub use sagittal::SagittalAlignment;
pub use shoulder::ShoulderMobility;
pub use wrist::WristMobility;

use crate::defaults;
use crate::engine::{NOT_COMPUTED, average_score, linear_score};
use crate::report::{HealthReport, Translate, Warning, WarningLevel};
use crate::skeleton::{Side, SkeletonData};

/// Stable identifier of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestId {
    ShoulderMobility,
    NeckMobility,
    ShoulderLevel,
    PelvicLevel,
    SagittalAlignment,
    KneeAlignment,
    WristMobility,
}

impl TestId {
    pub const ALL: [TestId; 7] = [
        TestId::ShoulderMobility,
        TestId::NeckMobility,
        TestId::ShoulderLevel,
        TestId::PelvicLevel,
        TestId::SagittalAlignment,
        TestId::KneeAlignment,
        TestId::WristMobility,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TestId::ShoulderMobility => "shoulder-mobility",
            TestId::NeckMobility => "neck-mobility",
            TestId::ShoulderLevel => "shoulder-level",
            TestId::PelvicLevel => "pelvic-level",
            TestId::SagittalAlignment => "sagittal-alignment",
            TestId::KneeAlignment => "knee-alignment",
            TestId::WristMobility => "wrist-mobility",
        }
    }

    pub fn from_name(name: &str) -> Option<TestId> {
        TestId::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Mobility,
    Posture,
    Alignment,
}

/// Common behavior for all assessments
#[enum_dispatch]
pub trait Assess {
    fn id(&self) -> TestId;

    fn category(&self) -> Category;

    /// How many photos `analyze` reads, in order.
    fn photos(&self) -> usize;

    /// Score the photos. `None` when none of the required keypoints exist.
    fn analyze(&self, photos: &[SkeletonData], tr: &dyn Translate) -> Option<HealthReport>;
}

/// The assessment library
#[enum_dispatch(Assess)]
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    ShoulderMobility(ShoulderMobility),
    NeckMobility(NeckMobility),
    ShoulderLevel(ShoulderLevel),
    PelvicLevel(PelvicLevel),
    SagittalAlignment(SagittalAlignment),
    KneeAlignment(KneeAlignment),
    WristMobility(WristMobility),
}

impl Assessment {
    /// Every assessment with default parameters, in `TestId::ALL` order.
    pub fn all() -> Vec<Assessment> {
        TestId::ALL.into_iter().map(Assessment::for_id).collect()
    }

    pub fn for_id(id: TestId) -> Assessment {
        match id {
            TestId::ShoulderMobility => ShoulderMobility.into(),
            TestId::NeckMobility => NeckMobility.into(),
            TestId::ShoulderLevel => ShoulderLevel.into(),
            TestId::PelvicLevel => PelvicLevel.into(),
            TestId::SagittalAlignment => SagittalAlignment::default().into(),
            TestId::KneeAlignment => KneeAlignment.into(),
            TestId::WristMobility => WristMobility.into(),
        }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Average the scores of one measurement taken on several sides.
///
/// A missing side scores 0 like any absent angle; the sub-score as a whole is
/// `NOT_COMPUTED` only when every side is missing.
fn sub_score_of(values: &[Option<f64>], min: f64, max: f64) -> i32 {
    if values.iter().all(Option::is_none) {
        return NOT_COMPUTED;
    }
    let scores: Vec<i32> = values
        .iter()
        .map(|v| i32::from(linear_score(*v, min, max)))
        .collect();
    i32::from(average_score(&scores))
}

/// Whole degrees (or centimetres) for report text.
fn whole(value: f64) -> String {
    format!("{}", value.round() as i64)
}

fn side_name(tr: &dyn Translate, side: Side) -> String {
    match side {
        Side::Left => tr.translate("side.left", &[]),
        Side::Right => tr.translate("side.right", &[]),
        Side::Center => String::new(),
    }
}

fn is_good(score: u8) -> bool {
    score >= defaults::GOOD_SCORE
}

/// Title and description keys `<prefix>.title.<good|bad>` and
/// `<prefix>.description.<good|bad>`; the restricted description gets the score.
fn verdict(tr: &dyn Translate, prefix: &str, bad: &str, score: u8) -> (String, String) {
    let outcome = if is_good(score) { "good" } else { bad };
    let title = tr.translate(&format!("{prefix}.title.{outcome}"), &[]);
    let description = tr.translate(&format!("{prefix}.description.{outcome}"), &[score.to_string()]);
    (title, description)
}

fn warning(tr: &dyn Translate, level: WarningLevel, message: &str, risk: &str, args: &[String]) -> Warning {
    Warning {
        level,
        message: tr.translate(message, args),
        future_risk: tr.translate(risk, &[]),
    }
}

/// Highest band whose threshold `value` reaches, from `(threshold, level)`
/// pairs ordered most serious first.
fn band(value: f64, bands: &[(f64, WarningLevel)]) -> Option<WarningLevel> {
    bands.iter().find(|(threshold, _)| value >= *threshold).map(|(_, level)| *level)
}

/// Like [`band`] for measurements where lower is worse, ordered most serious first.
fn band_below(value: f64, bands: &[(f64, WarningLevel)]) -> Option<WarningLevel> {
    bands.iter().find(|(threshold, _)| value < *threshold).map(|(_, level)| *level)
}
