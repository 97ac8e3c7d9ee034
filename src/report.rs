//! Health reports and the translator seam used to word them.

use std::collections::HashMap;
use std::fmt;

use crate::analysis::TestId;

/// Warning severity, ordered from least to most serious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WarningLevel::Low => "low",
            WarningLevel::Medium => "medium",
            WarningLevel::High => "high",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub level: WarningLevel,
    pub message: String,
    pub future_risk: String,
}

/// Outcome of one assessment. Built once per analysis and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub test: TestId,
    /// 0–100
    pub score: u8,
    pub title: String,
    pub description: String,
    pub details: Vec<String>,
    pub warnings: Vec<Warning>,
    /// `false` for the placeholder report of assessments that cannot run yet.
    pub available: bool,
}

impl HealthReport {
    pub fn rank(&self) -> char {
        crate::engine::rank(self.score)
    }

    /// Most serious warning level, if any.
    pub fn worst_level(&self) -> Option<WarningLevel> {
        self.warnings.iter().map(|w| w.level).max()
    }

    /// Placeholder for assessments that are not supported yet.
    pub fn unavailable(test: TestId, title: String, description: String) -> Self {
        HealthReport {
            test,
            score: 0,
            title,
            description,
            details: Vec::new(),
            warnings: Vec::new(),
            available: false,
        }
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {} ({}, {})", self.test, self.title, self.score, self.rank())?;
        writeln!(f, "{}", self.description)?;
        for detail in &self.details {
            writeln!(f, "- {detail}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "! {}: {} / {}", warning.level, warning.message, warning.future_risk)?;
        }
        Ok(())
    }
}

// ============================================================================
// Translation
// ============================================================================

/// Produces report text for a message key with positional `{0}`, `{1}` arguments.
pub trait Translate {
    fn translate(&self, key: &str, args: &[String]) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, &[String]) -> String,
{
    fn translate(&self, key: &str, args: &[String]) -> String {
        self(key, args)
    }
}

/// Replace `{0}`, `{1}`, … with the matching argument. Placeholders without
/// an argument are left as written.
pub fn format_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            Some((args.get(index)?, close))
        });
        match substituted {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Key → template table. Unknown keys translate to the key itself.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English wording for every key the assessments use.
    pub fn english() -> Self {
        let mut catalog = Catalog::new();
        for (key, template) in ENGLISH {
            catalog.insert(*key, *template);
        }
        catalog
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str, args: &[String]) -> String {
        match self.entries.get(key) {
            Some(template) => format_template(template, args),
            None => {
                crate::log::warn!(key, "missing translation");
                key.to_string()
            }
        }
    }
}

#[rustfmt::skip]
const ENGLISH: &[(&str, &str)] = &[
    ("side.left", "left"),
    ("side.right", "right"),

    ("shoulderMobility.title.good", "Good shoulder mobility"),
    ("shoulderMobility.title.restricted", "Restricted shoulder mobility"),
    ("shoulderMobility.description.good", "Both arms reach overhead with straight elbows."),
    ("shoulderMobility.description.restricted", "Raising the arms overhead is limited. Score {0}."),
    ("shoulderMobility.detail.abduction", "Shoulder abduction ({0}): {1}°"),
    ("shoulderMobility.detail.elbow", "Elbow bend while raising ({0}): {1}°"),
    ("shoulderMobility.warning.restricted", "The {0} shoulder only reaches {1}°"),
    ("shoulderMobility.risk.restricted", "Reduced overhead reach can lead to shoulder impingement."),
    ("shoulderMobility.warning.asymmetry", "Shoulder range differs by {0}° between sides"),
    ("shoulderMobility.risk.asymmetry", "Uneven shoulder mobility can cause compensation in the upper back."),

    ("neckMobility.title.good", "Good neck mobility"),
    ("neckMobility.title.restricted", "Restricted neck mobility"),
    ("neckMobility.description.good", "The head tilts freely to both sides."),
    ("neckMobility.description.restricted", "Side bending of the neck is limited. Score {0}."),
    ("neckMobility.detail.tilt", "Head tilt ({0}): {1}°"),
    ("neckMobility.warning.restricted", "Head tilt to the {0} is only {1}°"),
    ("neckMobility.risk.restricted", "Stiff neck muscles are associated with tension headaches."),
    ("neckMobility.warning.asymmetry", "Head tilt differs by {0}° between sides"),
    ("neckMobility.risk.asymmetry", "One-sided neck stiffness can progress to chronic neck pain."),

    ("shoulderLevel.title.good", "Shoulders are level"),
    ("shoulderLevel.title.imbalanced", "Shoulder imbalance"),
    ("shoulderLevel.detail.tilt", "Shoulder tilt: {0}°"),
    ("shoulderLevel.detail.higher", "Higher shoulder: {0}"),
    ("shoulderLevel.warning", "The {0} shoulder sits {1}° higher"),
    ("shoulderLevel.risk", "Persistent shoulder imbalance strains the neck and upper back."),

    ("pelvicLevel.title.good", "Pelvis is level"),
    ("pelvicLevel.title.imbalanced", "Pelvic imbalance"),
    ("pelvicLevel.detail.tilt", "Pelvic tilt: {0}°"),
    ("pelvicLevel.detail.higher", "Higher hip: {0}"),
    ("pelvicLevel.warning", "The {0} hip sits {1}° higher"),
    ("pelvicLevel.risk", "A tilted pelvis can lead to lower back pain and uneven leg loading."),

    ("level.description.balanced", "Deviation of {0}° is within the normal range."),
    ("level.description.mild", "Mild deviation of {0}°."),
    ("level.description.moderate", "Moderate deviation of {0}°."),
    ("level.description.severe", "Severe deviation of {0}°."),

    ("sagittal.title.good", "Good posture alignment"),
    ("sagittal.title.imbalanced", "Posture out of alignment"),
    ("sagittal.description.good", "Ear, trunk and ankle stack close to a vertical line."),
    ("sagittal.description.imbalanced", "The body leans away from its vertical line. Score {0}."),
    ("sagittal.detail.shift", "Ear-to-ankle shift: {0} cm"),
    ("sagittal.detail.lean", "Trunk lean ({0}): {1}°"),
    ("sagittal.warning.shift", "The head sits {0} cm off the ankle line"),
    ("sagittal.risk.shift", "Forward head posture increases load on the cervical spine."),
    ("sagittal.warning.lean", "The trunk leans {0}°"),
    ("sagittal.risk.lean", "A leaning trunk shifts load onto the lower back."),

    ("kneeAlignment.title.good", "Good knee alignment"),
    ("kneeAlignment.title.imbalanced", "Knee misalignment"),
    ("kneeAlignment.description.good", "Hips, knees and ankles line up."),
    ("kneeAlignment.description.imbalanced", "The knees deviate from the hip-ankle line. Score {0}."),
    ("kneeAlignment.detail.knee", "Knee angle ({0}): {1}°"),
    ("kneeAlignment.valgus", "inward (knock-knee)"),
    ("kneeAlignment.varus", "outward (bow-leg)"),
    ("kneeAlignment.warning", "The {0} knee deviates {1}° {2}"),
    ("kneeAlignment.risk", "Knee misalignment raises the risk of cartilage wear."),

    ("wristMobility.title", "Wrist mobility"),
    ("wristMobility.unavailable", "Wrist analysis needs hand keypoints and is not available yet."),
];
