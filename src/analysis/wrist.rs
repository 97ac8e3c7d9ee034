//! Wrist mobility. The body pose model has no hand keypoints, so this
//! assessment always reports itself as unavailable.

use super::{Assess, Category, TestId};
use crate::report::{HealthReport, Translate};
use crate::skeleton::SkeletonData;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WristMobility;

impl Assess for WristMobility {
    fn id(&self) -> TestId {
        TestId::WristMobility
    }

    fn category(&self) -> Category {
        Category::Mobility
    }

    fn photos(&self) -> usize {
        0
    }

    fn analyze(&self, _photos: &[SkeletonData], tr: &dyn Translate) -> Option<HealthReport> {
        Some(HealthReport::unavailable(
            self.id(),
            tr.translate("wristMobility.title", &[]),
            tr.translate("wristMobility.unavailable", &[]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Catalog;

    #[test]
    fn always_unavailable() {
        let report = WristMobility.analyze(&[], &Catalog::english()).unwrap();
        assert!(!report.available);
        assert_eq!(report.score, 0);
        assert_eq!(report.title, "Wrist mobility");
    }
}
