//! Signed angles between vectors and declarative angle definitions

use glam::DVec2;

use super::vector::VectorToken;
use crate::skeleton::{EnrichedSkeleton, Landmark};
use crate::types::{Degrees, Point};

/// Signed, direction-sensitive angle from `v1` to `v2`, in `[0, 360)`.
///
/// With Y pointing down this is the clockwise rotation seen on screen.
/// Not commutative: `angle_between(a, b) + angle_between(b, a)` is 0 or 360.
pub fn angle_between(v1: DVec2, v2: DVec2) -> Degrees {
    let deg = Degrees::from_radians(v1.perp_dot(v2).atan2(v1.dot(v2))).raw();
    Degrees(if deg < 0.0 { deg + 360.0 } else { deg })
}

/// Inclination of the line through `a` and `b` from horizontal, in `[0, 90]`.
/// Independent of the order of the two points.
pub fn line_tilt(a: Point, b: Point) -> Degrees {
    let d = b - a;
    let deg = Degrees::from_radians(d.y.atan2(d.x).abs()).raw();
    Degrees(if deg > 90.0 { 180.0 - deg } else { deg })
}

/// Which two directions to compare and how to score the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleDefinition {
    /// Vertex the angle is labeled at; not used by the formula.
    pub center: Landmark,
    pub joint1: VectorToken,
    pub joint2: VectorToken,
    pub min: f64,
    pub max: f64,
}

impl AngleDefinition {
    pub const fn new(center: Landmark, joint1: VectorToken, joint2: VectorToken, min: f64, max: f64) -> Self {
        AngleDefinition { center, joint1, joint2, min, max }
    }

    /// Measure this definition on a skeleton.
    ///
    /// The engine compares `joint2` to `joint1`, the reverse of the declared
    /// order. Every clinical definition in `analysis` is written against it.
    pub fn evaluate(&self, skeleton: &EnrichedSkeleton) -> Option<Degrees> {
        let v1 = self.joint1.resolve(skeleton)?;
        let v2 = self.joint2.resolve(skeleton)?;
        Some(angle_between(v2, v1))
    }

    /// Evaluate and score with this definition's range.
    pub fn score(&self, skeleton: &EnrichedSkeleton) -> u8 {
        super::score::linear_score(self.evaluate(skeleton).map(Degrees::raw), self.min, self.max)
    }
}

/// Free-function form of [`AngleDefinition::evaluate`].
pub fn evaluate(definition: &AngleDefinition, skeleton: &EnrichedSkeleton) -> Option<Degrees> {
    definition.evaluate(skeleton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::vector::Joint;
    use crate::skeleton::{Keypoint, SkeletonData};
    use glam::dvec2;

    fn close(a: Degrees, b: f64) -> bool {
        (a.raw() - b).abs() < 1e-9
    }

    #[test]
    fn identical_vectors_are_zero() {
        assert!(close(angle_between(dvec2(1.0, 2.0), dvec2(2.0, 4.0)), 0.0));
    }

    #[test]
    fn quarter_turns() {
        // Y down: right -> down is a clockwise quarter turn on screen
        assert!(close(angle_between(dvec2(1.0, 0.0), dvec2(0.0, 1.0)), 90.0));
        assert!(close(angle_between(dvec2(0.0, 1.0), dvec2(1.0, 0.0)), 270.0));
        assert!(close(angle_between(dvec2(1.0, 0.0), dvec2(-1.0, 0.0)), 180.0));
    }

    #[test]
    fn angle_between_is_asymmetric() {
        let vectors = [
            dvec2(1.0, 0.0),
            dvec2(0.3, -0.7),
            dvec2(-2.0, 5.0),
            dvec2(-1.0, -1.0),
            dvec2(0.0, 3.0),
        ];
        for a in vectors {
            for b in vectors {
                let sum = angle_between(a, b).raw() + angle_between(b, a).raw();
                assert!(
                    sum.abs() < 1e-9 || (sum - 360.0).abs() < 1e-9,
                    "{a:?} {b:?} summed to {sum}"
                );
            }
        }
    }

    #[test]
    fn line_tilt_ignores_point_order() {
        let a = Point::new(0.3, 0.4);
        let b = Point::new(0.7, 0.42);
        let t1 = line_tilt(a, b).raw();
        let t2 = line_tilt(b, a).raw();
        assert!((t1 - t2).abs() < 1e-9);
        assert_eq!(t1.round(), 3.0);
    }

    #[test]
    fn evaluate_swaps_argument_order() {
        // Left arm held horizontally outward, chest pointing down
        let skeleton = SkeletonData::new()
            .with(Keypoint::LeftShoulder, 0.6, 0.3)
            .with(Keypoint::LeftElbow, 0.8, 0.3)
            .with(Keypoint::LeftHip, 0.6, 0.6)
            .enrich();
        let def = AngleDefinition::new(
            Keypoint::LeftShoulder.into(),
            VectorToken::joint(Joint::LeftChest),
            VectorToken::joint(Joint::LeftUpperArm),
            0.0,
            180.0,
        );
        assert!(close(def.evaluate(&skeleton).unwrap(), 90.0));
        assert_eq!(def.score(&skeleton), 50);

        let swapped = AngleDefinition { joint1: def.joint2, joint2: def.joint1, ..def };
        assert!(close(evaluate(&swapped, &skeleton).unwrap(), 270.0));
    }

    #[test]
    fn evaluate_absent_when_vector_missing() {
        let skeleton = SkeletonData::new().with(Keypoint::LeftShoulder, 0.6, 0.3).enrich();
        let def = AngleDefinition::new(
            Landmark::Manubrium,
            VectorToken::joint(Joint::NeckNose),
            VectorToken::UP,
            0.0,
            30.0,
        );
        assert_eq!(def.evaluate(&skeleton), None);
        assert_eq!(def.score(&skeleton), 0);
    }
}
