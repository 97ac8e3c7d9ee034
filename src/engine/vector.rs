//! Joint and axis tokens, resolved to direction vectors

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::ParseError;
use crate::skeleton::{EnrichedSkeleton, Keypoint, Landmark};

/// Fixed image axes (Y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn unit(self) -> DVec2 {
        match self {
            Axis::Vertical => dvec2(0.0, 1.0),
            Axis::Horizontal => dvec2(1.0, 0.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Vertical => "vertical",
            Axis::Horizontal => "horizontal",
        }
    }
}

/// Named body segments, each running from one landmark to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    LeftUpperArm,
    RightUpperArm,
    LeftForearm,
    RightForearm,
    LeftThigh,
    RightThigh,
    LeftShin,
    RightShin,
    LeftChest,
    RightChest,
    LeftLeg,
    RightLeg,
    NeckLeftEar,
    NeckRightEar,
    NeckNose,
}

impl Joint {
    pub const ALL: [Joint; 15] = [
        Joint::LeftUpperArm,
        Joint::RightUpperArm,
        Joint::LeftForearm,
        Joint::RightForearm,
        Joint::LeftThigh,
        Joint::RightThigh,
        Joint::LeftShin,
        Joint::RightShin,
        Joint::LeftChest,
        Joint::RightChest,
        Joint::LeftLeg,
        Joint::RightLeg,
        Joint::NeckLeftEar,
        Joint::NeckRightEar,
        Joint::NeckNose,
    ];

    /// The joint table: `(from, to)` landmarks of each segment.
    pub fn endpoints(self) -> (Landmark, Landmark) {
        use Keypoint::*;
        let kp = Landmark::Keypoint;
        match self {
            Joint::LeftUpperArm => (kp(LeftShoulder), kp(LeftElbow)),
            Joint::RightUpperArm => (kp(RightShoulder), kp(RightElbow)),
            Joint::LeftForearm => (kp(LeftElbow), kp(LeftWrist)),
            Joint::RightForearm => (kp(RightElbow), kp(RightWrist)),
            Joint::LeftThigh => (kp(LeftHip), kp(LeftKnee)),
            Joint::RightThigh => (kp(RightHip), kp(RightKnee)),
            Joint::LeftShin => (kp(LeftKnee), kp(LeftAnkle)),
            Joint::RightShin => (kp(RightKnee), kp(RightAnkle)),
            Joint::LeftChest => (kp(LeftShoulder), kp(LeftHip)),
            Joint::RightChest => (kp(RightShoulder), kp(RightHip)),
            Joint::LeftLeg => (kp(LeftHip), kp(LeftAnkle)),
            Joint::RightLeg => (kp(RightHip), kp(RightAnkle)),
            Joint::NeckLeftEar => (Landmark::Manubrium, kp(LeftEar)),
            Joint::NeckRightEar => (Landmark::Manubrium, kp(RightEar)),
            Joint::NeckNose => (Landmark::Manubrium, kp(Nose)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Joint::LeftUpperArm => "leftUpperArm",
            Joint::RightUpperArm => "rightUpperArm",
            Joint::LeftForearm => "leftForearm",
            Joint::RightForearm => "rightForearm",
            Joint::LeftThigh => "leftThigh",
            Joint::RightThigh => "rightThigh",
            Joint::LeftShin => "leftShin",
            Joint::RightShin => "rightShin",
            Joint::LeftChest => "leftChest",
            Joint::RightChest => "rightChest",
            Joint::LeftLeg => "leftLeg",
            Joint::RightLeg => "rightLeg",
            Joint::NeckLeftEar => "neckLeftEar",
            Joint::NeckRightEar => "neckRightEar",
            Joint::NeckNose => "neckNose",
        }
    }
}

/// A direction source for the angle engine. `inverted` flips the vector,
/// written as a leading `-` in the textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorToken {
    Axis { axis: Axis, inverted: bool },
    Joint { joint: Joint, inverted: bool },
}

impl VectorToken {
    pub const VERTICAL: VectorToken = VectorToken::Axis { axis: Axis::Vertical, inverted: false };
    pub const UP: VectorToken = VectorToken::Axis { axis: Axis::Vertical, inverted: true };
    pub const HORIZONTAL: VectorToken = VectorToken::Axis { axis: Axis::Horizontal, inverted: false };
    pub const LEFTWARD: VectorToken = VectorToken::Axis { axis: Axis::Horizontal, inverted: true };

    pub const fn joint(joint: Joint) -> VectorToken {
        VectorToken::Joint { joint, inverted: false }
    }

    /// The same token pointing the opposite way
    pub const fn inverted(self) -> VectorToken {
        match self {
            VectorToken::Axis { axis, inverted } => VectorToken::Axis { axis, inverted: !inverted },
            VectorToken::Joint { joint, inverted } => VectorToken::Joint { joint, inverted: !inverted },
        }
    }

    pub fn is_inverted(self) -> bool {
        match self {
            VectorToken::Axis { inverted, .. } | VectorToken::Joint { inverted, .. } => inverted,
        }
    }

    /// Resolve to a direction vector, or `None` when a joint endpoint is missing.
    pub fn resolve(self, skeleton: &EnrichedSkeleton) -> Option<DVec2> {
        let (v, inverted) = match self {
            VectorToken::Axis { axis, inverted } => (axis.unit(), inverted),
            VectorToken::Joint { joint, inverted } => {
                let (a, b) = joint.endpoints();
                (skeleton.get(b)? - skeleton.get(a)?, inverted)
            }
        };
        Some(if inverted { -v } else { v })
    }
}

/// Free-function form of [`VectorToken::resolve`].
pub fn resolve(token: VectorToken, skeleton: &EnrichedSkeleton) -> Option<DVec2> {
    token.resolve(skeleton)
}

impl fmt::Display for VectorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inverted() {
            f.write_str("-")?;
        }
        match self {
            VectorToken::Axis { axis, .. } => f.write_str(axis.name()),
            VectorToken::Joint { joint, .. } => f.write_str(joint.name()),
        }
    }
}

impl FromStr for VectorToken {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (inverted, offset) = match s.strip_prefix('-') {
            Some(_) => (true, 1),
            None => (false, 0),
        };
        let name = &s[offset..];
        if name.is_empty() {
            return Err(ParseError::EmptyToken);
        }
        if let Some(axis) = [Axis::Vertical, Axis::Horizontal].into_iter().find(|a| a.name() == name) {
            return Ok(VectorToken::Axis { axis, inverted });
        }
        match Joint::ALL.into_iter().find(|j| j.name() == name) {
            Some(joint) => Ok(VectorToken::Joint { joint, inverted }),
            None => Err(ParseError::unknown_token(s, offset)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::SkeletonData;

    fn arm_skeleton() -> EnrichedSkeleton {
        SkeletonData::new()
            .with(Keypoint::LeftShoulder, 0.6, 0.3)
            .with(Keypoint::RightShoulder, 0.4, 0.3)
            .with(Keypoint::LeftElbow, 0.7, 0.3)
            .with(Keypoint::Nose, 0.5, 0.1)
            .enrich()
    }

    #[test]
    fn axis_tokens_are_fixed_units() {
        let sk = arm_skeleton();
        assert_eq!(VectorToken::VERTICAL.resolve(&sk), Some(dvec2(0.0, 1.0)));
        assert_eq!(VectorToken::UP.resolve(&sk), Some(dvec2(0.0, -1.0)));
        assert_eq!(VectorToken::HORIZONTAL.resolve(&sk), Some(dvec2(1.0, 0.0)));
        assert_eq!(VectorToken::LEFTWARD.resolve(&sk), Some(dvec2(-1.0, 0.0)));
    }

    #[test]
    fn joint_token_is_b_minus_a() {
        let sk = arm_skeleton();
        let v = VectorToken::joint(Joint::LeftUpperArm).resolve(&sk).unwrap();
        assert!((v - dvec2(0.1, 0.0)).length() < 1e-12);
        let inv = VectorToken::joint(Joint::LeftUpperArm).inverted().resolve(&sk).unwrap();
        assert!((inv - dvec2(-0.1, 0.0)).length() < 1e-12);
    }

    #[test]
    fn neck_tokens_use_manubrium() {
        let sk = arm_skeleton();
        let v = resolve(VectorToken::joint(Joint::NeckNose), &sk).unwrap();
        assert!((v - dvec2(0.0, -0.2)).length() < 1e-12);
    }

    #[test]
    fn missing_endpoint_is_absent() {
        let sk = arm_skeleton();
        assert_eq!(VectorToken::joint(Joint::LeftForearm).resolve(&sk), None);
        assert_eq!(VectorToken::joint(Joint::NeckLeftEar).resolve(&sk), None);
    }

    #[test]
    fn parse_tokens() {
        assert_eq!("vertical".parse::<VectorToken>().ok(), Some(VectorToken::VERTICAL));
        assert_eq!("-vertical".parse::<VectorToken>().ok(), Some(VectorToken::UP));
        assert_eq!(
            "-leftUpperArm".parse::<VectorToken>().ok(),
            Some(VectorToken::joint(Joint::LeftUpperArm).inverted())
        );
        assert!(matches!("-".parse::<VectorToken>(), Err(ParseError::EmptyToken)));
        match "-leftToe".parse::<VectorToken>() {
            Err(ParseError::UnknownToken { name, .. }) => assert_eq!(name, "leftToe"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn display_round_trips() {
        for joint in Joint::ALL {
            for token in [VectorToken::joint(joint), VectorToken::joint(joint).inverted()] {
                assert_eq!(token.to_string().parse::<VectorToken>().ok(), Some(token));
            }
        }
    }
}
