//! Hand tracking interface and the pointing gesture built on it.

use crate::math::Pose;
use crate::scene::{LayerMask, RaycastGateway, TransformId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub const BOTH: [Handedness; 2] = [Handedness::Left, Handedness::Right];
}

/// Tracked hand joints the teleporter asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HandJoint {
    /// Tip of the index finger, its forward axis is the pointing direction
    IndexTip,
}

/// Read access to the host's hand tracking subsystem.
pub trait HandPoseGateway {
    /// Whether the hand is currently tracked. Untracked hands never confirm.
    fn is_tracked(&self, hand: Handedness) -> bool;

    /// World-space pose of a joint, `None` when the joint has no valid pose this frame.
    fn joint_pose(&self, hand: Handedness, joint: HandJoint) -> Option<Pose>;
}

/// Casts a ray from the index fingertip along its forward axis and reports
/// whether it lands on `target`.
///
/// Returns `false` when the hand is untracked, the fingertip has no pose, the
/// ray misses, or it hits a different transform.
pub fn is_hand_pointing_at(
    hands: &dyn HandPoseGateway,
    raycast: &dyn RaycastGateway,
    hand: Handedness,
    target: TransformId,
    max_distance: f32,
    mask: LayerMask,
) -> bool {
    if !hands.is_tracked(hand) {
        return false;
    }

    let Some(tip) = hands.joint_pose(hand, HandJoint::IndexTip) else {
        return false;
    };

    raycast
        .cast_ray(tip.position, tip.forward(), max_distance, mask)
        .is_some_and(|hit| hit.transform == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::scene::{ObjectId, RaycastHit};

    struct OneHand {
        tracked: bool,
        tip: Option<Pose>,
    }

    impl HandPoseGateway for OneHand {
        fn is_tracked(&self, hand: Handedness) -> bool {
            hand == Handedness::Right && self.tracked
        }

        fn joint_pose(&self, hand: Handedness, joint: HandJoint) -> Option<Pose> {
            (hand == Handedness::Right && joint == HandJoint::IndexTip)
                .then_some(self.tip)
                .flatten()
        }
    }

    /// Hits transform 1 for rays heading into -Z, nothing otherwise.
    struct WallTracer;

    impl RaycastGateway for WallTracer {
        fn cast_ray(
            &self,
            origin: Vec3,
            direction: Vec3,
            max_distance: f32,
            _: LayerMask,
        ) -> Option<RaycastHit> {
            (direction.z < -0.5 && max_distance >= 5.0).then(|| {
                let point = origin + direction * 5.0;
                RaycastHit::new(point, 5.0, TransformId::new(1), ObjectId::new(1))
            })
        }
    }

    fn points(hands: &OneHand, hand: Handedness, target: u64, max_distance: f32) -> bool {
        let target = TransformId::new(target);
        is_hand_pointing_at(hands, &WallTracer, hand, target, max_distance, LayerMask::ALL)
    }

    #[test]
    fn test_pointing_at_target() {
        let hands = OneHand {
            tracked: true,
            tip: Some(Pose::identity()),
        };
        assert!(points(&hands, Handedness::Right, 1, 10.0));
        assert!(!points(&hands, Handedness::Right, 2, 10.0));
        assert!(!points(&hands, Handedness::Right, 1, 2.0));
    }

    #[test]
    fn test_untracked_or_missing_pose_never_points() {
        let untracked = OneHand {
            tracked: false,
            tip: Some(Pose::identity()),
        };
        assert!(!points(&untracked, Handedness::Right, 1, 10.0));

        let no_pose = OneHand { tracked: true, tip: None };
        assert!(!points(&no_pose, Handedness::Right, 1, 10.0));
        assert!(!points(&no_pose, Handedness::Left, 1, 10.0));
    }

    #[test]
    fn test_pointing_away_misses() {
        let hands = OneHand {
            tracked: true,
            tip: Some(Pose::looking_at(Vec3::ZERO, Vec3::X)),
        };
        assert!(!points(&hands, Handedness::Right, 1, 10.0));
    }
}
