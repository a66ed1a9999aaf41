//! Math types for dwellport

pub use glam::{Quat, Vec3, Vec4};

/// Position and orientation of a tracked thing (head, fingertip, rig).
///
/// Forward is `-Z`, up is `+Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// A pose at `position` whose forward axis points at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut pose = Self::from_position(position);
        pose.look_at(target);
        pose
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * (-Vec3::Z)
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.position.distance(other.position)
    }

    /// Maps a point from this pose's local space into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward == Vec3::ZERO {
            return;
        }
        self.rotation = Quat::from_rotation_arc(-Vec3::Z, forward);
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Linear interpolation, `t` is not clamped.
pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-5
    }

    #[test]
    fn test_identity_axes() {
        let pose = Pose::identity();
        assert_eq!(pose.forward(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(pose.up(), Vec3::Y);
        assert_eq!(pose.right(), Vec3::X);
    }

    #[test]
    fn test_looking_at_points_forward_at_target() {
        let pose = Pose::looking_at(Vec3::new(0.0, 1.6, 0.0), Vec3::new(3.0, 0.0, -4.0));
        let expected = (Vec3::new(3.0, 0.0, -4.0) - Vec3::new(0.0, 1.6, 0.0)).normalize();
        assert!(approx(pose.forward(), expected));
    }

    #[test]
    fn test_look_at_self_keeps_rotation() {
        let mut pose = Pose::from_position(Vec3::ONE);
        pose.look_at(Vec3::ONE);
        assert_eq!(pose.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_transform_point() {
        let pose = Pose::looking_at(Vec3::ZERO, Vec3::X);
        assert!(approx(pose.transform_point(Vec3::new(0.0, 0.0, -0.5)), Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 1.0, 0.25), 0.25);
        assert_eq!(lerp(1.0, 0.0, 0.25), 0.75);
    }
}
