//! Screen-covering fade overlay.

use crate::math::{Pose, Vec3};

/// Placement of the overlay relative to the viewer's head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    /// Offset in head-local space
    pub local_position: Vec3,
}

impl OverlayPlacement {
    /// Centered on the view axis, `plane_distance` in front of the eyes.
    pub fn in_front(plane_distance: f32) -> Self {
        Self {
            local_position: Vec3::NEG_Z * plane_distance,
        }
    }

    /// World-space position of the overlay for a given head pose.
    pub fn world_position(&self, head: &Pose) -> Vec3 {
        head.transform_point(self.local_position)
    }
}

/// A quad parented to the viewer whose opacity masks the relocation.
///
/// Opacity is `0.0` fully transparent to `1.0` fully opaque.
pub trait FadeOverlay {
    /// Activate the overlay and attach it to the viewer at `placement`.
    fn show(&mut self, placement: OverlayPlacement);

    /// Deactivate the overlay.
    fn hide(&mut self);

    fn opacity(&self) -> f32;

    fn set_opacity(&mut self, opacity: f32);
}
