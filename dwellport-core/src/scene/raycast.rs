//! Ray query interface used for gaze and fingertip rays.

use crate::math::Vec3;
use std::fmt;

macro_rules! scene_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

scene_id!(
    /// Handle of a scene transform. Gaze targets are tracked per transform.
    TransformId
);
scene_id!(
    /// Handle of a renderer whose shading can be highlighted.
    SurfaceId
);
scene_id!(
    /// Handle of an object that can be activated and deactivated.
    ObjectId
);

/// Bit set of physics layers a ray query should consider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerMask(u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Mask containing a single layer. Layers outside `0..32` yield an empty mask.
    pub const fn from_layer(layer: u8) -> Self {
        if layer < 32 { Self(1 << layer) } else { Self::NONE }
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn with_layer(self, layer: u8) -> Self {
        Self(self.0 | Self::from_layer(layer).0)
    }

    pub const fn contains_layer(self, layer: u8) -> bool {
        self.0 & Self::from_layer(layer).0 != 0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Closest intersection returned by a [`RaycastGateway`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// World-space hit point
    pub point: Vec3,

    /// Distance from the ray origin to `point`
    pub distance: f32,

    /// Surface normal at the hit point, pointing away from the surface
    pub normal: Vec3,

    /// Transform of the collider that was hit
    pub transform: TransformId,

    /// Renderer attached to the collider, if it has one
    ///
    /// Colliders without a renderer can still be teleport targets, they are
    /// simply never highlighted.
    pub surface: Option<SurfaceId>,

    /// Object owning the collider; deactivated when the viewer relocates onto it
    pub object: ObjectId,
}

impl RaycastHit {
    pub fn new(point: Vec3, distance: f32, transform: TransformId, object: ObjectId) -> Self {
        Self {
            point,
            distance,
            normal: Vec3::Y,
            transform,
            surface: None,
            object,
        }
    }

    pub fn with_surface(mut self, surface: SurfaceId) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }
}

/// Synchronous, side-effect free ray queries against the host's physics scene.
///
/// Implementations should return the **closest** hit on a layer contained in
/// `mask`, or `None` when nothing is hit within `max_distance`.
pub trait RaycastGateway {
    /// Cast a ray from `origin` along `direction` (normalized).
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit>;

    /// World position of the named teleport point child of `transform`, if it has one.
    ///
    /// When present it replaces the raw hit point as the teleport destination.
    /// Default implementation reports no teleport point.
    fn teleport_point(&self, _transform: TransformId) -> Option<Vec3> {
        None
    }
}
