//! Per-instance shading properties of highlightable surfaces.

use super::SurfaceId;

/// Highlight opacity of a teleport surface, `0.0` hidden to `1.0` fully visible.
pub const ALPHA: &str = "_Alpha";

/// Whether the surface shader pulses from the global shader clock.
///
/// Held at `0.0` while a highlight fade drives `ALPHA` manually.
pub const USE_GLOBAL_TIME: &str = "_UseGlobalTime";

/// Per-renderer property block, never the shared material.
///
/// Writing per instance keeps one surface's highlight from leaking onto every
/// other surface sharing its material.
pub trait SurfaceShading {
    fn surface_float(&self, surface: SurfaceId, key: &str) -> Option<f32>;

    fn set_surface_float(&mut self, surface: SurfaceId, key: &str, value: f32);
}
