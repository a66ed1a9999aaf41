//! Scene collaborators of the gaze teleporter.
//!
//! The controller never owns scene geometry or renderers. It talks to the host
//! engine through three small traits:
//!
//! 1. **RaycastGateway** - ray queries against teleport surfaces
//! 2. **SceneObjects** - activating and deactivating teleport target objects
//! 3. **SurfaceShading** - per-instance shading properties of a surface renderer
//!
//! Scene entities are referenced through opaque ids ([`TransformId`],
//! [`SurfaceId`], [`ObjectId`]) handed out by the host.
//!
//! # Example
//!
//! ```rust,ignore
//! use dwellport_core::math::Vec3;
//! use dwellport_core::scene::{LayerMask, RaycastGateway, RaycastHit, TransformId};
//!
//! struct FloorTracer {
//!     // Your scene data...
//! }
//!
//! impl RaycastGateway for FloorTracer {
//!     fn cast_ray(
//!         &self,
//!         origin: Vec3,
//!         direction: Vec3,
//!         max_distance: f32,
//!         mask: LayerMask,
//!     ) -> Option<RaycastHit> {
//!         // Use your physics engine's query
//!         None
//!     }
//! }
//! ```

pub mod objects;
pub mod raycast;
pub mod shading;

pub use objects::SceneObjects;
pub use raycast::{LayerMask, ObjectId, RaycastGateway, RaycastHit, SurfaceId, TransformId};
pub use shading::SurfaceShading;
