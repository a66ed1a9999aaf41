pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod feedback;
pub mod footsteps;
pub mod hands;
pub mod highlight;
pub mod locomotion;
pub mod math;
pub mod overlay;
pub mod scene;

#[cfg(test)]
mod testing;

pub use config::GazeTeleportDesc;
pub use controller::{
    DwellDebugInfo, DwellState, EVENT_QUEUE_CAPACITY, GazeDwellController,
    GazeDwellControllerBuilder, GazeTarget, TransitionPhase, TransitionTransaction,
};
pub use error::DwellError;
pub use events::DwellEvent;
pub use feedback::{FeedbackBus, FeedbackSink};
pub use footsteps::{FootstepFrame, FootstepVisualizer};
pub use hands::{HandJoint, HandPoseGateway, Handedness};
pub use highlight::{FadeDirection, HighlightFader};
pub use locomotion::{
    ChannelTeleportExecutor, MatchOrientation, TeleportExecutor, TeleportRequest, ViewerRig,
};
pub use overlay::{FadeOverlay, OverlayPlacement};
pub use scene::{
    LayerMask, ObjectId, RaycastGateway, RaycastHit, SceneObjects, SurfaceId, SurfaceShading,
    TransformId,
};
