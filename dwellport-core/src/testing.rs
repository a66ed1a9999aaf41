//! Scripted host world for controller tests.

use crate::config::GazeTeleportDesc;
use crate::controller::{GazeDwellController, GazeDwellControllerBuilder};
use crate::feedback::FeedbackBus;
use crate::hands::{HandJoint, HandPoseGateway, Handedness};
use crate::locomotion::{TeleportExecutor, TeleportRequest, ViewerRig};
use crate::math::{Pose, Vec3};
use crate::overlay::{FadeOverlay, OverlayPlacement};
use crate::scene::{
    LayerMask, ObjectId, RaycastGateway, RaycastHit, SceneObjects, SurfaceId, SurfaceShading,
    TransformId,
};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

/// A tracked hand: where its index tip is and what its ray lands on.
#[derive(Debug, Clone)]
pub struct ScriptedHand {
    pub tip: Pose,
    pub hit: Option<RaycastHit>,
}

#[derive(Debug, Default)]
pub struct WorldState {
    pub head: Pose,
    pub gaze_hit: Option<RaycastHit>,
    pub hands: HashMap<Handedness, ScriptedHand>,
    pub teleport_points: HashMap<TransformId, Vec3>,
    pub gaze_casts: usize,
    pub pointing_casts: usize,
    pub requests: Vec<TeleportRequest>,
    pub activations: Vec<(ObjectId, bool)>,
    pub overlay_visible: bool,
    pub overlay_opacity: f32,
    pub overlay_shows: usize,
    pub overlay_placement: Option<OverlayPlacement>,
    pub surface_floats: HashMap<(SurfaceId, String), f32>,
}

/// Shared handle implementing every host gateway.
#[derive(Debug, Clone, Default)]
pub struct Harness {
    state: Rc<RefCell<WorldState>>,
    pub feedback: FeedbackBus,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, WorldState> {
        self.state.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, WorldState> {
        self.state.borrow_mut()
    }

    /// Builder wired to this world, overlay and shading included.
    pub fn builder(&self, desc: GazeTeleportDesc) -> GazeDwellControllerBuilder {
        self.bare_builder(desc).overlay(self.clone()).shading(self.clone())
    }

    /// Builder with only the required collaborators.
    pub fn bare_builder(&self, desc: GazeTeleportDesc) -> GazeDwellControllerBuilder {
        GazeDwellController::builder(desc)
            .viewer(self.clone())
            .raycast(self.clone())
            .hands(self.clone())
            .feedback(self.feedback.clone())
            .teleport(self.clone())
            .objects(self.clone())
    }

    pub fn gaze_at(&self, hit: RaycastHit) {
        self.state_mut().gaze_hit = Some(hit);
    }

    pub fn look_away(&self) {
        self.state_mut().gaze_hit = None;
    }

    pub fn move_head(&self, position: Vec3) {
        self.state_mut().head.position = position;
    }

    /// Track `hand` with its index ray landing on `hit`.
    pub fn point(&self, hand: Handedness, hit: RaycastHit) {
        let tip = match hand {
            Handedness::Left => Pose::from_position(Vec3::new(-0.2, -0.3, -0.3)),
            Handedness::Right => Pose::from_position(Vec3::new(0.2, -0.3, -0.3)),
        };
        self.state_mut().hands.insert(hand, ScriptedHand { tip, hit: Some(hit) });
    }

    pub fn drop_hand(&self, hand: Handedness) {
        self.state_mut().hands.remove(&hand);
    }

    pub fn set_teleport_point(&self, transform: TransformId, point: Vec3) {
        self.state_mut().teleport_points.insert(transform, point);
    }

    pub fn alpha(&self, surface: SurfaceId) -> Option<f32> {
        self.surface_float(surface, crate::scene::shading::ALPHA)
    }
}

/// Hit on a teleport pad whose transform, surface and object all share `id`.
pub fn pad_hit(id: u64, point: Vec3) -> RaycastHit {
    RaycastHit::new(point, point.length(), TransformId::new(id), ObjectId::new(id))
        .with_surface(SurfaceId::new(id))
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

impl ViewerRig for Harness {
    fn pose(&self) -> Pose {
        self.state().head
    }
}

impl RaycastGateway for Harness {
    fn cast_ray(
        &self,
        origin: Vec3,
        _direction: Vec3,
        _max_distance: f32,
        _mask: LayerMask,
    ) -> Option<RaycastHit> {
        let mut state = self.state_mut();
        let pointing = state
            .hands
            .values()
            .find(|hand| hand.tip.position == origin)
            .map(|hand| hand.hit);
        match pointing {
            Some(hit) => {
                state.pointing_casts += 1;
                hit
            }
            None => {
                state.gaze_casts += 1;
                state.gaze_hit
            }
        }
    }

    fn teleport_point(&self, transform: TransformId) -> Option<Vec3> {
        self.state().teleport_points.get(&transform).copied()
    }
}

impl HandPoseGateway for Harness {
    fn is_tracked(&self, hand: Handedness) -> bool {
        self.state().hands.contains_key(&hand)
    }

    fn joint_pose(&self, hand: Handedness, joint: HandJoint) -> Option<Pose> {
        let HandJoint::IndexTip = joint;
        self.state().hands.get(&hand).map(|hand| hand.tip)
    }
}

impl TeleportExecutor for Harness {
    fn request(&mut self, request: TeleportRequest) {
        self.state_mut().requests.push(request);
    }
}

impl SceneObjects for Harness {
    fn set_active(&mut self, object: ObjectId, active: bool) {
        self.state_mut().activations.push((object, active));
    }
}

impl FadeOverlay for Harness {
    fn show(&mut self, placement: OverlayPlacement) {
        let mut state = self.state_mut();
        state.overlay_visible = true;
        state.overlay_shows += 1;
        state.overlay_placement = Some(placement);
    }

    fn hide(&mut self) {
        self.state_mut().overlay_visible = false;
    }

    fn opacity(&self) -> f32 {
        self.state().overlay_opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.state_mut().overlay_opacity = opacity;
    }
}

impl SurfaceShading for Harness {
    fn surface_float(&self, surface: SurfaceId, key: &str) -> Option<f32> {
        self.state().surface_floats.get(&(surface, key.to_string())).copied()
    }

    fn set_surface_float(&mut self, surface: SurfaceId, key: &str, value: f32) {
        self.state_mut().surface_floats.insert((surface, key.to_string()), value);
    }
}
