use dwellport_core::hands::{HandJoint, HandPoseGateway, Handedness};
use dwellport_core::locomotion::ViewerRig;
use dwellport_core::math::{Pose, Vec3};
use dwellport_core::overlay::{FadeOverlay, OverlayPlacement};
use dwellport_core::scene::shading::ALPHA;
use dwellport_core::scene::{
    LayerMask, ObjectId, RaycastGateway, RaycastHit, SceneObjects, SurfaceId, SurfaceShading,
    TransformId,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const EYE_HEIGHT: f32 = 1.6;
pub const TELEPORT_LAYER: u8 = 3;

/// A flat box on the floor the viewer can teleport onto.
#[derive(Debug, Clone)]
pub struct Pad {
    pub id: u64,
    pub name: &'static str,
    pub center: Vec3,
    pub half_extents: Vec3,
    pub layer: u8,
    pub active: bool,
}

impl Pad {
    pub fn floor(id: u64, name: &'static str, x: f32, z: f32) -> Self {
        Self {
            id,
            name,
            center: Vec3::new(x, 0.0, z),
            half_extents: Vec3::new(0.5, 0.05, 0.5),
            layer: TELEPORT_LAYER,
            active: true,
        }
    }

    fn top(&self) -> Vec3 {
        self.center + Vec3::Y * self.half_extents.y
    }

    /// Slab test against the pad's axis-aligned bounds.
    fn intersect(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let min = self.center - self.half_extents;
        let max = self.center + self.half_extents;
        let inv = direction.recip();
        let t1 = (min - origin) * inv;
        let t2 = (max - origin) * inv;
        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();

        if t_near > t_far || t_far < 0.0 {
            return None;
        }
        let t = t_near.max(0.0);
        (t <= max_distance).then_some(t)
    }
}

#[derive(Debug, Default)]
pub struct DemoWorld {
    pub head: Pose,
    pub pads: Vec<Pad>,
    /// Index fingertip pose per tracked hand
    pub hands: HashMap<Handedness, Pose>,
    pub overlay_opacity: f32,
    pub overlay_visible: bool,
    pub alpha: HashMap<SurfaceId, f32>,
}

/// Shared handle to the demo world. Each clone is handed to the controller as
/// a different collaborator.
#[derive(Debug, Clone, Default)]
pub struct DemoScene {
    world: Rc<RefCell<DemoWorld>>,
}

impl DemoScene {
    pub fn new(pads: Vec<Pad>) -> Self {
        let scene = Self::default();
        {
            let mut world = scene.world.borrow_mut();
            world.pads = pads;
            world.head = Pose::from_position(Vec3::Y * EYE_HEIGHT);
        }
        scene
    }

    pub fn pad(&self, id: u64) -> Option<Pad> {
        self.world.borrow().pads.iter().find(|pad| pad.id == id).cloned()
    }

    pub fn head(&self) -> Pose {
        self.world.borrow().head
    }

    pub fn look_at(&self, target: Vec3) {
        self.world.borrow_mut().head.look_at(target);
    }

    pub fn look_at_pad(&self, id: u64) {
        if let Some(pad) = self.pad(id) {
            self.look_at(pad.center);
        }
    }

    /// Stand on `floor_point`, keeping the current view direction.
    pub fn stand_at(&self, floor_point: Vec3) {
        self.world.borrow_mut().head.position = floor_point + Vec3::Y * EYE_HEIGHT;
    }

    /// Raise `hand` and aim its index finger at the pad.
    pub fn point_at_pad(&self, hand: Handedness, id: u64) {
        let Some(pad) = self.pad(id) else {
            return;
        };
        let mut world = self.world.borrow_mut();
        let side = match hand {
            Handedness::Left => -0.2,
            Handedness::Right => 0.2,
        };
        let tip = world.head.transform_point(Vec3::new(side, -0.4, -0.3));
        world.hands.insert(hand, Pose::looking_at(tip, pad.center));
    }

    pub fn lower_hands(&self) {
        self.world.borrow_mut().hands.clear();
    }

    pub fn is_pad_active(&self, id: u64) -> bool {
        self.pad(id).is_some_and(|pad| pad.active)
    }

    pub fn overlay_opacity(&self) -> f32 {
        self.world.borrow().overlay_opacity
    }

    pub fn overlay_visible(&self) -> bool {
        self.world.borrow().overlay_visible
    }

    pub fn highlight_alpha(&self, id: u64) -> f32 {
        self.world
            .borrow()
            .alpha
            .get(&SurfaceId::new(id))
            .copied()
            .unwrap_or(0.0)
    }
}

impl ViewerRig for DemoScene {
    fn pose(&self) -> Pose {
        self.head()
    }
}

impl RaycastGateway for DemoScene {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        let world = self.world.borrow();
        world
            .pads
            .iter()
            .filter(|pad| pad.active && mask.contains_layer(pad.layer))
            .filter_map(|pad| pad.intersect(origin, direction, max_distance).map(|t| (pad, t)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(pad, t)| {
                RaycastHit::new(
                    origin + direction * t,
                    t,
                    TransformId::new(pad.id),
                    ObjectId::new(pad.id),
                )
                .with_surface(SurfaceId::new(pad.id))
            })
    }

    fn teleport_point(&self, transform: TransformId) -> Option<Vec3> {
        self.pad(transform.raw()).map(|pad| pad.top())
    }
}

impl HandPoseGateway for DemoScene {
    fn is_tracked(&self, hand: Handedness) -> bool {
        self.world.borrow().hands.contains_key(&hand)
    }

    fn joint_pose(&self, hand: Handedness, joint: HandJoint) -> Option<Pose> {
        match joint {
            HandJoint::IndexTip => self.world.borrow().hands.get(&hand).copied(),
            _ => None,
        }
    }
}

impl SceneObjects for DemoScene {
    fn set_active(&mut self, object: ObjectId, active: bool) {
        let mut world = self.world.borrow_mut();
        if let Some(pad) = world.pads.iter_mut().find(|pad| pad.id == object.raw()) {
            log::debug!("{} {}", if active { "Showing" } else { "Hiding" }, pad.name);
            pad.active = active;
        }
    }
}

impl FadeOverlay for DemoScene {
    fn show(&mut self, placement: OverlayPlacement) {
        let mut world = self.world.borrow_mut();
        let position = placement.world_position(&world.head);
        log::debug!("Fade overlay shown at {:?}", position);
        world.overlay_visible = true;
    }

    fn hide(&mut self) {
        self.world.borrow_mut().overlay_visible = false;
    }

    fn opacity(&self) -> f32 {
        self.world.borrow().overlay_opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.world.borrow_mut().overlay_opacity = opacity;
    }
}

impl SurfaceShading for DemoScene {
    fn surface_float(&self, surface: SurfaceId, key: &str) -> Option<f32> {
        if key != ALPHA {
            return None;
        }
        self.world.borrow().alpha.get(&surface).copied()
    }

    fn set_surface_float(&mut self, surface: SurfaceId, key: &str, value: f32) {
        if key == ALPHA {
            self.world.borrow_mut().alpha.insert(surface, value);
        }
    }
}
