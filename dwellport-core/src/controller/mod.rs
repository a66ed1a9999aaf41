//! Gaze-dwell teleport controller.
//!
//! Each tick the controller casts the viewer's gaze ray, tracks how long the
//! same target stays under it, publishes the footstep preview, and once the
//! dwell time is reached waits for a hand to point at the same target. A
//! confirmed target starts a fade-teleport-fade transaction that runs to
//! completion before gaze tracking resumes.

mod dwell;
mod transition;

pub use dwell::{DwellState, GazeTarget};
pub use transition::{TransitionPhase, TransitionTransaction};

use crate::config::GazeTeleportDesc;
use crate::error::{DwellError, Result};
use crate::events::DwellEvent;
use crate::feedback::{FeedbackSink, STEP_COUNT, TELEPORT_END, TELEPORT_START};
use crate::footsteps::{as_global, step_count};
use crate::hands::{HandPoseGateway, Handedness, is_hand_pointing_at};
use crate::highlight::{FadeDirection, HighlightFader};
use crate::locomotion::{MatchOrientation, TeleportExecutor, TeleportRequest, ViewerRig};
use crate::math::{Pose, Vec3, lerp};
use crate::overlay::{FadeOverlay, OverlayPlacement};
use crate::scene::{
    ObjectId, RaycastGateway, RaycastHit, SceneObjects, SurfaceId, SurfaceShading, TransformId,
};
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use dwell::GazeLock;
use std::time::Duration;

/// Events kept for the host between polls. Later events are dropped until the
/// queue is drained.
pub const EVENT_QUEUE_CAPACITY: usize = 256;

/// Snapshot of the controller state for debug overlays and logging.
#[derive(Debug, Clone, PartialEq)]
pub struct DwellDebugInfo {
    pub target: Option<TransformId>,
    pub elapsed: Duration,
    pub dwell_fraction: f32,
    pub step_count: u32,
    pub phase: Option<TransitionPhase>,
    pub highlighted: Option<SurfaceId>,
    pub last_relocated: Option<ObjectId>,
}

/// Collects the controller's collaborators before construction.
///
/// Viewer, raycast, hands, feedback, teleport executor and scene objects are
/// required. The fade overlay and surface shading are optional: without them
/// the teleport still happens, only the visuals are skipped.
pub struct GazeDwellControllerBuilder {
    desc: GazeTeleportDesc,
    viewer: Option<Box<dyn ViewerRig>>,
    raycast: Option<Box<dyn RaycastGateway>>,
    hands: Option<Box<dyn HandPoseGateway>>,
    feedback: Option<Box<dyn FeedbackSink>>,
    teleport: Option<Box<dyn TeleportExecutor>>,
    objects: Option<Box<dyn SceneObjects>>,
    overlay: Option<Box<dyn FadeOverlay>>,
    shading: Option<Box<dyn SurfaceShading>>,
}

impl GazeDwellControllerBuilder {
    pub fn new(desc: GazeTeleportDesc) -> Self {
        Self {
            desc,
            viewer: None,
            raycast: None,
            hands: None,
            feedback: None,
            teleport: None,
            objects: None,
            overlay: None,
            shading: None,
        }
    }

    pub fn viewer(mut self, viewer: impl ViewerRig + 'static) -> Self {
        self.viewer = Some(Box::new(viewer));
        self
    }

    pub fn raycast(mut self, raycast: impl RaycastGateway + 'static) -> Self {
        self.raycast = Some(Box::new(raycast));
        self
    }

    pub fn hands(mut self, hands: impl HandPoseGateway + 'static) -> Self {
        self.hands = Some(Box::new(hands));
        self
    }

    pub fn feedback(mut self, feedback: impl FeedbackSink + 'static) -> Self {
        self.feedback = Some(Box::new(feedback));
        self
    }

    pub fn teleport(mut self, teleport: impl TeleportExecutor + 'static) -> Self {
        self.teleport = Some(Box::new(teleport));
        self
    }

    pub fn objects(mut self, objects: impl SceneObjects + 'static) -> Self {
        self.objects = Some(Box::new(objects));
        self
    }

    pub fn overlay(mut self, overlay: impl FadeOverlay + 'static) -> Self {
        self.overlay = Some(Box::new(overlay));
        self
    }

    pub fn shading(mut self, shading: impl SurfaceShading + 'static) -> Self {
        self.shading = Some(Box::new(shading));
        self
    }

    /// Validate the settings and wire the controller.
    ///
    /// # Errors
    ///
    /// `DwellError::Configuration` for invalid settings and
    /// `DwellError::MissingDependency` for an absent required collaborator. Both
    /// are logged; no controller exists afterwards, so no tick work is attempted.
    pub fn build(self) -> Result<GazeDwellController> {
        if let Err(e) = self.desc.validate() {
            log::error!("Gaze teleporter disabled: {}", e);
            return Err(e);
        }

        let viewer = require(self.viewer, "viewer rig")?;
        let raycast = require(self.raycast, "raycast gateway")?;
        let hands = require(self.hands, "hand pose gateway")?;
        let feedback = require(self.feedback, "feedback sink")?;
        let teleport = require(self.teleport, "teleport executor")?;
        let objects = require(self.objects, "scene objects")?;

        let mut overlay = self.overlay;
        match overlay.as_mut() {
            Some(overlay) => {
                overlay.set_opacity(0.0);
                overlay.hide();
            }
            None => log::warn!("Fade overlay not assigned, teleports will happen without fading"),
        }
        if self.shading.is_none() {
            log::warn!("Surface shading not assigned, teleport targets will not be highlighted");
        }

        let (event_sender, event_receiver) = bounded(EVENT_QUEUE_CAPACITY);
        Ok(GazeDwellController {
            highlight: HighlightFader::new(self.desc.highlight_fade_duration),
            desc: self.desc,
            viewer,
            raycast,
            hands,
            feedback,
            teleport,
            objects,
            overlay,
            shading: self.shading,
            enabled: true,
            lock: None,
            highlighted: None,
            transition: None,
            last_relocated: None,
            step_count: 0,
            event_sender,
            event_receiver,
            events_dropped: false,
        })
    }
}

fn require<T>(dependency: Option<T>, name: &'static str) -> Result<T> {
    dependency.ok_or_else(|| {
        log::error!("Gaze teleporter disabled: no {} assigned", name);
        DwellError::MissingDependency(name)
    })
}

/// Per-tick gaze-dwell teleporter.
///
/// Owns the gaze target, dwell progress, the in-flight transition and the last
/// relocated object exclusively. Single-threaded: call [`tick`](Self::tick) once
/// per rendered frame.
pub struct GazeDwellController {
    desc: GazeTeleportDesc,
    viewer: Box<dyn ViewerRig>,
    raycast: Box<dyn RaycastGateway>,
    hands: Box<dyn HandPoseGateway>,
    feedback: Box<dyn FeedbackSink>,
    teleport: Box<dyn TeleportExecutor>,
    objects: Box<dyn SceneObjects>,
    overlay: Option<Box<dyn FadeOverlay>>,
    shading: Option<Box<dyn SurfaceShading>>,
    highlight: HighlightFader,
    enabled: bool,
    lock: Option<GazeLock>,
    highlighted: Option<SurfaceId>,
    transition: Option<TransitionTransaction>,
    last_relocated: Option<ObjectId>,
    step_count: u32,
    event_sender: Sender<DwellEvent>,
    event_receiver: Receiver<DwellEvent>,
    events_dropped: bool,
}

impl GazeDwellController {
    pub fn builder(desc: GazeTeleportDesc) -> GazeDwellControllerBuilder {
        GazeDwellControllerBuilder::new(desc)
    }

    pub fn desc(&self) -> &GazeTeleportDesc {
        &self.desc
    }

    /// Replace the settings between transitions.
    ///
    /// # Errors
    ///
    /// `DwellError::TransitionInProgress` while a transition runs, or
    /// `DwellError::Configuration` if `desc` is invalid.
    pub fn set_desc(&mut self, desc: GazeTeleportDesc) -> Result<()> {
        if self.transition.is_some() {
            return Err(DwellError::TransitionInProgress);
        }
        desc.validate()?;
        self.highlight.set_duration(desc.highlight_fade_duration);
        self.desc = desc;
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A disabled controller ignores ticks entirely, including running fades.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn gaze_target(&self) -> Option<&GazeTarget> {
        self.lock.as_ref().map(|lock| &lock.target)
    }

    pub fn dwell(&self) -> Option<&DwellState> {
        self.lock.as_ref().map(|lock| &lock.dwell)
    }

    pub fn transition(&self) -> Option<&TransitionTransaction> {
        self.transition.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn highlighted_surface(&self) -> Option<SurfaceId> {
        self.highlighted
    }

    pub fn last_relocated(&self) -> Option<ObjectId> {
        self.last_relocated
    }

    /// Last footstep count published to the feedback sink.
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn highlight_fader(&self) -> &HighlightFader {
        &self.highlight
    }

    pub fn debug_info(&self) -> DwellDebugInfo {
        let dwell = self.dwell();
        DwellDebugInfo {
            target: self.gaze_target().map(|target| target.transform),
            elapsed: dwell.map(|dwell| dwell.elapsed).unwrap_or_default(),
            dwell_fraction: dwell
                .map(|dwell| dwell.fraction(self.desc.dwell_time))
                .unwrap_or(0.0),
            step_count: self.step_count,
            phase: self.transition.as_ref().map(|transition| transition.phase),
            highlighted: self.highlighted,
            last_relocated: self.last_relocated,
        }
    }

    /// Drains the events emitted since the last call.
    ///
    /// At most [`EVENT_QUEUE_CAPACITY`] events are kept between calls.
    pub fn poll_events(&self) -> Vec<DwellEvent> {
        self.event_receiver.try_iter().collect()
    }

    /// Receiver for consumers that want to read events elsewhere.
    ///
    /// Events are delivered to exactly one receiver, clones compete for them.
    pub fn event_receiver(&self) -> &Receiver<DwellEvent> {
        &self.event_receiver
    }

    /// Advance the controller by one frame of `dt`.
    ///
    /// Highlight fades always advance. While a transition is in flight only the
    /// transition advances; the gaze ray is not cast.
    pub fn tick(&mut self, dt: Duration) {
        if !self.enabled {
            return;
        }

        if let Some(shading) = self.shading.as_deref_mut() {
            self.highlight.tick(dt, shading);
        }

        if self.transition.is_some() {
            self.advance_transition(dt);
            return;
        }

        self.poll_gaze(dt);
    }

    fn poll_gaze(&mut self, dt: Duration) {
        let head = self.viewer.pose();
        let hit = self.raycast.cast_ray(
            head.position,
            head.forward(),
            self.desc.gaze_max_distance,
            self.desc.teleport_layer_mask,
        );

        match hit {
            Some(hit) => self.on_gaze_hit(&head, &hit, dt),
            None => self.on_gaze_lost(),
        }
    }

    fn on_gaze_lost(&mut self) {
        if let Some(surface) = self.highlighted.take() {
            self.start_highlight(surface, FadeDirection::Hidden);
        }
        if let Some(lock) = self.lock.take() {
            log::debug!("Gaze left {}", lock.target.transform);
            self.emit(DwellEvent::TargetLost {
                transform: lock.target.transform,
            });
        }
        self.publish_step_count(0);
    }

    fn on_gaze_hit(&mut self, head: &Pose, hit: &RaycastHit, dt: Duration) {
        self.update_highlight(hit);

        let dwell_time = self.desc.dwell_time;
        let locked = self.lock.as_ref().map(|lock| lock.target.transform);
        if locked == Some(hit.transform) {
            if let Some(lock) = self.lock.as_mut() {
                lock.dwell.advance(dt, dwell_time);
            }
        } else {
            if let Some(previous) = locked {
                log::debug!("Gaze moved from {} to {}", previous, hit.transform);
                self.emit(DwellEvent::TargetLost { transform: previous });
            }
            self.lock_target(head.position, hit);
        }

        let Some(lock) = self.lock.as_mut() else {
            return;
        };
        let steps = lock.dwell.step_count(dwell_time, self.desc.step_length);
        let complete = lock.dwell.is_complete(dwell_time);
        let first_completion = complete && !lock.completion_reported;
        if complete {
            lock.completion_reported = true;
        }
        let target = lock.target;
        let destination = lock.dwell.target_position;

        self.publish_step_count(steps);
        if !complete {
            return;
        }
        if first_completion {
            log::debug!("Dwell complete on {}, waiting for pointing gesture", target.transform);
            self.emit(DwellEvent::DwellCompleted {
                transform: target.transform,
            });
        }

        if self.is_gesture_confirmed(target.transform) {
            self.begin_transition(destination, target.object);
        }
    }

    fn update_highlight(&mut self, hit: &RaycastHit) {
        let Some(surface) = hit.surface else {
            return;
        };
        if self.highlighted == Some(surface) {
            return;
        }
        if let Some(previous) = self.highlighted.replace(surface) {
            self.start_highlight(previous, FadeDirection::Hidden);
        }
        self.start_highlight(surface, FadeDirection::Visible);
    }

    fn start_highlight(&mut self, surface: SurfaceId, direction: FadeDirection) {
        if let Some(shading) = self.shading.as_deref() {
            self.highlight.start(surface, direction, shading);
        }
    }

    fn lock_target(&mut self, start_position: Vec3, hit: &RaycastHit) {
        let target = GazeTarget::from(hit);
        let target_position = self.raycast.teleport_point(hit.transform).unwrap_or(hit.point);

        log::debug!(
            "Gaze locked on {}, destination {:?} ({:.2} away)",
            target.transform,
            target_position,
            start_position.distance(target_position)
        );

        self.publish_endpoints(start_position, target_position);
        self.lock = Some(GazeLock::new(target, DwellState::new(start_position, target_position)));
        self.emit(DwellEvent::TargetLocked {
            transform: target.transform,
            start_position,
            target_position,
        });
    }

    fn is_gesture_confirmed(&self, target: TransformId) -> bool {
        Handedness::BOTH.iter().any(|&hand| {
            is_hand_pointing_at(
                &*self.hands,
                &*self.raycast,
                hand,
                target,
                self.desc.pointing_max_distance,
                self.desc.teleport_layer_mask,
            )
        })
    }

    fn begin_transition(&mut self, destination: Vec3, target_object: ObjectId) {
        let start_position = self.viewer.pose().position;
        self.publish_endpoints(start_position, destination);

        let placement = OverlayPlacement::in_front(self.desc.plane_distance);
        let base_opacity = match self.overlay.as_mut() {
            Some(overlay) => {
                overlay.show(placement);
                overlay.opacity()
            }
            None => 0.0,
        };

        log::info!("Teleport confirmed, moving to {:?}", destination);
        self.transition = Some(TransitionTransaction::new(
            start_position,
            destination,
            target_object,
            base_opacity,
        ));
        self.emit(DwellEvent::TransitionStarted {
            destination,
            target_object,
        });
        self.emit(DwellEvent::TransitionPhaseChanged {
            phase: TransitionPhase::FadeIn,
        });
    }

    fn advance_transition(&mut self, dt: Duration) {
        let Some(mut transition) = self.transition.take() else {
            return;
        };

        // Relocate consumes no time, so one tick can pass through several phases.
        let finished = loop {
            match transition.phase {
                TransitionPhase::FadeIn => {
                    let duration = self.fade_duration(self.desc.fade_in_duration);
                    let progress = transition.advance(dt, duration);
                    let total = transition.total_distance;
                    self.set_overlay_opacity(lerp(transition.base_opacity, 1.0, progress));
                    self.publish_step_count(step_count(total, progress, self.desc.step_length));
                    if progress < 1.0 {
                        break false;
                    }

                    self.publish_step_count(step_count(total, 1.0, self.desc.step_length));
                    self.set_overlay_opacity(1.0);
                    self.enter_phase(&mut transition, TransitionPhase::Relocate);
                }
                TransitionPhase::Relocate => {
                    self.relocate(&transition);
                    self.enter_phase(&mut transition, TransitionPhase::FadeOut);
                    break false;
                }
                TransitionPhase::FadeOut => {
                    let duration = self.fade_duration(self.desc.fade_out_duration);
                    let progress = transition.advance(dt, duration);
                    self.set_overlay_opacity(lerp(1.0, 0.0, progress));
                    break progress >= 1.0;
                }
            }
        };

        if finished {
            self.finish_transition(&transition);
        } else {
            self.transition = Some(transition);
        }
    }

    fn enter_phase(&mut self, transition: &mut TransitionTransaction, phase: TransitionPhase) {
        transition.enter(phase);
        self.emit(DwellEvent::TransitionPhaseChanged { phase });
    }

    fn relocate(&mut self, transition: &TransitionTransaction) {
        self.teleport.request(TeleportRequest::new(
            transition.destination,
            MatchOrientation::TargetUp,
        ));

        let reactivated = self.last_relocated.take();
        if let Some(previous) = reactivated {
            self.objects.set_active(previous, true);
        }
        self.objects.set_active(transition.target_object, false);
        self.last_relocated = Some(transition.target_object);

        log::info!(
            "Relocated to {:?}, deactivated {}{}",
            transition.destination,
            transition.target_object,
            reactivated
                .map(|object| format!(", reactivated {}", object))
                .unwrap_or_default()
        );
        self.emit(DwellEvent::Relocated {
            destination: transition.destination,
            deactivated: transition.target_object,
            reactivated,
        });
    }

    fn finish_transition(&mut self, transition: &TransitionTransaction) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_opacity(0.0);
            overlay.hide();
        }
        self.publish_step_count(0);
        if let Some(lock) = self.lock.take() {
            self.emit(DwellEvent::TargetLost {
                transform: lock.target.transform,
            });
        }

        log::debug!("Teleport transition finished");
        self.emit(DwellEvent::TransitionFinished {
            destination: transition.destination,
        });
    }

    /// Fades collapse to nothing without an overlay to show them on.
    fn fade_duration(&self, configured: Duration) -> Duration {
        if self.overlay.is_some() {
            configured
        } else {
            Duration::ZERO
        }
    }

    fn set_overlay_opacity(&mut self, opacity: f32) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_opacity(opacity.clamp(0.0, 1.0));
        }
    }

    fn publish_step_count(&mut self, steps: u32) {
        self.step_count = steps;
        self.feedback.set_float(STEP_COUNT, steps as f32);
    }

    fn publish_endpoints(&mut self, start: Vec3, end: Vec3) {
        self.feedback.set_vector(TELEPORT_START, as_global(start));
        self.feedback.set_vector(TELEPORT_END, as_global(end));
    }

    fn emit(&mut self, event: DwellEvent) {
        match self.event_sender.try_send(event) {
            Ok(()) => self.events_dropped = false,
            Err(TrySendError::Full(event)) => {
                if !self.events_dropped {
                    log::warn!(
                        "Event queue full ({} events), dropping {:?} until it is polled",
                        EVENT_QUEUE_CAPACITY,
                        event
                    );
                }
                self.events_dropped = true;
            }
            // The controller holds the receiver, so the channel never disconnects.
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}
