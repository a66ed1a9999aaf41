use crate::scene::{DemoScene, Pad, TELEPORT_LAYER};
use anyhow::{Result, ensure};
use crossbeam_channel::Receiver;
use dwellport_core::config::GazeTeleportDesc;
use dwellport_core::controller::GazeDwellController;
use dwellport_core::events::DwellEvent;
use dwellport_core::feedback::FeedbackBus;
use dwellport_core::footsteps::FootstepVisualizer;
use dwellport_core::hands::Handedness;
use dwellport_core::locomotion::{ChannelTeleportExecutor, TeleportRequest};
use dwellport_core::math::Vec3;
use dwellport_core::scene::{LayerMask, ObjectId};
use std::time::Duration;

const HALL: u64 = 1;
const GALLERY: u64 = 2;
const BALCONY: u64 = 3;

pub fn run_scenarios(ticks_per_second: u32) -> Result<()> {
    log::info!("=== Dwell and confirm ===");
    dwell_and_confirm(ticks_per_second)?;

    log::info!("=== Target switch ===");
    target_switch(ticks_per_second)?;

    log::info!("=== Unconfirmed dwell ===");
    unconfirmed_dwell(ticks_per_second)?;

    log::info!("=== Chained relocation ===");
    chained_relocation(ticks_per_second)?;

    log::info!("All scenarios completed");
    Ok(())
}

fn pads() -> Vec<Pad> {
    vec![
        Pad::floor(HALL, "hall", 0.0, -4.0),
        Pad::floor(GALLERY, "gallery", 3.0, -7.0),
        Pad::floor(BALCONY, "balcony", -2.0, -11.0),
    ]
}

fn desc() -> GazeTeleportDesc {
    GazeTeleportDesc::new()
        .dwell_time(Duration::from_millis(1500))
        .step_length(0.5)
        .fade_durations(Duration::from_millis(400), Duration::from_millis(400))
        .teleport_layer_mask(LayerMask::from_layer(TELEPORT_LAYER))
}

/// Controller wired to a scripted scene, advanced at a fixed tick rate.
struct Demo {
    scene: DemoScene,
    controller: GazeDwellController,
    requests: Receiver<TeleportRequest>,
    feedback: FeedbackBus,
    footsteps: FootstepVisualizer,
    dt: Duration,
    shown_steps: u32,
}

impl Demo {
    fn new(ticks_per_second: u32) -> Result<Self> {
        let desc = desc();
        let scene = DemoScene::new(pads());
        let feedback = FeedbackBus::new();
        let (executor, requests) = ChannelTeleportExecutor::new();

        let controller = GazeDwellController::builder(desc.clone())
            .viewer(scene.clone())
            .raycast(scene.clone())
            .hands(scene.clone())
            .feedback(feedback.clone())
            .teleport(executor)
            .objects(scene.clone())
            .overlay(scene.clone())
            .shading(scene.clone())
            .build()?;

        Ok(Self {
            scene,
            controller,
            requests,
            feedback,
            footsteps: FootstepVisualizer::new(desc.step_length),
            dt: Duration::from_secs(1) / ticks_per_second.max(1),
            shown_steps: 0,
        })
    }

    fn run_for(&mut self, duration: Duration) {
        let mut elapsed = Duration::ZERO;
        while elapsed < duration {
            self.tick();
            elapsed += self.dt;
        }
    }

    fn tick(&mut self) {
        self.controller.tick(self.dt);

        for request in self.requests.try_iter() {
            log::info!(
                "Rig moved to {:?} ({:?})",
                request.destination,
                request.match_orientation
            );
            self.scene.stand_at(request.destination);
        }

        let frame = self.footsteps.sample(&self.feedback);
        if frame.step_count != self.shown_steps {
            self.shown_steps = frame.step_count;
            log::debug!(
                "Footsteps: {} shown, next at {:?}",
                frame.step_count,
                self.footsteps.visible_steps().last()
            );
        }

        for event in self.controller.poll_events() {
            match event {
                DwellEvent::TargetLocked { transform, target_position, .. } => {
                    log::info!("Looking at {} (destination {:?})", transform, target_position)
                }
                DwellEvent::DwellCompleted { transform } => {
                    log::info!("Dwell complete on {}, point at it to teleport", transform)
                }
                DwellEvent::TransitionPhaseChanged { phase } => {
                    log::debug!(
                        "Transition phase {:?}, overlay {} at {:.2}",
                        phase,
                        if self.scene.overlay_visible() { "shown" } else { "hidden" },
                        self.scene.overlay_opacity()
                    )
                }
                other => log::debug!("{:?}", other),
            }
        }
    }

    /// Look at `pad`, point at it once the dwell is done and wait for the
    /// transition to finish.
    fn teleport_to(&mut self, pad: u64, hand: Handedness) -> Result<()> {
        self.scene.look_at_pad(pad);
        self.run_for(desc().dwell_time);
        self.scene.point_at_pad(hand, pad);

        let mut guard = 0;
        let destination = Some(ObjectId::new(pad));
        while self.controller.last_relocated() != destination
            || self.controller.is_transitioning()
        {
            self.tick();
            guard += 1;
            ensure!(guard < 10_000, "teleport to pad {} never finished", pad);
        }
        self.scene.lower_hands();
        Ok(())
    }
}

fn dwell_and_confirm(ticks_per_second: u32) -> Result<()> {
    let mut demo = Demo::new(ticks_per_second)?;
    demo.teleport_to(HALL, Handedness::Right)?;

    let hall = demo.scene.pad(HALL).map(|pad| pad.center);
    log::info!("Standing at {:?}", demo.scene.head().position);
    ensure!(!demo.scene.is_pad_active(HALL), "hall pad should be hidden after relocation");
    ensure!(
        hall.is_some_and(|center| demo.scene.head().position.distance(center) < 2.0),
        "viewer should stand on the hall pad"
    );
    Ok(())
}

fn target_switch(ticks_per_second: u32) -> Result<()> {
    let mut demo = Demo::new(ticks_per_second)?;

    demo.scene.look_at_pad(HALL);
    demo.run_for(Duration::from_millis(1000));
    let before = demo.controller.debug_info();
    log::info!("Dwell on hall at {:.0}%", before.dwell_fraction * 100.0);

    demo.scene.look_at_pad(GALLERY);
    demo.run_for(Duration::from_millis(250));
    let after = demo.controller.debug_info();
    log::info!(
        "Switched to gallery, dwell at {:.0}%, hall highlight {:.2}",
        after.dwell_fraction * 100.0,
        demo.scene.highlight_alpha(HALL)
    );
    ensure!(
        after.dwell_fraction < before.dwell_fraction,
        "switching targets should reset the dwell"
    );

    demo.scene.look_at(demo.scene.head().position + Vec3::Y);
    demo.run_for(Duration::from_millis(600));
    ensure!(demo.controller.gaze_target().is_none(), "looking up should drop the target");
    ensure!(demo.controller.step_count() == 0, "footsteps should be cleared");
    Ok(())
}

fn unconfirmed_dwell(ticks_per_second: u32) -> Result<()> {
    let mut demo = Demo::new(ticks_per_second)?;

    demo.scene.look_at_pad(BALCONY);
    demo.run_for(Duration::from_secs(4));
    let info = demo.controller.debug_info();
    log::info!(
        "Still waiting after {:?} with {} footsteps shown",
        info.elapsed,
        info.step_count
    );
    ensure!(info.dwell_fraction >= 1.0, "dwell should be complete");
    ensure!(!demo.controller.is_transitioning(), "no teleport without pointing");
    Ok(())
}

fn chained_relocation(ticks_per_second: u32) -> Result<()> {
    let mut demo = Demo::new(ticks_per_second)?;

    demo.teleport_to(HALL, Handedness::Right)?;
    demo.teleport_to(GALLERY, Handedness::Left)?;
    ensure!(demo.scene.is_pad_active(HALL), "hall pad should be shown again");
    ensure!(!demo.scene.is_pad_active(GALLERY), "gallery pad should be hidden");

    demo.teleport_to(BALCONY, Handedness::Right)?;
    ensure!(demo.scene.is_pad_active(GALLERY), "gallery pad should be shown again");
    ensure!(!demo.scene.is_pad_active(BALCONY), "balcony pad should be hidden");
    log::info!("Finished on the balcony at {:?}", demo.scene.head().position);
    Ok(())
}
