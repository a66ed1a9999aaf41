use crate::math::Vec3;
use crate::scene::ObjectId;
use std::time::Duration;

/// Phases of the fade-teleport-fade sequence, always run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    FadeIn,
    Relocate,
    FadeOut,
}

/// An in-flight fade-teleport-fade sequence.
///
/// Once created it runs to completion; gaze and gesture changes are ignored
/// until it is destroyed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTransaction {
    pub destination: Vec3,
    pub target_object: ObjectId,
    /// Viewer position when the transaction was created
    pub start_position: Vec3,
    pub total_distance: f32,
    pub phase: TransitionPhase,
    /// Time spent in the current phase
    pub phase_elapsed: Duration,
    /// Overlay opacity when the fade in started
    pub base_opacity: f32,
}

impl TransitionTransaction {
    pub(crate) fn new(
        start_position: Vec3,
        destination: Vec3,
        target_object: ObjectId,
        base_opacity: f32,
    ) -> Self {
        Self {
            destination,
            target_object,
            start_position,
            total_distance: start_position.distance(destination),
            phase: TransitionPhase::FadeIn,
            phase_elapsed: Duration::ZERO,
            base_opacity,
        }
    }

    /// Linear progress through a phase lasting `duration`; a zero-length phase is always done.
    pub fn progress(&self, duration: Duration) -> f32 {
        if duration.is_zero() {
            return 1.0;
        }
        (self.phase_elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub(crate) fn advance(&mut self, dt: Duration, duration: Duration) -> f32 {
        self.phase_elapsed = self.phase_elapsed.saturating_add(dt);
        self.progress(duration)
    }

    pub(crate) fn enter(&mut self, phase: TransitionPhase) {
        self.phase = phase;
        self.phase_elapsed = Duration::ZERO;
    }
}
