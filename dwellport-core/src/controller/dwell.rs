use crate::footsteps::step_count;
use crate::math::Vec3;
use crate::scene::{ObjectId, RaycastHit, SurfaceId, TransformId};
use std::time::Duration;

/// The surface currently under the gaze ray.
///
/// Replaced, never mutated, when the ray moves to another transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GazeTarget {
    pub transform: TransformId,
    pub surface: Option<SurfaceId>,
    pub object: ObjectId,
}

impl From<&RaycastHit> for GazeTarget {
    fn from(hit: &RaycastHit) -> Self {
        Self {
            transform: hit.transform,
            surface: hit.surface,
            object: hit.object,
        }
    }
}

/// Dwell progress on the current gaze target.
#[derive(Debug, Clone, PartialEq)]
pub struct DwellState {
    pub elapsed: Duration,
    pub start_position: Vec3,
    pub target_position: Vec3,
}

impl DwellState {
    pub fn new(start_position: Vec3, target_position: Vec3) -> Self {
        Self {
            elapsed: Duration::ZERO,
            start_position,
            target_position,
        }
    }

    /// Accumulate gaze time. Saturates at `dwell_time`.
    pub fn advance(&mut self, dt: Duration, dwell_time: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(dwell_time);
    }

    pub fn is_complete(&self, dwell_time: Duration) -> bool {
        self.elapsed >= dwell_time
    }

    /// `elapsed / dwell_time` clamped to `0..=1`; a zero dwell time counts as complete.
    pub fn fraction(&self, dwell_time: Duration) -> f32 {
        if dwell_time.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / dwell_time.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn total_distance(&self) -> f32 {
        self.start_position.distance(self.target_position)
    }

    pub fn step_count(&self, dwell_time: Duration, step_length: f32) -> u32 {
        step_count(self.total_distance(), self.fraction(dwell_time), step_length)
    }
}

/// A locked gaze target together with its dwell progress.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GazeLock {
    pub target: GazeTarget,
    pub dwell: DwellState,
    pub completion_reported: bool,
}

impl GazeLock {
    pub fn new(target: GazeTarget, dwell: DwellState) -> Self {
        Self {
            target,
            dwell,
            completion_reported: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn test_advance_saturates_at_dwell_time() {
        let mut dwell = DwellState::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        dwell.advance(secs(1.5), secs(2.0));
        assert!(!dwell.is_complete(secs(2.0)));
        dwell.advance(secs(1.5), secs(2.0));
        assert_eq!(dwell.elapsed, secs(2.0));
        assert!(dwell.is_complete(secs(2.0)));
        assert_eq!(dwell.fraction(secs(2.0)), 1.0);
    }

    #[test]
    fn test_fraction_and_steps() {
        let mut dwell = DwellState::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(dwell.total_distance(), 10.0);
        dwell.advance(Duration::from_secs(1), Duration::from_secs(2));
        assert_eq!(dwell.fraction(Duration::from_secs(2)), 0.5);
        assert_eq!(dwell.step_count(Duration::from_secs(2), 1.0), 5);
    }

    #[test]
    fn test_zero_dwell_time_is_immediately_complete() {
        let dwell = DwellState::new(Vec3::ZERO, Vec3::X * 3.0);
        assert!(dwell.is_complete(Duration::ZERO));
        assert_eq!(dwell.fraction(Duration::ZERO), 1.0);
        assert_eq!(dwell.step_count(Duration::ZERO, 1.0), 3);
    }

    #[test]
    fn test_advance_does_not_overflow() {
        let mut dwell = DwellState::new(Vec3::ZERO, Vec3::X * 4.0);
        dwell.advance(secs(0.5), Duration::MAX);
        dwell.advance(Duration::MAX, Duration::MAX);
        assert_eq!(dwell.elapsed, Duration::MAX);
        assert!(dwell.is_complete(Duration::MAX));
    }
}
