//! Footstep preview: how many step markers to show between the viewer and the
//! teleport destination, and where they go.

use crate::feedback::{FeedbackBus, STEP_COUNT, TELEPORT_END, TELEPORT_START};
use crate::math::{Vec3, Vec4};

/// Distances shorter than this produce no footsteps.
pub const MIN_FOOTSTEP_DISTANCE: f32 = 0.01;

/// Number of markers covering `fraction` of `total_distance`:
/// `floor(total_distance * fraction / step_length)`.
///
/// `fraction` is clamped to `0..=1`. Returns 0 when `step_length <= 0` or the
/// distance is below [`MIN_FOOTSTEP_DISTANCE`].
pub fn step_count(total_distance: f32, fraction: f32, step_length: f32) -> u32 {
    if !(step_length > 0.0) || !(total_distance >= MIN_FOOTSTEP_DISTANCE) {
        return 0;
    }
    let traveled = total_distance * fraction.clamp(0.0, 1.0);
    (traveled / step_length).floor() as u32
}

/// Evenly spaced marker positions from `start` toward `end`, one every
/// `step_length`, starting at `start` itself.
pub fn footstep_layout(start: Vec3, end: Vec3, step_length: f32) -> Vec<Vec3> {
    let total = start.distance(end);
    if total < MIN_FOOTSTEP_DISTANCE || !(step_length > 0.0) {
        return Vec::new();
    }

    let direction = (end - start) / total;
    let count = (total / step_length).floor() as usize;
    (0..=count)
        .map(|i| start + direction * (step_length * i as f32))
        .collect()
}

/// Per-instance copy of the footstep globals for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootstepFrame {
    pub step_count: u32,
    pub start: Vec3,
    pub end: Vec3,
}

impl Default for FootstepFrame {
    fn default() -> Self {
        Self {
            step_count: 0,
            start: Vec3::ZERO,
            end: Vec3::ZERO,
        }
    }
}

/// Render-side consumer of the footstep globals.
///
/// Samples the feedback bus once per frame and keeps its own copy, the way a
/// footstep material instance pulls the globals into its properties.
#[derive(Debug, Clone)]
pub struct FootstepVisualizer {
    step_length: f32,
    frame: FootstepFrame,
}

impl FootstepVisualizer {
    pub fn new(step_length: f32) -> Self {
        Self {
            step_length,
            frame: FootstepFrame::default(),
        }
    }

    pub fn frame(&self) -> FootstepFrame {
        self.frame
    }

    /// Pull the current globals. Unset globals keep their previous value.
    pub fn sample(&mut self, bus: &FeedbackBus) -> FootstepFrame {
        if let Some(count) = bus.float(STEP_COUNT) {
            self.frame.step_count = count.max(0.0) as u32;
        }
        if let Some(start) = bus.vector(TELEPORT_START) {
            self.frame.start = start.truncate();
        }
        if let Some(end) = bus.vector(TELEPORT_END) {
            self.frame.end = end.truncate();
        }
        self.frame
    }

    /// Markers currently shown: the first `step_count` entries of the layout.
    pub fn visible_steps(&self) -> Vec<Vec3> {
        let mut steps = footstep_layout(self.frame.start, self.frame.end, self.step_length);
        steps.truncate(self.frame.step_count as usize);
        steps
    }
}

pub(crate) fn as_global(position: Vec3) -> Vec4 {
    position.extend(0.0)
}
