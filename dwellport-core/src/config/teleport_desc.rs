use crate::error::{DwellError, Result};
use crate::scene::LayerMask;
use std::time::Duration;

/// Configuration descriptor for a gaze-dwell teleporter.
///
/// Settings are static per controller instance. They can be replaced between
/// transitions with `GazeDwellController::set_desc`, never during one.
#[derive(Debug, Clone, PartialEq)]
pub struct GazeTeleportDesc {
    /// Sustained gaze required on one target before the pointing gesture is checked
    pub dwell_time: Duration,
    /// Spacing between footstep markers, in world units. Zero or less disables footsteps.
    pub step_length: f32,
    /// Duration of the fade to opaque before relocation
    pub fade_in_duration: Duration,
    /// Duration of the fade back to transparent after relocation
    pub fade_out_duration: Duration,
    /// Duration of a surface highlight fade in either direction
    pub highlight_fade_duration: Duration,
    /// Distance in front of the viewer at which the fade overlay is placed
    pub plane_distance: f32,
    /// Layers considered teleport targets, for both gaze and pointing rays
    pub teleport_layer_mask: LayerMask,
    /// Range of the gaze ray
    pub gaze_max_distance: f32,
    /// Range of the fingertip ray used to confirm a target
    pub pointing_max_distance: f32,
}

impl Default for GazeTeleportDesc {
    fn default() -> Self {
        Self {
            dwell_time: Duration::from_secs(2),
            step_length: 1.0,
            fade_in_duration: Duration::from_millis(1500),
            fade_out_duration: Duration::from_millis(1500),
            highlight_fade_duration: Duration::from_millis(500),
            plane_distance: 0.5,
            teleport_layer_mask: LayerMask::ALL,
            gaze_max_distance: 100.0,
            pointing_max_distance: 10.0,
        }
    }
}

impl GazeTeleportDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dwell_time(mut self, dwell_time: Duration) -> Self {
        self.dwell_time = dwell_time;
        self
    }

    pub fn step_length(mut self, step_length: f32) -> Self {
        self.step_length = step_length;
        self
    }

    pub fn fade_durations(mut self, fade_in: Duration, fade_out: Duration) -> Self {
        self.fade_in_duration = fade_in;
        self.fade_out_duration = fade_out;
        self
    }

    pub fn highlight_fade_duration(mut self, duration: Duration) -> Self {
        self.highlight_fade_duration = duration;
        self
    }

    pub fn plane_distance(mut self, distance: f32) -> Self {
        self.plane_distance = distance;
        self
    }

    pub fn teleport_layer_mask(mut self, mask: LayerMask) -> Self {
        self.teleport_layer_mask = mask;
        self
    }

    pub fn gaze_max_distance(mut self, distance: f32) -> Self {
        self.gaze_max_distance = distance;
        self
    }

    pub fn pointing_max_distance(mut self, distance: f32) -> Self {
        self.pointing_max_distance = distance;
        self
    }

    /// Checks the values a controller cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.gaze_max_distance.is_finite() && self.gaze_max_distance > 0.0) {
            return Err(DwellError::Configuration(format!(
                "gaze_max_distance must be positive, got {}",
                self.gaze_max_distance
            )));
        }
        if !(self.pointing_max_distance.is_finite() && self.pointing_max_distance > 0.0) {
            return Err(DwellError::Configuration(format!(
                "pointing_max_distance must be positive, got {}",
                self.pointing_max_distance
            )));
        }
        if !(self.plane_distance.is_finite() && self.plane_distance >= 0.0) {
            return Err(DwellError::Configuration(format!(
                "plane_distance must be finite and non-negative, got {}",
                self.plane_distance
            )));
        }
        if self.step_length.is_nan() {
            return Err(DwellError::Configuration("step_length is NaN".into()));
        }
        Ok(())
    }
}
