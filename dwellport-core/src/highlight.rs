//! Timed highlight fades on teleport surfaces.

use crate::math::lerp;
use crate::scene::shading::{ALPHA, USE_GLOBAL_TIME};
use crate::scene::{SurfaceId, SurfaceShading};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// Toward opacity `1.0`
    Visible,
    /// Toward opacity `0.0`
    Hidden,
}

impl FadeDirection {
    pub fn target(self) -> f32 {
        match self {
            Self::Visible => 1.0,
            Self::Hidden => 0.0,
        }
    }

    fn opposite_end(self) -> f32 {
        1.0 - self.target()
    }
}

/// One running fade on one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSession {
    pub direction: FadeDirection,
    pub from: f32,
    pub elapsed: Duration,
}

impl HighlightSession {
    fn progress(&self, duration: Duration) -> f32 {
        if duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Drives at most one highlight fade per surface.
///
/// Starting a fade on a surface replaces whatever fade was running there.
/// Sessions on different surfaces run independently.
#[derive(Debug, Clone)]
pub struct HighlightFader {
    duration: Duration,
    sessions: HashMap<SurfaceId, HighlightSession>,
}

impl HighlightFader {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            sessions: HashMap::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Applies to sessions started afterwards and to running ones.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Begin fading `surface` toward `direction`, starting from its current opacity.
    ///
    /// A surface without a recorded opacity starts from the opposite end of the fade.
    pub fn start(
        &mut self,
        surface: SurfaceId,
        direction: FadeDirection,
        shading: &dyn SurfaceShading,
    ) {
        let from = shading
            .surface_float(surface, ALPHA)
            .map(|alpha| alpha.clamp(0.0, 1.0))
            .unwrap_or_else(|| direction.opposite_end());

        let replaced = self.sessions.insert(
            surface,
            HighlightSession {
                direction,
                from,
                elapsed: Duration::ZERO,
            },
        );
        if replaced.is_some() {
            log::trace!("Highlight on {} replaced by {:?} fade", surface, direction);
        }
    }

    /// Cancel the fade on `surface` without touching its shading. Returns whether one was running.
    pub fn stop(&mut self, surface: SurfaceId) -> bool {
        self.sessions.remove(&surface).is_some()
    }

    pub fn is_fading(&self, surface: SurfaceId) -> bool {
        self.sessions.contains_key(&surface)
    }

    pub fn session(&self, surface: SurfaceId) -> Option<&HighlightSession> {
        self.sessions.get(&surface)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Advance every session by `dt` and write the interpolated opacity.
    ///
    /// Finished sessions write their exact end value and are dropped.
    pub fn tick(&mut self, dt: Duration, shading: &mut dyn SurfaceShading) {
        let duration = self.duration;
        self.sessions.retain(|&surface, session| {
            session.elapsed = session.elapsed.saturating_add(dt);
            let t = session.progress(duration);
            let finished = t >= 1.0;
            let alpha = if finished {
                session.direction.target()
            } else {
                lerp(session.from, session.direction.target(), t)
            };

            shading.set_surface_float(surface, USE_GLOBAL_TIME, 0.0);
            shading.set_surface_float(surface, ALPHA, alpha);
            !finished
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Blocks {
        values: HashMap<(SurfaceId, String), f32>,
    }

    impl Blocks {
        fn alpha(&self, surface: SurfaceId) -> Option<f32> {
            self.surface_float(surface, ALPHA)
        }
    }

    impl SurfaceShading for Blocks {
        fn surface_float(&self, surface: SurfaceId, key: &str) -> Option<f32> {
            self.values.get(&(surface, key.to_owned())).copied()
        }

        fn set_surface_float(&mut self, surface: SurfaceId, key: &str, value: f32) {
            self.values.insert((surface, key.to_owned()), value);
        }
    }

    const A: SurfaceId = SurfaceId::new(1);
    const B: SurfaceId = SurfaceId::new(2);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_fade_in_is_linear_and_ends_exactly() {
        let mut blocks = Blocks::default();
        let mut fader = HighlightFader::new(ms(500));

        fader.start(A, FadeDirection::Visible, &blocks);
        assert!(fader.is_fading(A));

        fader.tick(ms(125), &mut blocks);
        assert!((blocks.alpha(A).unwrap() - 0.25).abs() < 1e-6);
        assert_eq!(blocks.surface_float(A, USE_GLOBAL_TIME), Some(0.0));

        fader.tick(ms(125), &mut blocks);
        fader.tick(ms(125), &mut blocks);
        fader.tick(ms(300), &mut blocks);
        assert_eq!(blocks.alpha(A), Some(1.0));
        assert!(!fader.is_fading(A));
        assert_eq!(fader.active_sessions(), 0);
    }

    #[test]
    fn test_fade_starts_from_current_value() {
        let mut blocks = Blocks::default();
        blocks.set_surface_float(A, ALPHA, 0.6);
        let mut fader = HighlightFader::new(ms(400));

        fader.start(A, FadeDirection::Hidden, &blocks);
        assert_eq!(fader.session(A).unwrap().from, 0.6);

        fader.tick(ms(200), &mut blocks);
        assert!((blocks.alpha(A).unwrap() - 0.3).abs() < 1e-6);

        fader.tick(ms(200), &mut blocks);
        assert_eq!(blocks.alpha(A), Some(0.0));
    }

    #[test]
    fn test_restart_replaces_session_on_same_surface() {
        let mut blocks = Blocks::default();
        let mut fader = HighlightFader::new(ms(400));

        fader.start(A, FadeDirection::Visible, &blocks);
        fader.tick(ms(200), &mut blocks);
        assert!((blocks.alpha(A).unwrap() - 0.5).abs() < 1e-6);

        fader.start(A, FadeDirection::Hidden, &blocks);
        assert_eq!(fader.active_sessions(), 1);
        let session = fader.session(A).unwrap();
        assert_eq!(session.direction, FadeDirection::Hidden);
        assert_eq!(session.elapsed, Duration::ZERO);

        fader.tick(ms(400), &mut blocks);
        assert_eq!(blocks.alpha(A), Some(0.0));
    }

    #[test]
    fn test_surfaces_fade_independently() {
        let mut blocks = Blocks::default();
        blocks.set_surface_float(A, ALPHA, 1.0);
        let mut fader = HighlightFader::new(ms(400));

        fader.start(A, FadeDirection::Hidden, &blocks);
        fader.start(B, FadeDirection::Visible, &blocks);
        assert_eq!(fader.active_sessions(), 2);

        fader.tick(ms(100), &mut blocks);
        assert!((blocks.alpha(A).unwrap() - 0.75).abs() < 1e-6);
        assert!((blocks.alpha(B).unwrap() - 0.25).abs() < 1e-6);

        assert!(fader.stop(A));
        assert!(!fader.stop(A));
        fader.tick(ms(300), &mut blocks);
        assert!((blocks.alpha(A).unwrap() - 0.75).abs() < 1e-6);
        assert_eq!(blocks.alpha(B), Some(1.0));
    }

    #[test]
    fn test_zero_duration_snaps_on_first_tick() {
        let mut blocks = Blocks::default();
        let mut fader = HighlightFader::new(Duration::ZERO);

        fader.start(B, FadeDirection::Visible, &blocks);
        fader.tick(Duration::ZERO, &mut blocks);
        assert_eq!(blocks.alpha(B), Some(1.0));
        assert_eq!(fader.active_sessions(), 0);
    }

    #[test]
    fn test_huge_step_finishes_without_overflow() {
        let mut blocks = Blocks::default();
        let mut fader = HighlightFader::new(ms(500));

        fader.start(A, FadeDirection::Visible, &blocks);
        fader.tick(ms(100), &mut blocks);
        fader.tick(Duration::MAX, &mut blocks);
        assert_eq!(blocks.alpha(A), Some(1.0));
        assert_eq!(fader.active_sessions(), 0);
    }
}
