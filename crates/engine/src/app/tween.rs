use super::scene::{EntityId, Vec2};

/// Keyframed scale animation, evenly spaced across `duration_seconds`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScaleTween {
    pub(crate) target: EntityId,
    keyframes: Vec<Vec2>,
    duration_seconds: f32,
    elapsed_seconds: f32,
}

impl ScaleTween {
    pub(crate) fn new(target: EntityId, keyframes: Vec<Vec2>, duration_seconds: f32) -> Self {
        Self {
            target,
            keyframes,
            duration_seconds,
            elapsed_seconds: 0.0,
        }
    }

    /// Advances the clock and returns the sampled scale plus whether the tween finished.
    pub(crate) fn advance(&mut self, dt_seconds: f32) -> (Vec2, bool) {
        self.elapsed_seconds += dt_seconds.max(0.0);
        let finished = !(self.duration_seconds > 0.0) || self.elapsed_seconds >= self.duration_seconds;
        (self.sample(), finished)
    }

    pub(crate) fn sample(&self) -> Vec2 {
        let Some(last) = self.keyframes.last().copied() else {
            return Vec2::ONE;
        };
        if self.keyframes.len() == 1 || !(self.duration_seconds > 0.0) {
            return last;
        }

        let t = (self.elapsed_seconds / self.duration_seconds).clamp(0.0, 1.0);
        let segments = (self.keyframes.len() - 1) as f32;
        let position = t * segments;
        let index = (position.floor() as usize).min(self.keyframes.len() - 2);
        let local_t = position - index as f32;
        self.keyframes[index].lerp(self.keyframes[index + 1], local_t)
    }
}
