//! Fixed-parameter fade animator

use std::time::Duration;

use glam::Vec2;

use super::{AnimationContext, Animator, Completion, TimingCurve, Transition, VisualState};
use crate::geometry::Transform;

const DAMPING_RATIO: f32 = 0.42;
const INITIAL_VELOCITY: Vec2 = Vec2::new(1.0, 0.2);
const OFFSET: f32 = 15.0;
const SCALE: f32 = 0.95;

/// Springs the flash in from slightly above and shrunk, whatever its
/// alignment, and eases it back out. Only the duration can be changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeAnimator {
    pub duration: Duration,
}

impl FadeAnimator {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn hidden_state() -> VisualState {
        VisualState::new(0.0, offset(Transform::IDENTITY))
    }
}

impl Default for FadeAnimator {
    fn default() -> Self {
        Self::new(Duration::from_millis(350))
    }
}

impl Animator for FadeAnimator {
    fn animate_in(&self, cx: &AnimationContext, completion: Completion) {
        let hidden = Self::hidden_state();
        cx.set_visual(hidden);
        cx.run(
            Transition::new(
                hidden,
                VisualState::IDENTITY,
                self.duration,
                TimingCurve::spring(DAMPING_RATIO, INITIAL_VELOCITY),
            ),
            completion,
        );
    }

    fn animate_out(&self, cx: &AnimationContext, completion: Completion) {
        let from = cx.visual();
        let to = VisualState::new(0.0, offset(from.transform));
        cx.run(Transition::new(from, to, self.duration, TimingCurve::EaseInOut), completion);
    }
}

fn offset(transform: Transform) -> Transform {
    transform.translated_by(0.0, -OFFSET).scaled_by(SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_defaults() {
        let animator = FadeAnimator::default();
        assert_eq!(animator.duration, Duration::from_millis(350));

        let hidden = FadeAnimator::hidden_state();
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.transform.translation, Vec2::new(0.0, -15.0));
        assert_eq!(hidden.transform.scale, 0.95);
    }
}
