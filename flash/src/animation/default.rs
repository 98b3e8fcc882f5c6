//! The standard spring-in, ease-out animator

use std::time::Duration;

use glam::Vec2;

use super::{AnimationContext, Animator, Completion, TimingCurve, Transition, VisualState};
use crate::config::Alignment;
use crate::geometry::Transform;

/// Parameters of a [`DefaultAnimator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorConfiguration {
    pub duration: Duration,
    /// 1.0 is critically damped, lower values bounce
    pub damping_ratio: f32,
    /// Initial spring velocity; x drives fading and scaling, y drives movement
    pub initial_velocity: Vec2,
    /// Distance the flash travels in from its edge, in points
    pub translate_amount: f32,
    /// Scale of the flash while hidden
    pub scale_coefficient: f32,
}

impl AnimatorConfiguration {
    /// 0.33 s, damping 0.6, no initial velocity, 16 pt travel, 95% scale
    pub fn new() -> Self {
        Self {
            duration: Duration::from_millis(330),
            damping_ratio: 0.6,
            initial_velocity: Vec2::ZERO,
            translate_amount: 16.0,
            scale_coefficient: 0.95,
        }
    }

    /// A configuration that does not move, scale or take any time
    pub fn neutral() -> Self {
        Self {
            duration: Duration::ZERO,
            damping_ratio: 1.0,
            initial_velocity: Vec2::ZERO,
            translate_amount: 0.0,
            scale_coefficient: 1.0,
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn damping_ratio(mut self, damping_ratio: f32) -> Self {
        self.damping_ratio = damping_ratio;
        self
    }

    pub fn initial_velocity(mut self, velocity: Vec2) -> Self {
        self.initial_velocity = velocity;
        self
    }

    pub fn translate_amount(mut self, amount: f32) -> Self {
        self.translate_amount = amount;
        self
    }

    pub fn scale_coefficient(mut self, coefficient: f32) -> Self {
        self.scale_coefficient = coefficient;
        self
    }
}

impl Default for AnimatorConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

/// Springs the flash in from its edge and eases it back out.
#[derive(Debug, Clone, Default)]
pub struct DefaultAnimator {
    configuration: AnimatorConfiguration,
}

impl DefaultAnimator {
    pub fn new(configuration: AnimatorConfiguration) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &AnimatorConfiguration {
        &self.configuration
    }

    /// Where the flash rests while hidden: pushed towards its edge, shrunk and
    /// transparent.
    pub fn hidden_state(&self, alignment: Alignment) -> VisualState {
        VisualState::new(0.0, self.offset(Transform::IDENTITY, alignment))
    }

    fn offset(&self, transform: Transform, alignment: Alignment) -> Transform {
        let amount = self.configuration.translate_amount;
        let dy = match alignment {
            Alignment::Top => -amount,
            Alignment::Bottom => amount,
        };
        transform
            .translated_by(0.0, dy)
            .scaled_by(self.configuration.scale_coefficient)
    }
}

impl Animator for DefaultAnimator {
    fn animate_in(&self, cx: &AnimationContext, completion: Completion) {
        let hidden = self.hidden_state(cx.alignment());
        cx.set_visual(hidden);

        let curve = TimingCurve::spring(self.configuration.damping_ratio, self.configuration.initial_velocity);
        cx.run(
            Transition::new(hidden, VisualState::IDENTITY, self.configuration.duration, curve),
            completion,
        );
    }

    fn animate_out(&self, cx: &AnimationContext, completion: Completion) {
        let from = cx.visual();
        let to = VisualState::new(0.0, self.offset(from.transform, cx.alignment()));
        cx.run(
            Transition::new(from, to, self.configuration.duration, TimingCurve::EaseInOut),
            completion,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_configuration() {
        let config = AnimatorConfiguration::default();
        assert_eq!(config.duration, Duration::from_millis(330));
        assert_eq!(config.damping_ratio, 0.6);
        assert_eq!(config.initial_velocity, Vec2::ZERO);
        assert_eq!(config.translate_amount, 16.0);
        assert_eq!(config.scale_coefficient, 0.95);
    }

    #[test]
    fn test_hidden_state_follows_alignment() {
        let animator = DefaultAnimator::default();

        let top = animator.hidden_state(Alignment::Top);
        assert_eq!(top.opacity, 0.0);
        assert_eq!(top.transform.translation, Vec2::new(0.0, -16.0));
        assert_eq!(top.transform.scale, 0.95);

        let bottom = animator.hidden_state(Alignment::Bottom);
        assert_eq!(bottom.transform.translation, Vec2::new(0.0, 16.0));
    }

    #[test]
    fn test_neutral_hidden_state_is_only_transparent() {
        let animator = DefaultAnimator::new(AnimatorConfiguration::neutral());
        let hidden = animator.hidden_state(Alignment::Top);
        assert!(hidden.transform.is_identity());
        assert_eq!(hidden.opacity, 0.0);
    }
}
