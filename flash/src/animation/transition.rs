//! Transitions between two visual states and the timing curves that drive them.
//!
//! # Spring model
//!
//! Springs use the analytical solution of the damped harmonic oscillator
//! `x'' + 2ζω₀x' + ω₀²x = ω₀²` with `x(0) = 0` and `x'(0) = v₀`, where `v₀` is
//! the initial velocity expressed as a fraction of the total distance per
//! second. ω₀ is derived from the duration so the spring has settled to within
//! 1% of the target when the duration elapses; sampling at or past the
//! duration always yields the target exactly.

use std::time::Duration;

use glam::Vec2;

use crate::geometry::Transform;

/// What the animator changes on a flash: its opacity and its placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f32,
    pub transform: Transform,
}

impl VisualState {
    /// Fully opaque and untransformed
    pub const IDENTITY: Self = Self { opacity: 1.0, transform: Transform::IDENTITY };

    pub const fn new(opacity: f32, transform: Transform) -> Self {
        Self { opacity, transform }
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Timing curve of a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingCurve {
    Linear,
    /// Cubic ease-in-ease-out
    EaseInOut,
    /// Damped spring; `damping_ratio` 1.0 is critically damped.
    Spring {
        damping_ratio: f32,
        initial_velocity: Vec2,
    },
}

/// Ln(100): the envelope e^(-rate·t) reaches 1% when rate·t equals this.
const ONE_PERCENT_DECAY: f32 = 4.6;

/// For a critically damped spring to reach within 1% of target:
/// e^(-ω₀T)(1 + ω₀T) = 0.01, so ω₀ ≈ 6.6 / T.
const CRITICALLY_DAMPED_SETTLE_FACTOR: f32 = 6.6;

/// Below this the spring is treated as undamped-but-decaying.
const MIN_DAMPING_RATIO: f32 = 0.05;

impl TimingCurve {
    pub fn spring(damping_ratio: f32, initial_velocity: Vec2) -> Self {
        TimingCurve::Spring { damping_ratio, initial_velocity }
    }

    /// Progress of a property at `t` seconds into a transition of `duration`
    /// seconds. `velocity` is the initial velocity for that property and only
    /// matters for springs. Springs may overshoot 1.0.
    pub fn progress(&self, t: f32, duration: f32, velocity: f32) -> f32 {
        if duration <= 0.0 || t >= duration {
            return 1.0;
        }
        if t <= 0.0 {
            return 0.0;
        }

        match *self {
            TimingCurve::Linear => t / duration,
            TimingCurve::EaseInOut => ease_in_out(t / duration),
            TimingCurve::Spring { damping_ratio, .. } => {
                spring_position(t, duration, damping_ratio, velocity)
            }
        }
    }
}

/// Cubic ease-in-out (slow start and end).
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let t1 = 2.0 * t - 2.0;
        0.5 * t1 * t1 * t1 + 1.0
    }
}

fn spring_position(t: f32, duration: f32, damping_ratio: f32, v0: f32) -> f32 {
    let zeta = damping_ratio.max(MIN_DAMPING_RATIO);

    if zeta < 1.0 - 1e-3 {
        // Underdamped: oscillates around the target
        let omega_0 = ONE_PERCENT_DECAY / (zeta * duration);
        let omega_d = omega_0 * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega_0 * t).exp();
        let k = (zeta * omega_0 - v0) / omega_d;
        1.0 - decay * ((omega_d * t).cos() + k * (omega_d * t).sin())
    } else if zeta <= 1.0 + 1e-3 {
        // Critically damped: fastest approach without overshoot
        let omega_0 = CRITICALLY_DAMPED_SETTLE_FACTOR / duration;
        let decay = (-omega_0 * t).exp();
        1.0 - decay * (1.0 + (omega_0 - v0) * t)
    } else {
        // Overdamped: a slow and a fast decaying exponential. The slow rate
        // (ζ - √(ζ²-1))ω₀ settles in `duration`; (ζ - √(ζ²-1))(ζ + √(ζ²-1)) = 1.
        let root = (zeta * zeta - 1.0).sqrt();
        let slow = ONE_PERCENT_DECAY / duration;
        let omega_0 = slow * (zeta + root);
        let fast = omega_0 * (zeta + root);
        let k = (zeta * omega_0 - v0) / (omega_0 * root);
        1.0 - 0.5 * ((1.0 + k) * (-slow * t).exp() + (1.0 - k) * (-fast * t).exp())
    }
}

/// A timed change from one visual state to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: VisualState,
    pub to: VisualState,
    pub duration: Duration,
    pub curve: TimingCurve,
}

impl Transition {
    pub fn new(from: VisualState, to: VisualState, duration: Duration, curve: TimingCurve) -> Self {
        Self { from, to, duration, curve }
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// The visual state `elapsed` into the transition.
    ///
    /// Opacity and scale follow the x component of a spring's initial
    /// velocity, translation follows the y component. Once finished, the
    /// result is exactly `to`.
    pub fn sample(&self, elapsed: Duration) -> VisualState {
        if self.is_finished(elapsed) {
            return self.to;
        }
        let t = elapsed.as_secs_f32();
        let d = self.duration.as_secs_f32();
        let velocity = match self.curve {
            TimingCurve::Spring { initial_velocity, .. } => initial_velocity,
            _ => Vec2::ZERO,
        };

        let p_fade = self.curve.progress(t, d, velocity.x);
        let p_move = self.curve.progress(t, d, velocity.y);

        let opacity = self.from.opacity + (self.to.opacity - self.from.opacity) * p_fade;
        let translation = self
            .from
            .transform
            .translation
            .lerp(self.to.transform.translation, p_move);
        let scale = self.from.transform.scale + (self.to.transform.scale - self.from.transform.scale) * p_fade;

        VisualState {
            opacity: opacity.clamp(0.0, 1.0),
            transform: Transform { translation, scale },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden() -> VisualState {
        VisualState::new(0.0, Transform::translation(0.0, -16.0).scaled_by(0.95))
    }

    #[test]
    fn test_sample_endpoints() {
        let tr = Transition::new(
            hidden(),
            VisualState::IDENTITY,
            Duration::from_millis(330),
            TimingCurve::spring(0.6, Vec2::ZERO),
        );
        assert_eq!(tr.sample(Duration::ZERO), hidden());
        assert_eq!(tr.sample(Duration::from_millis(330)), VisualState::IDENTITY);
        assert_eq!(tr.sample(Duration::from_secs(5)), VisualState::IDENTITY);
        assert!(tr.is_finished(Duration::from_millis(330)));
        assert!(!tr.is_finished(Duration::from_millis(100)));
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let tr = Transition::new(hidden(), VisualState::IDENTITY, Duration::ZERO, TimingCurve::EaseInOut);
        assert_eq!(tr.sample(Duration::ZERO), VisualState::IDENTITY);
        assert!(tr.is_finished(Duration::ZERO));
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let curve = TimingCurve::EaseInOut;
        assert!((curve.progress(0.5, 1.0, 0.0) - 0.5).abs() < 1e-6);
        let a = curve.progress(0.25, 1.0, 0.0);
        let b = curve.progress(0.75, 1.0, 0.0);
        assert!((a + b - 1.0).abs() < 1e-5);
        assert!(a < 0.25);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let curve = TimingCurve::spring(0.3, Vec2::ZERO);
        let peak = (1..100)
            .map(|i| curve.progress(i as f32 / 100.0, 1.0, 0.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "peak was {peak}");
    }

    #[test]
    fn test_critically_damped_spring_is_monotonic_and_settles() {
        let curve = TimingCurve::spring(1.0, Vec2::ZERO);
        let mut last = 0.0;
        for i in 1..100 {
            let p = curve.progress(i as f32 / 100.0, 1.0, 0.0);
            assert!(p >= last - 1e-6);
            assert!(p <= 1.0 + 1e-6);
            last = p;
        }
        assert!(last > 0.98);
    }

    #[test]
    fn test_overdamped_spring_stays_below_target() {
        let curve = TimingCurve::spring(2.0, Vec2::ZERO);
        for i in 1..100 {
            assert!(curve.progress(i as f32 / 100.0, 1.0, 0.0) < 1.0);
        }
    }

    #[test]
    fn test_heavily_overdamped_spring_stays_finite() {
        for damping in [3.5, 5.0, 50.0, 1_000.0] {
            let curve = TimingCurve::spring(damping, Vec2::new(0.0, 2.0));
            for i in 0..=100 {
                let t = i as f32 / 100.0 * 0.33;
                let p = curve.progress(t, 0.33, 0.0);
                assert!(p.is_finite() && (0.0..=1.0).contains(&p), "damping {damping} t {t}: {p}");
            }
        }

        let tr = Transition::new(
            hidden(),
            VisualState::IDENTITY,
            Duration::from_millis(330),
            TimingCurve::spring(5.0, Vec2::ZERO),
        );
        let mid = tr.sample(Duration::from_millis(200));
        assert!(mid.opacity.is_finite());
        assert!(mid.transform.translation.y.is_finite());
        assert!(mid.transform.scale.is_finite());
    }

    #[test]
    fn test_initial_velocity_speeds_up_start() {
        let still = TimingCurve::spring(1.0, Vec2::ZERO).progress(0.01, 1.0, 0.0);
        let pushed = TimingCurve::spring(1.0, Vec2::ZERO).progress(0.01, 1.0, 5.0);
        assert!(pushed > still);
    }

    #[test]
    fn test_opacity_is_clamped_during_overshoot() {
        let tr = Transition::new(
            hidden(),
            VisualState::IDENTITY,
            Duration::from_secs(1),
            TimingCurve::spring(0.2, Vec2::ZERO),
        );
        for i in 0..=100 {
            let s = tr.sample(Duration::from_millis(i * 10));
            assert!((0.0..=1.0).contains(&s.opacity));
        }
    }
}
