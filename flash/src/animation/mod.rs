//! Animation contract
//!
//! A flash never animates itself. It hands an [`AnimationContext`] and a
//! [`Completion`] to the configured [`Animator`], which decides the visual
//! states to move between and asks the platform's [`AnimationDriver`] to run
//! the resulting [`Transition`]s.

mod default;
mod fade;
mod transition;

pub use default::{AnimatorConfiguration, DefaultAnimator};
pub use fade::FadeAnimator;
pub use transition::{TimingCurve, Transition, VisualState};

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::Alignment;
use crate::flash::{FlashId, FlashState};

/// Decides how a flash enters and leaves the screen.
///
/// Animators are shared between configurations, so they must be immutable
/// once constructed.
pub trait Animator: fmt::Debug + Send + Sync {
    /// Animates the flash from its hidden state to fully visible.
    fn animate_in(&self, cx: &AnimationContext, completion: Completion);

    /// Animates the flash from wherever it is now to its hidden state.
    fn animate_out(&self, cx: &AnimationContext, completion: Completion);
}

/// Runs transitions on behalf of animators.
///
/// Starting a transition for a target that already has one in flight must
/// complete the earlier transition with `finished = false`.
pub trait AnimationDriver {
    fn run(&self, target: AnimationTarget, transition: Transition, completion: Completion);
}

/// A one-shot "animation finished" signal.
///
/// The callback runs exactly once: either through [`Completion::complete`] or,
/// if the completion is dropped unused, with `finished = false`.
pub struct Completion {
    callback: Option<Box<dyn FnOnce(bool)>>,
}

impl Completion {
    pub fn new(callback: impl FnOnce(bool) + 'static) -> Self {
        Self { callback: Some(Box::new(callback)) }
    }

    /// A completion nobody listens to
    pub fn noop() -> Self {
        Self { callback: None }
    }

    pub fn complete(mut self, finished: bool) {
        if let Some(callback) = self.callback.take() {
            callback(finished);
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        if let Some(callback) = self.callback.take() {
            callback(false);
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

/// The flash a transition is animating.
///
/// Holds the flash weakly: a target whose flash is gone ignores updates.
#[derive(Clone)]
pub struct AnimationTarget {
    id: FlashId,
    state: Weak<RefCell<FlashState>>,
}

impl AnimationTarget {
    pub(crate) fn new(id: FlashId, state: &Rc<RefCell<FlashState>>) -> Self {
        Self { id, state: Rc::downgrade(state) }
    }

    pub fn id(&self) -> FlashId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.state.strong_count() > 0
    }

    /// The flash's current visual state, if it still exists
    pub fn visual(&self) -> Option<VisualState> {
        let state = self.state.upgrade()?;
        let visual = state.borrow().visual;
        Some(visual)
    }

    /// Applies a frame of animation to the flash.
    pub fn apply(&self, visual: VisualState) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().visual = visual;
        }
    }
}

impl fmt::Debug for AnimationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationTarget")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Everything an animator may touch while animating one flash.
pub struct AnimationContext {
    target: AnimationTarget,
    alignment: Alignment,
    driver: Rc<dyn AnimationDriver>,
}

impl AnimationContext {
    pub fn new(target: AnimationTarget, alignment: Alignment, driver: Rc<dyn AnimationDriver>) -> Self {
        Self { target, alignment, driver }
    }

    pub fn target(&self) -> &AnimationTarget {
        &self.target
    }

    /// Edge the flash is pinned to
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn visual(&self) -> VisualState {
        self.target.visual().unwrap_or_default()
    }

    /// Jumps to `visual` without animating.
    pub fn set_visual(&self, visual: VisualState) {
        self.target.apply(visual);
    }

    pub fn run(&self, transition: Transition, completion: Completion) {
        self.driver.run(self.target.clone(), transition, completion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_completion_fires_once() {
        let calls = Rc::new(Cell::new(0));
        let finished = Rc::new(Cell::new(false));
        let completion = {
            let calls = calls.clone();
            let finished = finished.clone();
            Completion::new(move |done| {
                calls.set(calls.get() + 1);
                finished.set(done);
            })
        };

        completion.complete(true);
        assert_eq!(calls.get(), 1);
        assert!(finished.get());
    }

    #[test]
    fn test_dropped_completion_reports_unfinished() {
        let result = Rc::new(Cell::new(None));
        {
            let result = result.clone();
            let _completion = Completion::new(move |done| result.set(Some(done)));
        }
        assert_eq!(result.get(), Some(false));
    }

    #[test]
    fn test_noop_completion() {
        Completion::noop().complete(true);
        drop(Completion::noop());
    }
}
