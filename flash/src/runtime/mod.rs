//! Reference implementations of the platform collaborators
//!
//! - [`ManualRuntime`], [`ManualScheduler`] and [`ManualDriver`] run on a
//!   virtual clock that only moves when told to. Hosts that drive their own
//!   frame loop use them, and so do the tests.
//! - [`ImmediateDriver`] skips animations entirely.
//! - [`TokioScheduler`] and [`TokioDriver`] run on a tokio `LocalSet`.

mod local;
mod manual;

pub use local::{TokioDriver, TokioScheduler};
pub use manual::{ManualDriver, ManualRuntime, ManualScheduler};

use std::cell::RefCell;

use crate::animation::{AnimationDriver, AnimationTarget, Completion, Transition};
use crate::platform::{HapticFeedback, ImpactStyle};

/// Jumps straight to the end of every transition and completes it
/// synchronously.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateDriver;

impl AnimationDriver for ImmediateDriver {
    fn run(&self, target: AnimationTarget, transition: Transition, completion: Completion) {
        target.apply(transition.to);
        completion.complete(true);
    }
}

/// Remembers every impact instead of playing it
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    impacts: RefCell<Vec<ImpactStyle>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn impacts(&self) -> Vec<ImpactStyle> {
        self.impacts.borrow().clone()
    }
}

impl HapticFeedback for RecordingHaptics {
    fn impact(&self, style: ImpactStyle) {
        self.impacts.borrow_mut().push(style);
    }
}
