//! The collaborators a flash needs from the surrounding UI toolkit
//!
//! A [`Platform`] bundles them: where to show flashes by default, how to run
//! animations and timers, how to play haptics and how to measure text. The
//! toolkit installs one per UI thread; flashes created on that thread pick it
//! up automatically.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::animation::AnimationDriver;
use crate::host::HostResolver;
use crate::text::{MonospaceMeasurer, TextMeasurer};

/// Handle to a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Runs one-shot callbacks after a delay, on the UI thread.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId;

    /// Cancelling a timer that already fired is a no-op.
    fn cancel(&self, id: TimerId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
}

/// Plays haptic feedback. Failures are silent.
pub trait HapticFeedback {
    fn impact(&self, style: ImpactStyle);
}

/// Haptics for devices without a haptic engine
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl HapticFeedback for NoHaptics {
    fn impact(&self, _style: ImpactStyle) {}
}

/// Everything a flash calls out to
#[derive(Clone)]
pub struct Platform {
    pub hosts: Rc<dyn HostResolver>,
    pub animations: Rc<dyn AnimationDriver>,
    pub scheduler: Rc<dyn Scheduler>,
    pub haptics: Rc<dyn HapticFeedback>,
    pub text: Rc<dyn TextMeasurer>,
}

thread_local! {
    static CURRENT: RefCell<Option<Platform>> = const { RefCell::new(None) };
}

impl Platform {
    /// A platform without haptics that measures text with [`MonospaceMeasurer`].
    pub fn new(
        hosts: Rc<dyn HostResolver>,
        animations: Rc<dyn AnimationDriver>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            hosts,
            animations,
            scheduler,
            haptics: Rc::new(NoHaptics),
            text: Rc::new(MonospaceMeasurer::default()),
        }
    }

    pub fn with_haptics(mut self, haptics: Rc<dyn HapticFeedback>) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn with_text_measurer(mut self, text: Rc<dyn TextMeasurer>) -> Self {
        self.text = text;
        self
    }

    /// Makes this the platform for flashes created on the current thread.
    /// Returns the platform it replaces.
    pub fn install(self) -> Option<Platform> {
        debug!("platform installed");
        CURRENT.with(|current| current.borrow_mut().replace(self))
    }

    pub fn uninstall() -> Option<Platform> {
        CURRENT.with(|current| current.borrow_mut().take())
    }

    /// The platform installed on the current thread
    pub fn current() -> Option<Platform> {
        CURRENT.with(|current| current.borrow().clone())
    }
}
