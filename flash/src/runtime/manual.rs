//! Virtual-clock scheduler and animation driver

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

use crate::animation::{AnimationDriver, AnimationTarget, Completion, Transition};
use crate::platform::{Scheduler, TimerId};

struct PendingTimer {
    id: TimerId,
    due: Duration,
    callback: Box<dyn FnOnce()>,
}

/// Scheduler whose clock only moves on [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    timers: RefCell<Vec<PendingTimer>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_count(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Moves the clock forward, firing due timers in order. Timers scheduled
    /// by a callback fire in the same call if they fall due before the end.
    pub fn advance(&self, by: Duration) {
        let end = self.now.get() + by;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let earliest = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= end)
                    .min_by_key(|(_, timer)| (timer.due, timer.id))
                    .map(|(index, _)| index);
                earliest.map(|index| timers.remove(index))
            };
            let Some(timer) = next else { break };

            self.now.set(timer.due);
            trace!(timer = timer.id.0, "timer fired");
            (timer.callback)();
        }
        self.now.set(end);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.timers.borrow_mut().push(PendingTimer {
            id,
            due: self.now.get() + delay,
            callback,
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.timers.borrow_mut().retain(|timer| timer.id != id);
    }
}

struct RunningTransition {
    target: AnimationTarget,
    transition: Transition,
    elapsed: Duration,
    completion: Completion,
}

/// Animation driver that samples transitions on [`ManualDriver::advance`].
#[derive(Default)]
pub struct ManualDriver {
    running: RefCell<Vec<RunningTransition>>,
}

impl ManualDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running_count(&self) -> usize {
        self.running.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.running.borrow().is_empty()
    }

    /// Advances every running transition by `dt`, applies the sampled states
    /// and completes the transitions that reached their end.
    pub fn advance(&self, dt: Duration) {
        let batch = std::mem::take(&mut *self.running.borrow_mut());

        let mut finished = Vec::new();
        let mut still_running = Vec::new();
        for mut running in batch {
            running.elapsed += dt;
            running.target.apply(running.transition.sample(running.elapsed));
            if running.transition.is_finished(running.elapsed) {
                finished.push(running.completion);
            } else {
                still_running.push(running);
            }
        }

        // keep anything started while the borrow was released
        {
            let mut running = self.running.borrow_mut();
            let started = std::mem::replace(&mut *running, still_running);
            running.extend(started);
        }

        for completion in finished {
            completion.complete(true);
        }
    }
}

impl AnimationDriver for ManualDriver {
    fn run(&self, target: AnimationTarget, transition: Transition, completion: Completion) {
        let interrupted: Vec<Completion> = {
            let mut running = self.running.borrow_mut();
            let (same, other): (Vec<_>, Vec<_>) = std::mem::take(&mut *running)
                .into_iter()
                .partition(|r| r.target.id() == target.id());
            *running = other;
            same.into_iter().map(|r| r.completion).collect()
        };
        for completion in interrupted {
            trace!(flash = ?target.id(), "transition interrupted");
            completion.complete(false);
        }

        target.apply(transition.sample(Duration::ZERO));
        self.running.borrow_mut().push(RunningTransition {
            target,
            transition,
            elapsed: Duration::ZERO,
            completion,
        });
    }
}

/// One virtual clock for both timers and animations.
///
/// `advance` steps in frames so a timer armed when an animation completes is
/// measured from that frame rather than from the end of the call.
pub struct ManualRuntime {
    pub scheduler: Rc<ManualScheduler>,
    pub driver: Rc<ManualDriver>,
    frame: Duration,
}

impl ManualRuntime {
    /// 60 frames per second
    pub fn new() -> Self {
        Self::with_frame(Duration::from_micros(16_667))
    }

    pub fn with_frame(frame: Duration) -> Self {
        Self {
            scheduler: Rc::new(ManualScheduler::new()),
            driver: Rc::new(ManualDriver::new()),
            frame: frame.max(Duration::from_micros(1)),
        }
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn advance(&self, by: Duration) {
        let mut remaining = by;
        while !remaining.is_zero() {
            let step = remaining.min(self.frame);
            self.scheduler.advance(step);
            self.driver.advance(step);
            remaining -= step;
        }
    }

    /// Advances until no animation is running, at most `limit`.
    pub fn settle(&self, limit: Duration) {
        let mut spent = Duration::ZERO;
        while !self.driver.is_idle() && spent < limit {
            self.advance(self.frame);
            spent += self.frame;
        }
    }
}

impl Default for ManualRuntime {
    fn default() -> Self {
        Self::new()
    }
}
