//! Timers and animations on a tokio `LocalSet`
//!
//! Both types spawn `!Send` tasks with `tokio::task::spawn_local`, so they
//! must be used from inside a `LocalSet` on a current-thread runtime.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

use crate::animation::{AnimationDriver, AnimationTarget, Completion, Transition};
use crate::flash::FlashId;
use crate::platform::{Scheduler, TimerId};

/// Runs each timer as a task sleeping on `tokio::time::sleep`.
#[derive(Default)]
pub struct TokioScheduler {
    next_id: Cell<u64>,
    tasks: Rc<RefCell<HashMap<TimerId, JoinHandle<()>>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let tasks = Rc::clone(&self.tasks);
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            tasks.borrow_mut().remove(&id);
            trace!(timer = id.0, "timer fired");
            callback();
        });
        self.tasks.borrow_mut().insert(id, handle);
        id
    }

    fn cancel(&self, id: TimerId) {
        if let Some(handle) = self.tasks.borrow_mut().remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.borrow_mut().drain() {
            handle.abort();
        }
    }
}

/// Samples transitions on a fixed frame interval.
///
/// A new transition for a flash aborts the running one; dropping the aborted
/// task's completion reports it as unfinished.
pub struct TokioDriver {
    frame: Duration,
    tasks: Rc<RefCell<HashMap<FlashId, (u64, JoinHandle<()>)>>>,
    next_run: Cell<u64>,
}

impl TokioDriver {
    /// 60 frames per second
    pub fn new() -> Self {
        Self::with_frame(Duration::from_micros(16_667))
    }

    pub fn with_frame(frame: Duration) -> Self {
        Self {
            frame: frame.max(Duration::from_millis(1)),
            tasks: Rc::new(RefCell::new(HashMap::new())),
            next_run: Cell::new(0),
        }
    }

    pub fn running_count(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Default for TokioDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver for TokioDriver {
    fn run(&self, target: AnimationTarget, transition: Transition, completion: Completion) {
        let id = target.id();
        if let Some((_, handle)) = self.tasks.borrow_mut().remove(&id) {
            trace!(flash = ?id, "transition interrupted");
            handle.abort();
        }

        let run = self.next_run.get();
        self.next_run.set(run + 1);

        target.apply(transition.sample(Duration::ZERO));

        let frame = self.frame;
        let tasks = Rc::clone(&self.tasks);
        let handle = tokio::task::spawn_local(async move {
            let start = Instant::now();
            let mut ticker = tokio::time::interval(frame);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let elapsed = start.elapsed();
                target.apply(transition.sample(elapsed));
                if transition.is_finished(elapsed) || !target.is_alive() {
                    break;
                }
            }

            {
                let mut tasks = tasks.borrow_mut();
                if tasks.get(&id).map(|(r, _)| *r) == Some(run) {
                    tasks.remove(&id);
                }
            }
            completion.complete(target.is_alive());
        });
        self.tasks.borrow_mut().insert(id, (run, handle));
    }
}

impl Drop for TokioDriver {
    fn drop(&mut self) {
        for (_, (_, handle)) in self.tasks.borrow_mut().drain() {
            handle.abort();
        }
    }
}
