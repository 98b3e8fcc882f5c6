//! The flash itself: presentation lifecycle and rendering
//!
//! A flash moves through four phases:
//!
//! ```text
//! Detached ──show──▶ Entering ──entrance done──▶ Visible
//!     ▲                 │                          │
//!     │                 └────────hide──────────────┤
//!     │                                            ▼
//!     └──────────────exit done──────────────── Exiting
//! ```
//!
//! Calls that are not valid in the current phase do nothing. Every `show`
//! starts a new presentation; completions and timers from an earlier
//! presentation are recognized by their generation and ignored.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use tracing::{debug, trace};

use crate::animation::{AnimationContext, AnimationTarget, Animator, Completion, VisualState};
use crate::appearance::Appearance;
use crate::config::Configuration;
use crate::event::Event;
use crate::geometry::{Rect, Size, Transform};
use crate::gesture::{TapPhase, TapRecognizer};
use crate::host::HostSurface;
use crate::icon::FlashImage;
use crate::layout::{self, FlashLayout};
use crate::platform::{ImpactStyle, Platform, TimerId};
use crate::render::RenderList;

/// How long a flash stays up when shown with [`Flash::show`]
pub const DEFAULT_DURATION: Duration = Duration::from_secs(2);

/// Delay before the second layout pass after an environment change
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Unique flash identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlashId(u64);

impl FlashId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        FlashId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FlashId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Detached,
    Entering,
    Visible,
    Exiting,
}

pub(crate) struct FlashState {
    id: FlashId,
    text: String,
    image: Option<FlashImage>,
    configuration: Configuration,
    appearance: Appearance,
    phase: Phase,
    generation: u64,
    host: Option<Weak<dyn HostSurface>>,
    platform: Option<Platform>,
    duration: Duration,
    timer: Option<TimerId>,
    settle_timer: Option<TimerId>,
    tap: Option<TapRecognizer>,
    layout: Option<FlashLayout>,
    pub(crate) visual: VisualState,
}

/// A transient notification.
///
/// `Flash` is a cheap handle; clones refer to the same flash.
#[derive(Clone)]
pub struct Flash {
    state: Rc<RefCell<FlashState>>,
}

impl Flash {
    /// Creates a detached flash. Without a configuration, the shared one is
    /// copied.
    pub fn new(text: impl Into<String>, image: Option<FlashImage>, configuration: Option<Configuration>) -> Self {
        let configuration = configuration.unwrap_or_else(Configuration::shared);
        let state = FlashState {
            id: FlashId::next(),
            text: text.into(),
            image,
            appearance: Appearance::from(&configuration),
            tap: configuration.tap_to_dismiss.then(TapRecognizer::new),
            configuration,
            phase: Phase::Detached,
            generation: 0,
            host: None,
            platform: Platform::current(),
            duration: DEFAULT_DURATION,
            timer: None,
            settle_timer: None,
            layout: None,
            visual: VisualState::IDENTITY,
        };
        Self { state: Rc::new(RefCell::new(state)) }
    }

    /// Uses `platform` instead of the one installed on the thread.
    pub fn with_platform(self, platform: Platform) -> Self {
        self.state.borrow_mut().platform = Some(platform);
        self
    }

    pub fn id(&self) -> FlashId {
        self.state.borrow().id
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    /// Whether the flash is attached to a host
    pub fn is_visible(&self) -> bool {
        self.phase() != Phase::Detached
    }

    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub fn image(&self) -> Option<FlashImage> {
        self.state.borrow().image.clone()
    }

    pub fn configuration(&self) -> Configuration {
        self.state.borrow().configuration.clone()
    }

    pub fn appearance(&self) -> Appearance {
        self.state.borrow().appearance
    }

    /// The most recent layout, if the flash has been laid out
    pub fn layout_result(&self) -> Option<FlashLayout> {
        self.state.borrow().layout.clone()
    }

    /// Untransformed frame in host coordinates
    pub fn frame(&self) -> Option<Rect> {
        self.state.borrow().layout.as_ref().map(|layout| layout.frame)
    }

    pub fn visual(&self) -> VisualState {
        self.state.borrow().visual
    }

    pub fn host(&self) -> Option<Rc<dyn HostSurface>> {
        self.state.borrow().host.as_ref().and_then(Weak::upgrade)
    }

    pub fn has_tap_recognizer(&self) -> bool {
        self.state.borrow().tap.is_some()
    }

    pub fn animation_target(&self) -> AnimationTarget {
        AnimationTarget::new(self.id(), &self.state)
    }

    /// Shows the flash in the default host for [`DEFAULT_DURATION`].
    pub fn show(&self) {
        self.show_with(None, DEFAULT_DURATION);
    }

    /// Shows the flash in `host` for [`DEFAULT_DURATION`].
    pub fn show_in(&self, host: Rc<dyn HostSurface>) {
        self.show_with(Some(host), DEFAULT_DURATION);
    }

    /// Shows the flash. A zero `duration` keeps it up until [`Flash::hide`].
    ///
    /// Only a detached flash can be shown. Without a platform or a host to
    /// show in, nothing happens.
    pub fn show_with(&self, host: Option<Rc<dyn HostSurface>>, duration: Duration) {
        let (id, phase, platform) = {
            let state = self.state.borrow();
            (state.id, state.phase, state.platform.clone())
        };
        if phase != Phase::Detached {
            debug!(flash = %id, ?phase, "show ignored");
            return;
        }
        let Some(platform) = platform.or_else(Platform::current) else {
            debug!(flash = %id, "show ignored: no platform installed");
            return;
        };
        let Some(host) = host.or_else(|| platform.hosts.default_host()) else {
            debug!(flash = %id, "show ignored: no host");
            return;
        };

        if self.state.borrow().configuration.plays_haptics {
            platform.haptics.impact(ImpactStyle::Light);
        }

        for other in host.flashes() {
            if other.id() != id {
                debug!(flash = %id, evicted = %other.id(), "replacing flash");
                other.hide();
            }
        }

        let generation = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.phase = Phase::Entering;
            state.host = Some(Rc::downgrade(&host));
            state.platform = Some(platform.clone());
            state.duration = duration;
            if let Some(tap) = state.tap.as_mut() {
                tap.reset();
            }
            state.generation
        };
        host.add_flash(self.clone());
        self.layout();
        debug!(flash = %id, ?duration, "entering");

        let weak = Rc::downgrade(&self.state);
        let (animator, cx) = self.animation_context(&platform);
        animator.animate_in(
            &cx,
            Completion::new(move |finished| {
                if let Some(state) = weak.upgrade() {
                    Flash { state }.entrance_finished(generation, finished);
                }
            }),
        );
    }

    /// Starts the exit animation; the flash detaches when it finishes.
    /// Does nothing unless entering or visible.
    pub fn hide(&self) {
        let (id, generation, platform, timers) = {
            let mut state = self.state.borrow_mut();
            if !matches!(state.phase, Phase::Entering | Phase::Visible) {
                trace!(flash = %state.id, phase = ?state.phase, "hide ignored");
                return;
            }
            state.phase = Phase::Exiting;
            let timers = [state.timer.take(), state.settle_timer.take()];
            (state.id, state.generation, state.platform.clone(), timers)
        };

        let Some(platform) = platform else {
            self.exit_finished(generation);
            return;
        };
        for timer in timers.into_iter().flatten() {
            trace!(flash = %id, timer = timer.0, "timer cancelled");
            platform.scheduler.cancel(timer);
        }
        debug!(flash = %id, "exiting");

        let weak = Rc::downgrade(&self.state);
        let (animator, cx) = self.animation_context(&platform);
        animator.animate_out(
            &cx,
            Completion::new(move |_| {
                if let Some(state) = weak.upgrade() {
                    Flash { state }.exit_finished(generation);
                }
            }),
        );
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.state.borrow_mut().text = text.into();
        self.layout();
    }

    pub fn set_image(&self, image: Option<FlashImage>) {
        self.state.borrow_mut().image = image;
        self.layout();
    }

    /// Replaces the configuration, re-applying its appearance and tap
    /// handling, and lays out again. Running animations and the dismiss
    /// timer are left alone.
    pub fn set_configuration(&self, configuration: Configuration) {
        {
            let mut state = self.state.borrow_mut();
            state.appearance = Appearance::from(&configuration);
            state.tap = if configuration.tap_to_dismiss {
                state.tap.take().or_else(|| Some(TapRecognizer::new()))
            } else {
                None
            };
            state.configuration = configuration;
        }
        self.layout();
    }

    /// Recomputes the layout against the current host. Does nothing while
    /// detached.
    pub fn layout(&self) {
        let (id, host, platform, configuration, text, image_size) = {
            let state = self.state.borrow();
            if state.phase == Phase::Detached {
                return;
            }
            (
                state.id,
                state.host.as_ref().and_then(Weak::upgrade),
                state.platform.clone(),
                state.configuration.clone(),
                state.text.clone(),
                state.image.as_ref().map(FlashImage::size),
            )
        };
        let (Some(host), Some(platform)) = (host, platform) else {
            return;
        };

        let result = layout::compute(&*host, &configuration, &text, image_size, &*platform.text);
        trace!(flash = %id, frame = ?result.frame, "laid out");
        self.state.borrow_mut().layout = Some(result);
    }

    /// Lays out now and once more after [`SETTLE_DELAY`], for hosts that
    /// settle their own geometry in two passes.
    pub fn environment_did_change(&self) {
        let settle = {
            let mut state = self.state.borrow_mut();
            match state.phase {
                Phase::Detached => return,
                Phase::Exiting => None,
                Phase::Entering | Phase::Visible => {
                    Some((state.id, state.generation, state.platform.clone(), state.settle_timer.take()))
                }
            }
        };
        self.layout();
        // exiting flashes lay out once, without a settle pass
        let Some((id, generation, platform, previous)) = settle else { return };

        let Some(platform) = platform else { return };
        if let Some(previous) = previous {
            platform.scheduler.cancel(previous);
        }

        let weak = Rc::downgrade(&self.state);
        let timer = platform.scheduler.schedule(
            SETTLE_DELAY,
            Box::new(move || {
                let Some(state) = weak.upgrade() else { return };
                let flash = Flash { state };
                {
                    let mut state = flash.state.borrow_mut();
                    if state.generation != generation {
                        return;
                    }
                    state.settle_timer = None;
                }
                flash.layout();
            }),
        );
        self.state.borrow_mut().settle_timer = Some(timer);
        debug!(flash = %id, "environment changed");
    }

    /// Routes a host event to the flash. Returns whether the flash consumed
    /// it; environment events are never consumed.
    pub fn on_event(&self, event: &Event) -> bool {
        match event {
            Event::Resize { .. } => {
                self.layout();
                false
            }
            Event::ContentSizeChanged(_) => {
                self.environment_did_change();
                false
            }
            _ => {
                let phase = {
                    let mut state = self.state.borrow_mut();
                    if !matches!(state.phase, Phase::Entering | Phase::Visible) {
                        return false;
                    }
                    let Some(frame) = state.layout.as_ref().map(|l| state.visual.transform.apply_to_rect(l.frame)) else {
                        return false;
                    };
                    match state.tap.as_mut() {
                        Some(tap) => tap.handle(event, frame),
                        None => return false,
                    }
                };
                if phase == TapPhase::Recognized {
                    debug!(flash = %self.id(), "tapped");
                    self.hide();
                }
                phase.is_handled()
            }
        }
    }

    /// Drawing commands for the flash's current state, in host coordinates.
    /// Empty while detached.
    pub fn render(&self) -> RenderList {
        let mut list = RenderList::new();
        let state = self.state.borrow();
        if state.phase == Phase::Detached {
            return list;
        }
        let Some(layout) = state.layout.as_ref() else {
            return list;
        };

        let VisualState { opacity, transform } = state.visual;
        let appearance = state.appearance;
        let frame = layout.frame;

        list.rect(
            transform.apply_to_rect(frame),
            appearance.background.fade(opacity),
            appearance.corner_radius * transform.scale,
        );

        if let Some(image) = state.image.as_ref() {
            if layout.icon_frame.width() > 0.0 {
                let icon = map_rect(&transform, layout.icon_frame, frame);
                let tint = image.is_template().then_some(appearance.image_tint);
                list.image(icon, tint, opacity);
            }
        }

        let line_height = layout.text.line_height;
        for (index, line) in layout.text.lines.iter().enumerate() {
            let line_frame = Rect::from_origin_size(
                layout.text_frame.origin.offset(Vec2::new(0.0, index as f32 * line_height)),
                Size::new(layout.text_frame.width(), line_height),
            );
            let mapped = map_rect(&transform, line_frame, frame);
            list.text(
                mapped.origin,
                line.clone(),
                layout.font.size * transform.scale,
                appearance.title_color.fade(opacity),
            );
        }

        list
    }

    fn animation_context(&self, platform: &Platform) -> (Arc<dyn Animator>, AnimationContext) {
        let (animator, alignment) = {
            let state = self.state.borrow();
            (Arc::clone(&state.configuration.animator), state.configuration.alignment)
        };
        let cx = AnimationContext::new(self.animation_target(), alignment, Rc::clone(&platform.animations));
        (animator, cx)
    }

    fn entrance_finished(&self, generation: u64, finished: bool) {
        let (id, platform, duration) = {
            let mut state = self.state.borrow_mut();
            if state.phase != Phase::Entering || state.generation != generation {
                trace!(flash = %state.id, "stale entrance completion");
                return;
            }
            state.phase = Phase::Visible;
            (state.id, state.platform.clone(), state.duration)
        };
        debug!(flash = %id, finished, "visible");

        if duration.is_zero() {
            return;
        }
        let Some(platform) = platform else { return };

        let weak = Rc::downgrade(&self.state);
        let timer = platform.scheduler.schedule(
            duration,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    Flash { state }.timer_fired(generation);
                }
            }),
        );
        trace!(flash = %id, timer = timer.0, "dismiss timer armed");
        self.state.borrow_mut().timer = Some(timer);
    }

    fn timer_fired(&self, generation: u64) {
        {
            let mut state = self.state.borrow_mut();
            if state.generation != generation || state.timer.is_none() {
                return;
            }
            state.timer = None;
            debug!(flash = %state.id, "dismiss timer fired");
        }
        self.hide();
    }

    fn exit_finished(&self, generation: u64) {
        let (id, host) = {
            let mut state = self.state.borrow_mut();
            if state.phase != Phase::Exiting || state.generation != generation {
                trace!(flash = %state.id, "stale exit completion");
                return;
            }
            state.phase = Phase::Detached;
            if let Some(tap) = state.tap.as_mut() {
                tap.reset();
            }
            (state.id, state.host.take().and_then(|host| host.upgrade()))
        };
        if let Some(host) = host {
            host.remove_flash(id);
        }
        debug!(flash = %id, "detached");
    }
}

impl fmt::Debug for Flash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(state) => f
                .debug_struct("Flash")
                .field("id", &state.id)
                .field("phase", &state.phase)
                .field("text", &state.text)
                .finish(),
            Err(_) => f.debug_struct("Flash").finish_non_exhaustive(),
        }
    }
}

/// Maps a rect given relative to `frame`'s origin into host coordinates,
/// through the transform applied to `frame`.
fn map_rect(transform: &Transform, local: Rect, frame: Rect) -> Rect {
    let origin = transform.apply_to_point(local.origin.offset(frame.origin.into()), frame);
    Rect::from_origin_size(
        origin,
        Size::new(local.width() * transform.scale, local.height() * transform.scale),
    )
}
