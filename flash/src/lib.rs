//! Flash - transient on-screen notifications
//!
//! A [`Flash`] is a short message, optionally with an icon, that slides in at
//! the top or bottom of a host surface, stays for a moment and slides out. It
//! keeps clear of the safe area and of navigation bars, tab bars and toolbars
//! it finds by hit-testing the host.
//!
//! The crate is headless. Everything it needs from the outside world (the
//! surface to show in, a frame clock, timers, haptics and text measurement)
//! comes through the [`Platform`] installed on the current thread, and
//! [`Flash::render`] describes what to draw as a [`RenderList`].

pub mod animation;
pub mod appearance;
pub mod config;
pub mod error;
pub mod event;
pub mod flash;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod icon;
pub mod layout;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod style;
pub mod text;

pub use animation::{AnimationContext, Animator, Completion, DefaultAnimator, FadeAnimator};
pub use config::{Alignment, Configuration};
pub use error::{FlashError, Result};
pub use flash::{Flash, FlashId, Phase};
pub use icon::FlashImage;
pub use platform::Platform;
pub use render::RenderList;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::animation::{
        AnimationContext, AnimationDriver, Animator, AnimatorConfiguration, Completion, DefaultAnimator, FadeAnimator,
        TimingCurve, Transition, VisualState,
    };
    pub use crate::config::{Alignment, Configuration};
    pub use crate::event::{Event, MouseButton};
    pub use crate::flash::{Flash, FlashId, Phase};
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size, Transform};
    pub use crate::host::{HostResolver, HostSurface, NodeRole, ViewTree};
    pub use crate::icon::FlashImage;
    pub use crate::platform::{HapticFeedback, ImpactStyle, Platform, Scheduler};
    pub use crate::render::{Primitive, RenderList};
    pub use crate::style::{Color, ContentSizeCategory, Font, FontWeight};
}
