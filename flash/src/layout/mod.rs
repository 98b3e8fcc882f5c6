//! Flash layout
//!
//! Layout happens in two steps. First the *content frame* is found: the part
//! of the host a flash may occupy, which is the host's safe area minus any
//! navigation bar, tab bar or toolbar found by hit-testing, minus the
//! configuration's outer insets. Then the flash is sized to fit its text and
//! icon and pinned to the top or bottom of the content frame.
//!
//! ```text
//!  ┌──────────────── content frame ────────────────┐
//!  │   ┌── flash ─────────────────────────┐        │
//!  │   │ content insets                   │        │
//!  │   │  ┌icon┐ spacing ┌text──────────┐ │        │
//!  │   │  └────┘         └──────────────┘ │        │
//!  │   └──────────────────────────────────┘        │
//! ```
//!
//! Everything here is a pure function of its inputs.

use tracing::debug;

use crate::config::{Alignment, Configuration};
use crate::geometry::{EdgeInsets, Point, Rect, RectEdge, Size};
use crate::host::{find_chrome, HostSurface, NodeRole};
use crate::style::Font;
use crate::text::{TextLayout, TextMeasurer};

/// Distance of the chrome probes from the safe area edges
const PROBE_INSET: f32 = 5.0;

/// Result of laying out a flash
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlashLayout {
    /// Area the flash may occupy, in host coordinates
    pub content_frame: Rect,
    /// The flash itself, in host coordinates
    pub frame: Rect,
    /// Icon frame relative to the flash's top-left corner
    pub icon_frame: Rect,
    /// Text frame relative to the flash's top-left corner
    pub text_frame: Rect,
    pub text: TextLayout,
    /// Title font after scaling for the host's content size category
    pub font: Font,
}

/// Extra top and bottom insets needed to stay clear of bars.
///
/// Probes just inside the top of the safe area for a navigation bar, and just
/// inside the bottom for a tab bar or, failing that, a toolbar.
pub fn obstruction_insets(host: &dyn HostSurface) -> EdgeInsets {
    let bounds = host.bounds();
    let safe = host.safe_area_insets();
    let mut insets = EdgeInsets::ZERO;

    let top_probe = Point::new(bounds.min_x() + PROBE_INSET, bounds.min_y() + safe.top + PROBE_INSET);
    if let Some(nav) = find_chrome(host, top_probe, NodeRole::NavigationBar) {
        insets.top = (nav.frame.max_y() - (bounds.min_y() + safe.top)).max(0.0);
        debug!(inset = insets.top, "navigation bar found");
    }

    let bottom_probe = Point::new(bounds.min_x() + PROBE_INSET, bounds.max_y() - safe.bottom - PROBE_INSET);
    let bar = find_chrome(host, bottom_probe, NodeRole::TabBar)
        .or_else(|| find_chrome(host, bottom_probe, NodeRole::Toolbar));
    if let Some(bar) = bar {
        insets.bottom = (bounds.max_y() - bar.frame.min_y() - safe.bottom).max(0.0);
        debug!(inset = insets.bottom, role = ?bar.role, "bottom bar found");
    }

    insets
}

/// The area of `host` a flash configured by `config` may occupy.
pub fn content_frame(host: &dyn HostSurface, config: &Configuration) -> Rect {
    let mut insets = host.safe_area_insets();
    if config.avoids_obstructions {
        insets = insets + obstruction_insets(host);
    }
    host.bounds().inset_by(insets).inset_by(config.insets)
}

/// Lays out a flash showing `text` and an icon of `image_size` in `host`.
pub fn compute(
    host: &dyn HostSurface,
    config: &Configuration,
    text: &str,
    image_size: Option<Size>,
    measurer: &dyn TextMeasurer,
) -> FlashLayout {
    let content_frame = content_frame(host, config);
    let content_bounds = Rect::from_origin_size(Point::ZERO, content_frame.size).inset_by(config.content_insets);

    let image_width = image_size.map_or(0.0, |size| size.width.max(0.0));
    let split = if image_width > 0.0 { image_width + config.spacing } else { 0.0 };
    let (icon_zone, text_zone) = content_bounds.divided(split, RectEdge::MinX);

    let font = config.title.font.scaled_for(host.content_size_category());
    let text_layout = measurer.measure(text, &font, text_zone.width(), config.title.number_of_lines);

    let text_frame = Rect::from_origin_size(text_zone.origin, text_layout.size);
    let icon_frame = Rect::from_origin_size(icon_zone.origin, Size::new(image_width, text_frame.height()));

    let size = Size::new(
        text_frame.max_x() + config.content_insets.right,
        text_frame.max_y() + config.content_insets.bottom,
    )
    .rounded();

    let center_y = match config.alignment {
        Alignment::Top => content_frame.min_y() + size.height / 2.0,
        Alignment::Bottom => content_frame.max_y() - size.height / 2.0,
    };
    let frame = Rect::from_center(Point::new(host.bounds().mid_x(), center_y), size);

    FlashLayout {
        content_frame,
        frame,
        icon_frame,
        text_frame,
        text: text_layout,
        font,
    }
}
