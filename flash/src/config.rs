//! Flash configuration
//!
//! A [`Configuration`] is a plain value: flashes copy it when they are
//! created, so changing a configuration afterwards never affects a flash
//! already on screen. The process-wide shared configuration is what a flash
//! starts from when none is given explicitly.
//!
//! Configurations can also be loaded from TOML or JSON through
//! [`ConfigurationFile`]; every key is optional and missing keys keep their
//! default values:
//!
//! ```toml
//! alignment = "bottom"
//! spacing = 6
//!
//! [background]
//! color = "#1c1c1e"
//! corner_radius = 14
//!
//! [title]
//! color = "#ffffff"
//! number_of_lines = 1
//!
//! [animator]
//! kind = "default"
//! duration = 0.25
//! ```

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::debug;

use crate::animation::{Animator, AnimatorConfiguration, DefaultAnimator, FadeAnimator};
use crate::error::Result;
use crate::geometry::EdgeInsets;
use crate::style::{Color, Font, FontWeight};

/// Edge of the host a flash is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundProperties {
    pub color: Color,
    pub corner_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageProperties {
    /// Tint applied to template images
    pub tint_color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleProperties {
    pub color: Color,
    pub font: Font,
    /// Maximum number of lines; 0 means unlimited
    pub number_of_lines: usize,
}

/// Appearance and behavior of a flash
#[derive(Debug, Clone)]
pub struct Configuration {
    pub alignment: Alignment,
    /// Gap between the image and the text
    pub spacing: f32,
    /// Margins between the host's safe area and the flash
    pub insets: EdgeInsets,
    /// Padding between the flash's edge and its content
    pub content_insets: EdgeInsets,
    pub background: BackgroundProperties,
    pub image: ImageProperties,
    pub title: TitleProperties,
    /// Play a light impact when shown
    pub plays_haptics: bool,
    /// Hide when tapped
    pub tap_to_dismiss: bool,
    /// Stay clear of navigation bars, tab bars and toolbars
    pub avoids_obstructions: bool,
    pub animator: Arc<dyn Animator>,
}

impl Configuration {
    /// The standard look: a gray rounded card with a two-line title
    pub fn new() -> Self {
        Self {
            alignment: Alignment::Top,
            spacing: 4.0,
            insets: EdgeInsets::all(16.0),
            content_insets: EdgeInsets::new(8.0, 12.0, 8.0, 12.0),
            background: BackgroundProperties {
                color: Color::SYSTEM_GRAY5,
                corner_radius: 10.0,
            },
            image: ImageProperties {
                tint_color: Color::LABEL.with_alpha(0.8),
            },
            title: TitleProperties {
                color: Color::LABEL,
                font: Font::default(),
                number_of_lines: 2,
            },
            plays_haptics: true,
            tap_to_dismiss: true,
            avoids_obstructions: true,
            animator: Arc::new(DefaultAnimator::default()),
        }
    }

    /// No insets, no background, no haptics and no tap handling
    pub fn plain() -> Self {
        Self {
            alignment: Alignment::Top,
            spacing: 0.0,
            insets: EdgeInsets::ZERO,
            content_insets: EdgeInsets::ZERO,
            background: BackgroundProperties {
                color: Color::CLEAR,
                corner_radius: 0.0,
            },
            image: ImageProperties { tint_color: Color::TINT },
            title: TitleProperties {
                color: Color::LABEL,
                font: Font::default(),
                number_of_lines: 0,
            },
            plays_haptics: false,
            tap_to_dismiss: false,
            avoids_obstructions: true,
            animator: Arc::new(DefaultAnimator::default()),
        }
    }

    /// A copy of the shared configuration
    pub fn shared() -> Self {
        SHARED.read().clone()
    }

    /// Replaces the shared configuration. Existing flashes are unaffected.
    pub fn set_shared(configuration: Configuration) {
        *SHARED.write() = configuration;
        debug!("shared configuration replaced");
    }

    /// Edits a copy of the shared configuration and stores it back. The lock
    /// is not held while `f` runs, so `f` may read the shared configuration.
    pub fn update_shared(f: impl FnOnce(&mut Configuration)) {
        let mut configuration = Self::shared();
        f(&mut configuration);
        *SHARED.write() = configuration;
        debug!("shared configuration updated");
    }

    /// Parses a TOML document on top of [`Configuration::default`].
    pub fn from_toml(source: &str) -> Result<Self> {
        ConfigurationFile::from_toml(source)?.into_configuration()
    }

    /// Parses a JSON document on top of [`Configuration::default`].
    pub fn from_json(source: &str) -> Result<Self> {
        ConfigurationFile::from_json(source)?.into_configuration()
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn insets(mut self, insets: impl Into<EdgeInsets>) -> Self {
        self.insets = insets.into();
        self
    }

    pub fn content_insets(mut self, insets: impl Into<EdgeInsets>) -> Self {
        self.content_insets = insets.into();
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background.color = color;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.background.corner_radius = radius;
        self
    }

    pub fn image_tint(mut self, color: Color) -> Self {
        self.image.tint_color = color;
        self
    }

    pub fn title_color(mut self, color: Color) -> Self {
        self.title.color = color;
        self
    }

    pub fn title_font(mut self, font: Font) -> Self {
        self.title.font = font;
        self
    }

    pub fn number_of_lines(mut self, lines: usize) -> Self {
        self.title.number_of_lines = lines;
        self
    }

    pub fn plays_haptics(mut self, enabled: bool) -> Self {
        self.plays_haptics = enabled;
        self
    }

    pub fn tap_to_dismiss(mut self, enabled: bool) -> Self {
        self.tap_to_dismiss = enabled;
        self
    }

    pub fn avoids_obstructions(mut self, enabled: bool) -> Self {
        self.avoids_obstructions = enabled;
        self
    }

    pub fn animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Arc::new(animator);
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

static SHARED: Lazy<RwLock<Configuration>> = Lazy::new(|| RwLock::new(Configuration::new()));

/// On-disk form of a [`Configuration`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigurationFile {
    pub alignment: Option<Alignment>,
    pub spacing: Option<f32>,
    pub insets: Option<EdgeInsets>,
    pub content_insets: Option<EdgeInsets>,
    pub background: BackgroundSection,
    pub image: ImageSection,
    pub title: TitleSection,
    pub plays_haptics: Option<bool>,
    pub tap_to_dismiss: Option<bool>,
    pub avoids_obstructions: Option<bool>,
    pub animator: Option<AnimatorSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundSection {
    pub color: Option<String>,
    pub corner_radius: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageSection {
    pub tint_color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleSection {
    pub color: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub adjusts_for_content_size: Option<bool>,
    pub number_of_lines: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimatorKind {
    #[default]
    Default,
    Fade,
}

/// Animator settings; `duration` is in seconds. Only `duration` applies to
/// the fade animator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimatorSection {
    pub kind: AnimatorKind,
    pub duration: Option<f32>,
    pub damping_ratio: Option<f32>,
    pub initial_velocity: Option<[f32; 2]>,
    pub translate_amount: Option<f32>,
    pub scale_coefficient: Option<f32>,
}

impl AnimatorSection {
    fn build(&self) -> Arc<dyn Animator> {
        let duration = self.duration.map(seconds);
        match self.kind {
            AnimatorKind::Fade => {
                let mut animator = FadeAnimator::default();
                if let Some(duration) = duration {
                    animator.duration = duration;
                }
                Arc::new(animator)
            }
            AnimatorKind::Default => {
                let mut config = AnimatorConfiguration::default();
                if let Some(duration) = duration {
                    config = config.duration(duration);
                }
                if let Some(damping) = self.damping_ratio {
                    config = config.damping_ratio(damping);
                }
                if let Some([x, y]) = self.initial_velocity {
                    config = config.initial_velocity(Vec2::new(x, y));
                }
                if let Some(amount) = self.translate_amount {
                    config = config.translate_amount(amount);
                }
                if let Some(coefficient) = self.scale_coefficient {
                    config = config.scale_coefficient(coefficient);
                }
                Arc::new(DefaultAnimator::new(config))
            }
        }
    }
}

/// Negative or non-finite durations become zero.
fn seconds(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO)
}

impl ConfigurationFile {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Overrides the keys present in the file on top of `base`.
    pub fn apply(&self, mut base: Configuration) -> Result<Configuration> {
        if let Some(alignment) = self.alignment {
            base.alignment = alignment;
        }
        if let Some(spacing) = self.spacing {
            base.spacing = spacing;
        }
        if let Some(insets) = self.insets {
            base.insets = insets;
        }
        if let Some(insets) = self.content_insets {
            base.content_insets = insets;
        }

        if let Some(color) = &self.background.color {
            base.background.color = Color::from_hex(color)?;
        }
        if let Some(radius) = self.background.corner_radius {
            base.background.corner_radius = radius;
        }
        if let Some(color) = &self.image.tint_color {
            base.image.tint_color = Color::from_hex(color)?;
        }

        if let Some(color) = &self.title.color {
            base.title.color = Color::from_hex(color)?;
        }
        if let Some(size) = self.title.font_size {
            base.title.font.size = size;
        }
        if let Some(weight) = self.title.font_weight {
            base.title.font.weight = weight;
        }
        if let Some(adjusts) = self.title.adjusts_for_content_size {
            base.title.font.adjusts_for_content_size = adjusts;
        }
        if let Some(lines) = self.title.number_of_lines {
            base.title.number_of_lines = lines;
        }

        if let Some(enabled) = self.plays_haptics {
            base.plays_haptics = enabled;
        }
        if let Some(enabled) = self.tap_to_dismiss {
            base.tap_to_dismiss = enabled;
        }
        if let Some(enabled) = self.avoids_obstructions {
            base.avoids_obstructions = enabled;
        }
        if let Some(animator) = &self.animator {
            base.animator = animator.build();
        }

        debug!(alignment = ?base.alignment, "configuration loaded");
        Ok(base)
    }

    pub fn into_configuration(self) -> Result<Configuration> {
        self.apply(Configuration::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlashError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.alignment, Alignment::Top);
        assert_eq!(config.spacing, 4.0);
        assert_eq!(config.insets, EdgeInsets::all(16.0));
        assert_eq!(config.content_insets, EdgeInsets::new(8.0, 12.0, 8.0, 12.0));
        assert_eq!(config.background.color, Color::SYSTEM_GRAY5);
        assert_eq!(config.background.corner_radius, 10.0);
        assert_eq!(config.image.tint_color, Color::LABEL.with_alpha(0.8));
        assert_eq!(config.title.number_of_lines, 2);
        assert!(config.plays_haptics);
        assert!(config.tap_to_dismiss);
        assert!(config.avoids_obstructions);
    }

    #[test]
    fn test_plain_configuration() {
        let config = Configuration::plain();
        assert_eq!(config.spacing, 0.0);
        assert_eq!(config.insets, EdgeInsets::ZERO);
        assert_eq!(config.content_insets, EdgeInsets::ZERO);
        assert_eq!(config.background.color, Color::CLEAR);
        assert_eq!(config.image.tint_color, Color::TINT);
        assert_eq!(config.title.number_of_lines, 0);
        assert!(!config.plays_haptics);
        assert!(!config.tap_to_dismiss);
        assert!(config.avoids_obstructions);
    }

    #[test]
    fn test_builder() {
        let config = Configuration::plain()
            .alignment(Alignment::Bottom)
            .insets((20.0, 10.0))
            .spacing(8.0)
            .number_of_lines(1)
            .tap_to_dismiss(true);
        assert_eq!(config.alignment, Alignment::Bottom);
        assert_eq!(config.insets, EdgeInsets::new(10.0, 20.0, 10.0, 20.0));
        assert_eq!(config.spacing, 8.0);
        assert_eq!(config.title.number_of_lines, 1);
        assert!(config.tap_to_dismiss);
    }

    #[test]
    fn test_shared_is_copy_on_read() {
        let original = Configuration::shared();

        let copy = Configuration::shared();
        Configuration::update_shared(|config| config.spacing = 42.0);
        assert_eq!(copy.spacing, original.spacing);
        assert_eq!(Configuration::shared().spacing, 42.0);

        // reading the shared configuration from inside an update must not block
        Configuration::update_shared(|config| config.background.corner_radius = Configuration::shared().spacing);
        assert_eq!(Configuration::shared().background.corner_radius, 42.0);

        Configuration::set_shared(original);
    }

    #[test]
    fn test_from_toml() {
        let config = Configuration::from_toml(
            r##"
            alignment = "bottom"
            spacing = 6
            insets = { top = 4, left = 8, bottom = 4, right = 8 }

            [background]
            color = "#1c1c1e"
            corner_radius = 14

            [title]
            color = "#ffffffcc"
            font_weight = "semibold"
            number_of_lines = 1

            [animator]
            duration = 0.25
            translate_amount = 24
            "##,
        )
        .unwrap();

        assert_eq!(config.alignment, Alignment::Bottom);
        assert_eq!(config.spacing, 6.0);
        assert_eq!(config.insets, EdgeInsets::new(4.0, 8.0, 4.0, 8.0));
        assert_eq!(config.background.color, Color::rgb(0x1c, 0x1c, 0x1e));
        assert_eq!(config.background.corner_radius, 14.0);
        assert_eq!(config.title.font.weight, FontWeight::Semibold);
        assert_eq!(config.title.number_of_lines, 1);
        // untouched keys keep their defaults
        assert_eq!(config.content_insets, EdgeInsets::new(8.0, 12.0, 8.0, 12.0));
        assert!(config.tap_to_dismiss);
    }

    #[test]
    fn test_from_json() {
        let config = Configuration::from_json(
            r#"{ "tap_to_dismiss": false, "animator": { "kind": "fade", "duration": 0.5 } }"#,
        )
        .unwrap();
        assert!(!config.tap_to_dismiss);
        assert_eq!(config.spacing, 4.0);
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        let err = Configuration::from_toml("[background]\ncolor = \"gray\"").unwrap_err();
        assert!(matches!(err, FlashError::InvalidColor(_)));
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let err = Configuration::from_toml("colour = \"#000000\"").unwrap_err();
        assert!(matches!(err, FlashError::Toml(_)));
    }

    #[test]
    fn test_negative_duration_becomes_zero() {
        assert_eq!(seconds(-1.0), Duration::ZERO);
        assert_eq!(seconds(f32::NAN), Duration::ZERO);
        assert_eq!(seconds(0.5), Duration::from_millis(500));
    }
}
