//! Colors, fonts and dynamic type

use serde::Deserialize;

use crate::error::FlashError;

/// RGBA color with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const CLEAR: Self = Self::rgba(0, 0, 0, 0.0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Primary text color (light appearance)
    pub const LABEL: Self = Self::rgb(0, 0, 0);
    /// Fill used behind flashes (light appearance)
    pub const SYSTEM_GRAY5: Self = Self::rgb(229, 229, 234);
    pub const TINT: Self = Self::rgb(0, 122, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Multiplies the alpha channel, used to fold a view's opacity into its colors.
    pub fn fade(self, opacity: f32) -> Self {
        Self { a: self.a * opacity.clamp(0.0, 1.0), ..self }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, FlashError> {
        let invalid = || FlashError::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() || !(digits.len() == 6 || digits.len() == 8) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let r = channel(0)?;
        let g = channel(2)?;
        let b = channel(4)?;
        let a = if digits.len() == 8 { channel(6)? } else { 255 };

        Ok(Self::rgba(r, g, b, a as f32 / 255.0))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::CLEAR
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
    Black,
}

impl FontWeight {
    /// CSS-style numeric weight
    pub fn value(self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
            FontWeight::Black => 900,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
    Monospace,
    Named(String),
}

/// Semantic text styles with their sizes at the default content size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    LargeTitle,
    Title1,
    Title2,
    Title3,
    Headline,
    Body,
    Callout,
    Subheadline,
    Footnote,
    Caption1,
    Caption2,
}

impl TextStyle {
    fn metrics(self) -> (f32, FontWeight) {
        match self {
            TextStyle::LargeTitle => (34.0, FontWeight::Regular),
            TextStyle::Title1 => (28.0, FontWeight::Regular),
            TextStyle::Title2 => (22.0, FontWeight::Regular),
            TextStyle::Title3 => (20.0, FontWeight::Regular),
            TextStyle::Headline => (17.0, FontWeight::Semibold),
            TextStyle::Body => (17.0, FontWeight::Regular),
            TextStyle::Callout => (16.0, FontWeight::Regular),
            TextStyle::Subheadline => (15.0, FontWeight::Regular),
            TextStyle::Footnote => (13.0, FontWeight::Regular),
            TextStyle::Caption1 => (12.0, FontWeight::Regular),
            TextStyle::Caption2 => (11.0, FontWeight::Regular),
        }
    }
}

/// User-selected text size, scaling fonts that opt into dynamic type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentSizeCategory {
    ExtraSmall,
    Small,
    Medium,
    #[default]
    Large,
    ExtraLarge,
    ExtraExtraLarge,
    ExtraExtraExtraLarge,
    AccessibilityMedium,
    AccessibilityLarge,
    AccessibilityExtraLarge,
    AccessibilityExtraExtraLarge,
    AccessibilityExtraExtraExtraLarge,
}

impl ContentSizeCategory {
    /// Multiplier relative to `Large`
    pub fn scale(self) -> f32 {
        match self {
            ContentSizeCategory::ExtraSmall => 0.82,
            ContentSizeCategory::Small => 0.88,
            ContentSizeCategory::Medium => 0.94,
            ContentSizeCategory::Large => 1.0,
            ContentSizeCategory::ExtraLarge => 1.12,
            ContentSizeCategory::ExtraExtraLarge => 1.24,
            ContentSizeCategory::ExtraExtraExtraLarge => 1.35,
            ContentSizeCategory::AccessibilityMedium => 1.65,
            ContentSizeCategory::AccessibilityLarge => 2.0,
            ContentSizeCategory::AccessibilityExtraLarge => 2.35,
            ContentSizeCategory::AccessibilityExtraExtraLarge => 2.76,
            ContentSizeCategory::AccessibilityExtraExtraExtraLarge => 3.12,
        }
    }
}

/// Font description handed to the text measurer
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    pub size: f32,
    pub weight: FontWeight,
    /// Scale with the host's content size category
    pub adjusts_for_content_size: bool,
}

impl Font {
    pub fn new(size: f32) -> Self {
        Self {
            family: FontFamily::SansSerif,
            size,
            weight: FontWeight::Regular,
            adjusts_for_content_size: false,
        }
    }

    /// The system font for a text style; adjusts for the content size category.
    pub fn preferred(style: TextStyle) -> Self {
        let (size, weight) = style.metrics();
        Self {
            family: FontFamily::SansSerif,
            size,
            weight,
            adjusts_for_content_size: true,
        }
    }

    pub fn family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Line advance for this font
    pub fn line_height(&self) -> f32 {
        self.size * 1.2
    }

    /// Returns the font as it should be measured under `category`.
    pub fn scaled_for(&self, category: ContentSizeCategory) -> Self {
        if !self.adjusts_for_content_size {
            return self.clone();
        }
        Self { size: self.size * category.scale(), ..self.clone() }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::preferred(TextStyle::Body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Color::from_hex("#e5e5ea").unwrap(), Color::SYSTEM_GRAY5);
        assert_eq!(Color::from_hex("000000").unwrap(), Color::BLACK);

        let translucent = Color::from_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_reject_malformed_hex_color() {
        assert!(matches!(Color::from_hex("#12345"), Err(FlashError::InvalidColor(_))));
        assert!(matches!(Color::from_hex("#zzzzzz"), Err(FlashError::InvalidColor(_))));
        assert!(matches!(Color::from_hex("#ééé"), Err(FlashError::InvalidColor(_))));
    }

    #[test]
    fn test_preferred_font_scales_with_category() {
        let body = Font::preferred(TextStyle::Body);
        assert_eq!(body.scaled_for(ContentSizeCategory::Large).size, 17.0);
        assert_eq!(body.scaled_for(ContentSizeCategory::AccessibilityLarge).size, 34.0);

        let fixed = Font::new(17.0);
        assert_eq!(fixed.scaled_for(ContentSizeCategory::AccessibilityLarge).size, 17.0);
    }

    #[test]
    fn test_fade_folds_opacity_into_alpha() {
        let c = Color::rgb(10, 20, 30).with_alpha(0.8).fade(0.5);
        assert!((c.a - 0.4).abs() < 1e-6);
    }
}
