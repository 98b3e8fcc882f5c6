//! Visual properties applied from a configuration

use crate::config::Configuration;
use crate::style::Color;

/// The drawing properties a flash takes from its configuration. Applied
/// whenever the configuration is assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub background: Color,
    pub corner_radius: f32,
    pub title_color: Color,
    pub image_tint: Color,
}

impl From<&Configuration> for Appearance {
    fn from(config: &Configuration) -> Self {
        Self {
            background: config.background.color,
            corner_radius: config.background.corner_radius,
            title_color: config.title.color,
            image_tint: config.image.tint_color,
        }
    }
}
