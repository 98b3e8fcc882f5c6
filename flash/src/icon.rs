//! Flash icons

use std::sync::Arc;

use image::RgbaImage;

use crate::error::Result;
use crate::geometry::Size;

/// The icon shown next to a flash's text.
///
/// Only the intrinsic size takes part in layout. Template images are drawn as
/// a mask filled with the configuration's image tint.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashImage {
    size: Size,
    pixels: Option<Arc<RgbaImage>>,
    template: bool,
}

impl FlashImage {
    /// An icon the host draws itself, known only by its size
    pub fn with_size(size: Size) -> Self {
        Self { size, pixels: None, template: true }
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        let size = Size::new(pixels.width() as f32, pixels.height() as f32);
        Self { size, pixels: Some(Arc::new(pixels)), template: false }
    }

    /// Decodes PNG data.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    pub fn template(mut self, template: bool) -> Self {
        self.template = template;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixels(&self) -> Option<&RgbaImage> {
        self.pixels.as_deref()
    }

    pub fn is_template(&self) -> bool {
        self.template
    }
}
