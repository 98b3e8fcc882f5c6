//! Text measurement using cosmic-text

use std::cell::RefCell;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};

use crate::geometry::Size;
use crate::style::{Font, FontFamily};
use crate::text::{TextLayout, TextMeasurer, ELLIPSIS};

/// Measures text by shaping it with the system's fonts
pub struct CosmicTextMeasurer {
    font_system: RefCell<FontSystem>,
}

impl CosmicTextMeasurer {
    /// Loads the system font database. This is slow; create one per process.
    pub fn new() -> Self {
        Self::with_font_system(FontSystem::new())
    }

    pub fn with_font_system(font_system: FontSystem) -> Self {
        Self { font_system: RefCell::new(font_system) }
    }

    fn attrs(font: &Font) -> Attrs<'_> {
        let family = match &font.family {
            FontFamily::SansSerif => Family::SansSerif,
            FontFamily::Serif => Family::Serif,
            FontFamily::Monospace => Family::Monospace,
            FontFamily::Named(name) => Family::Name(name),
        };
        Attrs::new().family(family).weight(Weight(font.weight.value()))
    }

    /// Width of `text` laid out on a single unbounded line
    fn line_width(font_system: &mut FontSystem, text: &str, font: &Font) -> f32 {
        let metrics = Metrics::new(font.size, font.line_height());
        let mut buffer = Buffer::new(font_system, metrics);
        buffer.set_size(font_system, None, None);
        buffer.set_text(font_system, text, Self::attrs(font), Shaping::Advanced);
        buffer.shape_until_scroll(font_system, false);
        buffer.layout_runs().map(|run| run.line_w).fold(0.0, f32::max)
    }
}

impl Default for CosmicTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for CosmicTextMeasurer {
    fn measure(&self, text: &str, font: &Font, max_width: f32, max_lines: usize) -> TextLayout {
        let line_height = font.line_height();
        if text.is_empty() {
            return TextLayout { line_height, ..TextLayout::default() };
        }

        let mut font_system = self.font_system.borrow_mut();
        let fs = &mut *font_system;

        let metrics = Metrics::new(font.size, line_height);
        let mut buffer = Buffer::new(fs, metrics);
        buffer.set_size(fs, Some(max_width.max(0.0)), None);
        buffer.set_text(fs, text, Self::attrs(font), Shaping::Advanced);
        buffer.shape_until_scroll(fs, false);

        // (visible text, width) per wrapped line
        let mut lines: Vec<(String, f32)> = buffer
            .layout_runs()
            .map(|run| {
                let start = run.glyphs.iter().map(|g| g.start).min();
                let end = run.glyphs.iter().map(|g| g.end).max();
                let visible = match (start, end) {
                    (Some(start), Some(end)) => run.text[start..end].to_string(),
                    _ => String::new(),
                };
                (visible, run.line_w)
            })
            .collect();

        let truncated = max_lines > 0 && lines.len() > max_lines;
        if truncated {
            lines.truncate(max_lines);
            if let Some((last, width)) = lines.last_mut() {
                let mut kept = last.trim_end().to_string();
                loop {
                    let candidate = format!("{kept}{ELLIPSIS}");
                    let candidate_width = Self::line_width(fs, &candidate, font);
                    if candidate_width <= max_width || kept.is_empty() {
                        *last = candidate;
                        *width = candidate_width.min(max_width);
                        break;
                    }
                    kept.pop();
                    kept.truncate(kept.trim_end().len());
                }
            }
        }

        let widest = lines.iter().map(|(_, w)| *w).fold(0.0, f32::max);
        TextLayout {
            size: Size::new(widest.ceil(), lines.len() as f32 * line_height),
            lines: lines.into_iter().map(|(text, _)| text).collect(),
            line_height,
            truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_limit_truncates_with_ellipsis() {
        let measurer = CosmicTextMeasurer::new();
        let font = Font::new(17.0);
        let text = "the quick brown fox jumps over the lazy dog";
        let layout = measurer.measure(text, &font, 100.0, 2);

        assert!(layout.truncated);
        assert!(layout.lines.len() <= 2);
        assert!(layout.lines.last().is_some_and(|line| line.ends_with(ELLIPSIS)));
        assert!(layout.size.width <= 100.0);
        assert_eq!(layout.size.height, layout.lines.len() as f32 * font.line_height());
    }

    #[test]
    fn test_unlimited_lines_wrap_without_truncation() {
        let measurer = CosmicTextMeasurer::new();
        let font = Font::new(17.0);
        let text = "the quick brown fox jumps over the lazy dog";
        let layout = measurer.measure(text, &font, 100.0, 0);

        assert!(!layout.truncated);
        assert!(layout.lines.len() > 2);
        assert!(layout.lines.iter().all(|line| !line.ends_with(ELLIPSIS)));
    }

    #[test]
    fn test_empty_text() {
        let layout = CosmicTextMeasurer::new().measure("", &Font::new(17.0), 100.0, 2);
        assert!(layout.lines.is_empty());
        assert_eq!(layout.size, Size::ZERO);
    }
}
