//! Text measurement
//!
//! The layout engine only needs to know how large a piece of text becomes once
//! it is word-wrapped to a width and limited to a number of lines. Hosts plug
//! their own text system in through [`TextMeasurer`]; [`MonospaceMeasurer`] is
//! a deterministic fallback that needs no fonts, and `CosmicTextMeasurer`
//! (feature `cosmic`) shapes real fonts.

use textwrap::Options;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::geometry::Size;
use crate::style::Font;

/// Appended to the last visible line when text is cut off
pub const ELLIPSIS: char = '…';

/// Result of measuring a string
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayout {
    /// Size of the wrapped text block
    pub size: Size,
    /// Visible lines, after wrapping and truncation
    pub lines: Vec<String>,
    pub line_height: f32,
    /// Whether lines were dropped to honor the line limit
    pub truncated: bool,
}

/// Measures word-wrapped text.
pub trait TextMeasurer {
    /// Wraps `text` to `max_width` and keeps at most `max_lines` lines
    /// (0 means unlimited). When lines are dropped, the last visible line ends
    /// with [`ELLIPSIS`].
    fn measure(&self, text: &str, font: &Font, max_width: f32, max_lines: usize) -> TextLayout;
}

/// Fixed-advance measurer: every column is `font.size * advance_ratio` wide.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    pub advance_ratio: f32,
}

impl MonospaceMeasurer {
    pub fn new(advance_ratio: f32) -> Self {
        Self { advance_ratio }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &Font, max_width: f32, max_lines: usize) -> TextLayout {
        let line_height = font.line_height();
        if text.is_empty() {
            return TextLayout { line_height, ..TextLayout::default() };
        }

        let advance = (font.size * self.advance_ratio).max(f32::EPSILON);
        let columns = ((max_width / advance).floor() as usize).max(1);

        let mut lines: Vec<String> = textwrap::wrap(text, Options::new(columns))
            .into_iter()
            .map(|line| line.into_owned())
            .collect();

        let truncated = max_lines > 0 && lines.len() > max_lines;
        if truncated {
            lines.truncate(max_lines);
            if let Some(last) = lines.last_mut() {
                *last = truncate_tail(last, columns);
            }
        }

        let widest = lines.iter().map(|line| line.width()).max().unwrap_or(0);
        TextLayout {
            size: Size::new(widest as f32 * advance, lines.len() as f32 * line_height),
            lines,
            line_height,
            truncated,
        }
    }
}

/// Cuts `line` so that it plus a trailing ellipsis fits in `columns`.
pub(crate) fn truncate_tail(line: &str, columns: usize) -> String {
    let budget = columns.saturating_sub(1);
    let mut kept = String::with_capacity(line.len());
    let mut used = 0;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(ch);
    }

    let mut out = kept.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn font() -> Font {
        // 6pt advance, 12pt lines
        Font::new(10.0)
    }

    #[test]
    fn test_wraps_on_word_boundaries() {
        let layout = MonospaceMeasurer::default().measure("hello world", &font(), 60.0, 0);
        assert_eq!(layout.lines, vec!["hello".to_string(), "world".to_string()]);
        assert_eq!(layout.size, Size::new(30.0, 24.0));
        assert!(!layout.truncated);
    }

    #[test]
    fn test_single_line_when_wide_enough() {
        let layout = MonospaceMeasurer::default().measure("hello world", &font(), 600.0, 2);
        assert_eq!(layout.lines.len(), 1);
        assert_eq!(layout.size, Size::new(66.0, 12.0));
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        let layout = MonospaceMeasurer::default().measure("hello world again", &font(), 60.0, 1);
        assert_eq!(layout.lines, vec!["hello…".to_string()]);
        assert_eq!(layout.size, Size::new(36.0, 12.0));
        assert!(layout.truncated);
    }

    #[test]
    fn test_ellipsis_replaces_tail_of_full_line() {
        let layout = MonospaceMeasurer::default().measure("abcdefghij klmno", &font(), 60.0, 1);
        assert_eq!(layout.lines, vec!["abcdefghi…".to_string()]);
        assert_eq!(layout.size.width, 60.0);
    }

    #[test]
    fn test_empty_text_has_no_size() {
        let layout = MonospaceMeasurer::default().measure("", &font(), 60.0, 2);
        assert_eq!(layout.size, Size::ZERO);
        assert!(layout.lines.is_empty());
    }
}
