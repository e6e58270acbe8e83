//! Text measurement in terminal cells.
//!
//! Wrapping is greedy (first fit) with word breaking enabled, so a line never
//! exceeds the available columns unless a single grapheme is wider than the
//! whole line. Greedy wrapping keeps the line count monotonic in the width,
//! which the layout engine relies on.

use std::borrow::Cow;

use ratatui::layout::Size;
use textwrap::Options;
use textwrap::WrapAlgorithm;
use unicode_width::UnicodeWidthStr;

use crate::style::Font;

/// Measures wrapped text. Implementations must be callable from any thread.
pub trait TextMeasurer: Send + Sync {
    /// Minimal bounding box of `text` rendered in `font` and wrapped so that no
    /// line is wider than `max_width` cells.
    fn measure(&self, text: &str, font: &Font, max_width: u16) -> Size;
}

/// Default measurer: every display column is `font.glyph_width` cells wide and
/// every line `font.line_height` cells tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellTextMeasurer;

impl TextMeasurer for CellTextMeasurer {
    fn measure(&self, text: &str, font: &Font, max_width: u16) -> Size {
        if text.is_empty() {
            return Size::new(0, 0);
        }
        let lines = wrap_text(text, font, max_width);
        let widest = lines
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_ref()))
            .max()
            .unwrap_or(0);
        let width = u16::try_from(widest)
            .unwrap_or(u16::MAX)
            .saturating_mul(font.glyph_width.max(1))
            .min(max_width);
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(font.line_height);
        Size::new(width, height)
    }
}

/// Splits `text` into the lines it occupies when `max_width` cells are available.
///
/// A width smaller than one glyph still yields one grapheme per line.
pub(crate) fn wrap_text<'a>(text: &'a str, font: &Font, max_width: u16) -> Vec<Cow<'a, str>> {
    let columns = usize::from(max_width / font.glyph_width.max(1)).max(1);
    let opts = Options::new(columns)
        .break_words(true)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    textwrap::wrap(text, opts)
}
