use ratatui::style::Color;

/// Gray used for status text unless configured otherwise.
pub const DEFAULT_TEXT_COLOR: Color = Color::Rgb(0x7a, 0x7a, 0x7a);

/// Font metrics used to measure status text, in cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    pub family: String,
    /// Cells taken by one display column of text.
    pub glyph_width: u16,
    /// Cells taken by one line of text.
    pub line_height: u16,
}

impl Font {
    pub fn new(family: impl Into<String>, glyph_width: u16, line_height: u16) -> Self {
        Self {
            family: family.into(),
            glyph_width,
            line_height,
        }
    }

    /// One cell per column and per line.
    pub fn regular() -> Self {
        Self::new("regular", 1, 1)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::regular()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub top: u16,
    pub left: u16,
    pub bottom: u16,
    pub right: u16,
}

impl Insets {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(top: u16, left: u16, bottom: u16, right: u16) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub const fn uniform(inset: u16) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

/// Visual configuration shared by every indicator of a conversation.
///
/// Font and insets feed text measurement; the color only affects drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadStatusStyle {
    pub font: Font,
    pub text_color: Color,
    pub insets: Insets,
}

impl Default for ReadStatusStyle {
    fn default() -> Self {
        Self {
            font: Font::regular(),
            text_color: DEFAULT_TEXT_COLOR,
            insets: Insets::ZERO,
        }
    }
}

impl ReadStatusStyle {
    pub fn with_text_color(&self, text_color: Color) -> Self {
        Self {
            text_color,
            ..self.clone()
        }
    }

    pub fn with_font(&self, font: Font) -> Self {
        Self {
            font,
            ..self.clone()
        }
    }

    pub fn with_insets(&self, insets: Insets) -> Self {
        Self {
            insets,
            ..self.clone()
        }
    }
}
