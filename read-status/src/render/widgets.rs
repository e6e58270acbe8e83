//! Sub-elements of the indicator.
//!
//! The view only talks to its label and icon through [`TextElement`] and
//! [`IconElement`], so hosts can substitute their own widgets. The stock
//! implementations draw into a ratatui [`Buffer`].

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;

use crate::delegate::Icon;
use crate::layout::wrap_text;
use crate::render::renderable::Renderable;
use crate::render::renderable::frame_in;
use crate::style::Font;

pub trait TextElement {
    fn text(&self) -> &str;
    fn font(&self) -> &Font;
    fn set_font(&mut self, font: Font);
    fn text_color(&self) -> Color;
    fn set_text_color(&mut self, color: Color);
    fn set_text(&mut self, text: String);
    fn set_frame(&mut self, frame: Rect);
}

pub trait IconElement {
    fn icon(&self) -> Option<&Icon>;
    fn set_icon(&mut self, icon: Option<Icon>);
    fn set_frame(&mut self, frame: Rect);
}

/// Status text, word-wrapped inside its frame.
#[derive(Debug, Clone, Default)]
pub struct LabelWidget {
    text: String,
    font: Font,
    color: Color,
    frame: Rect,
    /// Font or color writes; each one would invalidate a real text renderer.
    style_writes: u64,
}

impl LabelWidget {
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn style_writes(&self) -> u64 {
        self.style_writes
    }
}

impl TextElement for LabelWidget {
    fn text(&self) -> &str {
        &self.text
    }

    fn font(&self) -> &Font {
        &self.font
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
        self.style_writes += 1;
    }

    fn text_color(&self) -> Color {
        self.color
    }

    fn set_text_color(&mut self, color: Color) {
        self.color = color;
        self.style_writes += 1;
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}

impl Renderable for LabelWidget {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let target = frame_in(area, self.frame);
        if target.is_empty() {
            return;
        }
        let style = Style::default().fg(self.color);
        let line_height = self.font.line_height.max(1);
        for (index, line) in wrap_text(&self.text, &self.font, self.frame.width)
            .iter()
            .enumerate()
        {
            let offset = u16::try_from(index)
                .unwrap_or(u16::MAX)
                .saturating_mul(line_height);
            let y = target.y.saturating_add(offset);
            if y >= target.bottom() {
                break;
            }
            buf.set_stringn(target.x, y, line, usize::from(target.width), style);
        }
    }

    fn desired_height(&self, _width: u16) -> u16 {
        self.frame.height
    }
}

/// Read-receipt icon drawn as a glyph.
#[derive(Debug, Clone, Default)]
pub struct IconWidget {
    icon: Option<Icon>,
    frame: Rect,
}

impl IconWidget {
    pub fn frame(&self) -> Rect {
        self.frame
    }
}

impl IconElement for IconWidget {
    fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    fn set_icon(&mut self, icon: Option<Icon>) {
        self.icon = icon;
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}

impl Renderable for IconWidget {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let Some(icon) = &self.icon else {
            return;
        };
        let target = frame_in(area, self.frame);
        if target.is_empty() {
            return;
        }
        buf.set_stringn(
            target.x,
            target.y,
            &icon.glyph,
            usize::from(target.width),
            Style::default(),
        );
    }

    fn desired_height(&self, _width: u16) -> u16 {
        self.frame.height
    }
}
