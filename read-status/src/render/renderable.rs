use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Something that can be drawn into a buffer region and report how tall it wants
/// to be for a given width.
pub trait Renderable {
    fn render(&self, area: Rect, buf: &mut Buffer);

    fn desired_height(&self, width: u16) -> u16;
}

/// Translates `frame` (relative to `area`'s origin) into buffer coordinates and
/// clips it to `area`.
pub(crate) fn frame_in(area: Rect, frame: Rect) -> Rect {
    let translated = Rect {
        x: area.x.saturating_add(frame.x),
        y: area.y.saturating_add(frame.y),
        width: frame.width,
        height: frame.height,
    };
    translated.intersection(area)
}
