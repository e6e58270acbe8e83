use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use ratatui::layout::Size;

use crate::layout::CellTextMeasurer;
use crate::layout::TextMeasurer;
use crate::style::Font;

/// Cell measurer that counts how often text is measured.
#[derive(Default)]
pub(crate) struct CountingMeasurer {
    calls: AtomicUsize,
}

impl CountingMeasurer {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextMeasurer for CountingMeasurer {
    fn measure(&self, text: &str, font: &Font, max_width: u16) -> Size {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CellTextMeasurer.measure(text, font, max_width)
    }
}
