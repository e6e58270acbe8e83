//! Formatting capability that turns a [`ReadStatusValue`] into display text and an
//! icon.
//!
//! The delegate belongs to whoever presents the indicator (usually the
//! conversation layer). View-models only hold a weak handle to it, see
//! [`crate::view_model::ReadStatusViewModel`].

use ratatui::layout::Size;
use unicode_width::UnicodeWidthStr;

use crate::layout::ICON_SIZE;
use crate::value::ReadStatusValue;

const SEEN_BY_EVERYONE: &str = "Seen by everyone";
const SEEN_BY_PREFIX: &str = "Seen by ";
const SINGLE_CHECK: &str = "✓";
const DOUBLE_CHECK: &str = "✓✓";

/// Icon resource drawn next to the status text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon {
    /// Cell text drawn inside the icon frame.
    pub glyph: String,
    /// Fixed dimension of the icon frame.
    pub size: Size,
}

impl Icon {
    /// Icon with the standard [`ICON_SIZE`] frame.
    pub fn new(glyph: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            size: ICON_SIZE,
        }
    }

    /// Icon whose frame is exactly as wide as its glyph.
    pub fn fitted(glyph: impl Into<String>) -> Self {
        let glyph = glyph.into();
        let width = u16::try_from(UnicodeWidthStr::width(glyph.as_str())).unwrap_or(u16::MAX);
        Self {
            glyph,
            size: Size::new(width, 1),
        }
    }
}

/// Maps a read-status value to what the indicator shows.
///
/// Implementations must be stable: the same value yields the same text and icon
/// for a given delegate instance. Both methods are called once per layout pass.
pub trait ReadStatusDelegate: Send + Sync {
    fn text(&self, value: &ReadStatusValue) -> String;

    /// `None` hides the icon and collapses its frame.
    fn icon(&self, value: &ReadStatusValue) -> Option<Icon>;
}

/// Stock English formatter.
#[derive(Debug, Clone, Default)]
pub struct DefaultReadStatusFormatter;

impl ReadStatusDelegate for DefaultReadStatusFormatter {
    fn text(&self, value: &ReadStatusValue) -> String {
        match value {
            ReadStatusValue::None => String::new(),
            ReadStatusValue::Some(people) if people.is_empty() => String::new(),
            ReadStatusValue::Some(people) => format!("{SEEN_BY_PREFIX}{}", people.join(", ")),
            ReadStatusValue::All => SEEN_BY_EVERYONE.to_string(),
        }
    }

    fn icon(&self, value: &ReadStatusValue) -> Option<Icon> {
        match value {
            ReadStatusValue::None => None,
            ReadStatusValue::Some(people) if people.is_empty() => None,
            ReadStatusValue::Some(_) => Some(Icon::new(SINGLE_CHECK)),
            ReadStatusValue::All => Some(Icon::new(DOUBLE_CHECK)),
        }
    }
}

/// Pre-formatted read status, typically built by the message data layer.
///
/// The model acts as its own delegate: it returns the stored label and icon for
/// any value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadStatusModel {
    pub label: String,
    pub icon: Option<Icon>,
    pub value: ReadStatusValue,
}

impl ReadStatusDelegate for ReadStatusModel {
    fn text(&self, _value: &ReadStatusValue) -> String {
        self.label.clone()
    }

    fn icon(&self, _value: &ReadStatusValue) -> Option<Icon> {
        self.icon.clone()
    }
}
