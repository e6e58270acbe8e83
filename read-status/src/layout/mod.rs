//! Layout of the read-status indicator: measured text followed by an optional icon.
//!
//! Layout is a pure function of a [`LayoutContext`], so results are memoized in a
//! shared cache keyed by the context itself. Scrolling and redraws relayout every
//! visible indicator with unchanged inputs, and those passes are served from the
//! cache without measuring text again.
//!
//! The engine never touches view state and can be used from a background thread to
//! precompute sizes while the presentation thread reads the same cache.

mod measure;

use std::sync::Arc;

use bubble_utils_cache::BlockingLruCache;
use ratatui::layout::Rect;
use ratatui::layout::Size;
use tracing::trace;

pub use measure::CellTextMeasurer;
pub use measure::TextMeasurer;
pub(crate) use measure::wrap_text;

use crate::style::Font;
use crate::style::Insets;

/// Horizontal gap between the text and the icon.
pub const ICON_PADDING: u16 = 1;
/// Space kept after the last element.
pub const TRAILING_MARGIN: u16 = 1;
/// Frame used by icons that do not specify one.
pub const ICON_SIZE: Size = Size {
    width: 2,
    height: 1,
};
/// Entries retained by [`ReadStatusLayoutEngine::default`].
pub const DEFAULT_LAYOUT_CACHE_CAPACITY: usize = 256;

/// Everything a layout depends on. Doubles as the cache key.
///
/// Text color is deliberately absent: it does not change geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutContext {
    pub text: String,
    pub font: Font,
    pub insets: Insets,
    pub max_width: u16,
    /// Icon dimension, `None` when no icon is shown.
    pub icon: Option<Size>,
}

impl LayoutContext {
    /// Negative widths are treated as zero.
    pub fn new(
        text: impl Into<String>,
        font: Font,
        insets: Insets,
        max_width: i32,
        icon: Option<Size>,
    ) -> Self {
        Self {
            text: text.into(),
            font,
            insets,
            max_width: clamp_width(max_width),
            icon,
        }
    }
}

/// Frames of the indicator's sub-elements, relative to the indicator's origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutResult {
    pub text_frame: Rect,
    pub icon_frame: Rect,
    pub size: Size,
}

impl LayoutResult {
    fn compute(ctx: &LayoutContext, measurer: &dyn TextMeasurer) -> Self {
        let available = ctx.max_width.saturating_sub(ctx.insets.horizontal());
        let text_size = measurer.measure(&ctx.text, &ctx.font, available);
        let text_frame = Rect {
            x: ctx.insets.left,
            y: ctx.insets.top,
            width: text_size.width,
            height: text_size.height,
        };

        // Padding only separates two visible elements.
        let icon_size = ctx.icon.unwrap_or_default();
        let padding = if ctx.icon.is_some() && text_size.width > 0 {
            ICON_PADDING
        } else {
            0
        };
        let icon_frame = Rect {
            x: text_frame.right().saturating_add(padding),
            y: text_frame
                .y
                .saturating_add(text_size.height.saturating_sub(icon_size.height) / 2),
            width: icon_size.width,
            height: icon_size.height,
        };

        let content_width = text_size
            .width
            .saturating_add(padding)
            .saturating_add(icon_size.width)
            .saturating_add(TRAILING_MARGIN);
        let content_height = text_size.height.max(icon_size.height);
        let size = Size::new(
            content_width.saturating_add(ctx.insets.horizontal()),
            content_height.saturating_add(ctx.insets.vertical()),
        );

        Self {
            text_frame,
            icon_frame,
            size,
        }
    }
}

/// Computes and memoizes indicator layouts.
///
/// One engine is normally shared (behind an `Arc`) by every indicator of a
/// conversation so that identical statuses reuse each other's measurements.
pub struct ReadStatusLayoutEngine {
    cache: BlockingLruCache<LayoutContext, Arc<LayoutResult>>,
    measurer: Arc<dyn TextMeasurer>,
}

impl Default for ReadStatusLayoutEngine {
    fn default() -> Self {
        Self::new(Arc::new(CellTextMeasurer), DEFAULT_LAYOUT_CACHE_CAPACITY)
    }
}

impl ReadStatusLayoutEngine {
    /// `cache_capacity == 0` keeps every layout ever computed.
    pub fn new(measurer: Arc<dyn TextMeasurer>, cache_capacity: usize) -> Self {
        Self {
            cache: BlockingLruCache::with_capacity(cache_capacity),
            measurer,
        }
    }

    /// Layout is safe to compute off the presentation thread.
    pub fn can_calculate_size_in_background(&self) -> bool {
        true
    }

    pub fn compute_layout(
        &self,
        text: &str,
        font: &Font,
        insets: Insets,
        max_width: i32,
        icon: Option<Size>,
    ) -> Arc<LayoutResult> {
        self.layout(LayoutContext::new(
            text,
            font.clone(),
            insets,
            max_width,
            icon,
        ))
    }

    /// Returns the cached result for an equal context, computing it on a miss.
    pub fn layout(&self, ctx: LayoutContext) -> Arc<LayoutResult> {
        if let Some(hit) = self.cache.get(&ctx) {
            trace!(max_width = ctx.max_width, "read status layout cache hit");
            return hit;
        }
        trace!(max_width = ctx.max_width, "read status layout cache miss");
        let result = Arc::new(LayoutResult::compute(&ctx, self.measurer.as_ref()));
        self.cache.insert(ctx, Arc::clone(&result));
        result
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

fn clamp_width(width: i32) -> u16 {
    u16::try_from(width.max(0)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CountingMeasurer;
    use pretty_assertions::assert_eq;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hash;
    use std::hash::Hasher;

    fn counting_engine() -> (Arc<CountingMeasurer>, ReadStatusLayoutEngine) {
        let measurer = Arc::new(CountingMeasurer::default());
        let engine = ReadStatusLayoutEngine::new(measurer.clone(), 0);
        (measurer, engine)
    }

    fn hash_of(ctx: &LayoutContext) -> u64 {
        let mut hasher = DefaultHasher::new();
        ctx.hash(&mut hasher);
        hasher.finish()
    }

    fn ctx(text: &str, max_width: i32) -> LayoutContext {
        LayoutContext::new(
            text,
            Font::regular(),
            Insets::ZERO,
            max_width,
            Some(ICON_SIZE),
        )
    }

    #[test]
    fn equal_contexts_hash_equal_and_share_results() {
        let (_, engine) = counting_engine();
        let a = ctx("Seen by everyone", 300);
        let b = ctx("Seen by everyone", 300);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let from_b = engine.layout(b);
        let from_a = engine.layout(a);
        assert!(Arc::ptr_eq(&from_a, &from_b));
    }

    #[test]
    fn any_field_change_is_a_different_key() {
        let base = ctx("Seen by everyone", 300);
        let variants = [
            ctx("Seen by Alice", 300),
            ctx("Seen by everyone", 299),
            LayoutContext {
                font: Font::new("regular", 2, 1),
                ..base.clone()
            },
            LayoutContext {
                insets: Insets::uniform(1),
                ..base.clone()
            },
            LayoutContext {
                icon: None,
                ..base.clone()
            },
        ];
        for variant in variants {
            assert_ne!(variant, base);
        }
    }

    #[test]
    fn second_identical_call_is_cache_hit() {
        let (measurer, engine) = counting_engine();
        let first =
            engine.compute_layout("Seen by Alice", &Font::regular(), Insets::ZERO, 40, None);
        let second =
            engine.compute_layout("Seen by Alice", &Font::regular(), Insets::ZERO, 40, None);
        assert_eq!(first, second);
        assert_eq!(measurer.calls(), 1);
        assert_eq!(engine.cached_len(), 1);
    }

    #[test]
    fn single_line_scenario() {
        let (_, engine) = counting_engine();
        let layout = engine.layout(ctx("Seen by everyone", 300));
        let text_width = 16;
        assert_eq!(layout.text_frame, Rect::new(0, 0, text_width, 1));
        assert_eq!(
            layout.icon_frame,
            Rect::new(text_width + ICON_PADDING, 0, ICON_SIZE.width, ICON_SIZE.height)
        );
        assert_eq!(
            layout.size,
            Size::new(
                text_width + ICON_PADDING + ICON_SIZE.width + TRAILING_MARGIN,
                1
            )
        );
    }

    #[test]
    fn insets_offset_frames_and_grow_size() {
        let (_, engine) = counting_engine();
        let insets = Insets::new(1, 2, 3, 4);
        let layout = engine.compute_layout(
            "Seen by everyone",
            &Font::regular(),
            insets,
            300,
            Some(ICON_SIZE),
        );
        assert_eq!(layout.text_frame, Rect::new(2, 1, 16, 1));
        assert_eq!(layout.icon_frame.x, 2 + 16 + ICON_PADDING);
        assert_eq!(layout.icon_frame.y, 1);
        assert_eq!(
            layout.size,
            Size::new(2 + 16 + ICON_PADDING + ICON_SIZE.width + TRAILING_MARGIN + 4, 1 + 1 + 3)
        );
    }

    #[test]
    fn empty_text_without_icon_is_margin_only() {
        let (_, engine) = counting_engine();
        let layout = engine.compute_layout("", &Font::regular(), Insets::ZERO, 300, None);
        assert_eq!(layout.text_frame.area(), 0);
        assert_eq!(layout.icon_frame.area(), 0);
        assert_eq!(layout.size, Size::new(TRAILING_MARGIN, 0));
    }

    #[test]
    fn empty_text_still_places_icon() {
        let (_, engine) = counting_engine();
        let layout =
            engine.compute_layout("", &Font::regular(), Insets::ZERO, 300, Some(ICON_SIZE));
        assert_eq!(layout.icon_frame, Rect::new(0, 0, 2, 1));
        assert_eq!(
            layout.size,
            Size::new(ICON_SIZE.width + TRAILING_MARGIN, ICON_SIZE.height)
        );
    }

    #[test]
    fn missing_icon_omits_padding() {
        let (_, engine) = counting_engine();
        let layout = engine.compute_layout("Seen", &Font::regular(), Insets::ZERO, 300, None);
        assert_eq!(layout.icon_frame.width, 0);
        assert_eq!(layout.icon_frame.x, 4);
        assert_eq!(layout.size, Size::new(4 + TRAILING_MARGIN, 1));
    }

    #[test]
    fn icon_is_centered_on_tall_text() {
        let (_, engine) = counting_engine();
        let layout = engine.compute_layout(
            "aaa bbb ccc",
            &Font::regular(),
            Insets::ZERO,
            3,
            Some(ICON_SIZE),
        );
        assert_eq!(layout.text_frame.height, 3);
        assert_eq!(layout.icon_frame.y, 1);
    }

    #[test]
    fn width_below_insets_wraps_maximally() {
        let (_, engine) = counting_engine();
        let layout = engine.compute_layout("abc", &Font::regular(), Insets::uniform(4), 5, None);
        assert_eq!(layout.text_frame.width, 0);
        assert_eq!(layout.text_frame.height, 3);
    }

    #[test]
    fn negative_width_is_zero() {
        let (measurer, engine) = counting_engine();
        let negative = engine.compute_layout("ab", &Font::regular(), Insets::ZERO, -20, None);
        let zero = engine.compute_layout("ab", &Font::regular(), Insets::ZERO, 0, None);
        assert!(Arc::ptr_eq(&negative, &zero));
        assert_eq!(measurer.calls(), 1);
        assert_eq!(negative.text_frame.height, 2);
    }

    #[test]
    fn narrowing_never_lowers_height_or_exceeds_constraint() {
        let (_, engine) = counting_engine();
        let text = "Seen by Alice, Bob, Carol and a recipient with a long name";
        let insets = Insets::new(0, 1, 0, 2);
        let mut previous_height = 0;
        for max_width in (0..=80).rev() {
            let layout = engine.compute_layout(text, &Font::regular(), insets, max_width, None);
            let available = u16::try_from(max_width).unwrap_or(0).saturating_sub(3);
            assert!(layout.text_frame.width <= available, "width {max_width}");
            assert!(
                layout.text_frame.height >= previous_height,
                "height decreased at width {max_width}"
            );
            previous_height = layout.text_frame.height;
        }
    }

    #[test]
    fn bounded_cache_recomputes_evicted_contexts() {
        let measurer = Arc::new(CountingMeasurer::default());
        let engine = ReadStatusLayoutEngine::new(measurer.clone(), 1);
        engine.layout(ctx("a", 10));
        engine.layout(ctx("b", 10));
        engine.layout(ctx("a", 10));
        assert_eq!(measurer.calls(), 3);
        assert_eq!(engine.cached_len(), 1);

        engine.clear_cache();
        assert_eq!(engine.cached_len(), 0);
    }
}
