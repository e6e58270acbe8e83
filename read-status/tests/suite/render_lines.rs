#![allow(clippy::expect_used)]
use std::sync::Arc;

use bubble_read_status::DefaultReadStatusFormatter;
use bubble_read_status::Insets;
use bubble_read_status::ReadStatusConfig;
use bubble_read_status::ReadStatusDelegate;
use bubble_read_status::ReadStatusValue;
use bubble_read_status::ReadStatusView;
use bubble_read_status::ReadStatusViewModel;
use bubble_read_status::render_lines;
use pretty_assertions::assert_eq;

/// The view only holds a weak reference to its delegate, so the caller keeps it.
fn view_for(
    config: &ReadStatusConfig,
    delegate: &Arc<dyn ReadStatusDelegate>,
    value: ReadStatusValue,
    width: i32,
) -> ReadStatusView {
    let mut view = ReadStatusView::from_config(config, config.layout_engine());
    view.perform_batch_updates(
        |view| {
            view.set_view_model(ReadStatusViewModel::new(value, delegate));
            view.set_preferred_max_width(width);
        },
        false,
        None,
    );
    view
}

fn formatter() -> Arc<dyn ReadStatusDelegate> {
    Arc::new(DefaultReadStatusFormatter)
}

#[test]
fn everyone_fits_on_one_line() {
    let config = ReadStatusConfig::default();
    let delegate = formatter();
    let view = view_for(&config, &delegate, ReadStatusValue::All, 40);
    assert_eq!(render_lines(&view, 40), vec!["Seen by everyone ✓✓".to_string()]);
}

#[test]
fn unseen_message_renders_nothing() {
    let config = ReadStatusConfig::default();
    let delegate = formatter();
    let view = view_for(&config, &delegate, ReadStatusValue::None, 40);
    assert_eq!(render_lines(&view, 40), Vec::<String>::new());
}

#[test]
fn narrow_width_wraps_names() {
    let config = ReadStatusConfig::default();
    let delegate = formatter();
    let view = view_for(&config, &delegate, ReadStatusValue::some(["Alice", "Bob"]), 10);
    assert_eq!(
        render_lines(&view, 10),
        vec![
            "Seen by    ✓".to_string(),
            "Alice, Bob".to_string(),
        ]
    );
}

#[test]
fn configured_insets_offset_the_text() {
    let config: ReadStatusConfig = "[insets]\nleft = 2".parse().expect("config");
    assert_eq!(config.style.insets, Insets::new(0, 2, 0, 0));
    let delegate = formatter();
    let view = view_for(&config, &delegate, ReadStatusValue::All, 40);
    assert_eq!(render_lines(&view, 40), vec!["  Seen by everyone ✓✓".to_string()]);
}
