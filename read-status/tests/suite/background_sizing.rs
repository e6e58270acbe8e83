#![allow(clippy::expect_used)]
use std::sync::Arc;
use std::thread;

use bubble_read_status::DefaultReadStatusFormatter;
use bubble_read_status::ReadStatusDelegate;
use bubble_read_status::ReadStatusLayoutEngine;
use bubble_read_status::ReadStatusValue;
use bubble_read_status::ReadStatusView;
use bubble_read_status::ReadStatusViewModel;
use pretty_assertions::assert_eq;
use ratatui::layout::Size;

fn values() -> Vec<ReadStatusValue> {
    vec![
        ReadStatusValue::None,
        ReadStatusValue::some(["Alice"]),
        ReadStatusValue::some(["Alice", "Bob", "Carol"]),
        ReadStatusValue::All,
    ]
}

fn sizes(engine: &Arc<ReadStatusLayoutEngine>, width: i32) -> Vec<Size> {
    let delegate: Arc<dyn ReadStatusDelegate> = Arc::new(DefaultReadStatusFormatter);
    values()
        .into_iter()
        .map(|value| {
            let mut view = ReadStatusView::new(Arc::clone(engine));
            view.set_view_model(ReadStatusViewModel::new(value, &delegate));
            view.size_that_fits(width)
        })
        .collect()
}

#[test]
fn background_threads_agree_with_foreground() {
    let engine = Arc::new(ReadStatusLayoutEngine::default());
    assert!(engine.can_calculate_size_in_background());

    let workers: Vec<_> = [8, 20, 300]
        .into_iter()
        .map(|width| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || (width, sizes(&engine, width)))
        })
        .collect();
    let background: Vec<(i32, Vec<Size>)> = workers
        .into_iter()
        .map(|worker| worker.join().expect("worker panicked"))
        .collect();

    let fresh = Arc::new(ReadStatusLayoutEngine::default());
    for (width, sizes_in_background) in background {
        assert_eq!(sizes_in_background, sizes(&fresh, width), "width {width}");
    }
}

#[test]
fn shared_cache_is_reused_across_threads() {
    let engine = Arc::new(ReadStatusLayoutEngine::default());
    let warm = Arc::clone(&engine);
    thread::spawn(move || sizes(&warm, 40))
        .join()
        .expect("worker panicked");
    let cached = engine.cached_len();
    assert!(cached > 0);

    sizes(&engine, 40);
    assert_eq!(engine.cached_len(), cached);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sizes_from_blocking_tasks_match() {
    let engine = Arc::new(ReadStatusLayoutEngine::default());
    let task_engine = Arc::clone(&engine);
    let from_task = tokio::task::spawn_blocking(move || sizes(&task_engine, 20))
        .await
        .expect("blocking task");
    assert_eq!(from_task, sizes(&engine, 20));
}
