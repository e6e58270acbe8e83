//! Read-status indicator for chat message bubbles.
//!
//! The indicator shows who has seen a message as a short label plus an optional
//! icon. [`ReadStatusView`] coordinates a [`ReadStatusViewModel`], a shared
//! [`ReadStatusStyle`] and a shared [`ReadStatusLayoutEngine`], which measures
//! and caches layouts so repeated passes with unchanged inputs are free.

pub mod cli;
pub mod config;
pub mod delegate;
pub mod layout;
pub mod read_status_view;
pub mod render;
pub mod style;
pub mod transition;
pub mod value;
pub mod view_model;

#[cfg(test)]
mod test_support;

use std::io::Write;
use std::sync::Arc;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tokio::sync::oneshot;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub use cli::Cli;

pub use config::ConfigError;
pub use config::ReadStatusConfig;
pub use delegate::DefaultReadStatusFormatter;
pub use delegate::Icon;
pub use delegate::ReadStatusDelegate;
pub use delegate::ReadStatusModel;
pub use layout::LayoutContext;
pub use layout::LayoutResult;
pub use layout::ReadStatusLayoutEngine;
pub use read_status_view::ReadStatusView;
pub use read_status_view::UpdateState;
pub use read_status_view::ViewContext;
pub use render::Renderable;
pub use style::Font;
pub use style::Insets;
pub use style::ReadStatusStyle;
pub use value::ReadStatusValue;
pub use view_model::ReadStatusViewModel;

/// Renders the indicator described by `cli` and prints it to stdout.
pub async fn run_main(cli: Cli) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("error"))
        .unwrap_or_else(|_| EnvFilter::new("error"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();

    let config = match &cli.config {
        Some(path) => ReadStatusConfig::load(path)?,
        None => ReadStatusConfig::default(),
    };
    let engine = config.layout_engine();
    let delegate: Arc<dyn ReadStatusDelegate> = Arc::new(DefaultReadStatusFormatter);
    let mut view = ReadStatusView::from_config(&config, engine);

    let value = cli.read_status_value();
    let (done_tx, done_rx) = oneshot::channel();
    view.perform_batch_updates(
        |view| {
            view.set_view_model(ReadStatusViewModel::new(value, &delegate));
            view.set_preferred_max_width(cli.width);
        },
        cli.animated,
        Some(Box::new(move || {
            let _ = done_tx.send(());
        })),
    );
    done_rx.await?;
    debug!(passes = view.layout_pass_count(), "read status ready");

    let mut stdout = std::io::stdout().lock();
    for line in render_lines(&view, cli.width) {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

/// Draws `view` into an off-screen buffer sized by [`ReadStatusView::size_that_fits`]
/// and returns its rows with trailing blanks removed.
pub fn render_lines(view: &ReadStatusView, width: i32) -> Vec<String> {
    let size = view.size_that_fits(width);
    let area = Rect {
        x: 0,
        y: 0,
        width: size.width,
        height: size.height,
    };
    let mut buf = Buffer::empty(area);
    view.render(area, &mut buf);
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}
