//! The read-status indicator view and its update coordinator.
//!
//! The view owns a label and an icon sub-element and keeps them in sync with a
//! [`ReadStatusViewModel`] and a shared [`ReadStatusStyle`]. Every mutation that
//! affects what is shown funnels through [`ReadStatusView::update_views`], which
//! re-resolves text and icon, touches only the style fields that changed, and runs
//! a single layout pass through the shared [`ReadStatusLayoutEngine`].
//!
//! [`ReadStatusView::perform_batch_updates`] suspends that pipeline while the
//! caller mutates the view, then runs it once for the net result:
//!
//! ```text
//! Idle --perform_batch_updates--> Updating --mutation returns--> Idle --> one layout pass
//! ```

use std::sync::Arc;
use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::layout::Size;
use tracing::debug;

use crate::config::DEFAULT_ANIMATION_DURATION;
use crate::config::ReadStatusConfig;
use crate::delegate::ReadStatusDelegate;
use crate::layout::LayoutResult;
use crate::layout::ReadStatusLayoutEngine;
use crate::render::IconElement;
use crate::render::IconWidget;
use crate::render::LabelWidget;
use crate::render::Renderable;
use crate::render::TextElement;
use crate::style::ReadStatusStyle;
use crate::transition::Completion;
use crate::transition::TokioTransitions;
use crate::transition::TransitionScheduler;
use crate::value::ReadStatusValue;
use crate::view_model::ReadStatusViewModel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewContext {
    #[default]
    Normal,
    /// The view only answers size queries and is never drawn.
    Sizing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Idle,
    /// A batch mutation is running; layout requests are deferred.
    Updating,
}

pub struct ReadStatusView<L = LabelWidget, I = IconWidget> {
    view_model: ReadStatusViewModel,
    style: Arc<ReadStatusStyle>,
    engine: Arc<ReadStatusLayoutEngine>,
    transitions: Arc<dyn TransitionScheduler>,
    label: L,
    icon: I,
    preferred_max_width: i32,
    animation_duration: Duration,
    view_context: ViewContext,
    state: UpdateState,
    /// Completions of batches nested in the running one.
    pending_completions: Vec<Completion>,
    layout_passes: u64,
}

impl ReadStatusView {
    /// View with the stock label and icon widgets.
    ///
    /// Animated batches complete on the tokio runtime current at the time of the
    /// batch, or on a timer thread when there is none.
    pub fn new(engine: Arc<ReadStatusLayoutEngine>) -> Self {
        Self::with_elements(engine, LabelWidget::default(), IconWidget::default())
    }

    pub fn from_config(config: &ReadStatusConfig, engine: Arc<ReadStatusLayoutEngine>) -> Self {
        let mut view = Self::new(engine);
        view.animation_duration = config.animation_duration;
        view.set_style(Arc::clone(&config.style));
        view
    }
}

impl<L, I> ReadStatusView<L, I>
where
    L: TextElement,
    I: IconElement,
{
    pub fn with_elements(engine: Arc<ReadStatusLayoutEngine>, label: L, icon: I) -> Self {
        Self {
            view_model: ReadStatusViewModel::default(),
            style: Arc::new(ReadStatusStyle::default()),
            engine,
            transitions: Arc::new(TokioTransitions),
            label,
            icon,
            preferred_max_width: 0,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            view_context: ViewContext::Normal,
            state: UpdateState::Idle,
            pending_completions: Vec::new(),
            layout_passes: 0,
        }
    }

    pub fn with_transitions(mut self, transitions: Arc<dyn TransitionScheduler>) -> Self {
        self.transitions = transitions;
        self
    }

    pub fn view_model(&self) -> &ReadStatusViewModel {
        &self.view_model
    }

    pub fn set_view_model(&mut self, view_model: ReadStatusViewModel) {
        self.view_model = view_model;
        self.update_views();
    }

    pub fn set_value(&mut self, value: ReadStatusValue) {
        self.view_model.set_value(value);
        self.update_views();
    }

    pub fn set_delegate(&mut self, delegate: &Arc<dyn ReadStatusDelegate>) {
        self.view_model.set_delegate(delegate);
        self.update_views();
    }

    pub fn style(&self) -> &Arc<ReadStatusStyle> {
        &self.style
    }

    pub fn set_style(&mut self, style: Arc<ReadStatusStyle>) {
        self.style = style;
        self.update_views();
    }

    pub fn preferred_max_width(&self) -> i32 {
        self.preferred_max_width
    }

    pub fn set_preferred_max_width(&mut self, width: i32) {
        self.preferred_max_width = width;
        self.request_layout();
    }

    pub fn view_context(&self) -> ViewContext {
        self.view_context
    }

    pub fn set_view_context(&mut self, view_context: ViewContext) {
        self.view_context = view_context;
    }

    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animation_duration = duration;
    }

    pub fn update_state(&self) -> UpdateState {
        self.state
    }

    pub fn is_updating(&self) -> bool {
        self.state == UpdateState::Updating
    }

    /// Layout passes run so far.
    pub fn layout_pass_count(&self) -> u64 {
        self.layout_passes
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn icon(&self) -> &I {
        &self.icon
    }

    pub fn can_calculate_size_in_background(&self) -> bool {
        self.engine.can_calculate_size_in_background()
    }

    /// Size the indicator needs when limited to `width`. Does not touch the
    /// sub-elements.
    pub fn size_that_fits(&self, width: i32) -> Size {
        let formatted = self.view_model.formatted();
        self.engine
            .compute_layout(
                &formatted.text,
                &self.style.font,
                self.style.insets,
                width,
                formatted.icon.as_ref().map(|icon| icon.size),
            )
            .size
    }

    /// Runs `mutation` with layout suspended, then applies its net effect with a
    /// single layout pass.
    ///
    /// With `animated`, `completion` fires once the transition has finished, which
    /// is generally after this returns. Otherwise it fires before this returns.
    ///
    /// A batch started from inside `mutation` joins the running batch: its mutation
    /// runs immediately and its completion fires after the outer one.
    pub fn perform_batch_updates<F>(
        &mut self,
        mutation: F,
        animated: bool,
        completion: Option<Completion>,
    ) where
        F: FnOnce(&mut Self),
    {
        if self.is_updating() {
            debug!("nested read status batch joins the running batch");
            mutation(self);
            self.pending_completions.extend(completion);
            return;
        }

        self.state = UpdateState::Updating;
        mutation(self);
        self.state = UpdateState::Idle;
        self.update_views();

        let mut completions: Vec<Completion> = completion.into_iter().collect();
        completions.append(&mut self.pending_completions);
        debug!(
            animated,
            completions = completions.len(),
            "read status batch applied"
        );
        if completions.is_empty() {
            return;
        }
        let done: Completion = Box::new(move || {
            for completion in completions {
                completion();
            }
        });
        if animated {
            self.transitions.schedule(self.animation_duration, done);
        } else {
            done();
        }
    }

    /// Pushes the view-model and style into the sub-elements and lays them out.
    ///
    /// No-op while sizing or while a batch is running.
    pub fn update_views(&mut self) {
        if self.view_context == ViewContext::Sizing || self.is_updating() {
            return;
        }

        let formatted = self.view_model.formatted();
        self.apply_style();
        self.label.set_text(formatted.text);
        self.icon.set_icon(formatted.icon);
        self.layout_subviews();
    }

    fn apply_style(&mut self) {
        if *self.label.font() != self.style.font {
            self.label.set_font(self.style.font.clone());
        }
        if self.label.text_color() != self.style.text_color {
            self.label.set_text_color(self.style.text_color);
        }
    }

    fn request_layout(&mut self) {
        if self.is_updating() {
            return;
        }
        self.layout_subviews();
    }

    fn layout_subviews(&mut self) {
        let layout = self.current_layout(self.preferred_max_width);
        self.label.set_frame(layout.text_frame);
        self.icon.set_frame(layout.icon_frame);
        self.layout_passes += 1;
        debug!(
            width = self.preferred_max_width,
            height = layout.size.height,
            "read status layout pass"
        );
    }

    fn current_layout(&self, width: i32) -> Arc<LayoutResult> {
        self.engine.compute_layout(
            self.label.text(),
            &self.style.font,
            self.style.insets,
            width,
            self.icon.icon().map(|icon| icon.size),
        )
    }
}

impl<L, I> Renderable for ReadStatusView<L, I>
where
    L: TextElement + Renderable,
    I: IconElement + Renderable,
{
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        self.label.render(area, buf);
        self.icon.render(area, buf);
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.size_that_fits(i32::from(width)).height
    }
}
