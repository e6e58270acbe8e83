mod renderable;
mod widgets;

pub use renderable::Renderable;
pub use widgets::IconElement;
pub use widgets::IconWidget;
pub use widgets::LabelWidget;
pub use widgets::TextElement;
