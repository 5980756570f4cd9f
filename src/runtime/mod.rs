mod app;
mod component;
mod dispatcher;
mod element;
mod tasks;
mod view;

#[cfg(test)]
mod tests;

pub use app::{App, AppConfig};
pub use component::{ComponentElement, ComponentFn, ComponentId, component};
pub use dispatcher::{AppMessage, Dispatcher};
pub use element::{
    BlockNode, ButtonNode, Element, EnvironmentNode, FlexDirection, FlexNode, PromptFieldNode,
    TextNode,
};
pub use ratatui::style::Color;
pub use tasks::{DefaultRuntimeDriver, RuntimeDriver};
pub use view::{BlockView, ButtonView, FlexView, PromptFieldView, TextView, View};
