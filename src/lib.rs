//! A floating-prompt text field for terminal UIs.
//!
//! The prompt sits inline while the field is empty and unfocused, and floats
//! above it, scaled down, once the field gains focus or text. Fields are
//! declared as [`Element`]s inside components and bound to host state through
//! [`FieldHandle`].

pub mod environment;
pub mod events;
pub mod field;
pub mod hooks;
mod interactions;
pub mod prompt;
pub mod renderer;
pub mod runtime;
pub mod styles;

pub use environment::Environment;
pub use events::{FieldInput, FrameworkEvent};
pub use field::{FieldHandle, FieldSnapshot, FieldState, Fields};
pub use hooks::{Scope, StateHandle};
pub use interactions::{ButtonRegistry, Hitbox};
pub use prompt::{
    AccessibleField, AccessibleRole, Easing, PromptAnimation, PromptConfig, PromptContent,
    PromptOverrides, PromptState,
};
pub use runtime::{
    App, AppConfig, ButtonNode, ComponentElement, Dispatcher, Element, FlexDirection,
    PromptFieldNode, View, component,
};
pub use styles::{ComputedStyle, StyleQuery, Stylesheet};
