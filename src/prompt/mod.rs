//! The floating prompt: its two-state model, geometry, animation and
//! accessibility representation.

mod accessibility;
mod animation;
mod config;
mod content;
mod geometry;
mod state;
#[cfg(test)]
mod tests;

pub use accessibility::{AccessibleField, AccessibleRole};
pub use animation::{Easing, PromptAnimation, PromptTracker, Transition, crossfade_color};
pub use config::{PromptConfig, PromptOverrides};
pub use content::PromptContent;
pub use geometry::{PromptGeometry, PromptLayout};
pub use state::PromptState;
