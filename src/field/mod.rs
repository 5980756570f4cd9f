//! Two-way text and focus bindings for prompt fields.

mod handle;
mod registry;
mod state;
#[cfg(test)]
mod tests;

pub use handle::FieldHandle;
pub use registry::{CURSOR_BLINK_INTERVAL, Fields};
pub use state::{FieldSnapshot, FieldState};
