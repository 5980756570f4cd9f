use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::events::FrameworkEvent;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hitbox {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Hitbox {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// Where each button was drawn in the last frame.
#[derive(Clone, Default)]
pub struct ButtonRegistry {
    hitboxes: Arc<RwLock<HashMap<String, Hitbox>>>,
}

impl ButtonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&self) {
        self.hitboxes.write().clear();
    }

    pub fn record(&self, id: &str, hitbox: Hitbox) {
        self.hitboxes.write().insert(id.to_string(), hitbox);
    }

    pub fn contains(&self, id: &str, column: u16, row: u16) -> bool {
        self.hitboxes
            .read()
            .get(id)
            .map(|hitbox| hitbox.contains(column, row))
            .unwrap_or(false)
    }

    pub fn is_click(&self, event: &FrameworkEvent, button_id: &str) -> bool {
        event
            .primary_click()
            .map(|(column, row)| self.contains(button_id, column, row))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests;
