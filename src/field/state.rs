use std::sync::Arc;
use std::time::Instant;

use crate::prompt::{PromptAnimation, PromptState, PromptTracker};

/// Text, cursor and focus of one field, plus the prompt state derived from
/// them. Every mutation re-derives the prompt state.
#[derive(Clone, Debug)]
pub struct FieldState {
    value: String,
    cursor: usize,
    focused: bool,
    prompt: PromptTracker,
    animation: PromptAnimation,
}

impl FieldState {
    pub fn new(initial: String) -> Self {
        let cursor = initial.len();
        let prompt = PromptTracker::new(&initial, false);
        Self {
            value: initial,
            cursor,
            focused: false,
            prompt,
            animation: PromptAnimation::default(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn prompt_state(&self) -> PromptState {
        self.prompt.state()
    }

    pub fn prompt_progress(&self, now: Instant) -> f64 {
        self.prompt.progress_at(now)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.prompt.is_animating(now)
    }

    /// Whether the prompt still needs a frame: either mid-transition or
    /// finished but not yet drawn at rest.
    pub fn needs_frame(&self) -> bool {
        self.prompt.has_transition()
    }

    pub fn animation(&self) -> PromptAnimation {
        self.animation
    }

    pub(crate) fn set_animation(&mut self, animation: PromptAnimation) {
        self.animation = animation;
    }

    /// Returns whether the value changed.
    pub fn set_value(&mut self, next: String, now: Instant) -> bool {
        if self.value == next {
            return false;
        }
        self.value = next;
        self.cursor = clamp_to_boundary(&self.value, self.cursor);
        self.refresh(now);
        true
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = clamp_to_boundary(&self.value, cursor);
    }

    /// Returns whether the focus flag changed.
    pub fn set_focused(&mut self, focused: bool, now: Instant) -> bool {
        if self.focused == focused {
            return false;
        }
        self.focused = focused;
        self.refresh(now);
        true
    }

    pub fn insert_str(&mut self, text: &str, now: Instant) {
        if text.is_empty() {
            return;
        }
        self.value.insert_str(self.cursor, text);
        self.cursor += text.len();
        self.refresh(now);
    }

    pub fn insert_char(&mut self, ch: char, now: Instant) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.refresh(now);
    }

    pub fn backspace(&mut self, now: Instant) -> bool {
        match previous_boundary(&self.value, self.cursor) {
            Some(start) => {
                self.value.replace_range(start..self.cursor, "");
                self.cursor = start;
                self.refresh(now);
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, now: Instant) -> bool {
        match next_boundary(&self.value, self.cursor) {
            Some(end) => {
                self.value.replace_range(self.cursor..end, "");
                self.refresh(now);
                true
            }
            None => false,
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = previous_boundary(&self.value, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_boundary(&self.value, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Re-derives the prompt state; a no-op when nothing relevant changed.
    pub fn refresh(&mut self, now: Instant) -> Option<(PromptState, PromptState)> {
        let change = self
            .prompt
            .sync(&self.value, self.focused, now, self.animation);
        if change.is_none() {
            self.prompt.settle(now);
        }
        change
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSnapshot {
    pub id: Arc<String>,
    pub value: String,
    pub cursor: usize,
    pub focused: bool,
    pub prompt: PromptState,
    pub progress: f64,
}

fn clamp_to_boundary(value: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(value.len());
    while !value.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

fn previous_boundary(value: &str, cursor: usize) -> Option<usize> {
    value[..cursor].char_indices().next_back().map(|(index, _)| index)
}

fn next_boundary(value: &str, cursor: usize) -> Option<usize> {
    value[cursor..]
        .chars()
        .next()
        .map(|ch| cursor + ch.len_utf8())
}
