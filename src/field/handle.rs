use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::prompt::PromptState;
use crate::runtime::Dispatcher;

use super::state::{FieldSnapshot, FieldState};

/// The host's side of a field binding. Clones share the same text and focus.
#[derive(Clone)]
pub struct FieldHandle {
    id: Arc<String>,
    state: Arc<Mutex<FieldState>>,
    dispatcher: Dispatcher,
}

impl FieldHandle {
    pub(crate) fn new(id: String, initial: String, dispatcher: Dispatcher) -> Self {
        let state = Arc::new(Mutex::new(FieldState::new(initial)));
        dispatcher.fields().register_binding(&id, state.clone());
        Self {
            id: Arc::new(id),
            state,
            dispatcher,
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn value(&self) -> String {
        self.state.lock().value().to_string()
    }

    /// Programmatic edits re-derive the prompt state exactly like keystrokes.
    pub fn set_value(&self, next: impl Into<String>) {
        let changed = self.state.lock().set_value(next.into(), Instant::now());
        if changed {
            self.dispatcher.request_render();
        }
    }

    pub fn cursor(&self) -> usize {
        self.state.lock().cursor()
    }

    pub fn set_cursor(&self, cursor: usize) {
        self.state.lock().set_cursor(cursor);
        self.dispatcher.request_render();
    }

    pub fn is_focused(&self) -> bool {
        self.dispatcher.fields().is_focused(self.id())
    }

    pub fn focus(&self) {
        self.dispatcher
            .fields()
            .focus(Some(self.id()), &self.dispatcher);
    }

    /// Drops focus if this field holds it.
    pub fn blur(&self) {
        if self.is_focused() {
            self.dispatcher.fields().focus(None, &self.dispatcher);
        }
    }

    pub fn prompt_state(&self) -> PromptState {
        self.state.lock().prompt_state()
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        self.snapshot_at(Instant::now())
    }

    pub fn snapshot_at(&self, now: Instant) -> FieldSnapshot {
        let guard = self.state.lock();
        FieldSnapshot {
            id: self.id.clone(),
            value: guard.value().to_string(),
            cursor: guard.cursor(),
            focused: guard.is_focused(),
            prompt: guard.prompt_state(),
            progress: guard.prompt_progress(now),
        }
    }

    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut FieldState) -> R) -> R {
        let mut guard = self.state.lock();
        f(&mut guard)
    }

    pub(crate) fn release(&self) {
        self.dispatcher
            .fields()
            .unregister_binding(self.id(), &self.state);
    }
}

impl fmt::Debug for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldHandle").field("id", &self.id).finish()
    }
}
