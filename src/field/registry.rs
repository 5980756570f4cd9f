use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::events::{FieldInput, FrameworkEvent};
use crate::interactions::Hitbox;
use crate::runtime::Dispatcher;

use super::state::FieldState;

pub const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Every mounted field, the one holding focus, and where each was drawn.
/// At most one field is focused at a time.
#[derive(Clone, Default)]
pub struct Fields {
    inner: Arc<FieldsInner>,
}

#[derive(Default)]
struct FieldsInner {
    bindings: RwLock<Vec<Binding>>,
    focus: RwLock<Option<Focus>>,
    hitboxes: RwLock<HashMap<String, Hitbox>>,
    cursor_phase: Mutex<bool>,
}

struct Binding {
    id: String,
    state: Arc<Mutex<FieldState>>,
}

#[derive(Clone)]
struct Focus {
    id: String,
    since: Instant,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `id` to `state`. A component remounted under a new identity
    /// registers before the old one is released, so an existing entry is
    /// taken over rather than duplicated. Focus held by the id carries over
    /// to the new state.
    pub(crate) fn register_binding(&self, id: &str, state: Arc<Mutex<FieldState>>) {
        if self.is_focused(id) {
            state.lock().set_focused(true, Instant::now());
        }
        let mut bindings = self.inner.bindings.write();
        match bindings.iter_mut().find(|binding| binding.id == id) {
            Some(existing) => existing.state = state,
            None => bindings.push(Binding {
                id: id.to_string(),
                state,
            }),
        }
        trace!(field = id, "field registered");
    }

    /// Drops the binding for `id` if it still points at `state`. A stale
    /// release from a component whose id was taken over is ignored.
    pub(crate) fn unregister_binding(&self, id: &str, state: &Arc<Mutex<FieldState>>) -> bool {
        let removed = {
            let mut bindings = self.inner.bindings.write();
            let before = bindings.len();
            bindings.retain(|binding| binding.id != id || !Arc::ptr_eq(&binding.state, state));
            bindings.len() != before
        };
        if !removed {
            trace!(field = id, "stale release ignored");
            return false;
        }
        self.inner.hitboxes.write().remove(id);
        let mut focus = self.inner.focus.write();
        if focus.as_ref().map(|f| f.id == id).unwrap_or(false) {
            *focus = None;
        }
        trace!(field = id, "field released");
        true
    }

    /// Ids in registration order, which is also the tab order.
    pub fn ids(&self) -> Vec<String> {
        self.inner
            .bindings
            .read()
            .iter()
            .map(|binding| binding.id.clone())
            .collect()
    }

    pub fn focused(&self) -> Option<String> {
        self.inner.focus.read().as_ref().map(|focus| focus.id.clone())
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.inner
            .focus
            .read()
            .as_ref()
            .map(|focus| focus.id == id)
            .unwrap_or(false)
    }

    /// Moves focus to `id`, or clears it with `None`. Focusing the field that
    /// already holds focus changes nothing. Returns whether focus moved.
    pub fn focus(&self, id: Option<&str>, dispatcher: &Dispatcher) -> bool {
        let now = Instant::now();
        let mut focus = self.inner.focus.write();
        let current = focus.as_ref().map(|f| f.id.clone());
        if current.as_deref() == id {
            return false;
        }
        let target = match id {
            Some(id) => match self.state_of(id) {
                Some(state) => Some((id.to_string(), state)),
                None => {
                    trace!(field = id, "ignoring focus request for unknown field");
                    return false;
                }
            },
            None => None,
        };
        if let Some(previous) = current.as_deref().and_then(|id| self.state_of(id)) {
            previous.lock().set_focused(false, now);
        }
        *focus = match target {
            Some((id, state)) => {
                state.lock().set_focused(true, now);
                Some(Focus { id, since: now })
            }
            None => None,
        };
        debug!(
            from = current.as_deref().unwrap_or("-"),
            to = id.unwrap_or("-"),
            "focus moved"
        );
        drop(focus);
        dispatcher.request_render();
        true
    }

    pub fn blur(&self, dispatcher: &Dispatcher) -> bool {
        self.focus(None, dispatcher)
    }

    pub(crate) fn register_hitbox(&self, id: &str, hitbox: Hitbox) {
        self.inner.hitboxes.write().insert(id.to_string(), hitbox);
    }

    pub(crate) fn reset_hitboxes(&self) {
        self.inner.hitboxes.write().clear();
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<String> {
        self.inner
            .hitboxes
            .read()
            .iter()
            .find(|(_, hitbox)| hitbox.contains(column, row))
            .map(|(id, _)| id.clone())
    }

    pub fn cursor_visible(&self, id: &str, now: Instant) -> bool {
        match self.inner.focus.read().as_ref() {
            Some(focus) if focus.id == id => blink_phase(focus.since, now),
            _ => false,
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.inner
            .bindings
            .read()
            .iter()
            .any(|binding| binding.state.lock().is_animating(now))
    }

    /// True while any prompt has a transition that has not been drawn at
    /// rest yet. Stays true after the transition finishes until the next
    /// resolve settles it.
    pub fn needs_frame(&self) -> bool {
        self.inner
            .bindings
            .read()
            .iter()
            .any(|binding| binding.state.lock().needs_frame())
    }

    /// Routes input to fields. Returns true when a field consumed the event.
    pub fn handle_event(&self, event: &FrameworkEvent, dispatcher: &Dispatcher) -> bool {
        match event {
            FrameworkEvent::Tick => {
                self.on_tick(Instant::now(), dispatcher);
                false
            }
            FrameworkEvent::Mouse(_) => match event.primary_click() {
                Some((column, row)) => self.focus_at(column, row, dispatcher),
                None => false,
            },
            FrameworkEvent::Key(_) | FrameworkEvent::Paste(_) => match event.field_input() {
                Some(input) => self.apply_input(input, dispatcher),
                None => false,
            },
            FrameworkEvent::Resize(..) => false,
        }
    }

    /// Clicking a field focuses it; clicking anywhere else blurs.
    fn focus_at(&self, column: u16, row: u16, dispatcher: &Dispatcher) -> bool {
        match self.hit_test(column, row) {
            Some(id) => {
                self.focus(Some(&id), dispatcher);
                true
            }
            None => {
                self.focus(None, dispatcher);
                false
            }
        }
    }

    fn apply_input(&self, input: FieldInput<'_>, dispatcher: &Dispatcher) -> bool {
        if input.moves_focus() {
            return match input {
                FieldInput::NextField => self.cycle_focus(true, dispatcher),
                FieldInput::PreviousField => self.cycle_focus(false, dispatcher),
                _ => self.focus(None, dispatcher),
            };
        }
        let handled = self.edit_focused(|state, now| match input {
            FieldInput::Insert(ch) => state.insert_char(ch, now),
            FieldInput::Paste(text) => state.insert_str(text, now),
            FieldInput::Backspace => {
                state.backspace(now);
            }
            FieldInput::Delete => {
                state.delete(now);
            }
            FieldInput::Left => state.move_left(),
            FieldInput::Right => state.move_right(),
            FieldInput::Home => state.move_home(),
            FieldInput::End => state.move_end(),
            FieldInput::NextField | FieldInput::PreviousField | FieldInput::Blur => {}
        });
        if handled {
            self.restart_blink();
            dispatcher.request_render();
        }
        handled
    }

    fn cycle_focus(&self, forward: bool, dispatcher: &Dispatcher) -> bool {
        let ids = self.ids();
        if ids.is_empty() {
            return false;
        }
        let current = self
            .focused()
            .and_then(|id| ids.iter().position(|candidate| *candidate == id));
        let next = match (current, forward) {
            (Some(index), true) => (index + 1) % ids.len(),
            (Some(index), false) => (index + ids.len() - 1) % ids.len(),
            (None, true) => 0,
            (None, false) => ids.len() - 1,
        };
        self.focus(Some(&ids[next]), dispatcher);
        true
    }

    fn edit_focused<F>(&self, edit: F) -> bool
    where
        F: FnOnce(&mut FieldState, Instant),
    {
        let Some(id) = self.focused() else {
            return false;
        };
        match self.state_of(&id) {
            Some(state) => {
                edit(&mut state.lock(), Instant::now());
                true
            }
            None => false,
        }
    }

    fn on_tick(&self, now: Instant, dispatcher: &Dispatcher) {
        let phase = {
            let focus = self.inner.focus.read();
            focus.as_ref().map(|focus| blink_phase(focus.since, now))
        };
        let blink_changed = match phase {
            Some(phase) => {
                let mut last = self.inner.cursor_phase.lock();
                let changed = *last != phase;
                *last = phase;
                changed
            }
            None => false,
        };
        if blink_changed || self.needs_frame() {
            dispatcher.request_render();
        }
    }

    fn restart_blink(&self) {
        if let Some(focus) = self.inner.focus.write().as_mut() {
            focus.since = Instant::now();
        }
    }

    fn state_of(&self, id: &str) -> Option<Arc<Mutex<FieldState>>> {
        self.inner
            .bindings
            .read()
            .iter()
            .find(|binding| binding.id == id)
            .map(|binding| binding.state.clone())
    }
}

fn blink_phase(since: Instant, now: Instant) -> bool {
    let elapsed = now.saturating_duration_since(since).as_millis();
    (elapsed / CURSOR_BLINK_INTERVAL.as_millis()) % 2 == 0
}
