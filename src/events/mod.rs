//! Terminal input as the app sees it, and what each event asks of the
//! focused field.

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use tokio::sync::broadcast;

/// Drives prompt transitions and the cursor blink between input events.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(50);

#[derive(Clone, Debug)]
pub enum FrameworkEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    Resize(u16, u16),
    Tick,
}

/// An edit to the focused field's text or cursor, or a move of focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldInput<'a> {
    Insert(char),
    Paste(&'a str),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    NextField,
    PreviousField,
    Blur,
}

impl FieldInput<'_> {
    /// Focus moves apply even when no field is focused; edits need a target.
    pub fn moves_focus(&self) -> bool {
        matches!(self, Self::NextField | Self::PreviousField | Self::Blur)
    }
}

impl FrameworkEvent {
    /// Ctrl-C ends the app whatever holds focus.
    pub fn is_shutdown(&self) -> bool {
        match self {
            Self::Key(key) => {
                matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                    && key.modifiers.contains(KeyModifiers::CONTROL)
            }
            _ => false,
        }
    }

    /// Cell under a left-button press.
    pub fn primary_click(&self) -> Option<(u16, u16)> {
        match self {
            Self::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                Some((mouse.column, mouse.row))
            }
            _ => None,
        }
    }

    /// Tab, Shift-Tab and Esc move focus. Other chords with Ctrl or Alt
    /// belong to the host, never to the text.
    pub fn field_input(&self) -> Option<FieldInput<'_>> {
        let key = match self {
            Self::Paste(text) => return Some(FieldInput::Paste(text)),
            Self::Key(key) => key,
            _ => return None,
        };
        match key.code {
            KeyCode::Tab => return Some(FieldInput::NextField),
            KeyCode::BackTab => return Some(FieldInput::PreviousField),
            KeyCode::Esc => return Some(FieldInput::Blur),
            _ => {}
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        let input = match key.code {
            KeyCode::Char(ch) => FieldInput::Insert(ch),
            KeyCode::Backspace => FieldInput::Backspace,
            KeyCode::Delete => FieldInput::Delete,
            KeyCode::Left => FieldInput::Left,
            KeyCode::Right => FieldInput::Right,
            KeyCode::Home => FieldInput::Home,
            KeyCode::End => FieldInput::End,
            _ => return None,
        };
        Some(input)
    }
}

/// Fan-out of every input event to host components, after fields have seen it.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<FrameworkEvent>,
}

impl EventBus {
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer);
        Self { tx }
    }

    pub fn publish(&self, event: FrameworkEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FrameworkEvent> {
        self.tx.subscribe()
    }
}

pub fn map_terminal_event(event: CrosstermEvent) -> Option<FrameworkEvent> {
    match event {
        // Windows reports releases as well; fields only react to presses.
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Release => None,
        CrosstermEvent::Key(key) => Some(FrameworkEvent::Key(key)),
        CrosstermEvent::Mouse(mouse) => Some(FrameworkEvent::Mouse(mouse)),
        CrosstermEvent::Paste(text) => Some(FrameworkEvent::Paste(text)),
        CrosstermEvent::Resize(cols, rows) => Some(FrameworkEvent::Resize(cols, rows)),
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
    }
}
