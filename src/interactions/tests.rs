use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::events::FrameworkEvent;

use super::{ButtonRegistry, Hitbox};

fn left_click(column: u16, row: u16) -> FrameworkEvent {
    FrameworkEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn click_inside_hitbox_targets_button() {
    let buttons = ButtonRegistry::new();
    buttons.record(
        "focus",
        Hitbox {
            x: 10,
            y: 5,
            width: 4,
            height: 2,
        },
    );

    assert!(buttons.is_click(&left_click(11, 6), "focus"));
    assert!(!buttons.is_click(&left_click(14, 6), "focus"));
    assert!(!buttons.is_click(&left_click(11, 6), "unfocus"));
}

#[test]
fn reset_forgets_previous_frame() {
    let buttons = ButtonRegistry::new();
    buttons.record(
        "unfocus",
        Hitbox {
            x: 0,
            y: 0,
            width: 2,
            height: 1,
        },
    );
    assert!(buttons.is_click(&left_click(1, 0), "unfocus"));

    buttons.reset();
    assert!(!buttons.is_click(&left_click(1, 0), "unfocus"));
}

#[test]
fn clones_share_hitboxes() {
    let buttons = ButtonRegistry::new();
    let view = buttons.clone();
    buttons.record(
        "shared",
        Hitbox {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        },
    );
    assert!(view.contains("shared", 0, 0));
}
