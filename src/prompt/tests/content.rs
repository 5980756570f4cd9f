use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::prompt::{AccessibleField, AccessibleRole, PromptContent, PromptState};

#[test]
fn floating_content_defaults_to_normal() {
    let content = PromptContent::new(vec![Line::from("Email")]);
    assert!(!content.has_custom_floating());
    assert_eq!(content.floating(), content.normal());
    assert_eq!(content.floating_rows(), 1);
}

#[test]
fn text_prompt_uses_secondary_then_accent() {
    let content = PromptContent::text("Name");
    assert_eq!(content.normal_color(), Some(PromptContent::SECONDARY));
    assert_eq!(content.floating_color(), Some(PromptContent::ACCENT));
    assert_eq!(content.normal_text(), "Name");
    assert_eq!(content.floating_text(), "Name");
}

#[test]
fn custom_floating_content_is_measured() {
    let content = PromptContent::new(vec![Line::from("Address")]).with_floating(vec![
        Line::from(Span::styled("Street", Style::default().fg(Color::Yellow))),
        Line::from("and number"),
    ]);
    assert_eq!(content.floating_rows(), 2);
    assert_eq!(content.floating_text(), "Street\nand number");
    assert_eq!(content.floating_color(), Some(Color::Yellow));
}

#[test]
fn accessible_label_tracks_state() {
    let content = PromptContent::new(vec![Line::from("Search")])
        .with_floating(vec![Line::from("Searching for")]);

    let normal = AccessibleField::describe("q", &content, PromptState::Normal, "", false, false);
    assert_eq!(normal.role, AccessibleRole::TextField);
    assert_eq!(normal.label, "Search");
    assert_eq!(normal.announcement(), "Search, text field");

    let floating =
        AccessibleField::describe("q", &content, PromptState::Floating, "rust", true, false);
    assert_eq!(floating.label, "Searching for");
    assert_eq!(floating.announcement(), "Searching for, text field, rust, editing");
}

#[test]
fn accessible_value_is_masked_when_secure() {
    let content = PromptContent::text("Token");
    let node = AccessibleField::describe("t", &content, PromptState::Floating, "abc", false, true);
    assert_eq!(node.value, "•••");
}
