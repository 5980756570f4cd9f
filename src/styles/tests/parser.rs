use std::time::Duration;

use ratatui::style::Modifier;

use crate::runtime::Color;
use crate::styles::parser::{
    parse_color, parse_declarations, parse_duration, parse_modifier, strip_comments,
};

#[test]
fn strips_block_comments() {
    let input = "color: red; /* remove me */ width: 10;";
    assert_eq!(strip_comments(input), "color: red;  width: 10;");
}

#[test]
fn parses_declarations_with_quotes() {
    let props = parse_declarations("label: \"Submit\"; --prompt-scale: 0.5;");
    assert_eq!(props.get("label").unwrap(), "Submit");
    assert_eq!(props.get("--prompt-scale").unwrap(), "0.5");
}

#[test]
fn parses_hex_rgb_and_named_colors() {
    assert_eq!(parse_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
    assert_eq!(parse_color("#0f0"), Some(Color::Rgb(0, 255, 0)));
    assert_eq!(parse_color("rgb(10,20,30)"), Some(Color::Rgb(10, 20, 30)));
    assert_eq!(parse_color("darkgray"), Some(Color::DarkGray));
    assert_eq!(parse_color("chartreuse"), None);
}

#[test]
fn parses_font_modifiers() {
    assert_eq!(
        parse_modifier("bold italic"),
        Some(Modifier::BOLD | Modifier::ITALIC)
    );
    assert_eq!(parse_modifier("underline, dim"), Some(Modifier::UNDERLINED | Modifier::DIM));
    assert_eq!(parse_modifier("normal"), Some(Modifier::empty()));
    assert_eq!(parse_modifier("wavy"), None);
}

#[test]
fn parses_durations_in_ms_and_seconds() {
    assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
    assert_eq!(parse_duration("0.5s"), Some(Duration::from_millis(500)));
    assert_eq!(parse_duration("120"), Some(Duration::from_millis(120)));
    assert_eq!(parse_duration("-1s"), None);
    assert_eq!(parse_duration("soon"), None);
}
