use crate::prompt::PromptState;
use crate::runtime::Color;
use crate::styles::{StyleQuery, Stylesheet};

#[test]
fn parses_stylesheet_and_applies_root_properties() {
    let css = r"
        :root { --row-height: 12; color: #111; }
        prompt-field { color: #222; }
    ";
    let sheet = Stylesheet::parse(css).expect("parse css");
    assert!(!sheet.is_empty());
    let root = sheet.root();
    assert_eq!(root.f64("--row-height"), Some(12.0));
    assert_eq!(root.color("color"), Some(Color::Rgb(17, 17, 17)));

    let field = sheet.query(StyleQuery::element("prompt-field"));
    assert_eq!(field.color("color"), Some(Color::Rgb(34, 34, 34)));
    assert_eq!(field.f64("--row-height"), Some(12.0));
}

#[test]
fn specificity_and_order_control_overrides() {
    let css = r"
        button { color: blue; }
        button.primary { color: red; }
        #submit { color: green; }
        button.primary { border: 1; }
    ";
    let sheet = Stylesheet::parse(css).expect("parse css");
    let classes: [&str; 1] = ["primary"];
    let query = StyleQuery::element("button")
        .with_id("submit")
        .with_classes(&classes);
    let style = sheet.query(query);
    assert_eq!(style.color("color"), Some(Color::Green));
    assert_eq!(style.u16("border"), Some(1));
}

#[test]
fn every_class_in_a_selector_must_match() {
    let css = ".card.compact { --prompt-spacing: 0; }";
    let sheet = Stylesheet::parse(css).expect("parse css");

    let both: [&str; 2] = ["card", "compact"];
    let one: [&str; 1] = ["card"];
    let matched = sheet.query(StyleQuery::element("prompt-field").with_classes(&both));
    let missed = sheet.query(StyleQuery::element("prompt-field").with_classes(&one));

    assert_eq!(matched.f64("--prompt-spacing"), Some(0.0));
    assert_eq!(missed.f64("--prompt-spacing"), None);
}

#[test]
fn state_pseudo_classes_follow_the_query() {
    let css = r"
        prompt-field { --prompt-color: gray; }
        prompt-field:floating { --prompt-color: cyan; }
        prompt-field:focused:floating { --prompt-color: yellow; }
    ";
    let sheet = Stylesheet::parse(css).expect("parse css");
    let color = |focused, state| {
        sheet
            .query(StyleQuery::element("prompt-field").with_states(focused, state))
            .color("--prompt-color")
    };

    assert_eq!(color(false, PromptState::Normal), Some(Color::Gray));
    assert_eq!(color(false, PromptState::Floating), Some(Color::Cyan));
    assert_eq!(color(true, PromptState::Floating), Some(Color::Yellow));
    assert_eq!(
        sheet
            .query(StyleQuery::element("prompt-field"))
            .color("--prompt-color"),
        Some(Color::Gray)
    );
}
