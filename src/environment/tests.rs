use ratatui::style::{Color, Modifier, Style};

use super::Environment;
use crate::prompt::{PromptConfig, PromptOverrides};

#[test]
fn empty_environment_resolves_defaults() {
    let env = Environment::new();
    assert_eq!(env.depth(), 0);
    assert_eq!(env.resolve(), PromptConfig::default());
}

#[test]
fn inner_layers_win_and_outer_values_survive() {
    let mut env = Environment::new();
    env.push(PromptOverrides::new().scale(0.5).spacing(8.0));
    env.push(PromptOverrides::new().scale(0.8).animate_height(true));

    let config = env.resolve();
    assert_eq!(config.scale, 0.8);
    assert_eq!(config.spacing, 8.0);
    assert!(config.animate_height);
}

#[test]
fn truncate_restores_outer_scope() {
    let mut env = Environment::new();
    env.push(PromptOverrides::new().leading_margin(2));
    let depth = env.push_all([PromptOverrides::new().leading_margin(6)]);
    assert_eq!(env.resolve().leading_margin, 6);
    env.truncate(depth);
    assert_eq!(env.resolve().leading_margin, 2);
}

#[test]
fn text_styles_patch_across_layers() {
    let mut env = Environment::new();
    env.push(PromptOverrides::new().text_style(Style::default().fg(Color::White)));
    env.push(
        PromptOverrides::new()
            .text_style(Style::default().bg(Color::Black))
            .font(Modifier::BOLD),
    );
    let config = env.resolve();
    assert_eq!(config.text_style.fg, Some(Color::White));
    assert_eq!(config.text_style.bg, Some(Color::Black));
    assert_eq!(config.font, Modifier::BOLD);
}

#[test]
fn resolve_with_adds_layers_without_pushing() {
    let mut environment = Environment::with_base(PromptConfig {
        leading_margin: 3,
        ..PromptConfig::default()
    });
    environment.push(PromptOverrides::new().scale(0.8));

    let config = environment.resolve_with(&[PromptOverrides::new().scale(0.3).spacing(1.0)]);

    assert_eq!(config.scale, 0.3);
    assert_eq!(config.spacing, 1.0);
    assert_eq!(config.leading_margin, 3);
    assert_eq!(environment.depth(), 1);
    assert_eq!(environment.resolve().scale, 0.8);
}
