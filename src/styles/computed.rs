use std::collections::HashMap;
use std::time::Duration;

use ratatui::style::{Modifier, Style};

use crate::prompt::{Easing, PromptAnimation, PromptContent, PromptOverrides};
use crate::runtime::Color;

use super::parser::{parse_color, parse_duration, parse_modifier};

#[derive(Clone, Debug, Default)]
pub struct ComputedStyle {
    props: HashMap<String, String>,
}

impl ComputedStyle {
    pub(crate) fn from_props(props: HashMap<String, String>) -> Self {
        Self { props }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.props
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    pub fn color(&self, name: &str) -> Option<Color> {
        self.get(name).and_then(parse_color)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name)
            .and_then(|value| match value.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            })
    }

    pub fn u16(&self, name: &str) -> Option<u16> {
        self.get(name)?.trim().parse().ok()
    }

    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name)?.trim().parse().ok()
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)
    }

    pub fn modifier(&self, name: &str) -> Option<Modifier> {
        self.get(name).and_then(parse_modifier)
    }

    pub fn duration(&self, name: &str) -> Option<Duration> {
        self.get(name).and_then(parse_duration)
    }

    pub fn easing(&self, name: &str) -> Option<Easing> {
        self.get(name).and_then(Easing::parse)
    }

    /// Prompt knobs set by this style. Unparseable values are skipped.
    pub fn prompt_overrides(&self) -> PromptOverrides {
        let mut overrides = PromptOverrides::new();
        overrides.font = self.modifier("font");
        overrides.text_style = self.color("color").map(|color| Style::default().fg(color));
        overrides.scale = self.f64("--prompt-scale");
        overrides.spacing = self.f64("--prompt-spacing");
        overrides.leading_margin = self.u16("--prompt-leading-margin");
        overrides.animate_height = self.bool("--prompt-animate-height");
        overrides.row_height = self.f64("--row-height");
        let duration = self.duration("--prompt-duration");
        let easing = self.easing("--prompt-easing");
        if duration.is_some() || easing.is_some() {
            let fallback = PromptAnimation::default();
            overrides.animation = Some(PromptAnimation::new(
                duration.unwrap_or(fallback.duration),
                easing.unwrap_or(fallback.easing),
            ));
        }
        overrides
    }

    /// A plain-text prompt colored by `--prompt-color` and
    /// `--floating-prompt-color`.
    pub fn prompt_content(&self, label: impl Into<String>) -> PromptContent {
        let label = label.into();
        let normal = self
            .color("--prompt-color")
            .unwrap_or(PromptContent::SECONDARY);
        let floating = self
            .color("--floating-prompt-color")
            .unwrap_or(PromptContent::ACCENT);
        PromptContent::colored(label, normal, floating)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}
