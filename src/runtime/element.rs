use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

use crate::field::FieldHandle;
use crate::prompt::{PromptAnimation, PromptContent, PromptOverrides};

use super::component::ComponentElement;

#[derive(Clone, Debug)]
pub enum Element {
    Empty,
    Text(TextNode),
    Flex(FlexNode),
    Block(BlockNode),
    Button(ButtonNode),
    PromptField(PromptFieldNode),
    Environment(EnvironmentNode),
    Fragment(Vec<Element>),
    Component(ComponentElement),
}

#[derive(Clone, Debug)]
pub struct TextNode {
    pub content: String,
    pub color: Option<Color>,
}

#[derive(Clone, Debug)]
pub struct FlexNode {
    pub direction: FlexDirection,
    pub children: Vec<Element>,
}

#[derive(Clone, Debug)]
pub struct BlockNode {
    pub title: Option<String>,
    pub child: Box<Element>,
}

/// Applies prompt overrides to every field below `child`.
#[derive(Clone, Debug)]
pub struct EnvironmentNode {
    pub overrides: PromptOverrides,
    pub child: Box<Element>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

impl Element {
    pub fn text(content: impl Into<String>) -> Self {
        Element::Text(TextNode {
            content: content.into(),
            color: None,
        })
    }

    pub fn colored_text(content: impl Into<String>, color: Color) -> Self {
        Element::Text(TextNode {
            content: content.into(),
            color: Some(color),
        })
    }

    pub fn vstack(children: Vec<Element>) -> Self {
        Element::Flex(FlexNode {
            direction: FlexDirection::Column,
            children,
        })
    }

    pub fn hstack(children: Vec<Element>) -> Self {
        Element::Flex(FlexNode {
            direction: FlexDirection::Row,
            children,
        })
    }

    pub fn block(title: impl Into<String>, child: Element) -> Self {
        Element::Block(BlockNode {
            title: Some(title.into()),
            child: Box::new(child),
        })
    }

    pub fn fragment(children: Vec<Element>) -> Self {
        Element::Fragment(children)
    }

    pub fn button(node: ButtonNode) -> Self {
        Element::Button(node)
    }

    pub fn prompt_field(node: PromptFieldNode) -> Self {
        Element::PromptField(node)
    }

    /// Wraps this element so that nested prompt fields inherit `overrides`.
    pub fn environment(self, overrides: PromptOverrides) -> Self {
        Element::Environment(EnvironmentNode {
            overrides,
            child: Box::new(self),
        })
    }

    pub fn floating_prompt_scale(self, scale: f64) -> Self {
        self.environment(PromptOverrides::new().scale(scale))
    }

    pub fn floating_prompt_spacing(self, spacing: f64) -> Self {
        self.environment(PromptOverrides::new().spacing(spacing))
    }

    pub fn prompt_leading_margin(self, columns: u16) -> Self {
        self.environment(PromptOverrides::new().leading_margin(columns))
    }

    pub fn animate_floating_prompt_height(self, animate: bool) -> Self {
        self.environment(PromptOverrides::new().animate_height(animate))
    }

    pub fn text_field_font(self, font: Modifier) -> Self {
        self.environment(PromptOverrides::new().font(font))
    }
}

#[derive(Clone, Debug)]
pub struct ButtonNode {
    pub id: String,
    pub label: String,
    pub accent: Option<Color>,
    pub filled: bool,
}

impl ButtonNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            accent: None,
            filled: false,
        }
    }

    pub fn accent(mut self, color: Color) -> Self {
        self.accent = Some(color);
        self
    }

    pub fn filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }
}

/// A text input bound to a [`FieldHandle`] whose prompt floats above the
/// input while it is focused or holds text.
#[derive(Clone, Debug)]
pub struct PromptFieldNode {
    pub binding: FieldHandle,
    pub content: PromptContent,
    pub overrides: PromptOverrides,
    pub width: Option<u16>,
    pub secure: bool,
    pub accent: Option<Color>,
    pub border_color: Option<Color>,
}

impl PromptFieldNode {
    pub fn new(binding: FieldHandle, prompt: impl Into<PromptContent>) -> Self {
        Self {
            binding,
            content: prompt.into(),
            overrides: PromptOverrides::default(),
            width: None,
            secure: false,
            accent: None,
            border_color: None,
        }
    }

    /// Content shown while floating. Defaults to the normal prompt.
    pub fn floating_prompt(mut self, lines: Vec<Line<'static>>) -> Self {
        self.content = self.content.with_floating(lines);
        self
    }

    pub fn font(mut self, font: Modifier) -> Self {
        self.overrides.font = Some(font);
        self
    }

    /// Style of the edited text, usually its foreground color.
    pub fn text_style(mut self, style: Style) -> Self {
        self.overrides = self.overrides.text_style(style);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.overrides.scale = Some(scale);
        self
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.overrides.spacing = Some(spacing);
        self
    }

    pub fn leading_margin(mut self, columns: u16) -> Self {
        self.overrides.leading_margin = Some(columns);
        self
    }

    pub fn animate_height(mut self, animate: bool) -> Self {
        self.overrides.animate_height = Some(animate);
        self
    }

    pub fn animation(mut self, animation: PromptAnimation) -> Self {
        self.overrides.animation = Some(animation);
        self
    }

    pub fn overrides(mut self, overrides: PromptOverrides) -> Self {
        self.overrides.merge(&overrides);
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn accent(mut self, color: Color) -> Self {
        self.accent = Some(color);
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }
}
