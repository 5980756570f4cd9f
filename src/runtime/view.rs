use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::prompt::{AccessibleField, PromptLayout, PromptState};

use super::element::FlexDirection;

#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Empty,
    Text(TextView),
    Flex(FlexView),
    Block(BlockView),
    Button(ButtonView),
    PromptField(PromptFieldView),
}

impl View {
    /// The accessibility tree flattened in drawing order: one node per
    /// prompt field.
    pub fn accessibility_nodes(&self) -> Vec<AccessibleField> {
        let mut nodes = Vec::new();
        self.collect_accessibility(&mut nodes);
        nodes
    }

    fn collect_accessibility(&self, nodes: &mut Vec<AccessibleField>) {
        match self {
            View::Flex(flex) => {
                for child in &flex.children {
                    child.collect_accessibility(nodes);
                }
            }
            View::Block(block) => {
                if let Some(child) = &block.child {
                    child.collect_accessibility(nodes);
                }
            }
            View::PromptField(field) => nodes.push(field.accessibility.clone()),
            View::Empty | View::Text(_) | View::Button(_) => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextView {
    pub content: String,
    pub color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlexView {
    pub direction: FlexDirection,
    pub children: Vec<View>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockView {
    pub title: Option<String>,
    pub child: Option<Box<View>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonView {
    pub id: String,
    pub label: String,
    pub accent: Option<Color>,
    pub filled: bool,
}

/// A prompt field resolved for one frame: configuration applied and the
/// animation sampled.
#[derive(Clone, Debug, PartialEq)]
pub struct PromptFieldView {
    pub id: String,
    pub value: String,
    pub cursor: usize,
    pub focused: bool,
    pub cursor_visible: bool,
    pub secure: bool,
    pub state: PromptState,
    /// 0 is fully normal, 1 fully floating.
    pub progress: f64,
    pub label_scale: f64,
    pub layout: PromptLayout,
    pub normal_prompt: Vec<Line<'static>>,
    pub floating_prompt: Vec<Line<'static>>,
    pub normal_color: Option<Color>,
    pub floating_color: Option<Color>,
    pub leading_margin: u16,
    pub text_style: Style,
    pub width: Option<u16>,
    pub accent: Option<Color>,
    pub border_color: Option<Color>,
    pub accessibility: AccessibleField,
}
