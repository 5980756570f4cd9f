use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// The renderable prompt. The floating variant may differ from the normal
/// one; when it is unset the normal content is used in both states.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PromptContent {
    normal: Vec<Line<'static>>,
    floating: Option<Vec<Line<'static>>>,
}

impl PromptContent {
    pub const SECONDARY: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Cyan;

    pub fn new(normal: Vec<Line<'static>>) -> Self {
        Self {
            normal,
            floating: None,
        }
    }

    /// A plain label drawn in a secondary color while normal and in the
    /// accent color while floating.
    pub fn text(label: impl Into<String>) -> Self {
        Self::colored(label, Self::SECONDARY, Self::ACCENT)
    }

    pub fn colored(label: impl Into<String>, normal: Color, floating: Color) -> Self {
        let label = label.into();
        Self {
            normal: vec![Line::from(Span::styled(
                label.clone(),
                Style::default().fg(normal),
            ))],
            floating: Some(vec![Line::from(Span::styled(
                label,
                Style::default().fg(floating),
            ))]),
        }
    }

    pub fn with_floating(mut self, floating: Vec<Line<'static>>) -> Self {
        self.floating = Some(floating);
        self
    }

    pub fn normal(&self) -> &[Line<'static>] {
        &self.normal
    }

    pub fn floating(&self) -> &[Line<'static>] {
        self.floating.as_deref().unwrap_or(&self.normal)
    }

    pub fn has_custom_floating(&self) -> bool {
        self.floating.is_some()
    }

    /// Rows the floating content occupies, before scaling.
    pub fn floating_rows(&self) -> usize {
        self.floating().len()
    }

    pub fn is_empty(&self) -> bool {
        self.normal.iter().all(|line| line.width() == 0)
            && self
                .floating
                .as_ref()
                .map(|lines| lines.iter().all(|line| line.width() == 0))
                .unwrap_or(true)
    }

    pub fn normal_text(&self) -> String {
        plain_text(self.normal())
    }

    pub fn floating_text(&self) -> String {
        plain_text(self.floating())
    }

    pub(crate) fn normal_color(&self) -> Option<Color> {
        first_foreground(self.normal())
    }

    pub(crate) fn floating_color(&self) -> Option<Color> {
        first_foreground(self.floating())
    }
}

impl From<&str> for PromptContent {
    fn from(value: &str) -> Self {
        PromptContent::text(value)
    }
}

impl From<String> for PromptContent {
    fn from(value: String) -> Self {
        PromptContent::text(value)
    }
}

fn plain_text(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn first_foreground(lines: &[Line<'_>]) -> Option<Color> {
    lines.iter().find_map(|line| {
        line.style
            .fg
            .or_else(|| line.spans.iter().find_map(|span| span.style.fg))
    })
}
