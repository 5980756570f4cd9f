use std::fmt;

/// Where the prompt is drawn.
///
/// The state is never stored as an independent flag: it is always derived
/// from the current text and focus through [`PromptState::resolve`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PromptState {
    /// Inline and full size, overlapping the empty input.
    #[default]
    Normal,
    /// Above the input, scaled down and offset.
    Floating,
}

impl PromptState {
    pub fn resolve(text: &str, focused: bool) -> Self {
        if !text.is_empty() || focused {
            PromptState::Floating
        } else {
            PromptState::Normal
        }
    }

    pub fn is_floating(self) -> bool {
        matches!(self, PromptState::Floating)
    }

    /// Animation progress at rest in this state: 0 for normal, 1 for floating.
    pub fn progress(self) -> f64 {
        match self {
            PromptState::Normal => 0.0,
            PromptState::Floating => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptState::Normal => "normal",
            PromptState::Floating => "floating",
        }
    }
}

impl fmt::Display for PromptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
