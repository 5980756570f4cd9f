use super::content::PromptContent;
use super::state::PromptState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessibleRole {
    TextField,
}

/// The single semantic node a prompt field exposes. The two visual prompt
/// layers collapse into one label chosen by the current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessibleField {
    pub id: String,
    pub role: AccessibleRole,
    pub label: String,
    pub value: String,
    pub focused: bool,
}

impl AccessibleField {
    pub fn describe(
        id: impl Into<String>,
        content: &PromptContent,
        state: PromptState,
        value: &str,
        focused: bool,
        secure: bool,
    ) -> Self {
        let label = match state {
            PromptState::Normal => content.normal_text(),
            PromptState::Floating => content.floating_text(),
        };
        let value = if secure {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        Self {
            id: id.into(),
            role: AccessibleRole::TextField,
            label,
            value,
            focused,
        }
    }

    pub fn announcement(&self) -> String {
        let mut text = format!("{}, text field", self.label);
        if !self.value.is_empty() {
            text.push_str(", ");
            text.push_str(&self.value);
        }
        if self.focused {
            text.push_str(", editing");
        }
        text
    }
}
