use crate::prompt::PromptState;

/// What a stylesheet is asked about: an element name plus optional id,
/// classes and the live state of a prompt field.
#[derive(Clone, Copy, Debug)]
pub struct StyleQuery<'a> {
    pub(crate) element: &'a str,
    pub(crate) id: Option<&'a str>,
    pub(crate) classes: &'a [&'a str],
    pub(crate) focused: bool,
    pub(crate) prompt: Option<PromptState>,
}

impl<'a> StyleQuery<'a> {
    pub fn element(element: &'a str) -> Self {
        Self {
            element,
            id: None,
            classes: &[],
            focused: false,
            prompt: None,
        }
    }

    pub fn with_id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_classes(mut self, classes: &'a [&'a str]) -> Self {
        self.classes = classes;
        self
    }

    /// Enables the `:focused`, `:floating` and `:normal` pseudo-classes.
    pub fn with_states(mut self, focused: bool, prompt: PromptState) -> Self {
        self.focused = focused;
        self.prompt = Some(prompt);
        self
    }
}
