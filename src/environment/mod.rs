use crate::prompt::{PromptConfig, PromptOverrides};

/// Prompt configuration inherited down the component tree. Each provider
/// pushes a layer of overrides that applies to its subtree only.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    base: PromptConfig,
    layers: Vec<PromptOverrides>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: PromptConfig) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    pub fn push(&mut self, overrides: PromptOverrides) {
        self.layers.push(overrides);
    }

    /// Pushes every layer and returns the depth to restore afterwards.
    pub fn push_all<I>(&mut self, layers: I) -> usize
    where
        I: IntoIterator<Item = PromptOverrides>,
    {
        let depth = self.layers.len();
        self.layers.extend(layers);
        depth
    }

    pub fn truncate(&mut self, depth: usize) {
        self.layers.truncate(depth);
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// All layers folded into one, outermost first.
    pub fn overrides(&self) -> PromptOverrides {
        let mut merged = PromptOverrides::default();
        for layer in &self.layers {
            merged.merge(layer);
        }
        merged
    }

    pub fn resolve(&self) -> PromptConfig {
        self.base.with_overrides(&self.overrides())
    }

    /// Resolves as if `extra` were pushed on top, without mutating the stack.
    pub fn resolve_with(&self, extra: &[PromptOverrides]) -> PromptConfig {
        let mut merged = self.overrides();
        for layer in extra {
            merged.merge(layer);
        }
        self.base.with_overrides(&merged)
    }
}

#[cfg(test)]
mod tests;
