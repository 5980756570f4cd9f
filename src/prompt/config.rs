use ratatui::style::{Modifier, Style};

use super::animation::PromptAnimation;

/// Knobs that shape a floating prompt field. Geometry values are in layout
/// units; `row_height` converts them to terminal rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PromptConfig {
    /// Modifiers applied to the edited text.
    pub font: Modifier,
    pub text_style: Style,
    /// Scale of the prompt while floating.
    pub scale: f64,
    /// Gap between the floating prompt and the field.
    pub spacing: f64,
    /// Columns between the field edge and the prompt.
    pub leading_margin: u16,
    /// Grow the control when the prompt floats instead of always reserving
    /// room for it.
    pub animate_height: bool,
    pub row_height: f64,
    pub animation: PromptAnimation,
}

impl PromptConfig {
    pub const DEFAULT_SCALE: f64 = 0.65;
    pub const DEFAULT_SPACING: f64 = 5.0;
    pub const DEFAULT_ROW_HEIGHT: f64 = 16.0;

    pub fn with_overrides(mut self, overrides: &PromptOverrides) -> Self {
        overrides.apply(&mut self);
        self
    }

    /// Replaces values that cannot produce a sensible layout.
    pub fn sanitized(mut self) -> Self {
        if !self.scale.is_finite() || self.scale < 0.0 {
            self.scale = Self::DEFAULT_SCALE;
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            self.spacing = 0.0;
        }
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            self.row_height = Self::DEFAULT_ROW_HEIGHT;
        }
        self
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            font: Modifier::empty(),
            text_style: Style::default(),
            scale: Self::DEFAULT_SCALE,
            spacing: Self::DEFAULT_SPACING,
            leading_margin: 0,
            animate_height: false,
            row_height: Self::DEFAULT_ROW_HEIGHT,
            animation: PromptAnimation::default(),
        }
    }
}

/// A partial [`PromptConfig`]. Layers of overrides stack up through the
/// environment and the field builder; later layers win.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PromptOverrides {
    pub font: Option<Modifier>,
    pub text_style: Option<Style>,
    pub scale: Option<f64>,
    pub spacing: Option<f64>,
    pub leading_margin: Option<u16>,
    pub animate_height: Option<bool>,
    pub row_height: Option<f64>,
    pub animation: Option<PromptAnimation>,
}

impl PromptOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(mut self, font: Modifier) -> Self {
        self.font = Some(font);
        self
    }

    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = Some(style);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn leading_margin(mut self, columns: u16) -> Self {
        self.leading_margin = Some(columns);
        self
    }

    pub fn animate_height(mut self, animate: bool) -> Self {
        self.animate_height = Some(animate);
        self
    }

    pub fn row_height(mut self, row_height: f64) -> Self {
        self.row_height = Some(row_height);
        self
    }

    pub fn animation(mut self, animation: PromptAnimation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Layers `other` on top of `self`.
    pub fn merge(&mut self, other: &PromptOverrides) {
        self.font = other.font.or(self.font);
        self.text_style = match (self.text_style, other.text_style) {
            (Some(base), Some(top)) => Some(base.patch(top)),
            (base, top) => top.or(base),
        };
        self.scale = other.scale.or(self.scale);
        self.spacing = other.spacing.or(self.spacing);
        self.leading_margin = other.leading_margin.or(self.leading_margin);
        self.animate_height = other.animate_height.or(self.animate_height);
        self.row_height = other.row_height.or(self.row_height);
        self.animation = other.animation.or(self.animation);
    }

    pub fn apply(&self, config: &mut PromptConfig) {
        if let Some(font) = self.font {
            config.font = font;
        }
        if let Some(style) = self.text_style {
            config.text_style = config.text_style.patch(style);
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }
        if let Some(margin) = self.leading_margin {
            config.leading_margin = margin;
        }
        if let Some(animate) = self.animate_height {
            config.animate_height = animate;
        }
        if let Some(row_height) = self.row_height {
            config.row_height = row_height;
        }
        if let Some(animation) = self.animation {
            config.animation = animation;
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &PromptOverrides::default()
    }
}
