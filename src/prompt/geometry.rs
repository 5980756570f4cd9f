use super::config::PromptConfig;
use super::state::PromptState;

/// Offsets of the prompt in layout units, derived from the configuration and
/// the measured height of the floating content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PromptGeometry {
    pub label_height: f64,
    pub scale: f64,
    pub spacing: f64,
    pub animate_height: bool,
    pub row_height: f64,
}

impl PromptGeometry {
    pub fn compute(config: &PromptConfig, label_rows: usize) -> Self {
        Self {
            label_height: label_rows as f64 * config.row_height,
            scale: config.scale,
            spacing: config.spacing,
            animate_height: config.animate_height,
            row_height: config.row_height,
        }
    }

    /// `spacing + label_height * scale`
    pub fn floating_offset(&self) -> f64 {
        self.spacing + self.label_height * self.scale
    }

    /// Padding above the field at the given floating progress.
    pub fn top_margin(&self, progress: f64) -> f64 {
        if self.animate_height {
            self.floating_offset() * progress.clamp(0.0, 1.0)
        } else {
            self.floating_offset()
        }
    }

    pub fn top_margin_for(&self, state: PromptState) -> f64 {
        self.top_margin(state.progress())
    }

    /// Vertical displacement of the prompt; negative values move it up.
    pub fn label_offset(&self, progress: f64) -> f64 {
        -self.floating_offset() * progress.clamp(0.0, 1.0)
    }

    pub fn label_scale(&self, progress: f64) -> f64 {
        1.0 + (self.scale - 1.0) * progress.clamp(0.0, 1.0)
    }

    /// Rows reserved for the floating prompt. Any non-zero offset takes at
    /// least one row.
    pub fn offset_rows(&self) -> u16 {
        let rows = self.floating_offset() / self.row_height;
        if rows <= 0.0 {
            0
        } else {
            rows.ceil().min(u16::MAX as f64) as u16
        }
    }

    pub fn layout(&self, progress: f64) -> PromptLayout {
        let progress = progress.clamp(0.0, 1.0);
        let offset_rows = self.offset_rows();
        let top_margin_rows = if self.animate_height {
            (offset_rows as f64 * progress).round() as u16
        } else {
            offset_rows
        };
        // The floating prompt clears the field border as well as the offset.
        let travel = offset_rows.saturating_add(1);
        let label_rise = (travel as f64 * progress).round() as u16;
        PromptLayout {
            top_margin_rows,
            label_rise,
            offset_rows,
        }
    }
}

/// [`PromptGeometry`] resolved to terminal rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PromptLayout {
    /// Rows above the field box.
    pub top_margin_rows: u16,
    /// Rows the prompt has moved up from its inline row.
    pub label_rise: u16,
    pub offset_rows: u16,
}

impl PromptLayout {
    /// Rows the whole control needs: margin plus a bordered single-line box.
    pub fn height(&self) -> u16 {
        self.top_margin_rows.saturating_add(3)
    }
}
