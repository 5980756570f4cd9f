use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Wrap};

use crate::runtime::TextView;

pub fn render_text(frame: &mut Frame<'_>, area: Rect, view: &TextView) {
    let style = view
        .color
        .map(|color| Style::default().fg(color))
        .unwrap_or_default();
    let widget = Paragraph::new(view.content.as_str())
        .style(style)
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}
