use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::interactions::Hitbox;
use crate::runtime::{ButtonView, Dispatcher};

pub fn render_button(frame: &mut Frame<'_>, area: Rect, view: &ButtonView, dispatcher: &Dispatcher) {
    dispatcher.buttons().record(
        &view.id,
        Hitbox {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height,
        },
    );

    let fg = view.accent.unwrap_or(Color::White);
    let style = if view.filled {
        Style::default()
            .bg(fg)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(fg)
    };

    let content = Paragraph::new(Line::from(view.label.clone()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    frame.render_widget(content, area);
}
