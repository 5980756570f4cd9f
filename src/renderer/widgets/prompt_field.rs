use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::interactions::Hitbox;
use crate::prompt::crossfade_color;
use crate::runtime::{Dispatcher, PromptFieldView};

/// Draws the field box below the reserved prompt rows, then the prompt at its
/// interpolated row. The prompt is drawn last so it stays visible while it
/// crosses the border.
pub fn render_prompt_field(
    frame: &mut Frame<'_>,
    area: Rect,
    view: &PromptFieldView,
    dispatcher: &Dispatcher,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let width = view.width.unwrap_or(area.width).min(area.width);
    let field_top = area
        .y
        .saturating_add(view.layout.top_margin_rows)
        .min(area.bottom().saturating_sub(1));
    let box_height = 3u16.min(area.bottom().saturating_sub(field_top));
    let field_area = Rect {
        x: area.x,
        y: field_top,
        width,
        height: box_height,
    };

    dispatcher.fields().register_hitbox(
        &view.id,
        Hitbox {
            x: area.x,
            y: area.y,
            width,
            height: field_area.bottom().saturating_sub(area.y),
        },
    );

    let accent = view.accent.unwrap_or(Color::Cyan);
    let border_color = match (view.focused, view.border_color) {
        (true, _) => accent,
        (false, Some(color)) => color,
        (false, None) => Color::DarkGray,
    };
    let mut border_style = Style::default().fg(border_color);
    if view.focused {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(field_area);

    let display_value = if view.secure {
        "•".repeat(view.value.chars().count())
    } else {
        view.value.clone()
    };
    frame.render_widget(
        Paragraph::new(Line::from(display_value))
            .style(view.text_style)
            .block(block),
        field_area,
    );

    render_prompt(frame, area, inner, view);

    if view.focused && view.cursor_visible && inner.height > 0 {
        let cursor_index = view.cursor.min(view.value.len());
        let prefix = &view.value[..cursor_index];
        let cursor_width = if view.secure {
            prefix.chars().count() as u16
        } else {
            UnicodeWidthStr::width(prefix) as u16
        };
        let max_x = inner.right().saturating_sub(1).max(inner.x);
        let cursor_x = inner.x.saturating_add(cursor_width).min(max_x);
        frame.set_cursor(cursor_x, inner.y);
    }
}

fn render_prompt(frame: &mut Frame<'_>, area: Rect, inner: Rect, view: &PromptFieldView) {
    let floating = view.progress >= 0.5;
    let lines = if floating {
        &view.floating_prompt
    } else {
        &view.normal_prompt
    };
    // The inline prompt would sit on top of the text.
    if !floating && !view.value.is_empty() {
        return;
    }
    let color = crossfade_color(view.normal_color, view.floating_color, view.progress);

    let inline_y = inner.y;
    let label_top = inline_y.saturating_sub(view.layout.label_rise).max(area.y);
    let label_x = inner.x.saturating_add(view.leading_margin);
    let label_width = inner.right().saturating_sub(label_x);
    if label_width == 0 {
        return;
    }

    for (offset, line) in lines.iter().enumerate() {
        let y = label_top.saturating_add(offset as u16);
        if y >= area.bottom() {
            break;
        }
        let line = tint(line, color);
        frame.render_widget(
            Paragraph::new(line),
            Rect {
                x: label_x,
                y,
                width: label_width.min(line_width(lines, offset)),
                height: 1,
            },
        );
    }
}

fn tint(line: &Line<'static>, color: Option<Color>) -> Line<'static> {
    let Some(color) = color else {
        return line.clone();
    };
    let spans = line
        .spans
        .iter()
        .map(|span| Span::styled(span.content.clone(), span.style.fg(color)))
        .collect::<Vec<_>>();
    let mut tinted = Line::from(spans);
    tinted.style = line.style;
    tinted.alignment = line.alignment;
    tinted
}

fn line_width(lines: &[Line<'static>], index: usize) -> u16 {
    lines
        .get(index)
        .map(|line| line.width().min(u16::MAX as usize) as u16)
        .unwrap_or(0)
}
