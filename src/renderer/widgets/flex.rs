use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::runtime::{Dispatcher, FlexDirection, FlexView, View};

use super::RenderFn;

pub fn render_flex(
    frame: &mut Frame<'_>,
    area: Rect,
    view: &FlexView,
    dispatcher: &Dispatcher,
    render_child: RenderFn,
) {
    if view.children.is_empty() {
        return;
    }

    let chunk_count = view.children.len();
    let constraints = match view.direction {
        FlexDirection::Row => vec![Constraint::Ratio(1, chunk_count as u32); chunk_count],
        FlexDirection::Column => view
            .children
            .iter()
            .map(|child| match natural_height(child) {
                Some(height) => Constraint::Length(height),
                None => Constraint::Min(0),
            })
            .collect(),
    };
    let layout = Layout::default()
        .direction(Direction::from(view.direction))
        .constraints(constraints);
    let chunks = layout.split(area);
    for (child, rect) in view.children.iter().zip(chunks.iter()) {
        render_child(frame, *rect, child, dispatcher);
    }
}

/// Rows a leaf needs in a column. Containers take whatever is left.
pub(crate) fn natural_height(view: &View) -> Option<u16> {
    match view {
        View::Text(_) => Some(1),
        View::Button(_) => Some(3),
        View::PromptField(field) => Some(field.layout.height()),
        View::Flex(flex) if flex.direction == FlexDirection::Row => flex
            .children
            .iter()
            .map(natural_height)
            .collect::<Option<Vec<_>>>()
            .map(|heights| heights.into_iter().max().unwrap_or(0)),
        _ => None,
    }
}

impl From<FlexDirection> for Direction {
    fn from(value: FlexDirection) -> Self {
        match value {
            FlexDirection::Row => Direction::Horizontal,
            FlexDirection::Column => Direction::Vertical,
        }
    }
}
