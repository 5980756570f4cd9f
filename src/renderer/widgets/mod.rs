use ratatui::Frame;
use ratatui::layout::Rect;

use crate::runtime::{Dispatcher, View};

pub type RenderFn = fn(&mut Frame<'_>, Rect, &View, &Dispatcher);

pub mod block;
pub mod button;
pub mod flex;
pub mod prompt_field;
pub mod text;

pub use block::render_block;
pub use button::render_button;
pub use flex::render_flex;
pub use prompt_field::render_prompt_field;
pub use text::render_text;
