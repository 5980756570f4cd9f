use std::io::{Stdout, stdout};

use anyhow::Context;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};

use crate::runtime::{Dispatcher, View};

mod widgets;


use widgets::{render_block, render_button, render_flex, render_prompt_field, render_text};

enum Surface {
    Interactive(Terminal<CrosstermBackend<Stdout>>),
    Headless(Terminal<TestBackend>),
}

pub struct Renderer {
    surface: Surface,
}

impl Renderer {
    pub fn new(title: &str) -> anyhow::Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            Hide,
            SetTitle(title)
        )
        .context("prepare terminal")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("build terminal")?;
        Ok(Self {
            surface: Surface::Interactive(terminal),
        })
    }

    /// A renderer drawing into an in-memory buffer; the terminal is untouched.
    pub fn headless(width: u16, height: u16) -> anyhow::Result<Self> {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).context("build headless terminal")?;
        Ok(Self {
            surface: Surface::Headless(terminal),
        })
    }

    /// Draws a frame. Button and field hitboxes are re-recorded from scratch.
    pub fn draw(&mut self, view: &View, dispatcher: &Dispatcher) -> anyhow::Result<()> {
        dispatcher.buttons().reset();
        dispatcher.fields().reset_hitboxes();
        let draw = |frame: &mut Frame<'_>| {
            let area = frame.size();
            render_view(frame, area, view, dispatcher);
        };
        match &mut self.surface {
            Surface::Interactive(terminal) => {
                terminal.draw(draw).context("draw frame")?;
            }
            Surface::Headless(terminal) => {
                terminal.draw(draw).context("draw frame")?;
            }
        }
        Ok(())
    }

    /// The last drawn frame of a headless renderer.
    pub fn buffer(&self) -> Option<&Buffer> {
        match &self.surface {
            Surface::Headless(terminal) => Some(terminal.backend().buffer()),
            Surface::Interactive(_) => None,
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let Surface::Interactive(_) = self.surface {
            let _ = disable_raw_mode();
            let mut stdout = stdout();
            let _ = execute!(
                stdout,
                Show,
                DisableBracketedPaste,
                DisableMouseCapture,
                LeaveAlternateScreen,
                SetTitle("Terminal")
            );
        }
    }
}

/// Draws `view` once into a fresh `width` x `height` buffer.
pub fn render_headless(
    view: &View,
    dispatcher: &Dispatcher,
    width: u16,
    height: u16,
) -> anyhow::Result<Buffer> {
    let mut renderer = Renderer::headless(width, height)?;
    renderer.draw(view, dispatcher)?;
    renderer
        .buffer()
        .cloned()
        .context("headless renderer has no buffer")
}

fn render_view(frame: &mut Frame<'_>, area: Rect, view: &View, dispatcher: &Dispatcher) {
    match view {
        View::Empty => {}
        View::Text(text) => render_text(frame, area, text),
        View::Flex(flex) => render_flex(frame, area, flex, dispatcher, render_view),
        View::Block(block) => render_block(frame, area, block, dispatcher, render_view),
        View::Button(button) => render_button(frame, area, button, dispatcher),
        View::PromptField(field) => render_prompt_field(frame, area, field, dispatcher),
    }
}
