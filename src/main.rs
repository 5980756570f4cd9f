use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use floatprompt::runtime::{AppConfig, Color};
use floatprompt::styles::{StyleQuery, Stylesheet};
use floatprompt::{
    App, ButtonNode, Element, FieldHandle, PromptContent, PromptFieldNode, Scope, component,
};

const APP_NAME: &str = "Floating Prompt Demo";
const DEMO_STYLES: &str = include_str!("../styles/demo.css");
const DEMO_STYLES_PATH: &str = "styles/demo.css";
const FOCUS_BUTTON: &str = "basic-focus";
const UNFOCUS_BUTTON: &str = "basic-unfocus";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let stylesheet = load_demo_stylesheet()?;
    let mut app = App::new(APP_NAME, component("DemoRoot", demo_root))
        .with_config(AppConfig {
            tick_rate: Duration::from_millis(33),
        })
        .with_stylesheet(stylesheet);
    if env_flag("FLOATPROMPT_WATCH_STYLES") {
        if Path::new(DEMO_STYLES_PATH).exists() {
            app = app.watch_stylesheet(DEMO_STYLES_PATH);
        } else {
            warn!(
                path = DEMO_STYLES_PATH,
                "FLOATPROMPT_WATCH_STYLES was set but stylesheet file was not found",
            );
        }
    }
    app.run().await
}

/// The terminal belongs to the UI, so logs only go to `FLOATPROMPT_LOG`.
fn init_tracing() -> anyhow::Result<()> {
    let Ok(path) = std::env::var("FLOATPROMPT_LOG") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("create log file {path}"))?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    info!(path = %path, "logging initialized");
    Ok(())
}

fn load_demo_stylesheet() -> anyhow::Result<Stylesheet> {
    match Stylesheet::from_file(DEMO_STYLES_PATH) {
        Ok(sheet) => Ok(sheet),
        Err(err) => {
            warn!(
                path = DEMO_STYLES_PATH,
                error = ?err,
                "unable to read stylesheet from disk, falling back to embedded CSS",
            );
            Stylesheet::parse(DEMO_STYLES).context("parse embedded demo stylesheet")
        }
    }
}

fn env_flag(name: &str) -> bool {
    match std::env::var(name) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => false,
    }
}

/// A field together with what the screen needs to draw and announce it.
struct DemoField {
    handle: FieldHandle,
    content: PromptContent,
    secure: bool,
}

impl DemoField {
    fn new(scope: &mut Scope, id: &str, label: &str, initial: &str) -> Self {
        let handle = scope.use_prompt_field(id, || initial.to_string());
        let snapshot = handle.snapshot();
        let content = scope
            .styles()
            .query(
                StyleQuery::element("prompt-field")
                    .with_id(id)
                    .with_states(snapshot.focused, snapshot.prompt),
            )
            .prompt_content(label);
        Self {
            handle,
            content,
            secure: false,
        }
    }

    fn floating(mut self, lines: Vec<Line<'static>>) -> Self {
        self.content = self.content.with_floating(lines);
        self
    }

    fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    fn node(&self, scope: &Scope) -> PromptFieldNode {
        let style = scope.styles().query(
            StyleQuery::element("prompt-field")
                .with_id(self.handle.id())
                .with_states(self.handle.is_focused(), self.handle.prompt_state()),
        );
        let mut node = PromptFieldNode::new(self.handle.clone(), self.content.clone())
            .overrides(style.prompt_overrides())
            .secure(self.secure);
        if let Some(accent) = style.color("--accent") {
            node = node.accent(accent);
        }
        node
    }
}

fn demo_root(scope: &mut Scope) -> Element {
    let app_style = scope.styles().query(StyleQuery::element("app"));
    scope.provide_environment(app_style.prompt_overrides());

    let basic = DemoField::new(scope, "basic-text", "Text", "");
    let name = DemoField::new(scope, "configured-name", "Full name", "");
    let nickname = DemoField::new(scope, "configured-nickname", "Nickname", "")
        .floating(nickname_prompt());
    let bio = DemoField::new(scope, "configured-bio", "Short bio", "");
    let password = DemoField::new(scope, "configured-password", "Password", "").secure();
    let city = DemoField::new(scope, "configured-city", "City", "Oslo");

    let focus_target = basic.handle.clone();
    scope.use_effect((), move |dispatcher| {
        let mut events = dispatcher.events().subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if dispatcher.buttons().is_click(&event, FOCUS_BUTTON) {
                            focus_target.focus();
                        } else if dispatcher.buttons().is_click(&event, UNFOCUS_BUTTON) {
                            focus_target.blur();
                        }
                    }
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Some(Box::new(move || handle.abort()))
    });

    let readout = scope
        .dispatcher()
        .accessibility()
        .iter()
        .map(|node| Element::text(node.announcement()))
        .collect::<Vec<_>>();

    Element::vstack(vec![
        Element::colored_text(
            "Tab/Shift-Tab cycle focus, Esc blurs, click a field to edit, Ctrl-C quits",
            Color::DarkGray,
        ),
        Element::hstack(vec![
            basic_card(scope, &basic),
            configured_card(scope, &name, &nickname, &bio, &password, &city),
        ]),
        Element::block("Accessibility", Element::vstack(readout)),
    ])
}

fn basic_card(scope: &Scope, field: &DemoField) -> Element {
    let state = field.handle.prompt_state();
    Element::block(
        "Basic",
        Element::vstack(vec![
            Element::prompt_field(field.node(scope)),
            Element::hstack(vec![
                Element::button(ButtonNode::new(FOCUS_BUTTON, "Focus").accent(Color::Cyan)),
                Element::button(ButtonNode::new(UNFOCUS_BUTTON, "Unfocus")),
            ]),
            Element::text(format!("Prompt: {state}")),
        ]),
    )
}

fn configured_card(
    scope: &Scope,
    name: &DemoField,
    nickname: &DemoField,
    bio: &DemoField,
    password: &DemoField,
    city: &DemoField,
) -> Element {
    Element::block(
        "Configured",
        Element::hstack(vec![
            Element::vstack(vec![
                Element::prompt_field(name.node(scope).scale(0.5).spacing(12.0)),
                Element::prompt_field(nickname.node(scope)),
                Element::prompt_field(bio.node(scope)).animate_floating_prompt_height(true),
            ]),
            Element::vstack(vec![
                Element::prompt_field(password.node(scope).leading_margin(2)),
                Element::prompt_field(city.node(scope)),
            ])
            .text_field_font(Modifier::BOLD),
        ]),
    )
}

fn nickname_prompt() -> Vec<Line<'static>> {
    vec![Line::from(vec![
        Span::styled("✎ ", Style::default().fg(Color::Yellow)),
        Span::styled(
            "Nickname",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ),
    ])]
}
