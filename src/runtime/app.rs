use std::collections::{HashSet, hash_map::DefaultHasher};
use std::env;
use std::hash::{Hash, Hasher};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::fs;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, trace, warn};

use crate::environment::Environment;
use crate::events::{DEFAULT_TICK_RATE, EventBus};
use crate::hooks::{EffectInvocation, HookRegistry, Scope};
use crate::prompt::{AccessibleField, PromptConfig, PromptGeometry};
use crate::renderer::Renderer;
use crate::styles::Stylesheet;

use super::component::{ComponentElement, ComponentId};
use super::dispatcher::{AppMessage, Dispatcher};
use super::element::{Element, FlexDirection, PromptFieldNode};
use super::tasks::{DefaultRuntimeDriver, RuntimeDriver};
use super::view::{BlockView, ButtonView, FlexView, PromptFieldView, TextView, View};

#[derive(Clone, Copy)]
enum RendererMode {
    Interactive,
    Headless { width: u16, height: u16 },
}

#[derive(Clone)]
pub struct App {
    name: &'static str,
    root: ComponentElement,
    hooks: Arc<HookRegistry>,
    event_bus: EventBus,
    config: AppConfig,
    prompt: PromptConfig,
    styles: Arc<Stylesheet>,
    driver: Arc<dyn RuntimeDriver>,
    stylesheet_watch: Option<PathBuf>,
    renderer_mode: RendererMode,
}

#[derive(Clone, Copy)]
pub struct AppConfig {
    pub tick_rate: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

/// Everything one render pass collects while walking the element tree.
struct RenderPass<'a> {
    dispatcher: &'a Dispatcher,
    path: Vec<usize>,
    environment: Environment,
    live: HashSet<ComponentId>,
    effects: Vec<EffectInvocation>,
    now: Instant,
}

impl App {
    pub fn new(name: &'static str, root: ComponentElement) -> Self {
        Self {
            name,
            root,
            hooks: Arc::new(HookRegistry::new()),
            event_bus: EventBus::new(64),
            config: AppConfig::default(),
            prompt: PromptConfig::default(),
            styles: Arc::new(Stylesheet::default()),
            driver: Arc::new(DefaultRuntimeDriver),
            stylesheet_watch: None,
            renderer_mode: RendererMode::Interactive,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Base prompt configuration every environment layer starts from.
    pub fn with_prompt_config(mut self, prompt: PromptConfig) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.styles = Arc::new(stylesheet);
        self
    }

    pub fn watch_stylesheet<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        let candidate = path.into();
        let resolved = if candidate.is_absolute() {
            candidate
        } else {
            match env::current_dir() {
                Ok(cwd) => cwd.join(&candidate),
                Err(_) => candidate,
            }
        };
        self.stylesheet_watch = Some(resolved);
        self
    }

    pub fn with_driver<D>(mut self, driver: D) -> Self
    where
        D: RuntimeDriver + 'static,
    {
        self.driver = Arc::new(driver);
        self
    }

    /// Draws into an off-screen buffer of the given size instead of the
    /// terminal.
    pub fn headless(mut self, width: u16, height: u16) -> Self {
        self.renderer_mode = RendererMode::Headless { width, height };
        self
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        info!(app = self.name, "starting runtime");
        let (tx, mut rx) = mpsc::channel(128);
        let dispatcher = Dispatcher::new(tx.clone(), self.event_bus.clone());
        let mut renderer = match self.renderer_mode {
            RendererMode::Interactive => Renderer::new(self.name).context("initialize renderer")?,
            RendererMode::Headless { width, height } => {
                Renderer::headless(width, height).context("initialize renderer")?
            }
        };
        let mut last_view: Option<View> = None;

        let event_task = self.driver.spawn_terminal_events(tx.clone());
        let tick_task = self
            .driver
            .spawn_tick_loop(tx.clone(), self.config.tick_rate);
        let shutdown_task = self.driver.spawn_shutdown_watcher(tx.clone());
        let stylesheet_task = self
            .stylesheet_watch
            .clone()
            .map(|path| spawn_stylesheet_watcher(path, tx.clone()));

        if tx.send(AppMessage::RequestRender).await.is_err() {
            warn!(app = self.name, "failed to enqueue initial render request");
        }

        while let Some(message) = rx.recv().await {
            trace!(app = self.name, message = ?message, "processing app message");
            match message {
                AppMessage::RequestRender => {
                    let (view, effects) = self.render_tree(&dispatcher, Instant::now())?;
                    let should_render =
                        last_view.as_ref().map(|prev| prev != &view).unwrap_or(true);
                    if should_render {
                        renderer.draw(&view, &dispatcher).map_err(|err| {
                            warn!(app = self.name, error = ?err, "renderer draw failed");
                            err
                        })?;
                        trace!(app = self.name, "frame drawn");
                    }
                    last_view = Some(view);
                    trace!(
                        app = self.name,
                        effect_count = effects.len(),
                        "render completed"
                    );
                    self.run_effects(effects, &dispatcher);
                }
                AppMessage::ExternalEvent(event) => {
                    trace!(app = self.name, event = ?event, "dispatching external event");
                    dispatcher.fields().handle_event(&event, &dispatcher);
                    self.event_bus.publish(event);
                }
                AppMessage::Shutdown => {
                    info!(app = self.name, "shutdown requested");
                    break;
                }
                AppMessage::StylesheetUpdated(stylesheet) => {
                    self.styles = stylesheet;
                    info!(app = self.name, "stylesheet reloaded");
                    dispatcher.request_render();
                }
            }
        }

        drop(renderer);
        trace!(app = self.name, "tearing down runtime tasks");
        abort_and_log("terminal_events", event_task).await;
        abort_and_log("tick_loop", tick_task).await;
        abort_and_log("shutdown_watcher", shutdown_task).await;
        if let Some(task) = stylesheet_task {
            task.abort();
        }
        info!(app = self.name, "runtime stopped");
        Ok(())
    }

    /// Resolves the whole tree once and unmounts components that did not
    /// render. Effects are returned, not run.
    pub(crate) fn render_tree(
        &self,
        dispatcher: &Dispatcher,
        now: Instant,
    ) -> anyhow::Result<(View, Vec<EffectInvocation>)> {
        let mut pass = RenderPass {
            dispatcher,
            path: vec![0usize],
            environment: Environment::with_base(self.prompt),
            live: HashSet::new(),
            effects: Vec::new(),
            now,
        };
        let view = self
            .render_element(Element::from(self.root.clone()), &mut pass)?
            .unwrap_or(View::Empty);
        self.hooks.prune(&pass.live);
        // Components reading the nodes saw the previous frame's.
        if dispatcher.publish_accessibility(view.accessibility_nodes()) {
            trace!(app = self.name, "accessibility nodes changed");
            dispatcher.request_render();
        }
        Ok((view, pass.effects))
    }

    fn run_effects(&self, effects: Vec<EffectInvocation>, dispatcher: &Dispatcher) {
        for effect in effects {
            let EffectInvocation {
                component_id,
                slot_index,
                deps,
                task,
            } = effect;
            trace!(
                component = %component_id,
                slot_index,
                "running effect cleanup"
            );
            self.hooks
                .with_effect_slot(&component_id, slot_index, |slot| {
                    if let Some(cleanup) = slot.take_cleanup() {
                        cleanup();
                    }
                });
            trace!(component = %component_id, slot_index, "invoking effect task");
            let cleanup = task(dispatcher.clone());
            self.hooks
                .with_effect_slot(&component_id, slot_index, |slot| {
                    slot.set_deps(deps);
                    slot.set_cleanup(cleanup);
                });
        }
    }

    fn render_element(
        &self,
        element: Element,
        pass: &mut RenderPass<'_>,
    ) -> anyhow::Result<Option<View>> {
        match element {
            Element::Empty => Ok(Some(View::Empty)),
            Element::Text(node) => Ok(Some(View::Text(TextView {
                content: node.content,
                color: node.color,
            }))),
            Element::Flex(node) => {
                let children = self.render_children(node.children, pass)?;
                if children.is_empty() {
                    Ok(Some(View::Empty))
                } else {
                    Ok(Some(View::Flex(FlexView {
                        direction: node.direction,
                        children,
                    })))
                }
            }
            Element::Block(node) => {
                pass.path.push(0);
                let child = self.render_element(*node.child, pass)?;
                pass.path.pop();
                Ok(Some(View::Block(BlockView {
                    title: node.title,
                    child: child.map(Box::new),
                })))
            }
            Element::Button(node) => Ok(Some(View::Button(ButtonView {
                id: node.id,
                label: node.label,
                accent: node.accent,
                filled: node.filled,
            }))),
            Element::PromptField(node) => Ok(Some(View::PromptField(resolve_prompt_field(
                node,
                &pass.environment,
                pass.dispatcher,
                pass.now,
            )))),
            Element::Environment(node) => {
                let depth = pass.environment.push_all([node.overrides]);
                let view = self.render_element(*node.child, pass);
                pass.environment.truncate(depth);
                view
            }
            Element::Fragment(children) => {
                let mut views = self.render_children(children, pass)?;
                if views.is_empty() {
                    Ok(Some(View::Empty))
                } else if views.len() == 1 {
                    Ok(views.pop())
                } else {
                    Ok(Some(View::Flex(FlexView {
                        direction: FlexDirection::Column,
                        children: views,
                    })))
                }
            }
            Element::Component(component) => self.render_component(component, pass),
        }
    }

    fn render_children(
        &self,
        children: Vec<Element>,
        pass: &mut RenderPass<'_>,
    ) -> anyhow::Result<Vec<View>> {
        let mut views = Vec::new();
        for (index, child) in children.into_iter().enumerate() {
            pass.path.push(index);
            let view = self.render_element(child, pass);
            pass.path.pop();
            if let Some(view) = view? {
                views.push(view);
            }
        }
        Ok(views)
    }

    fn render_component(
        &self,
        component: ComponentElement,
        pass: &mut RenderPass<'_>,
    ) -> anyhow::Result<Option<View>> {
        let id = component.mount_id(&pass.path);
        if pass.live.insert(id.clone()) && !self.hooks.contains(&id) {
            trace!(component = id.name(), key = id.key(), "mounting component");
        }
        let store = self.hooks.store_for(&id);
        let (child, provided) = {
            let mut scope = Scope::new(
                id,
                store,
                pass.dispatcher.clone(),
                &pass.environment,
                self.styles.clone(),
            );
            let child = (component.render)(&mut scope);
            pass.effects.extend(scope.take_effects());
            (child, scope.take_environment())
        };
        let depth = pass.environment.push_all(provided);
        let view = self.render_element(child, pass);
        pass.environment.truncate(depth);
        view
    }
}

/// Applies the inherited configuration to a field and samples its prompt
/// animation at `now`.
pub(crate) fn resolve_prompt_field(
    node: PromptFieldNode,
    environment: &Environment,
    dispatcher: &Dispatcher,
    now: Instant,
) -> PromptFieldView {
    let config = environment
        .resolve()
        .with_overrides(&node.overrides)
        .sanitized();
    let (value, cursor, focused, state, progress) = node.binding.with_state(|state| {
        state.set_animation(config.animation);
        state.refresh(now);
        (
            state.value().to_string(),
            state.cursor(),
            state.is_focused(),
            state.prompt_state(),
            state.prompt_progress(now),
        )
    });
    let id = node.binding.id().to_string();
    let cursor_visible = dispatcher.fields().cursor_visible(&id, now);
    let geometry = PromptGeometry::compute(&config, node.content.floating_rows());
    let accessibility =
        AccessibleField::describe(id.clone(), &node.content, state, &value, focused, node.secure);
    PromptFieldView {
        value,
        cursor,
        focused,
        cursor_visible,
        secure: node.secure,
        state,
        progress,
        label_scale: geometry.label_scale(progress),
        layout: geometry.layout(progress),
        normal_prompt: node.content.normal().to_vec(),
        floating_prompt: node.content.floating().to_vec(),
        normal_color: node.content.normal_color(),
        floating_color: node.content.floating_color(),
        leading_margin: config.leading_margin,
        text_style: config.text_style.add_modifier(config.font),
        width: node.width,
        accent: node.accent,
        border_color: node.border_color,
        accessibility,
        id,
    }
}

fn spawn_stylesheet_watcher(path: PathBuf, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(path = %path.display(), "stylesheet watcher started");
        let mut snapshot = fingerprint_if_exists(&path).await;
        loop {
            match maybe_reload_stylesheet(&path, &mut snapshot).await {
                Ok(Some(stylesheet)) => {
                    info!(path = %path.display(), "stylesheet change detected");
                    if tx
                        .send(AppMessage::StylesheetUpdated(stylesheet))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Ok(None) => {}
                Err(err) => warn!(path = %path.display(), error = ?err, "stylesheet reload failed"),
            }
            sleep(Duration::from_millis(400)).await;
        }
    })
}

async fn fingerprint_if_exists(path: &Path) -> Option<u64> {
    fs::read_to_string(path)
        .await
        .ok()
        .map(|contents| fingerprint(&contents))
}

async fn maybe_reload_stylesheet(
    path: &Path,
    snapshot: &mut Option<u64>,
) -> anyhow::Result<Option<Arc<Stylesheet>>> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let fingerprint = fingerprint(&contents);
    if *snapshot == Some(fingerprint) {
        return Ok(None);
    }
    let stylesheet = Stylesheet::parse(&contents)
        .with_context(|| format!("parse stylesheet {}", path.display()))?;
    *snapshot = Some(fingerprint);
    Ok(Some(Arc::new(stylesheet)))
}

fn fingerprint(input: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    hasher.finish()
}

async fn abort_and_log(label: &str, handle: JoinHandle<()>) {
    handle.abort();
    match handle.await {
        Ok(_) => trace!(task = label, "task aborted cleanly"),
        Err(err) if err.is_cancelled() => trace!(task = label, "task cancellation confirmed"),
        Err(err) => warn!(task = label, error = ?err, "task join failed"),
    }
}
