use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::EventBus;
use crate::prompt::{AccessibleRole, PromptAnimation, PromptOverrides, PromptState};
use crate::runtime::{
    App, AppMessage, ComponentId, Dispatcher, Element, PromptFieldNode, PromptFieldView,
    RuntimeDriver, View, component,
};

fn dispatcher() -> (Dispatcher, mpsc::Receiver<AppMessage>) {
    let (tx, rx) = mpsc::channel(64);
    (Dispatcher::new(tx, EventBus::new(8)), rx)
}

fn prompt_fields(view: &View) -> Vec<PromptFieldView> {
    fn walk(view: &View, out: &mut Vec<PromptFieldView>) {
        match view {
            View::PromptField(field) => out.push(field.clone()),
            View::Flex(flex) => flex.children.iter().for_each(|child| walk(child, out)),
            View::Block(block) => {
                if let Some(child) = &block.child {
                    walk(child, out);
                }
            }
            _ => {}
        }
    }
    let mut out = Vec::new();
    walk(view, &mut out);
    out
}

#[test]
fn fields_inherit_environment_and_node_overrides_win() {
    let root = component("Form", |scope| {
        scope.provide_environment(PromptOverrides::new().spacing(27.0));
        let plain = scope.use_prompt_field("form:plain", String::new);
        let tuned = scope.use_prompt_field("form:tuned", String::new);
        Element::vstack(vec![
            Element::prompt_field(PromptFieldNode::new(plain, "Plain")),
            Element::prompt_field(PromptFieldNode::new(tuned, "Tuned").spacing(0.0)),
        ])
        .floating_prompt_scale(0.0)
    });
    let app = App::new("test", root);
    let (dispatcher, _rx) = dispatcher();

    let (view, _) = app.render_tree(&dispatcher, Instant::now()).unwrap();
    let fields = prompt_fields(&view);

    assert_eq!(fields.len(), 2);
    // 27 units over 16 per row rounds up to two rows.
    assert_eq!(fields[0].layout.offset_rows, 2);
    assert_eq!(fields[0].layout.top_margin_rows, 2);
    assert_eq!(fields[1].layout.offset_rows, 0);
}

#[test]
fn environment_does_not_leak_to_siblings() {
    let root = component("Siblings", |scope| {
        let a = scope.use_prompt_field("a", String::new);
        let b = scope.use_prompt_field("b", String::new);
        Element::vstack(vec![
            Element::prompt_field(PromptFieldNode::new(a, "A")).animate_floating_prompt_height(true),
            Element::prompt_field(PromptFieldNode::new(b, "B")),
        ])
    });
    let app = App::new("test", root);
    let (dispatcher, _rx) = dispatcher();

    let (view, _) = app.render_tree(&dispatcher, Instant::now()).unwrap();
    let fields = prompt_fields(&view);

    assert_eq!(fields[0].layout.top_margin_rows, 0);
    assert_eq!(fields[1].layout.top_margin_rows, 1);
}

#[test]
fn initial_value_mounts_floating_without_animation() {
    let root = component("Prefilled", |scope| {
        let field = scope.use_prompt_field("prefilled", || "Hello".to_string());
        Element::prompt_field(PromptFieldNode::new(field, "Name"))
    });
    let app = App::new("test", root);
    let (dispatcher, _rx) = dispatcher();

    let (view, _) = app.render_tree(&dispatcher, Instant::now()).unwrap();
    let field = &prompt_fields(&view)[0];

    assert_eq!(field.state, PromptState::Floating);
    assert_eq!(field.progress, 1.0);
    assert_eq!(field.layout.label_rise, 2);
}

#[test]
fn focus_change_animates_from_current_progress() {
    let root = component("Animated", |scope| {
        let field = scope.use_prompt_field("animated", String::new);
        Element::prompt_field(
            PromptFieldNode::new(field, "Name")
                .animation(PromptAnimation::new(Duration::from_millis(200), Default::default())),
        )
    });
    let app = App::new("test", root);
    let (dispatcher, _rx) = dispatcher();
    let start = Instant::now();
    app.render_tree(&dispatcher, start).unwrap();

    dispatcher.fields().focus(Some("animated"), &dispatcher);
    let (settled, _) = app
        .render_tree(&dispatcher, Instant::now() + Duration::from_secs(1))
        .unwrap();
    let field = &prompt_fields(&settled)[0];

    assert_eq!(field.state, PromptState::Floating);
    assert_eq!(field.progress, 1.0);
    assert!(field.focused);
}

#[test]
fn accessibility_exposes_one_node_per_field() {
    let root = component("A11y", |scope| {
        let name = scope.use_prompt_field("a11y:name", || "Ada".to_string());
        let secret = scope.use_prompt_field("a11y:secret", || "hunter2".to_string());
        Element::vstack(vec![
            Element::block(
                "Card",
                Element::prompt_field(PromptFieldNode::new(name, "Name")),
            ),
            Element::prompt_field(PromptFieldNode::new(secret, "Password").secure(true)),
        ])
    });
    let app = App::new("test", root);
    let (dispatcher, _rx) = dispatcher();

    let (view, _) = app.render_tree(&dispatcher, Instant::now()).unwrap();
    let nodes = view.accessibility_nodes();

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].role, AccessibleRole::TextField);
    assert_eq!(nodes[0].label, "Name");
    assert_eq!(nodes[0].value, "Ada");
    assert_eq!(nodes[1].value, "•••••••");
}

#[test]
fn components_read_last_frame_accessibility_from_the_dispatcher() {
    let seen = Arc::new(AtomicUsize::new(usize::MAX));
    let observed = seen.clone();
    let root = component("Readout", move |scope| {
        let field = scope.use_prompt_field("readout", || "Ada".to_string());
        let nodes = scope.dispatcher().accessibility();
        observed.store(nodes.len(), Ordering::SeqCst);
        let lines = nodes
            .iter()
            .map(|node| Element::text(node.announcement()))
            .collect::<Vec<_>>();
        Element::vstack(vec![
            Element::prompt_field(PromptFieldNode::new(field, "Name")),
            Element::vstack(lines),
        ])
    });
    let app = App::new("test", root);
    let (dispatcher, mut rx) = dispatcher();
    let renders = |rx: &mut mpsc::Receiver<AppMessage>| {
        std::iter::from_fn(|| rx.try_recv().ok())
            .filter(|message| matches!(message, AppMessage::RequestRender))
            .count()
    };

    app.render_tree(&dispatcher, Instant::now()).unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 0);
    assert_eq!(renders(&mut rx), 1, "new nodes ask for another pass");

    app.render_tree(&dispatcher, Instant::now()).unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(dispatcher.accessibility()[0].value, "Ada");
    assert_eq!(renders(&mut rx), 0, "unchanged nodes settle");
}

#[test]
fn unmounted_components_release_their_fields() {
    let show = Arc::new(AtomicUsize::new(1));
    let toggle = show.clone();
    let root = component("Toggle", move |_scope| {
        if toggle.load(Ordering::SeqCst) == 1 {
            Element::from(component("Child", |scope| {
                let field = scope.use_prompt_field("child", String::new);
                Element::prompt_field(PromptFieldNode::new(field, "Child"))
            }))
        } else {
            Element::Empty
        }
    });
    let app = App::new("test", root);
    let (dispatcher, _rx) = dispatcher();

    app.render_tree(&dispatcher, Instant::now()).unwrap();
    assert_eq!(dispatcher.fields().ids(), vec!["child".to_string()]);

    show.store(0, Ordering::SeqCst);
    app.render_tree(&dispatcher, Instant::now()).unwrap();
    assert!(dispatcher.fields().ids().is_empty());
}

#[test]
fn swapping_screens_that_share_a_field_id_keeps_the_binding() {
    let screen = Arc::new(AtomicUsize::new(0));
    let current = screen.clone();
    let root = component("Root", move |_scope| {
        if current.load(Ordering::SeqCst) % 2 == 0 {
            Element::from(component("Login", |scope| {
                let email = scope.use_prompt_field("email", String::new);
                Element::prompt_field(PromptFieldNode::new(email, "Email"))
            }))
        } else {
            Element::from(component("Signup", |scope| {
                let email = scope.use_prompt_field("email", String::new);
                Element::prompt_field(PromptFieldNode::new(email, "Email"))
            }))
        }
    });
    let app = App::new("test", root);
    let (dispatcher, _rx) = dispatcher();
    let email = vec!["email".to_string()];

    app.render_tree(&dispatcher, Instant::now()).unwrap();
    assert!(dispatcher.fields().focus(Some("email"), &dispatcher));

    for _ in 0..2 {
        screen.fetch_add(1, Ordering::SeqCst);
        let (view, _) = app.render_tree(&dispatcher, Instant::now()).unwrap();
        assert_eq!(dispatcher.fields().ids(), email);
        assert_eq!(dispatcher.fields().focused().as_deref(), Some("email"));
        let field = &prompt_fields(&view)[0];
        assert!(field.focused, "remounted field keeps focus");
        assert_eq!(field.state, PromptState::Floating);
    }

    dispatcher.fields().blur(&dispatcher);
    assert!(dispatcher.fields().focus(Some("email"), &dispatcher));
}

#[test]
fn component_ids_separate_names_and_keys() {
    let login = ComponentId::new(&[0, 2], "Login", None);
    let signup = ComponentId::new(&[0, 2], "Signup", None);
    let keyed = ComponentId::new(&[0, 2], "Login", Some("work"));

    assert_ne!(login, signup);
    assert_ne!(login, keyed);
    assert_eq!(login.name(), "Login");
    assert_eq!(keyed.key(), Some("work"));
    assert_eq!(keyed.to_string(), "0.2#work:Login");
    assert_eq!(ComponentId::new(&[], "Root", None).to_string(), ":Root");
}

struct ScriptedDriver;

impl RuntimeDriver for ScriptedDriver {
    fn spawn_terminal_events(&self, _tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        tokio::spawn(async {})
    }

    fn spawn_tick_loop(&self, _tx: mpsc::Sender<AppMessage>, _rate: Duration) -> JoinHandle<()> {
        tokio::spawn(async {})
    }

    fn spawn_shutdown_watcher(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(AppMessage::Shutdown).await;
        })
    }
}

#[tokio::test]
async fn headless_app_renders_until_shutdown() {
    let renders = Arc::new(AtomicUsize::new(0));
    let counter = renders.clone();
    let root = component("Counted", move |scope| {
        counter.fetch_add(1, Ordering::SeqCst);
        let field = scope.use_prompt_field("counted", String::new);
        Element::prompt_field(PromptFieldNode::new(field, "Email"))
    });

    App::new("headless", root)
        .headless(40, 10)
        .with_driver(ScriptedDriver)
        .run()
        .await
        .unwrap();

    assert!(renders.load(Ordering::SeqCst) >= 1);
}
