use std::sync::Arc;

use tokio::sync::mpsc;

use crate::environment::Environment;
use crate::events::EventBus;
use crate::hooks::{HookRegistry, Scope};
use crate::prompt::{PromptConfig, PromptOverrides};
use crate::runtime::{ComponentId, Dispatcher};
use crate::styles::Stylesheet;

fn dispatcher() -> Dispatcher {
    let (tx, _rx) = mpsc::channel(8);
    Dispatcher::new(tx, EventBus::new(4))
}

#[test]
fn state_and_fields_persist_across_renders() {
    let registry = HookRegistry::new();
    let dispatcher = dispatcher();
    let environment = Environment::new();
    let id = ComponentId::new(&[0], "Screen", None);
    let styles = Arc::new(Stylesheet::default());

    {
        let mut scope = Scope::new(
            id.clone(),
            registry.store_for(&id),
            dispatcher.clone(),
            &environment,
            styles.clone(),
        );
        let (count, set_count) = scope.use_state(|| 1u32);
        assert_eq!(count, 1);
        set_count.set(5);
        let field = scope.use_prompt_field("screen:name", || "Ada".to_string());
        field.set_value("Grace");
    }

    let mut scope = Scope::new(
        id.clone(),
        registry.store_for(&id),
        dispatcher.clone(),
        &environment,
        styles,
    );
    let (count, _) = scope.use_state(|| 1u32);
    assert_eq!(count, 5);
    let field = scope.use_prompt_field("screen:name", || "ignored".to_string());
    assert_eq!(field.value(), "Grace");
}

#[test]
fn effects_are_queued_until_deps_change() {
    let registry = HookRegistry::new();
    let dispatcher = dispatcher();
    let environment = Environment::new();
    let id = ComponentId::new(&[0], "Effects", None);

    let mut scope = Scope::new(
        id.clone(),
        registry.store_for(&id),
        dispatcher,
        &environment,
        Arc::new(Stylesheet::default()),
    );
    scope.use_effect(1u8, |_| None);
    let effects = scope.take_effects();
    assert_eq!(effects.len(), 1);
    registry.with_effect_slot(&id, 0, |slot| slot.set_deps(Box::new(1u8)));

    let dispatcher = scope.dispatcher().clone();
    let mut rerender = Scope::new(
        id.clone(),
        registry.store_for(&id),
        dispatcher,
        &environment,
        Arc::new(Stylesheet::default()),
    );
    rerender.use_effect(1u8, |_| None);
    assert!(rerender.take_effects().is_empty());
}

#[test]
fn provided_environment_is_visible_to_the_provider() {
    let registry = HookRegistry::new();
    let mut environment = Environment::new();
    environment.push(PromptOverrides::new().spacing(9.0));
    let id = ComponentId::new(&[0], "Provider", None);

    let mut scope = Scope::new(
        id.clone(),
        registry.store_for(&id),
        dispatcher(),
        &environment,
        Arc::new(Stylesheet::default()),
    );
    assert_eq!(scope.environment().spacing, 9.0);
    scope.provide_environment(PromptOverrides::new().scale(0.4));
    let config = scope.environment();
    assert_eq!(config.scale, 0.4);
    assert_eq!(config.spacing, 9.0);
    assert_eq!(config.row_height, PromptConfig::DEFAULT_ROW_HEIGHT);
    assert_eq!(scope.take_environment().len(), 1);
}
