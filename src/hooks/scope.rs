use std::sync::Arc;

use parking_lot::Mutex;

use crate::environment::Environment;
use crate::field::FieldHandle;
use crate::prompt::{PromptConfig, PromptOverrides};
use crate::runtime::{ComponentId, Dispatcher};
use crate::styles::Stylesheet;

use super::handles::StateHandle;
use super::registry::{Cleanup, EffectHook, EffectInvocation, FieldEntry, HookSlot, HookStore};

pub struct Scope<'a> {
    component_id: ComponentId,
    store: Arc<Mutex<HookStore>>,
    dispatcher: Dispatcher,
    hook_cursor: usize,
    environment: &'a Environment,
    provided: Vec<PromptOverrides>,
    pending_effects: Vec<EffectInvocation>,
    styles: Arc<Stylesheet>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        component_id: ComponentId,
        store: Arc<Mutex<HookStore>>,
        dispatcher: Dispatcher,
        environment: &'a Environment,
        styles: Arc<Stylesheet>,
    ) -> Self {
        Self {
            component_id,
            store,
            dispatcher,
            hook_cursor: 0,
            environment,
            provided: Vec::new(),
            pending_effects: Vec::new(),
            styles,
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.component_id
    }

    pub fn use_state<T, F>(&mut self, init: F) -> (T, StateHandle<T>)
    where
        T: Clone + Send + 'static,
        F: FnOnce() -> T,
    {
        let index = self.next_index();
        let shared = {
            let mut store = self.store.lock();
            let slot = store.slot(index);
            match slot {
                HookSlot::Vacant => {
                    let state = Arc::new(Mutex::new(init()));
                    *slot = HookSlot::State(Box::new(state.clone()));
                    state
                }
                HookSlot::State(existing) => existing
                    .downcast_ref::<Arc<Mutex<T>>>()
                    .expect("use_state hook order mismatch")
                    .clone(),
                _ => panic!("use_state hook order mismatch"),
            }
        };
        let value = shared.lock().clone();
        let handle = StateHandle::new(shared, self.dispatcher.clone());
        (value, handle)
    }

    pub fn use_effect<D, F>(&mut self, deps: D, effect: F)
    where
        D: PartialEq + Clone + Send + Sync + 'static,
        F: FnOnce(Dispatcher) -> Option<Cleanup> + Send + Sync + 'static,
    {
        let index = self.next_index();
        let should_run = {
            let mut store = self.store.lock();
            let slot = store.slot(index);
            match slot {
                HookSlot::Vacant => {
                    *slot = HookSlot::Effect(EffectHook::default());
                    true
                }
                HookSlot::Effect(effect_slot) => effect_slot
                    .deps
                    .as_ref()
                    .and_then(|value| value.downcast_ref::<D>())
                    .map(|existing| existing != &deps)
                    .unwrap_or(true),
                _ => panic!("use_effect hook order mismatch"),
            }
        };

        if should_run {
            self.pending_effects.push(EffectInvocation {
                component_id: self.component_id.clone(),
                slot_index: index,
                deps: Box::new(deps),
                task: Box::new(effect),
            });
        }
    }

    /// Binds a field to this component. The text and focus live as long as
    /// the component stays mounted; `init` only runs on first mount.
    pub fn use_prompt_field<F>(&mut self, id: impl Into<String>, init: F) -> FieldHandle
    where
        F: FnOnce() -> String,
    {
        let index = self.next_index();
        let id = id.into();
        let dispatcher = self.dispatcher.clone();
        let mut store = self.store.lock();
        let slot = store.slot(index);
        match slot {
            HookSlot::Vacant => {
                let handle = FieldHandle::new(id, init(), dispatcher);
                *slot = HookSlot::Field(FieldEntry::new(handle.clone()));
                handle
            }
            HookSlot::Field(entry) => entry.handle(&id),
            _ => panic!("use_prompt_field hook order mismatch"),
        }
    }

    /// Overrides prompt configuration for everything this component renders.
    pub fn provide_environment(&mut self, overrides: PromptOverrides) {
        self.provided.push(overrides);
    }

    /// The prompt configuration inherited here, including layers this
    /// component provided itself.
    pub fn environment(&self) -> PromptConfig {
        self.environment.resolve_with(&self.provided)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn styles(&self) -> &Stylesheet {
        &self.styles
    }

    pub(crate) fn take_effects(&mut self) -> Vec<EffectInvocation> {
        std::mem::take(&mut self.pending_effects)
    }

    pub(crate) fn take_environment(&mut self) -> Vec<PromptOverrides> {
        std::mem::take(&mut self.provided)
    }

    fn next_index(&mut self) -> usize {
        let current = self.hook_cursor;
        self.hook_cursor += 1;
        current
    }
}
