use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::field::FieldHandle;
use crate::runtime::{ComponentId, Dispatcher};

pub(crate) type AnySlot = dyn Any + Send + Sync;
pub type Cleanup = Box<dyn FnOnce() + Send + Sync>;

/// Hook storage for every mounted component.
#[derive(Default)]
pub struct HookRegistry {
    stores: Mutex<HashMap<ComponentId, Arc<Mutex<HookStore>>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn store_for(&self, id: &ComponentId) -> Arc<Mutex<HookStore>> {
        let mut guard = self.stores.lock();
        guard
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(HookStore::default())))
            .clone()
    }

    /// Unmounts every component missing from `live`: effect cleanups run and
    /// field bindings are released.
    pub fn prune(&self, live: &HashSet<ComponentId>) {
        let mut guard = self.stores.lock();
        guard.retain(|id, store| {
            if live.contains(id) {
                true
            } else {
                trace!(component = id.name(), path = %id, "unmounting component");
                store.lock().drain();
                false
            }
        });
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.stores.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.stores.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn with_effect_slot<F, R>(&self, id: &ComponentId, slot_index: usize, f: F) -> R
    where
        F: FnOnce(&mut EffectHook) -> R,
    {
        let store = self.store_for(id);
        let mut guard = store.lock();
        let slot = guard.slot(slot_index);
        if matches!(slot, HookSlot::Vacant) {
            *slot = HookSlot::Effect(EffectHook::default());
        }
        match slot {
            HookSlot::Effect(effect) => f(effect),
            _ => panic!("effect slot type mismatch"),
        }
    }
}

#[derive(Default)]
pub(crate) struct HookStore {
    slots: Vec<HookSlot>,
}

impl HookStore {
    pub(crate) fn slot(&mut self, index: usize) -> &mut HookSlot {
        while self.slots.len() <= index {
            self.slots.push(HookSlot::Vacant);
        }
        &mut self.slots[index]
    }

    pub(crate) fn drain(&mut self) {
        for slot in &mut self.slots {
            match slot {
                HookSlot::Effect(effect) => {
                    if let Some(cleanup) = effect.cleanup.take() {
                        cleanup();
                    }
                }
                HookSlot::Field(entry) => entry.release(),
                _ => {}
            }
        }
        self.slots.clear();
    }
}

#[derive(Default)]
pub(crate) enum HookSlot {
    #[default]
    Vacant,
    State(Box<AnySlot>),
    Effect(EffectHook),
    Field(FieldEntry),
}

#[derive(Default)]
pub struct EffectHook {
    pub(crate) deps: Option<Box<AnySlot>>,
    cleanup: Option<Cleanup>,
}

impl EffectHook {
    pub(crate) fn take_cleanup(&mut self) -> Option<Cleanup> {
        self.cleanup.take()
    }

    pub(crate) fn set_cleanup(&mut self, cleanup: Option<Cleanup>) {
        self.cleanup = cleanup;
    }

    pub(crate) fn set_deps(&mut self, deps: Box<AnySlot>) {
        self.deps = Some(deps);
    }
}

pub struct EffectInvocation {
    pub component_id: ComponentId,
    pub slot_index: usize,
    pub deps: Box<AnySlot>,
    pub task: Box<dyn FnOnce(Dispatcher) -> Option<Cleanup> + Send + Sync>,
}

pub(crate) struct FieldEntry {
    handle: Option<FieldHandle>,
}

impl FieldEntry {
    pub(crate) fn new(handle: FieldHandle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    pub(crate) fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.release();
        }
    }

    pub(crate) fn handle(&self, id: &str) -> FieldHandle {
        match &self.handle {
            Some(handle) if handle.id() == id => handle.clone(),
            Some(handle) => panic!(
                "use_prompt_field hook ID mismatch: expected {}, received {}",
                handle.id(),
                id
            ),
            None => panic!("use_prompt_field called on a released field {id}"),
        }
    }
}
