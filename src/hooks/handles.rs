use std::sync::Arc;

use parking_lot::Mutex;

use crate::runtime::Dispatcher;

#[derive(Clone)]
pub struct StateHandle<T: Send + 'static> {
    pub(crate) shared: Arc<Mutex<T>>,
    dispatcher: Dispatcher,
}

impl<T: Send + 'static> StateHandle<T> {
    pub(crate) fn new(shared: Arc<Mutex<T>>, dispatcher: Dispatcher) -> Self {
        Self { shared, dispatcher }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.shared.lock().clone()
    }

    pub fn set(&self, next: T) {
        *self.shared.lock() = next;
        self.dispatcher.request_render();
    }

    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut *self.shared.lock());
        self.dispatcher.request_render();
    }
}
