use std::sync::Arc;

use crate::events::{EventBus, FrameworkEvent};
use crate::field::Fields;
use crate::interactions::ButtonRegistry;
use crate::prompt::AccessibleField;
use crate::styles::Stylesheet;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::trace;

/// Shared entry point back into the runtime: render requests, the event bus
/// and the registries that map screen positions to buttons and fields.
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<AppMessage>,
    event_bus: EventBus,
    buttons: ButtonRegistry,
    fields: Fields,
    accessibility: Arc<RwLock<Vec<AccessibleField>>>,
}

impl Dispatcher {
    pub(crate) fn new(tx: mpsc::Sender<AppMessage>, event_bus: EventBus) -> Self {
        Self {
            tx,
            event_bus,
            buttons: ButtonRegistry::new(),
            fields: Fields::new(),
            accessibility: Arc::default(),
        }
    }

    pub fn request_render(&self) {
        match self.tx.try_send(AppMessage::RequestRender) {
            Ok(_) => trace!("render request queued"),
            Err(TrySendError::Full(_)) => {
                trace!("render request dropped because channel is full")
            }
            Err(TrySendError::Closed(_)) => trace!("render request dropped because channel closed"),
        }
    }

    pub fn events(&self) -> EventBus {
        self.event_bus.clone()
    }

    pub fn buttons(&self) -> &ButtonRegistry {
        &self.buttons
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// One node per field of the last resolved frame, in tree order.
    pub fn accessibility(&self) -> Vec<AccessibleField> {
        self.accessibility.read().clone()
    }

    /// Returns false when the frame exposes the same nodes as the last one.
    pub(crate) fn publish_accessibility(&self, nodes: Vec<AccessibleField>) -> bool {
        let mut current = self.accessibility.write();
        if *current == nodes {
            return false;
        }
        *current = nodes;
        true
    }
}

#[derive(Clone, Debug)]
pub enum AppMessage {
    RequestRender,
    ExternalEvent(FrameworkEvent),
    Shutdown,
    StylesheetUpdated(Arc<Stylesheet>),
}
