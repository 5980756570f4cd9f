
use tokio::sync::mpsc;

use crate::events::EventBus;
use crate::runtime::{AppMessage, Dispatcher};

fn test_dispatcher() -> (Dispatcher, mpsc::Receiver<AppMessage>) {
    let (tx, rx) = mpsc::channel(64);
    (Dispatcher::new(tx, EventBus::new(8)), rx)
}

fn drain_renders(rx: &mut mpsc::Receiver<AppMessage>) -> usize {
    let mut count = 0;
    while let Ok(message) = rx.try_recv() {
        if matches!(message, AppMessage::RequestRender) {
            count += 1;
        }
    }
    count
}
