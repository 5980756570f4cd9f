//! Background tasks feeding the app loop: terminal input, the tick that
//! advances prompt transitions and the cursor blink, and the Ctrl-C watcher.

use std::time::Duration;

use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_stream::wrappers::IntervalStream;
use tracing::{trace, warn};

use crate::events::{FrameworkEvent, map_terminal_event};

use super::dispatcher::AppMessage;

/// Spawns the tasks that feed the app loop. Tests swap in a scripted
/// driver to run the loop without a terminal.
pub trait RuntimeDriver: Send + Sync {
    fn spawn_terminal_events(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()>;
    fn spawn_tick_loop(&self, tx: mpsc::Sender<AppMessage>, rate: Duration) -> JoinHandle<()>;
    fn spawn_shutdown_watcher(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()>;
}

#[derive(Default)]
pub struct DefaultRuntimeDriver;

impl RuntimeDriver for DefaultRuntimeDriver {
    fn spawn_terminal_events(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut events = EventStream::new();
            while let Some(event) = events.next().await {
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        warn!(error = ?err, "terminal event stream failed");
                        break;
                    }
                };
                let Some(event) = map_terminal_event(event) else {
                    continue;
                };
                let shutdown = event.is_shutdown();
                if !forward(&tx, AppMessage::ExternalEvent(event)).await {
                    break;
                }
                if shutdown {
                    forward(&tx, AppMessage::Shutdown).await;
                    break;
                }
            }
            trace!("terminal input task stopped");
        })
    }

    /// Ticks missed during a slow frame are dropped, not replayed.
    fn spawn_tick_loop(&self, tx: mpsc::Sender<AppMessage>, rate: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut timer = interval(rate);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut ticks = IntervalStream::new(timer);
            while ticks.next().await.is_some() {
                if !forward(&tx, AppMessage::ExternalEvent(FrameworkEvent::Tick)).await {
                    break;
                }
            }
            trace!("tick loop stopped");
        })
    }

    fn spawn_shutdown_watcher(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                forward(&tx, AppMessage::Shutdown).await;
            }
        })
    }
}

/// False once the app loop has gone away.
async fn forward(tx: &mpsc::Sender<AppMessage>, message: AppMessage) -> bool {
    tx.send(message).await.is_ok()
}
