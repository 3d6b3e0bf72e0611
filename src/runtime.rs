//! Event loop that drives a [`Gallery`] from platform signals.
//!
//! The runtime owns the gallery and processes one command at a time from an
//! unbounded channel. Timers, idle ticks, location requests and network
//! change notifications run as small tokio tasks that only hold a sender and
//! feed their result back into the same channel.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::{mpsc, oneshot};

use crate::gallery::{Followup, Gallery, GalleryEvent, GallerySnapshot};
use crate::platform::geolocation::LocationError;
use crate::platform::idle::IdleSource;
use crate::platform::PlatformApi;
use crate::rendering::paint::DrawingSurface;
use crate::{Error, Result};

enum Command {
    Event(GalleryEvent),
    Snapshot(oneshot::Sender<GallerySnapshot>),
}

/// Cloneable sender side of a running gallery.
#[derive(Clone)]
pub struct GalleryHandle {
    cmd_tx: mpsc::UnboundedSender<Command>,
}

impl GalleryHandle {
    /// Queue an event for the gallery
    pub fn send(&self, event: GalleryEvent) -> Result<()> {
        self.cmd_tx
            .send(Command::Event(event))
            .map_err(|_| Error::Other("gallery runtime has stopped".into()))
    }

    /// Ask for another batch of photos
    pub fn generate(&self) -> Result<()> {
        self.send(GalleryEvent::GenerateRequested)
    }

    pub fn scroll_to(&self, offset_y: f64) -> Result<()> {
        self.send(GalleryEvent::Scrolled { offset_y })
    }

    pub fn request_location(&self) -> Result<()> {
        self.send(GalleryEvent::LocationRequested)
    }

    pub fn toggle_optimization(&self) -> Result<()> {
        self.send(GalleryEvent::ToggleOptimization)
    }

    /// Snapshot the gallery after every event queued before this call
    pub async fn snapshot(&self) -> Result<GallerySnapshot> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Snapshot(tx))
            .map_err(|_| Error::Other("gallery runtime has stopped".into()))?;
        rx.await
            .map_err(|e| Error::Other(format!("Snapshot canceled: {}", e)))
    }

    /// Stop the loop; `GalleryRuntime::run` then returns the gallery
    pub fn shutdown(&self) -> Result<()> {
        self.send(GalleryEvent::Shutdown)
    }
}

pub struct GalleryRuntime<S> {
    gallery: Gallery<S>,
    platform: Arc<dyn PlatformApi>,
    cmd_tx: mpsc::UnboundedSender<Command>,
    cmd_rx: mpsc::UnboundedReceiver<Command>,
}

impl<S: DrawingSurface> GalleryRuntime<S> {
    pub fn new(gallery: Gallery<S>, platform: Arc<dyn PlatformApi>) -> (Self, GalleryHandle) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let handle = GalleryHandle { cmd_tx: cmd_tx.clone() };
        let runtime = Self {
            gallery,
            platform,
            cmd_tx,
            cmd_rx,
        };
        (runtime, handle)
    }

    /// Run until a `Shutdown` event arrives and hand the gallery back.
    ///
    /// Must be called inside a tokio runtime with the time driver enabled.
    pub async fn run(mut self) -> Gallery<S> {
        match self.platform.network_information() {
            Some(network) => {
                let mut changes = network.subscribe();
                let initial = *changes.borrow_and_update();
                self.dispatch(GalleryEvent::NetworkChanged(Some(initial)));

                let tx = self.cmd_tx.clone();
                tokio::spawn(async move {
                    loop {
                        tokio::select! {
                            changed = changes.changed() => {
                                if changed.is_err() {
                                    break;
                                }
                                let snapshot = *changes.borrow_and_update();
                                if tx.send(Command::Event(GalleryEvent::NetworkChanged(Some(snapshot)))).is_err() {
                                    break;
                                }
                            }
                            // runtime stopped
                            _ = tx.closed() => break,
                        }
                    }
                    debug!("network change forwarding stopped");
                });
            }
            None => self.dispatch(GalleryEvent::NetworkChanged(None)),
        }

        self.dispatch(GalleryEvent::Loaded);

        while let Some(cmd) = self.cmd_rx.recv().await {
            match cmd {
                Command::Event(GalleryEvent::Shutdown) => {
                    info!("gallery runtime shutting down with {} photos", self.gallery.catalog().len());
                    break;
                }
                Command::Event(event) => self.dispatch(event),
                Command::Snapshot(resp) => {
                    let _ = resp.send(self.gallery.snapshot());
                }
            }
        }
        self.gallery
    }

    fn dispatch(&mut self, event: GalleryEvent) {
        debug!("dispatch {:?}", event);
        for followup in self.gallery.handle(event) {
            self.schedule(followup);
        }
    }

    fn schedule(&self, followup: Followup) {
        let tx = self.cmd_tx.clone();
        match followup {
            Followup::After(delay, event) => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Command::Event(event));
                });
            }
            Followup::Idle { initial } => {
                let source = self.gallery.config().idle_source;
                let interval = Duration::from_millis(self.gallery.config().idle_interval_ms);
                let delay = if initial { source.first_delay(interval) } else { interval };
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if source == IdleSource::IdleCallback {
                        // wait for the loop to drain what is already queued
                        tokio::task::yield_now().await;
                    }
                    let _ = tx.send(Command::Event(GalleryEvent::IdleTick(source.deadline())));
                });
            }
            Followup::RequestLocation(options) => {
                let provider = self.platform.geolocation();
                tokio::spawn(async move {
                    let outcome = match provider {
                        None => Err(LocationError::Unsupported),
                        Some(p) => tokio::time::timeout(options.timeout, p.current_position(options))
                            .await
                            .unwrap_or(Err(LocationError::Timeout)),
                    };
                    let _ = tx.send(Command::Event(GalleryEvent::LocationResolved(outcome)));
                });
            }
        }
    }
}
