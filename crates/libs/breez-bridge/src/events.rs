//! Relays core events to the host listener.
//!
//! Events are decoded on the core's thread and queued; a dedicated thread
//! delivers them one at a time. Each queued event is stamped with the
//! listener generation current at emission and is delivered only while that
//! generation is still registered.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc as std_mpsc, Arc, Mutex, OnceLock};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tokio::sync::mpsc;

use crate::backend::CoreEventSink;
use crate::config::BridgeSettings;
use crate::error::BridgeError;
use crate::marshal::unmarshal;
use crate::types::{
    BackupFailedData, InvoicePaidDetails, Payment, PaymentFailedData, ReverseSwapInfo, SwapInfo,
};
use crate::value::HostValue;

/// Wire discriminants of every event the bridge understands.
pub const EVENT_TYPES: &[&str] = &[
    "newBlock",
    "invoicePaid",
    "synced",
    "paymentSucceed",
    "paymentFailed",
    "backupStarted",
    "backupSucceeded",
    "backupFailed",
    "swapUpdated",
    "reverseSwapUpdated",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BreezEvent {
    NewBlock { block: u32 },
    InvoicePaid { details: InvoicePaidDetails },
    Synced,
    PaymentSucceed { details: Payment },
    PaymentFailed { details: PaymentFailedData },
    BackupStarted,
    BackupSucceeded,
    BackupFailed { details: BackupFailedData },
    SwapUpdated { details: SwapInfo },
    ReverseSwapUpdated { details: ReverseSwapInfo },
}

impl BreezEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NewBlock { .. } => "newBlock",
            Self::InvoicePaid { .. } => "invoicePaid",
            Self::Synced => "synced",
            Self::PaymentSucceed { .. } => "paymentSucceed",
            Self::PaymentFailed { .. } => "paymentFailed",
            Self::BackupStarted => "backupStarted",
            Self::BackupSucceeded => "backupSucceeded",
            Self::BackupFailed { .. } => "backupFailed",
            Self::SwapUpdated { .. } => "swapUpdated",
            Self::ReverseSwapUpdated { .. } => "reverseSwapUpdated",
        }
    }

    /// Decodes the core's wire form.
    pub fn from_wire(wire: JsonValue) -> Result<Self, BridgeError> {
        let variant = match wire.get("type") {
            Some(JsonValue::String(variant)) => variant.clone(),
            _ => {
                return Err(BridgeError::MalformedEvent {
                    detail: "missing 'type' discriminant".to_owned(),
                })
            }
        };
        if !EVENT_TYPES.contains(&variant.as_str()) {
            return Err(BridgeError::UnknownEvent { variant });
        }
        HostValue::from(wire)
            .decode()
            .map_err(|err| BridgeError::MalformedEvent { detail: format!("{variant}: {err}") })
    }

    /// The wire form a core emits for this event.
    pub fn to_wire(&self) -> Result<JsonValue, BridgeError> {
        Ok(unmarshal(self)?.to_json())
    }
}

/// Host-side receiver of bridge events.
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: HostValue);
}

impl<F> EventListener for F
where
    F: Fn(HostValue) + Send + Sync,
{
    fn on_event(&self, event: HostValue) {
        self(event)
    }
}

enum Envelope {
    Event { generation: u64, event: BreezEvent },
    Stop,
}

#[derive(Default)]
struct ListenerSlot {
    generation: u64,
    listener: Option<Arc<dyn EventListener>>,
}

#[derive(Default)]
struct Shared {
    slot: Mutex<ListenerSlot>,
    // Held for the duration of one listener callback.
    delivery: Mutex<()>,
    worker: OnceLock<ThreadId>,
}

impl Shared {
    fn on_worker_thread(&self) -> bool {
        self.worker.get() == Some(&thread::current().id())
    }

    fn wait_for_inflight(&self) {
        if self.on_worker_thread() {
            return;
        }
        drop(self.delivery.lock().expect("delivery gate mutex poisoned"));
    }

    fn deliver(&self, generation: u64, event: BreezEvent) {
        let _gate = self.delivery.lock().expect("delivery gate mutex poisoned");
        let listener = {
            let slot = self.slot.lock().expect("listener slot mutex poisoned");
            if slot.generation == generation {
                slot.listener.clone()
            } else {
                None
            }
        };
        let Some(listener) = listener else {
            log::debug!("dropping {} event: listener changed before delivery", event.kind());
            return;
        };
        let kind = event.kind();
        let value = match unmarshal(&event) {
            Ok(value) => value,
            Err(err) => {
                log::error!("cannot encode {kind} event for host: {err}");
                return;
            }
        };
        if panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(value))).is_err() {
            log::error!("event listener panicked while handling {kind}");
        }
    }
}

/// The handle given to the core. Cheap to clone, safe to call from any thread.
#[derive(Clone)]
pub struct EventSink {
    shared: Arc<Shared>,
    queue: mpsc::UnboundedSender<Envelope>,
}

impl EventSink {
    fn enqueue(&self, event: BreezEvent) {
        let generation = {
            let slot = self.shared.slot.lock().expect("listener slot mutex poisoned");
            if slot.listener.is_none() {
                log::debug!("dropping {} event: no listener registered", event.kind());
                return;
            }
            slot.generation
        };
        if self.queue.send(Envelope::Event { generation, event }).is_err() {
            log::warn!("event arrived after the bridge shut down; dropped");
        }
    }
}

impl CoreEventSink for EventSink {
    fn on_event(&self, event: JsonValue) -> Result<(), BridgeError> {
        match BreezEvent::from_wire(event) {
            Ok(event) => {
                self.enqueue(event);
                Ok(())
            }
            Err(err) => {
                log::error!("rejecting core event: {err}");
                Err(err)
            }
        }
    }
}

pub struct EventBridge {
    sink: Arc<EventSink>,
    worker: Mutex<Option<JoinHandle<()>>>,
    stopped: Mutex<Option<std_mpsc::Receiver<()>>>,
    grace: Duration,
}

impl EventBridge {
    pub fn start(settings: &BridgeSettings) -> Result<Self, BridgeError> {
        let shared = Arc::new(Shared::default());
        let (queue, receiver) = mpsc::unbounded_channel();
        let (stopped_tx, stopped_rx) = std_mpsc::channel();
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name(settings.event_thread_name.clone())
            .spawn(move || {
                let _ = worker_shared.worker.set(thread::current().id());
                run_delivery(&worker_shared, receiver);
                let _ = stopped_tx.send(());
            })
            .map_err(|err| BridgeError::Runtime {
                detail: format!("cannot spawn event worker: {err}"),
            })?;
        Ok(Self {
            sink: Arc::new(EventSink { shared, queue }),
            worker: Mutex::new(Some(worker)),
            stopped: Mutex::new(Some(stopped_rx)),
            grace: settings.shutdown_grace(),
        })
    }

    /// Installs `listener`, replacing any previous one.
    ///
    /// Returns once the previous listener can no longer be called.
    pub fn register(&self, listener: Arc<dyn EventListener>) {
        self.swap(Some(listener));
    }

    /// Removes the listener. Pending events are dropped.
    pub fn unregister(&self) {
        self.swap(None);
    }

    pub fn has_listener(&self) -> bool {
        self.sink.shared.slot.lock().expect("listener slot mutex poisoned").listener.is_some()
    }

    pub fn sink(&self) -> Arc<dyn CoreEventSink> {
        self.sink.clone()
    }

    /// Entry point for core events; same as calling the sink.
    pub fn on_core_event(&self, wire: JsonValue) -> Result<(), BridgeError> {
        self.sink.on_event(wire)
    }

    #[cfg(test)]
    fn generation(&self) -> u64 {
        self.sink.shared.slot.lock().expect("listener slot mutex poisoned").generation
    }

    fn swap(&self, listener: Option<Arc<dyn EventListener>>) {
        let shared = &self.sink.shared;
        let previous = {
            let mut slot = shared.slot.lock().expect("listener slot mutex poisoned");
            slot.generation = slot.generation.wrapping_add(1);
            std::mem::replace(&mut slot.listener, listener)
        };
        shared.wait_for_inflight();
        drop(previous);
    }
}

impl Drop for EventBridge {
    fn drop(&mut self) {
        let _ = self.sink.queue.send(Envelope::Stop);
        if self.sink.shared.on_worker_thread() {
            log::warn!("event bridge dropped from its own listener; worker detached");
            return;
        }
        let stopped = self.stopped.lock().expect("stop signal mutex poisoned").take();
        let drained = stopped.map(|rx| rx.recv_timeout(self.grace).is_ok()).unwrap_or(false);
        let worker = self.worker.lock().expect("worker handle mutex poisoned").take();
        match worker {
            Some(handle) if drained => {
                let _ = handle.join();
            }
            Some(_) => log::warn!("event worker did not stop within {:?}; detached", self.grace),
            None => {}
        }
    }
}

fn run_delivery(shared: &Shared, mut receiver: mpsc::UnboundedReceiver<Envelope>) {
    while let Some(envelope) = receiver.blocking_recv() {
        match envelope {
            Envelope::Event { generation, event } => shared.deliver(generation, event),
            Envelope::Stop => break,
        }
    }
    log::debug!("event worker stopped");
}
