use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use breez_bridge::{EventListener, HostValue};

/// Listener that records every delivered event for later inspection.
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<HostValue>>,
    arrived: Condvar,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HostValue> {
        self.events.lock().expect("events mutex poisoned").clone()
    }

    /// The `type` of each recorded event, in delivery order.
    pub fn kinds(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|event| event.get("type").and_then(HostValue::as_str).map(str::to_owned))
            .collect()
    }

    /// Blocks until at least `count` events arrived or `timeout` elapsed.
    pub fn wait_for(&self, count: usize, timeout: Duration) -> Vec<HostValue> {
        let deadline = Instant::now() + timeout;
        let mut events = self.events.lock().expect("events mutex poisoned");
        while events.len() < count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            events = self.arrived.wait_timeout(events, remaining).expect("events mutex poisoned").0;
        }
        events.clone()
    }
}

impl EventListener for RecordingListener {
    fn on_event(&self, event: HostValue) {
        self.events.lock().expect("events mutex poisoned").push(event);
        self.arrived.notify_all();
    }
}
