use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use breez_bridge::types::BackupFailedData;
use breez_bridge::{BreezEvent, Bridge, BridgeError, BridgeSettings, HostMap, HostValue};
use test_support::{fixtures, MockCore, RecordingListener};

const WAIT: Duration = Duration::from_secs(5);

fn connected() -> (Arc<MockCore>, Bridge) {
    let core = Arc::new(MockCore::new());
    let bridge = Bridge::new(core.clone(), BridgeSettings::default()).expect("bridge starts");
    bridge.connect(fixtures::connect_args()).wait().expect("connect");
    (core, bridge)
}

#[test]
fn events_reach_the_listener_in_emission_order() {
    let (core, bridge) = connected();
    let listener = Arc::new(RecordingListener::new());
    bridge.subscribe(listener.clone());

    for block in 0..100u32 {
        core.emit(&BreezEvent::NewBlock { block }).expect("emit");
    }
    let events = listener.wait_for(100, WAIT);
    let blocks: Vec<_> =
        events.iter().filter_map(|event| event.get("block").and_then(HostValue::as_u64)).collect();
    assert_eq!(blocks, (0..100).collect::<Vec<u64>>());
}

#[test]
fn core_driven_events_follow_the_calls_that_raise_them() {
    let (_core, bridge) = connected();
    let listener = Arc::new(RecordingListener::new());
    bridge.subscribe(listener.clone());

    bridge.call("backup", HostMap::new()).wait().expect("backup");
    bridge.call("sync", HostMap::new()).wait().expect("sync");
    listener.wait_for(3, WAIT);
    assert_eq!(listener.kinds(), vec!["backupStarted", "backupSucceeded", "synced"]);
}

#[test]
fn payment_events_carry_the_full_payment() {
    let (_core, bridge) = connected();
    let listener = Arc::new(RecordingListener::new());
    bridge.subscribe(listener.clone());

    let sent = bridge
        .call("sendPayment", fixtures::valid_args("sendPayment").expect("fixture"))
        .wait()
        .expect("sent");
    let events = listener.wait_for(1, WAIT);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].get("type"), Some(&HostValue::from("paymentSucceed")));
    assert_eq!(events[0].get("details"), sent.get("payment"));
}

#[test]
fn replacing_the_listener_redirects_later_events() {
    let (core, bridge) = connected();
    let first = Arc::new(RecordingListener::new());
    let second = Arc::new(RecordingListener::new());

    bridge.subscribe(first.clone());
    core.emit(&BreezEvent::NewBlock { block: 1 }).expect("emit");
    first.wait_for(1, WAIT);

    bridge.subscribe(second.clone());
    core.emit(&BreezEvent::NewBlock { block: 2 }).expect("emit");
    second.wait_for(1, WAIT);

    assert_eq!(first.events().len(), 1);
    assert_eq!(second.events().len(), 1);
    assert_eq!(second.events()[0].get("block").and_then(HostValue::as_u64), Some(2));
}

#[test]
fn unsubscribed_listener_is_never_called_again() {
    let (core, bridge) = connected();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    bridge.subscribe(Arc::new(move |_event: HostValue| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    bridge.unsubscribe();

    let after = calls.load(Ordering::SeqCst);
    for block in 0..20 {
        core.emit(&BreezEvent::NewBlock { block }).expect("emit without listener");
    }

    // Anything still queued would be delivered ahead of this event.
    let fresh = Arc::new(RecordingListener::new());
    bridge.subscribe(fresh.clone());
    core.emit(&BreezEvent::Synced).expect("emit");
    fresh.wait_for(1, WAIT);

    assert_eq!(calls.load(Ordering::SeqCst), after);
    assert_eq!(fresh.kinds(), vec!["synced"]);
}

#[test]
fn unknown_or_malformed_events_are_rejected_back_to_the_core() {
    let (core, bridge) = connected();
    let listener = Arc::new(RecordingListener::new());
    bridge.subscribe(listener.clone());

    let err = core.emit_wire(fixtures::raw_event("channelJammed")).expect_err("unknown");
    assert_eq!(err, BridgeError::UnknownEvent { variant: "channelJammed".to_owned() });

    let err = core.emit_wire(fixtures::raw_event("newBlock")).expect_err("no block");
    assert!(matches!(err, BridgeError::MalformedEvent { .. }));

    core.emit(&BreezEvent::BackupFailed {
        details: BackupFailedData { error: "disk full".to_owned() },
    })
    .expect("emit");
    let events = listener.wait_for(1, WAIT);
    assert_eq!(listener.kinds(), vec!["backupFailed"]);
    let details = events[0].get("details").expect("details");
    assert_eq!(details.get("error"), Some(&HostValue::from("disk full")));
}

#[test]
fn dropping_the_bridge_with_a_listener_does_not_hang() {
    let (core, bridge) = connected();
    let listener = Arc::new(RecordingListener::new());
    bridge.subscribe(listener.clone());
    core.emit(&BreezEvent::Synced).expect("emit");
    listener.wait_for(1, WAIT);
    drop(bridge);

    let err = core.emit(&BreezEvent::Synced);
    assert!(err.is_ok(), "events after shutdown are dropped silently");
}

#[test]
fn swap_operations_raise_swap_events() {
    let (_core, bridge) = connected();
    let listener = Arc::new(RecordingListener::new());
    bridge.subscribe(listener.clone());

    let swap = bridge.call("receiveOnchain", HostMap::new()).wait().expect("swap");
    let args = fixtures::valid_args("sendOnchain").expect("fixture");
    let sent = bridge.call("sendOnchain", args).wait().expect("reverse swap");
    let events = listener.wait_for(2, WAIT);
    assert_eq!(listener.kinds(), vec!["swapUpdated", "reverseSwapUpdated"]);
    assert_eq!(events[0].get("details"), Some(&swap));
    assert_eq!(events[1].get("details"), sent.get("reverseSwapInfo"));

    bridge.call("receiveOnchain", HostMap::new()).wait().expect("same swap");
    bridge.call("sync", HostMap::new()).wait().expect("sync");
    listener.wait_for(3, WAIT);
    assert_eq!(listener.kinds(), vec!["swapUpdated", "reverseSwapUpdated", "synced"]);
}
