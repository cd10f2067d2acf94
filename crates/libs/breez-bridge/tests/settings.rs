use std::sync::Arc;

use breez_bridge::{Bridge, BridgeError, BridgeSettings, ConfigError, HostMap};
use test_support::MockCore;

#[test]
fn bridge_runs_on_settings_loaded_from_toml() {
    let settings = BridgeSettings::from_toml(
        r#"
        worker_threads = 1
        max_blocking_threads = 2
        thread_name = "wallet-call"
        shutdown_grace_ms = 250
        "#,
    )
    .expect("settings");
    assert_eq!(settings.event_thread_name, BridgeSettings::default().event_thread_name);

    let core = Arc::new(MockCore::new());
    let bridge = Bridge::new(core.clone(), settings).expect("bridge starts");
    let args = test_support::fixtures::valid_args("mnemonicToSeed").expect("fixture");
    let seed = bridge.call("mnemonicToSeed", args).wait().expect("seed");
    assert_eq!(seed.as_bytes().map(<[u8]>::len), Some(64));
    let err = bridge.call("sync", HostMap::new()).wait().expect_err("not connected");
    assert_eq!(err.kind(), "NotConnected");
}

#[test]
fn unusable_settings_fail_fast() {
    let err = BridgeSettings::from_toml("worker_threads = 0").expect_err("zero workers");
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let settings = BridgeSettings { thread_name: String::new(), ..BridgeSettings::default() };
    let err = Bridge::new(Arc::new(MockCore::new()), settings).err().expect("empty name");
    assert!(matches!(err, BridgeError::Runtime { .. }));
}
