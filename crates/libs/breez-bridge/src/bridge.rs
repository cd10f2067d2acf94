use std::sync::{Arc, Mutex, RwLock};

use tokio::runtime::Handle;

use crate::backend::{CoreApi, CoreEventSink, CoreSession};
use crate::config::BridgeSettings;
use crate::dispatcher::{CallHandle, CallResult, Dispatcher, Job};
use crate::error::{BridgeError, CoreError, HostError, ValidationError};
use crate::events::{EventBridge, EventListener};
use crate::operations::{self, Operation, Prepared};
use crate::types::ConnectRequest;
use crate::value::{HostMap, HostValue};

type SessionSlot = Arc<RwLock<Option<Arc<dyn CoreSession>>>>;

/// Host-facing entry point: validates arguments, runs core calls off the
/// caller's thread and relays core events to the registered listener.
pub struct Bridge {
    api: Arc<dyn CoreApi>,
    session: SessionSlot,
    // Serializes connect and disconnect.
    connecting: Arc<Mutex<()>>,
    events: EventBridge,
    dispatcher: Dispatcher,
}

impl Bridge {
    /// Creates a bridge with its own runtime built from `settings`.
    pub fn new(api: Arc<dyn CoreApi>, settings: BridgeSettings) -> Result<Self, BridgeError> {
        check_settings(&settings)?;
        let dispatcher = Dispatcher::start(&settings)?;
        Self::assemble(api, &settings, dispatcher)
    }

    /// Creates a bridge that runs calls on an existing runtime.
    pub fn with_runtime(
        api: Arc<dyn CoreApi>,
        settings: BridgeSettings,
        handle: Handle,
    ) -> Result<Self, BridgeError> {
        check_settings(&settings)?;
        Self::assemble(api, &settings, Dispatcher::on_handle(handle))
    }

    fn assemble(
        api: Arc<dyn CoreApi>,
        settings: &BridgeSettings,
        dispatcher: Dispatcher,
    ) -> Result<Self, BridgeError> {
        Ok(Self {
            api,
            session: Arc::new(RwLock::new(None)),
            connecting: Arc::new(Mutex::new(())),
            events: EventBridge::start(settings)?,
            dispatcher,
        })
    }

    /// Every operation accepted by [`Bridge::call`].
    pub fn operations() -> impl Iterator<Item = &'static Operation> {
        operations::OPERATIONS.iter()
    }

    /// Validates `args` for `operation` without reaching the core and returns
    /// them in canonical form.
    pub fn check(operation: &str, args: &HostMap) -> Result<HostMap, HostError> {
        let found = operations::find(operation)
            .ok_or_else(|| ValidationError::unknown_operation(operation))?;
        Ok(found.canonical_args(args)?)
    }

    pub fn is_connected(&self) -> bool {
        self.session.read().expect("session slot lock poisoned").is_some()
    }

    /// Starts a call. Argument validation happens before this returns; a
    /// rejected call completes immediately without reaching the core.
    pub fn call(&self, operation: &str, args: HostMap) -> CallHandle {
        match self.prepare(operation, &args) {
            Ok((name, job)) => self.dispatcher.dispatch(name, job),
            Err(err) => CallHandle::ready(Err(err)),
        }
    }

    /// Callback flavour of [`Bridge::call`]. `callback` runs exactly once,
    /// on the calling thread when arguments are rejected and on a worker
    /// otherwise.
    pub fn call_with<F>(&self, operation: &str, args: HostMap, callback: F)
    where
        F: FnOnce(CallResult) + Send + 'static,
    {
        match self.prepare(operation, &args) {
            Ok((name, job)) => self.dispatcher.spawn(name, job, callback),
            Err(err) => callback(Err(err)),
        }
    }

    pub fn connect(&self, args: HostMap) -> CallHandle {
        self.call("connect", args)
    }

    pub fn disconnect(&self) -> CallHandle {
        self.call("disconnect", HostMap::new())
    }

    /// Installs the event listener, replacing the previous one.
    pub fn subscribe(&self, listener: Arc<dyn EventListener>) {
        self.events.register(listener);
    }

    pub fn unsubscribe(&self) {
        self.events.unregister();
    }

    /// The sink handed to the core on connect.
    pub fn event_sink(&self) -> Arc<dyn CoreEventSink> {
        self.events.sink()
    }

    fn prepare(&self, name: &str, args: &HostMap) -> Result<(&'static str, Job), HostError> {
        let operation = operations::find(name).ok_or_else(|| {
            log::debug!("rejecting unknown operation '{name}'");
            ValidationError::unknown_operation(name)
        })?;
        let prepared = (operation.prepare)(args).map_err(|err| {
            log::debug!("{name}: {err}");
            HostError::from(err)
        })?;
        let job: Job = match prepared {
            Prepared::Connect(req) => self.connect_job(req),
            Prepared::Disconnect => self.disconnect_job(),
            Prepared::Api(call) => {
                let api = Arc::clone(&self.api);
                Box::new(move || call(api.as_ref()))
            }
            Prepared::Session(call) => {
                let session = self.current_session()?;
                Box::new(move || call(session.as_ref()))
            }
        };
        Ok((operation.name, job))
    }

    fn current_session(&self) -> Result<Arc<dyn CoreSession>, HostError> {
        self.session
            .read()
            .expect("session slot lock poisoned")
            .clone()
            .ok_or_else(|| CoreError::not_connected().into())
    }

    fn connect_job(&self, req: ConnectRequest) -> Job {
        let api = Arc::clone(&self.api);
        let slot = Arc::clone(&self.session);
        let connecting = Arc::clone(&self.connecting);
        let sink = self.events.sink();
        Box::new(move || -> CallResult {
            let _connecting = connecting.lock().expect("connect lock poisoned");
            if slot.read().expect("session slot lock poisoned").is_some() {
                return Err(CoreError::generic("already connected").into());
            }
            let session = api.connect(req, sink)?;
            *slot.write().expect("session slot lock poisoned") = Some(session);
            log::info!("core session connected");
            Ok(HostValue::Null)
        })
    }

    fn disconnect_job(&self) -> Job {
        let slot = Arc::clone(&self.session);
        let connecting = Arc::clone(&self.connecting);
        Box::new(move || -> CallResult {
            let _connecting = connecting.lock().expect("connect lock poisoned");
            let session = slot.read().expect("session slot lock poisoned").clone();
            let session = session.ok_or_else(CoreError::not_connected)?;
            // The slot keeps the session until the core has let go of it.
            if let Err(err) = session.disconnect() {
                log::warn!("core session refused to disconnect: {err}");
                return Err(err.into());
            }
            slot.write().expect("session slot lock poisoned").take();
            log::info!("core session disconnected");
            Ok(HostValue::Null)
        })
    }
}

fn check_settings(settings: &BridgeSettings) -> Result<(), BridgeError> {
    settings
        .validate()
        .map_err(|err| BridgeError::Runtime { detail: err.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KIND_VALIDATION;
    use crate::types::{Config, DefaultConfigRequest, InputType, LnInvoice};

    struct OfflineCore;

    impl CoreApi for OfflineCore {
        fn connect(
            &self,
            _req: ConnectRequest,
            _sink: Arc<dyn CoreEventSink>,
        ) -> Result<Arc<dyn CoreSession>, CoreError> {
            Err(CoreError::ServiceConnectivity { err: "offline".to_owned() })
        }

        fn mnemonic_to_seed(&self, _phrase: String) -> Result<Vec<u8>, CoreError> {
            Ok(vec![0; 32])
        }

        fn parse_input(&self, input: String) -> Result<InputType, CoreError> {
            Ok(InputType::Url { url: input })
        }

        fn parse_invoice(&self, _invoice: String) -> Result<LnInvoice, CoreError> {
            Err(CoreError::InvalidInvoice { err: "bad bech32".to_owned() })
        }

        fn default_config(&self, _req: DefaultConfigRequest) -> Result<Config, CoreError> {
            Err(CoreError::generic("unused"))
        }
    }

    fn bridge() -> Bridge {
        Bridge::new(Arc::new(OfflineCore), BridgeSettings::default()).expect("bridge")
    }

    fn args(entries: Vec<(&str, &str)>) -> HostMap {
        crate::value::host_map(entries)
    }

    #[test]
    fn unknown_operation_is_a_validation_failure() {
        let err = bridge().call("teleport", HostMap::new()).wait().expect_err("unknown");
        assert_eq!(err.kind(), KIND_VALIDATION);
        assert!(err.message().contains("'operation'"));
    }

    #[test]
    fn session_operation_before_connect_fails_not_connected() {
        let bridge = bridge();
        let err = bridge.call("nodeInfo", HostMap::new()).wait().expect_err("not connected");
        assert_eq!(err.kind(), "NotConnected");
        let err = bridge.disconnect().wait().expect_err("not connected");
        assert_eq!(err.kind(), "NotConnected");
    }

    #[test]
    fn api_operation_result_is_marshaled() {
        let result = bridge()
            .call("parseInput", args(vec![("input", "https://breez.technology")]))
            .wait()
            .expect("parsed");
        assert_eq!(result.get("type"), Some(&HostValue::from("url")));
        assert_eq!(result.get("url"), Some(&HostValue::from("https://breez.technology")));
    }

    #[test]
    fn core_failures_are_translated() {
        let err = bridge()
            .call("parseInvoice", args(vec![("invoice", "lnbc1...")]))
            .wait()
            .expect_err("invalid invoice");
        assert_eq!(err.kind(), "InvalidInvoice");
        assert_eq!(err.message(), "bad bech32");
        assert_eq!(err.cause, Some(CoreError::InvalidInvoice { err: "bad bech32".to_owned() }));
    }

    #[test]
    fn short_seed_from_core_is_a_contract_violation() {
        let err = bridge()
            .call("mnemonicToSeed", args(vec![("phrase", "abandon")]))
            .wait()
            .expect_err("short seed");
        assert_eq!(err.kind(), "Bridge");
        assert!(err.message().contains("64"));
    }

    #[test]
    fn check_validates_without_calling_the_core() {
        let canonical = Bridge::check("parseInput", &args(vec![("input", "lnbc1"), ("x", "y")]))
            .expect("valid input");
        assert_eq!(canonical, args(vec![("input", "lnbc1")]));

        let err = Bridge::check("parseInput", &HostMap::new()).expect_err("missing input");
        assert_eq!(err.kind(), KIND_VALIDATION);
        let err = Bridge::check("teleport", &HostMap::new()).expect_err("unknown");
        assert!(err.message().contains("'operation'"));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = BridgeSettings { max_blocking_threads: 0, ..BridgeSettings::default() };
        let err = Bridge::new(Arc::new(OfflineCore), settings).err().expect("invalid settings");
        assert!(matches!(err, BridgeError::Runtime { .. }));
    }

    #[test]
    fn default_config_validates_node_config_union() {
        let node_config = HostValue::Map(crate::value::host_map([("type", "greenlight")]));
        let mut request = args(vec![("envType", "production"), ("apiKey", "key")]);
        request.insert("nodeConfig".to_owned(), node_config);
        let err = bridge().call("defaultConfig", request).wait().expect_err("missing config");
        assert_eq!(err.kind(), KIND_VALIDATION);
        assert!(err.message().contains("nodeConfig.config"));
    }
}
