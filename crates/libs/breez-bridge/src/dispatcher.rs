use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::oneshot;

use crate::config::BridgeSettings;
use crate::error::{BridgeError, HostError};
use crate::value::HostValue;

pub type CallResult = Result<HostValue, HostError>;

/// A unit of work bound to its core handle and typed request.
pub type Job = Box<dyn FnOnce() -> CallResult + Send + 'static>;

/// Completion of one host call.
///
/// Await it from async hosts, or block on [`CallHandle::wait`] from threads
/// that are not driving a tokio runtime.
#[must_use = "a call's outcome is only observable through its handle"]
pub struct CallHandle {
    receiver: oneshot::Receiver<CallResult>,
}

impl CallHandle {
    pub(crate) fn ready(result: CallResult) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(result);
        Self { receiver }
    }

    /// Blocks the current thread until the call completes.
    ///
    /// Panics when called from within an async execution context.
    pub fn wait(self) -> CallResult {
        self.receiver.blocking_recv().unwrap_or_else(|_| Err(lost_completion()))
    }
}

impl Future for CallHandle {
    type Output = CallResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<CallResult> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or_else(|_| Err(lost_completion())))
    }
}

fn lost_completion() -> HostError {
    BridgeError::Runtime { detail: "call worker stopped before completing".to_owned() }.into()
}

/// Runs core calls on the blocking pool of a tokio runtime.
pub struct Dispatcher {
    owned: Option<Runtime>,
    handle: Handle,
}

impl Dispatcher {
    /// Builds a dedicated multi-thread runtime from `settings`.
    pub fn start(settings: &BridgeSettings) -> Result<Self, BridgeError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(settings.worker_threads)
            .max_blocking_threads(settings.max_blocking_threads)
            .thread_name(settings.thread_name.clone())
            .build()
            .map_err(|err| BridgeError::Runtime {
                detail: format!("cannot build runtime: {err}"),
            })?;
        let handle = runtime.handle().clone();
        Ok(Self { owned: Some(runtime), handle })
    }

    /// Runs calls on a runtime owned by the embedding application.
    pub fn on_handle(handle: Handle) -> Self {
        Self { owned: None, handle }
    }

    pub fn dispatch(&self, operation: &'static str, job: Job) -> CallHandle {
        let (sender, receiver) = oneshot::channel();
        self.spawn(operation, job, move |outcome| {
            if sender.send(outcome).is_err() {
                log::debug!("{operation}: caller dropped its handle before completion");
            }
        });
        CallHandle { receiver }
    }

    /// Runs `job` and hands its outcome to `complete` on the worker thread.
    pub fn spawn<F>(&self, operation: &'static str, job: Job, complete: F)
    where
        F: FnOnce(CallResult) + Send + 'static,
    {
        log::debug!("dispatching {operation}");
        self.handle.spawn_blocking(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|_| {
                Err(BridgeError::WorkerPanicked { operation: operation.to_owned() }.into())
            });
            if let Err(err) = &outcome {
                log::debug!("{operation} failed: {err}");
            }
            complete(outcome);
        });
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        if let Some(runtime) = self.owned.take() {
            runtime.shutdown_background();
        }
    }
}
