//! Single-shot suspending operations
//!
//! Key generation and RSA/ECDSA work are CPU bound. [`CryptoTask`] moves the
//! work onto tokio's blocking pool and hands the result back through a
//! `oneshot` channel, so the awaiting task yields instead of stalling its
//! executor thread. Each task resolves exactly once; nothing is retried.

use crate::error::{Error, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Future resolving to the result of one engine operation
#[must_use = "a CryptoTask does nothing useful unless awaited"]
pub struct CryptoTask<T> {
    rx: oneshot::Receiver<Result<T>>,
    operation: &'static str,
}

impl<T: Send + 'static> CryptoTask<T> {
    /// Run `work` on the blocking pool of the current tokio runtime
    ///
    /// Outside a runtime the work runs inline and the task is already
    /// complete when returned.
    pub fn spawn<F>(operation: &'static str, work: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                log::trace!("Dispatching {operation} to blocking pool");
                handle.spawn_blocking(move || {
                    // Receiver gone means the caller discarded the result
                    let _ = tx.send(work());
                });
            }
            Err(_) => {
                let _ = tx.send(work());
            }
        }
        Self { rx, operation }
    }

    /// A task that is already complete
    pub fn ready(operation: &'static str, result: Result<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { rx, operation }
    }

    /// Name of the operation this task performs
    #[must_use]
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl<T> Future for CryptoTask<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let operation = self.operation;
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(
                Error::internal().context(format!("{operation} worker terminated without a result")),
            )),
            Poll::Pending => Poll::Pending,
        }
    }
}
