//! Sync Bridge
//!
//! Blocking adapter over callback-style operations, for callers that need a
//! synchronous result on a dedicated thread.

use std::future::Future;
use std::sync::mpsc;

/// One-shot completion handle fed to a callback-style operation.
///
/// Consuming `complete` moves the handle, so a second invocation is
/// unrepresentable rather than merely discouraged.
pub struct Completion<T, E> {
    sender: mpsc::SyncSender<Result<T, E>>,
}

impl<T, E> Completion<T, E> {
    /// Deliver the operation's result. Consumes the handle.
    pub fn complete(self, result: Result<T, E>) {
        // The receiver only disappears if `wait_for` panicked; nothing left
        // to deliver to in that case.
        let _ = self.sender.send(result);
    }
}

/// Block the calling thread until the operation delivers its result through
/// the provided [`Completion`], then return it.
///
/// There is no timeout: if the completion is never invoked the call blocks
/// indefinitely. Never call this from the thread that is expected to deliver
/// the callback, since that deadlocks.
///
/// # Panics
///
/// Panics if the operation drops its completion handle without invoking it,
/// which is a contract violation by the wrapped operation.
pub fn wait_for<T, E, F>(operation: F) -> Result<T, E>
where
    F: FnOnce(Completion<T, E>),
{
    let (sender, receiver) = mpsc::sync_channel(1);
    operation(Completion { sender });
    receiver
        .recv()
        .expect("completion handle dropped without being invoked")
}

/// Block on an async operation by running it on the given runtime handle.
///
/// Must not be called from a thread owned by that runtime.
pub fn block_on_operation<T, E, Fut>(handle: &tokio::runtime::Handle, future: Fut) -> Result<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    wait_for(move |completion: Completion<T, E>| {
        handle.spawn(async move {
            completion.complete(future.await);
        });
    })
}
