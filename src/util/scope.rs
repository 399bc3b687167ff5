//! Request lifetimes tied to view mounts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages fire requests from effects and event handlers. Without a scope, a
//! response arriving after the page unmounted would still write into its
//! signals, and two racing listing requests would apply in arrival order.
//!
//! - [`ViewScope`] aborts every task it spawned when the owning view is
//!   cleaned up. The future stops at its next poll, so no state is touched.
//! - [`LatestRequest`] issues tickets so only the newest response applies.

#[cfg(test)]
#[path = "scope_test.rs"]
mod scope_test;

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::{AbortHandle, Abortable};

#[derive(Default)]
struct ScopeInner {
    cancelled: AtomicBool,
    handles: Mutex<Vec<AbortHandle>>,
}

/// Cancellation group for tasks started by one mounted view.
#[derive(Clone, Default)]
pub struct ViewScope {
    inner: Arc<ScopeInner>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope cancelled automatically when the current reactive owner is disposed.
    pub fn for_view() -> Self {
        let scope = Self::new();
        let on_drop = scope.clone();
        leptos::prelude::on_cleanup(move || on_drop.cancel());
        scope
    }

    /// Wrap `fut` so it is dropped at its next poll once the scope is cancelled.
    ///
    /// A finished task marks its own handle aborted so the next `guard` call
    /// prunes it; the handle list only holds tasks still in flight.
    pub fn guard<F>(&self, fut: F) -> impl Future<Output = ()> + use<F>
    where
        F: Future<Output = ()> + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let done = handle.clone();
        if self.is_cancelled() {
            handle.abort();
        } else if let Ok(mut handles) = self.inner.handles.lock() {
            handles.retain(|h| !h.is_aborted());
            handles.push(handle);
        }
        async move {
            if Abortable::new(fut, registration).await.is_err() {
                log::debug!("scope: task aborted after view cleanup");
            }
            done.abort();
        }
    }

    #[cfg(test)]
    fn tracked_handles(&self) -> usize {
        self.inner.handles.lock().map_or(0, |handles| handles.len())
    }

    /// Spawn a guarded task on the local (browser) executor.
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        leptos::task::spawn_local(self.guard(fut));
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Relaxed);
        if let Ok(mut handles) = self.inner.handles.lock() {
            for handle in handles.drain(..) {
                handle.abort();
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Relaxed)
    }
}

/// Monotonic request ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Latest-response-wins sequencer.
#[derive(Clone, Debug, Default)]
pub struct LatestRequest {
    seq: Arc<AtomicU64>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier ticket becomes stale.
    pub fn issue(&self) -> Ticket {
        Ticket(self.seq.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.seq.load(Ordering::Relaxed) == ticket.0
    }
}
