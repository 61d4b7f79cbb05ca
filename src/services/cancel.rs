// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cooperative cancellation for in-flight requests.
//!
//! A screen that goes away cancels its token; the transport then drops the
//! pending response instead of handing it to a view that no longer exists.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Cloneable cancellation token. All clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancellationToken {
    /// Create a new token (not cancelled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake every pending `cancelled()` future.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel()` has been called on any clone.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent cancel() is not missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
