//! Cancellation token representing the caller's task scope.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// An observer invoked once when cancellation is requested.
type CancelObserver = Box<dyn FnOnce(String) + Send>;

struct TokenState {
    cancelled: bool,
    reason: Option<String>,
    observers: Vec<CancelObserver>,
}

/// A token for cooperative cancellation of an awaiting task scope.
///
/// Cancellation is idempotent: only the first reason is kept, and observers
/// are drained and invoked exactly once. Registering an observer on an
/// already-cancelled token invokes it immediately, so a late registration
/// still sees the signal. Panics in observers are caught and logged, never
/// propagated to the canceller.
pub struct CancellationToken {
    /// Fast-path flag mirroring `state.cancelled`.
    cancelled: AtomicBool,
    state: Mutex<TokenState>,
}

impl CancellationToken {
    /// Creates a new, uncancelled token.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            cancelled: AtomicBool::new(false),
            state: Mutex::new(TokenState {
                cancelled: false,
                reason: None,
                observers: Vec::new(),
            }),
        })
    }

    /// Requests cancellation with a reason.
    ///
    /// Idempotent - only the first reason is kept, and observers run only
    /// on the first call.
    pub fn cancel(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let drained = {
            let mut state = self.state.lock();
            if state.cancelled {
                return;
            }
            state.cancelled = true;
            state.reason = Some(reason.clone());
            self.cancelled.store(true, Ordering::SeqCst);
            std::mem::take(&mut state.observers)
        };

        // Observers run outside the lock so they may register further
        // observers or inspect the token without deadlocking.
        for observer in drained {
            Self::notify(observer, reason.clone());
        }
    }

    /// Registers an observer to run when cancellation is requested.
    ///
    /// If the token is already cancelled, the observer is invoked
    /// immediately with the recorded reason.
    pub fn on_cancel<F>(&self, observer: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        let observer: CancelObserver = Box::new(observer);
        let immediate = {
            let mut state = self.state.lock();
            if state.cancelled {
                Some((observer, state.reason.clone().unwrap_or_default()))
            } else {
                state.observers.push(observer);
                None
            }
        };

        if let Some((observer, reason)) = immediate {
            Self::notify(observer, reason);
        }
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns the cancellation reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.state.lock().reason.clone()
    }

    fn notify(observer: CancelObserver, reason: String) {
        if let Err(e) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            observer(reason);
        })) {
            warn!("Cancellation observer panicked: {:?}", e);
        }
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .field("reason", &self.reason())
            .finish()
    }
}
