//! The callback-to-suspension bridge.
//!
//! This module provides:
//! - [`CancellableBridge`] for awaiting callback-based operations
//! - [`Fetcher`], the async seam the bridge implements
//! - The consume-once resumption cell and guarded handle slot backing them

mod resume;
mod slot;


use crate::cancellation::CancellationToken;
use crate::errors::FetchError;
use crate::operation::{CompletionCallback, FetchRequest, FetchResponse, OperationLauncher};
use async_trait::async_trait;
use resume::ResumeCell;
use slot::HandleSlot;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// The outcome of a bridged fetch.
pub type FetchResult = Result<FetchResponse, FetchError>;

/// The awaitable surface of the bridge.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs `request`, suspending until the underlying operation
    /// completes, and propagating cancellation of `cancel` into it.
    async fn fetch(&self, request: FetchRequest, cancel: &CancellationToken) -> FetchResult;
}

/// Bridges a callback-based, cancellable operation launcher into
/// async/await.
///
/// Awaiting [`CancellableBridge::fetch`] suspends the calling task until the
/// launcher's completion callback fires, and resumes it exactly once. If the
/// caller's [`CancellationToken`] is cancelled first, the in-flight
/// operation's handle is cancelled; the suspension still resolves only
/// through the completion callback, which well-behaved launchers invoke
/// exactly once even after cancellation.
pub struct CancellableBridge {
    launcher: Arc<dyn OperationLauncher>,
}

impl CancellableBridge {
    /// Creates a bridge over the given launcher.
    #[must_use]
    pub fn new(launcher: Arc<dyn OperationLauncher>) -> Self {
        Self { launcher }
    }

    /// Performs `request`, suspending until the underlying operation
    /// completes.
    ///
    /// Cancelling `cancel` while the operation is in flight forwards the
    /// cancellation to the operation's handle. The call still resolves only
    /// once the operation reports completion - typically with a
    /// cancellation-flavored [`FetchError::Transport`].
    pub async fn fetch(&self, request: FetchRequest, cancel: &CancellationToken) -> FetchResult {
        let op_id = Uuid::new_v4();
        let slot = Arc::new(HandleSlot::new());

        // Registered before launch: a cancellation landing in between is
        // remembered by the slot rather than lost. If the token is already
        // cancelled, the observer fires here and the slot records the
        // request for the populate step below.
        let observer_slot = Arc::clone(&slot);
        cancel.on_cancel(move |reason| {
            debug!(%op_id, %reason, "cancellation requested, forwarding to operation handle");
            observer_slot.request_cancel();
        });

        let (cell, suspended) = ResumeCell::channel();
        let completion: CompletionCallback = {
            let cell = Arc::clone(&cell);
            Box::new(move |payload, info, error| {
                let outcome = match (payload, info, error) {
                    (Some(payload), Some(info), _) => Ok(FetchResponse::new(payload, info)),
                    (_, _, Some(error)) => Err(FetchError::Transport(error)),
                    _ => Err(FetchError::InvalidResponse),
                };
                cell.resume(outcome);
            })
        };

        debug!(%op_id, target = %request.target, "launching operation");
        let handle = self.launcher.launch(request, completion);
        slot.populate(handle);

        // Resolution happens only through the completion callback. A
        // launcher that drops the callback unfired closes the channel;
        // surface that as a missing response rather than suspending forever.
        let outcome = match suspended.await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(%op_id, "operation dropped its completion callback without invoking it");
                Err(FetchError::InvalidResponse)
            }
        };

        slot.release();
        debug!(%op_id, success = outcome.is_ok(), "operation resolved");
        outcome
    }

    /// Convenience wrapper that builds a bare request for `target`.
    pub async fn fetch_target(
        &self,
        target: impl Into<String> + Send,
        cancel: &CancellationToken,
    ) -> FetchResult {
        self.fetch(FetchRequest::new(target), cancel).await
    }
}

#[async_trait]
impl Fetcher for CancellableBridge {
    async fn fetch(&self, request: FetchRequest, cancel: &CancellationToken) -> FetchResult {
        Self::fetch(self, request, cancel).await
    }
}

impl std::fmt::Debug for CancellableBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellableBridge").finish()
    }
}
