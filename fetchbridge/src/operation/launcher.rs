//! The collaborator seam: launching cancellable, callback-based operations.

use super::{FetchRequest, ResponseInfo};
use crate::errors::TransportError;

/// Completion callback handed to an [`OperationLauncher`].
///
/// The launcher must invoke it exactly once, eventually, even when the
/// returned handle was cancelled. The arguments are mutually constrained:
/// either the payload and response metadata are both present, or an error is
/// present, or all three are absent (signalling a generic failure).
pub type CompletionCallback =
    Box<dyn FnOnce(Option<Vec<u8>>, Option<ResponseInfo>, Option<TransportError>) + Send>;

/// A cancellation capability for an in-flight operation.
#[cfg_attr(test, mockall::automock)]
pub trait OperationHandle: Send + Sync {
    /// Requests best-effort early termination.
    ///
    /// Idempotent, and a no-op once the operation has completed. Cancelling
    /// does not suppress the completion callback; the operation still
    /// reports its end (typically with a cancellation-flavored error).
    fn cancel(&self);
}

/// Launches callback-based, cancellable asynchronous operations.
///
/// Implementations drive the actual work on their own execution context (a
/// background worker, an I/O thread pool); `launch` must return promptly
/// with a handle for the in-flight operation.
#[cfg_attr(test, mockall::automock)]
pub trait OperationLauncher: Send + Sync {
    /// Starts the operation described by `request`.
    ///
    /// The returned handle stays valid until `on_complete` has been invoked.
    fn launch(
        &self,
        request: FetchRequest,
        on_complete: CompletionCallback,
    ) -> Box<dyn OperationHandle>;
}
