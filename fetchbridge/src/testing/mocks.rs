//! Mock collaborators for exercising the bridge without a network.

use crate::errors::TransportError;
use crate::operation::{
    CompletionCallback, FetchRequest, OperationHandle, OperationLauncher, ResponseInfo,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// How a [`MockLauncher`] resolves the operations it launches.
#[derive(Debug, Clone)]
pub enum MockCompletion {
    /// Invoke the callback immediately with a payload and response metadata.
    Succeed {
        /// The payload to complete with.
        payload: Vec<u8>,
        /// The response metadata to complete with.
        info: ResponseInfo,
    },
    /// Invoke the callback immediately with a transport error.
    Fail(TransportError),
    /// Invoke the callback immediately with no payload, metadata, or error.
    Empty,
    /// Hold the callback until [`MockLauncher::complete_pending`] releases
    /// it, or a cancel releases it with the configured cancellation error.
    Hold,
    /// Drop the callback without invoking it. This violates the launcher
    /// contract on purpose, for testing how callers cope.
    Discard,
}

struct MockState {
    pending: Option<CompletionCallback>,
    launches: Vec<FetchRequest>,
    cancel_count: usize,
    cancel_error: TransportError,
}

/// A recording launcher with configurable completion behavior.
///
/// Launched requests and cancel calls are recorded for assertions. In
/// [`MockCompletion::Hold`] mode the completion callback is parked, which
/// lets tests cancel an in-flight operation and observe the bridge resolving
/// only when the callback eventually fires - the same shape as a real
/// transport that acknowledges cancellation asynchronously.
pub struct MockLauncher {
    completion: Mutex<MockCompletion>,
    state: Arc<Mutex<MockState>>,
}

impl MockLauncher {
    /// Creates a launcher that completes immediately with `b"ok"` and a 200
    /// response.
    #[must_use]
    pub fn new() -> Self {
        Self::with_completion(MockCompletion::Succeed {
            payload: b"ok".to_vec(),
            info: ResponseInfo::new(200),
        })
    }

    /// Creates a launcher with the given completion behavior.
    #[must_use]
    pub fn with_completion(completion: MockCompletion) -> Self {
        Self {
            completion: Mutex::new(completion),
            state: Arc::new(Mutex::new(MockState {
                pending: None,
                launches: Vec::new(),
                cancel_count: 0,
                cancel_error: TransportError::cancelled("operation cancelled"),
            })),
        }
    }

    /// Creates a launcher that completes immediately with the given payload
    /// and metadata.
    #[must_use]
    pub fn succeed_with(payload: impl Into<Vec<u8>>, info: ResponseInfo) -> Self {
        Self::with_completion(MockCompletion::Succeed {
            payload: payload.into(),
            info,
        })
    }

    /// Creates a launcher that completes immediately with the given error.
    #[must_use]
    pub fn fail_with(error: TransportError) -> Self {
        Self::with_completion(MockCompletion::Fail(error))
    }

    /// Creates a launcher that holds the callback for manual release.
    #[must_use]
    pub fn hold() -> Self {
        Self::with_completion(MockCompletion::Hold)
    }

    /// Replaces the completion behavior for subsequent launches.
    pub fn set_completion(&self, completion: MockCompletion) {
        *self.completion.lock() = completion;
    }

    /// Replaces the error a cancel uses to release a held callback.
    pub fn set_cancel_error(&self, error: TransportError) {
        self.state.lock().cancel_error = error;
    }

    /// Releases a held callback with the given arguments.
    ///
    /// Returns false if no callback was pending.
    pub fn complete_pending(
        &self,
        payload: Option<Vec<u8>>,
        info: Option<ResponseInfo>,
        error: Option<TransportError>,
    ) -> bool {
        let pending = self.state.lock().pending.take();
        match pending {
            Some(callback) => {
                callback(payload, info, error);
                true
            }
            None => false,
        }
    }

    /// Returns the number of operations launched.
    #[must_use]
    pub fn launch_count(&self) -> usize {
        self.state.lock().launches.len()
    }

    /// Returns the number of cancel calls observed across all handles.
    #[must_use]
    pub fn cancel_count(&self) -> usize {
        self.state.lock().cancel_count
    }

    /// Returns the most recently launched request.
    #[must_use]
    pub fn last_request(&self) -> Option<FetchRequest> {
        self.state.lock().launches.last().cloned()
    }

    /// Returns true if a held callback has not been released yet.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    /// Resets recorded launches, cancels, and any held callback.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.pending = None;
        state.launches.clear();
        state.cancel_count = 0;
    }
}

impl Default for MockLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationLauncher for MockLauncher {
    fn launch(
        &self,
        request: FetchRequest,
        on_complete: CompletionCallback,
    ) -> Box<dyn OperationHandle> {
        let completion = self.completion.lock().clone();
        self.state.lock().launches.push(request);

        match completion {
            MockCompletion::Succeed { payload, info } => {
                on_complete(Some(payload), Some(info), None);
            }
            MockCompletion::Fail(error) => {
                on_complete(None, None, Some(error));
            }
            MockCompletion::Empty => {
                on_complete(None, None, None);
            }
            MockCompletion::Hold => {
                self.state.lock().pending = Some(on_complete);
            }
            MockCompletion::Discard => {
                drop(on_complete);
            }
        }

        Box::new(MockHandle {
            state: Arc::clone(&self.state),
        })
    }
}

impl std::fmt::Debug for MockLauncher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLauncher")
            .field("launch_count", &self.launch_count())
            .field("cancel_count", &self.cancel_count())
            .finish()
    }
}

/// The handle type returned by [`MockLauncher`].
///
/// Every cancel call is counted. If the launcher is holding a callback, the
/// first cancel releases it with the configured cancellation error, matching
/// a transport that reports cancellation through its normal completion path.
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

impl OperationHandle for MockHandle {
    fn cancel(&self) {
        let (callback, error) = {
            let mut state = self.state.lock();
            state.cancel_count += 1;
            (state.pending.take(), state.cancel_error.clone())
        };

        // Invoked outside the lock: the callback resumes the caller and may
        // run arbitrary code.
        if let Some(callback) = callback {
            callback(None, None, Some(error));
        }
    }
}

impl std::fmt::Debug for MockHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHandle").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportErrorKind;

    fn noop_callback() -> CompletionCallback {
        Box::new(|_, _, _| {})
    }

    #[test]
    fn test_launcher_records_requests() {
        let launcher = MockLauncher::new();

        launcher.launch(FetchRequest::new("https://a.example"), noop_callback());
        launcher.launch(FetchRequest::new("https://b.example"), noop_callback());

        assert_eq!(launcher.launch_count(), 2);
        assert_eq!(
            launcher.last_request().map(|r| r.target),
            Some("https://b.example".to_string())
        );
    }

    #[test]
    fn test_hold_parks_callback_until_cancel() {
        let launcher = MockLauncher::hold();
        let seen = Arc::new(Mutex::new(None));

        let seen_clone = seen.clone();
        let handle = launcher.launch(
            FetchRequest::new("https://example.com"),
            Box::new(move |_, _, error| {
                *seen_clone.lock() = error;
            }),
        );

        assert!(launcher.has_pending());
        assert!(seen.lock().is_none());

        handle.cancel();

        assert!(!launcher.has_pending());
        let error = seen.lock().clone().expect("callback fired");
        assert_eq!(error.kind, TransportErrorKind::Cancelled);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let launcher = MockLauncher::hold();
        let fired = Arc::new(Mutex::new(0_usize));

        let fired_clone = fired.clone();
        let handle = launcher.launch(
            FetchRequest::new("https://example.com"),
            Box::new(move |_, _, _| {
                *fired_clone.lock() += 1;
            }),
        );

        handle.cancel();
        handle.cancel();

        // Both cancels are counted, but the callback fired only once.
        assert_eq!(launcher.cancel_count(), 2);
        assert_eq!(*fired.lock(), 1);
    }

    #[test]
    fn test_complete_pending_releases_callback() {
        let launcher = MockLauncher::hold();
        let seen = Arc::new(Mutex::new(None));

        let seen_clone = seen.clone();
        launcher.launch(
            FetchRequest::new("https://example.com"),
            Box::new(move |payload, _, _| {
                *seen_clone.lock() = payload;
            }),
        );

        assert!(launcher.complete_pending(Some(b"late".to_vec()), Some(ResponseInfo::new(200)), None));
        assert_eq!(seen.lock().clone(), Some(b"late".to_vec()));

        // Nothing left to release.
        assert!(!launcher.complete_pending(None, None, None));
    }
}
