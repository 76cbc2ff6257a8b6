//! Shared slot coordinating the operation handle between the launch path
//! and the cancellation path.

use crate::operation::OperationHandle;
use parking_lot::Mutex;
use tracing::debug;

/// State machine for the slot: `Empty -> Populated -> Released`.
enum SlotState {
    /// No handle yet. Remembers whether cancellation already arrived.
    Empty { cancel_requested: bool },
    /// Launch stored the handle. Remembers whether it was cancelled so the
    /// handle sees at most one `cancel()` call.
    Populated {
        handle: Box<dyn OperationHandle>,
        cancelled: bool,
    },
    /// The operation resolved and the handle was dropped.
    Released,
}

/// A write-once slot for the operation handle, shared between the launch
/// step and the cancellation observer.
///
/// Either side may act first. A cancel request that arrives while the slot
/// is still empty is remembered and forwarded the moment the slot is
/// populated; a request after release is a no-op. At most one `cancel()`
/// call ever reaches the handle, no matter how often cancellation is
/// requested.
pub(crate) struct HandleSlot {
    state: Mutex<SlotState>,
}

impl HandleSlot {
    /// Creates an empty slot.
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::Empty {
                cancel_requested: false,
            }),
        }
    }

    /// Stores the handle produced by the launch step.
    ///
    /// If cancellation was requested while the slot was empty, the handle is
    /// cancelled immediately. The launch still stands either way; resolution
    /// waits for the operation's completion callback.
    ///
    /// # Panics
    ///
    /// Panics if the slot was already populated. The bridge launches exactly
    /// once per call, so a second populate is a logic error.
    pub(crate) fn populate(&self, handle: Box<dyn OperationHandle>) {
        let forward = {
            let mut state = self.state.lock();
            match &*state {
                SlotState::Empty { cancel_requested } => {
                    let forward = *cancel_requested;
                    *state = SlotState::Populated {
                        handle,
                        cancelled: false,
                    };
                    forward
                }
                _ => panic!("operation handle slot populated twice"),
            }
        };

        if forward {
            debug!("honoring cancel request that preceded launch");
            self.request_cancel();
        }
    }

    /// Forwards a cancellation request to the handle, if one exists.
    ///
    /// Empty slot: the request is recorded for [`HandleSlot::populate`].
    /// Populated slot: the handle is cancelled, once. Released slot: no-op.
    pub(crate) fn request_cancel(&self) {
        let mut state = self.state.lock();
        match &mut *state {
            SlotState::Empty { cancel_requested } => {
                *cancel_requested = true;
            }
            SlotState::Populated { handle, cancelled } => {
                if !*cancelled {
                    *cancelled = true;
                    // Handles never call back into the slot, so invoking
                    // under the lock cannot reenter.
                    handle.cancel();
                }
            }
            SlotState::Released => {}
        }
    }

    /// Drops the handle once the operation's callback has resolved the call.
    ///
    /// Any later cancel request becomes a no-op.
    pub(crate) fn release(&self) {
        *self.state.lock() = SlotState::Released;
    }
}

impl std::fmt::Debug for HandleSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match &*self.state.lock() {
            SlotState::Empty { .. } => "Empty",
            SlotState::Populated { .. } => "Populated",
            SlotState::Released => "Released",
        };
        f.debug_struct("HandleSlot").field("state", &name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandle {
        cancels: Arc<AtomicUsize>,
    }

    impl OperationHandle for CountingHandle {
        fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting_handle() -> (Box<dyn OperationHandle>, Arc<AtomicUsize>) {
        let cancels = Arc::new(AtomicUsize::new(0));
        (
            Box::new(CountingHandle {
                cancels: cancels.clone(),
            }),
            cancels,
        )
    }

    #[test]
    fn test_cancel_after_populate_reaches_handle() {
        let slot = HandleSlot::new();
        let (handle, cancels) = counting_handle();

        slot.populate(handle);
        slot.request_cancel();

        assert_eq!(cancels.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_before_populate_is_forwarded_on_populate() {
        let slot = HandleSlot::new();
        let (handle, cancels) = counting_handle();

        slot.request_cancel();
        assert_eq!(cancels.load(Ordering::SeqCst), 0);

        slot.populate(handle);
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_repeated_cancel_reaches_handle_once() {
        let slot = HandleSlot::new();
        let (handle, cancels) = counting_handle();

        slot.request_cancel();
        slot.populate(handle);
        slot.request_cancel();
        slot.request_cancel();

        assert_eq!(cancels.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_after_release_is_noop() {
        let slot = HandleSlot::new();
        let (handle, cancels) = counting_handle();

        slot.populate(handle);
        slot.release();
        slot.request_cancel();

        assert_eq!(cancels.load(Ordering::SeqCst), 0);
    }

    #[test]
    #[should_panic(expected = "populated twice")]
    fn test_double_populate_panics() {
        let slot = HandleSlot::new();
        let (first, _) = counting_handle();
        let (second, _) = counting_handle();

        slot.populate(first);
        slot.populate(second);
    }
}
