//! Consume-once resumption cell for the suspended caller.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;

/// The single-resume continuation of a task parked at the bridge.
///
/// Wraps a oneshot sender so the suspended caller is woken exactly once.
/// Resuming twice is a logic error in whoever drives the cell and panics
/// rather than silently dropping the second outcome.
pub(crate) struct ResumeCell<T> {
    tx: Mutex<Option<oneshot::Sender<T>>>,
}

impl<T> ResumeCell<T> {
    /// Creates a cell together with the receiving end of the suspension.
    pub(crate) fn channel() -> (Arc<Self>, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Arc::new(Self {
                tx: Mutex::new(Some(tx)),
            }),
            rx,
        )
    }

    /// Resumes the suspended caller with `outcome`.
    ///
    /// A caller that already went away (dropped receiver) is tolerated;
    /// there is simply nothing left to wake.
    ///
    /// # Panics
    ///
    /// Panics if the cell was already consumed.
    pub(crate) fn resume(&self, outcome: T) {
        match self.tx.lock().take() {
            Some(tx) => {
                let _ = tx.send(outcome);
            }
            None => panic!("suspended caller resumed twice"),
        }
    }

    /// Returns whether the cell has been consumed.
    #[cfg(test)]
    pub(crate) fn is_consumed(&self) -> bool {
        self.tx.lock().is_none()
    }
}

impl<T> std::fmt::Debug for ResumeCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeCell")
            .field("consumed", &self.tx.lock().is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resume_wakes_receiver() {
        let (cell, rx) = ResumeCell::channel();

        cell.resume(7_u32);

        assert!(cell.is_consumed());
        assert_eq!(rx.await.expect("resumed"), 7);
    }

    #[test]
    #[should_panic(expected = "resumed twice")]
    fn test_double_resume_panics() {
        let (cell, _rx) = ResumeCell::channel();

        cell.resume(1_u32);
        cell.resume(2_u32);
    }

    #[tokio::test]
    async fn test_resume_with_dropped_receiver_is_tolerated() {
        let (cell, rx) = ResumeCell::<u32>::channel();
        drop(rx);

        // Must not panic: the caller is gone, not resumed twice.
        cell.resume(3);
        assert!(cell.is_consumed());
    }

    #[tokio::test]
    async fn test_dropped_cell_closes_channel() {
        let (cell, rx) = ResumeCell::<u32>::channel();
        drop(cell);

        assert!(rx.await.is_err());
    }
}
