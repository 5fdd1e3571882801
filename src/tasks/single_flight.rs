//! Single-Flight Slot
//!
//! Tracks at most one in-flight task per logical slot. Starting a new task
//! supersedes the previous one: the incumbent is aborted, and its late
//! results are discarded because every state mutation is guarded by a
//! generation ticket check.
//!
//! Aborting alone is not enough: a task already past its last await point
//! cannot be interrupted, so the ticket check is what keeps stale writes
//! from applying.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::task::AbortHandle;

// == Single Flight Slot ==
/// One logical slot holding at most one in-flight task.
#[derive(Debug)]
pub struct SingleFlight {
    /// Monotonic generation; bumped whenever the slot owner changes
    generation: AtomicU64,
    /// Abort handle of the task currently owning the slot
    abort: Mutex<Option<AbortHandle>>,
}

impl SingleFlight {
    // == Constructor ==
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            abort: Mutex::new(None),
        }
    }

    // == Begin ==
    /// Supersedes any in-flight task and returns the ticket owned by the
    /// task about to start.
    pub fn begin(&self) -> u64 {
        if let Some(handle) = self.abort.lock().expect("slot lock poisoned").take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    // == Track ==
    /// Registers the task started under `ticket`.
    ///
    /// If the slot was superseded before the handle landed, the task is
    /// aborted immediately instead of being tracked.
    pub fn track(&self, ticket: u64, handle: AbortHandle) {
        if self.generation.load(Ordering::SeqCst) != ticket {
            handle.abort();
            return;
        }
        *self.abort.lock().expect("slot lock poisoned") = Some(handle);
    }

    // == Is Live ==
    /// True while `ticket` still owns the slot. Checked before every state
    /// mutation performed by the task holding the ticket.
    pub fn is_live(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    // == Cancel ==
    /// Aborts the in-flight task without starting a successor.
    pub fn cancel(&self) {
        if let Some(handle) = self.abort.lock().expect("slot lock poisoned").take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for SingleFlight {
    fn default() -> Self {
        Self::new()
    }
}
