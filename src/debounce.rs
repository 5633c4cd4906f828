//! Debounced setters: bursts of calls collapse into one delayed call.
//!
//! DESIGN
//! ======
//! Each call stores the value in a shared slot, bumps a generation counter,
//! aborts the previous timer, and spawns a fresh Tokio timer for the quiet
//! window. When a timer wakes it applies the pending value only if its
//! generation is still current, so a superseded or cancelled timer can never
//! apply a stale value even if it already woke. The last value always wins
//! and is applied exactly once.
//!
//! CANCELLATION
//! ============
//! `cancel()` and `Drop` discard the pending value. The apply callback runs
//! under the slot lock, so once `cancel()` returns no further apply can
//! start. The callback must not call back into the same debouncer.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{trace, warn};

type ApplyFn<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Wraps a setter so that rapid successive calls collapse into the last one.
pub struct Debouncer<T> {
    label: &'static str,
    window: Duration,
    apply: ApplyFn<T>,
    slot: Arc<Mutex<Slot<T>>>,
}

struct Slot<T> {
    generation: u64,
    pending: Option<T>,
    timer: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Wrap `apply` with a quiet window of `window`.
    ///
    /// `label` only shows up in trace output.
    pub fn new<F>(label: &'static str, window: Duration, apply: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            label,
            window,
            apply: Arc::new(apply),
            slot: Arc::new(Mutex::new(Slot { generation: 0, pending: None, timer: None })),
        }
    }

    /// Schedule `value`, replacing any pending value and restarting the window.
    ///
    /// Outside a Tokio runtime there is no timer to wait on, so the value is
    /// applied immediately.
    pub fn call(&self, value: T) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(label = self.label, "no tokio runtime; applying without debounce");
            let mut slot = lock(&self.slot);
            bump(&mut slot);
            (self.apply)(value);
            return;
        };

        let mut slot = lock(&self.slot);
        let generation = bump(&mut slot);
        slot.pending = Some(value);

        let deadline = Instant::now() + self.window;
        let shared = Arc::clone(&self.slot);
        let apply = Arc::clone(&self.apply);
        let label = self.label;
        slot.timer = Some(runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut slot = lock(&shared);
            if slot.generation != generation {
                return;
            }
            slot.timer = None;
            if let Some(value) = slot.pending.take() {
                trace!(label, generation, "debounce window elapsed; applying");
                apply(value);
            }
        }));
    }

    /// Discard the pending value, if any. Never applies it.
    pub fn cancel(&self) {
        let mut slot = lock(&self.slot);
        bump(&mut slot);
        if slot.pending.take().is_some() {
            trace!(label = self.label, "pending debounced value cancelled");
        }
    }

    /// Whether a value is waiting for its quiet window to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        lock(&self.slot).pending.is_some()
    }

    /// The value waiting for its quiet window to elapse, if any.
    #[must_use]
    pub fn pending(&self) -> Option<T>
    where
        T: Clone,
    {
        lock(&self.slot).pending.clone()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let mut slot = lock(&self.slot);
        bump(&mut slot);
        slot.pending = None;
    }
}

/// Invalidate the current timer and return the new generation.
fn bump<T>(slot: &mut Slot<T>) -> u64 {
    slot.generation = slot.generation.wrapping_add(1);
    if let Some(timer) = slot.timer.take() {
        timer.abort();
    }
    slot.generation
}

fn lock<T>(slot: &Mutex<Slot<T>>) -> MutexGuard<'_, Slot<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
