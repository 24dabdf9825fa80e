//! Keyed, cancellable delayed execution for coalescing saves.
//!
//! Rapid edits to the same entity should produce one persistence call,
//! not one per keystroke. The [`Debouncer`] schedules an action after a
//! quiet period; scheduling again under the same key cancels the pending
//! action, while different keys stay independent. There is deliberately
//! no cancellation of an action once it has started: last write wins,
//! matching the store's concurrency model.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Default quiet period between the last edit and the coalesced save.
pub const DEFAULT_QUIET: Duration = Duration::from_secs(1);

/// Coalesces per-key actions into one execution after a quiet period.
pub struct Debouncer {
    quiet: Duration,
    pending: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Schedules `action` to run after the quiet period, cancelling any
    /// action still pending under the same key.
    pub fn call<F>(&self, key: &str, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let quiet = self.quiet;
        let handle = tokio::spawn(async move {
            sleep(quiet).await;
            action.await;
        });

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.insert(key.to_string(), handle) {
            previous.abort();
        }
    }

    /// Cancels any pending action for one key without running it.
    pub fn cancel(&self, key: &str) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.remove(key) {
            handle.abort();
        }
    }

    /// Waits for every pending action to either finish or observe its
    /// cancellation. Call before process exit so coalesced saves are not
    /// dropped on the floor.
    pub async fn flush(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            pending.drain().map(|(_, handle)| handle).collect()
        };
        for handle in handles {
            // Cancelled tasks surface as JoinError; nothing to do.
            let _ = handle.await;
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}
