//! Trailing debounce for profile writes.
//!
//! Each [`PersistScheduler::schedule`] aborts the pending timer task and spawns
//! a fresh one, so a burst of edits lands as a single write of the last snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::storage::{KeyValueStore, DATA_KEY};
use crate::errors::AppError;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

struct PendingWrite {
    snapshot: Arc<str>,
    handle: JoinHandle<()>,
}

pub struct PersistScheduler {
    store: Arc<dyn KeyValueStore>,
    delay: Duration,
    pending: Option<PendingWrite>,
}

impl PersistScheduler {
    pub fn new(store: Arc<dyn KeyValueStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: None,
        }
    }

    /// Queues `snapshot` for writing after the debounce delay, replacing any
    /// write still waiting. Must be called inside a tokio runtime.
    pub fn schedule(&mut self, snapshot: String) {
        self.cancel();
        let snapshot: Arc<str> = snapshot.into();
        let store = Arc::clone(&self.store);
        let delay = self.delay;
        let payload = Arc::clone(&snapshot);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            write(store.as_ref(), &payload);
        });
        self.pending = Some(PendingWrite { snapshot, handle });
    }

    /// True while a scheduled write has not run yet.
    pub fn pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }

    /// Writes the queued snapshot immediately. Returns whether anything was written.
    pub fn flush(&mut self) -> Result<bool, AppError> {
        if !self.pending() {
            self.pending = None;
            return Ok(false);
        }
        let Some(pending) = self.pending.take() else {
            return Ok(false);
        };
        pending.handle.abort();
        self.store.set(DATA_KEY, &pending.snapshot)?;
        debug!("Flushed {} bytes to {DATA_KEY}", pending.snapshot.len());
        Ok(true)
    }

    /// Drops the queued write without running it.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}

impl Drop for PersistScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn write(store: &dyn KeyValueStore, snapshot: &str) {
    match store.set(DATA_KEY, snapshot) {
        Ok(()) => debug!("Persisted {} bytes to {DATA_KEY}", snapshot.len()),
        Err(e) => error!("Persist to {DATA_KEY} failed: {e}"),
    }
}
