//! Stream entry and state types
//!
//! This module defines the per-stream state stored in the registry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::stream::{Batch, StreamConfig};

use super::listener::StreamListener;

/// Running state of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamState {
    /// No timer; cached data from a previous run may remain
    Stopped,
    /// Poll task is active
    Running,
}

struct ListenerSlot {
    id: u64,
    listener: Arc<dyn StreamListener>,
}

/// Entry for a single stream in the registry
pub(super) struct StreamEntry {
    /// Current definition; replaced on re-registration
    config: RwLock<StreamConfig>,

    /// Listeners in subscription order
    listeners: Mutex<Vec<ListenerSlot>>,

    /// Batch from the most recent successful cycle
    latest: RwLock<Option<Batch>>,

    /// Poll task while running
    task: Mutex<Option<JoinHandle<()>>>,

    /// Successful cycles since registration
    cycles: AtomicU64,

    /// Failed cycles since registration
    failures: AtomicU64,

    /// Failed cycles since the last success
    consecutive_failures: AtomicU64,
}

impl StreamEntry {
    /// Create a new stopped entry
    pub(super) fn new(config: StreamConfig) -> Self {
        Self {
            config: RwLock::new(config),
            listeners: Mutex::new(Vec::new()),
            latest: RwLock::new(None),
            task: Mutex::new(None),
            cycles: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            consecutive_failures: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current definition
    pub(super) fn config(&self) -> StreamConfig {
        self.config.read().clone()
    }

    pub(super) fn replace_config(&self, config: StreamConfig) {
        *self.config.write() = config;
    }

    pub(super) fn add_listener(&self, id: u64, listener: Arc<dyn StreamListener>) {
        self.listeners.lock().push(ListenerSlot { id, listener });
    }

    /// Remove a listener
    ///
    /// Returns the number of listeners left, or `None` if `id` was not
    /// subscribed.
    pub(super) fn remove_listener(&self, id: u64) -> Option<usize> {
        let mut listeners = self.listeners.lock();
        let index = listeners.iter().position(|slot| slot.id == id)?;
        listeners.remove(index);
        Some(listeners.len())
    }

    /// Listeners in subscription order, copied out of the lock
    pub(super) fn listeners(&self) -> Vec<Arc<dyn StreamListener>> {
        self.listeners
            .lock()
            .iter()
            .map(|slot| Arc::clone(&slot.listener))
            .collect()
    }

    pub(super) fn subscriber_count(&self) -> usize {
        self.listeners.lock().len()
    }

    pub(super) fn latest(&self) -> Option<Batch> {
        self.latest.read().clone()
    }

    /// Replace the cached batch and count a successful cycle
    pub(super) fn store_batch(&self, batch: Batch) {
        *self.latest.write() = Some(batch);
        self.cycles.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    /// Count a failed cycle, returning the consecutive failure count
    pub(super) fn record_failure(&self) -> u64 {
        self.failures.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(super) fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Install a poll task unless one is already running
    ///
    /// `spawn` is only called when the stream is stopped. Returns `false`
    /// if the stream was already running.
    pub(super) fn start_with(&self, spawn: impl FnOnce() -> JoinHandle<()>) -> bool {
        let mut task = self.task.lock();
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return false;
        }
        *task = Some(spawn());
        true
    }

    /// Cancel the poll task
    ///
    /// Returns `true` if the stream was running.
    pub(super) fn stop(&self) -> bool {
        match self.task.lock().take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }

    /// Build a status snapshot
    pub(super) fn status(&self, id: &str) -> StreamStatus {
        let config = self.config.read();
        let latest = self.latest.read();

        StreamStatus {
            id: id.to_string(),
            name: config.name.clone(),
            source: config.source.clone(),
            enabled: config.enabled,
            running: self.is_running(),
            last_update: latest
                .as_ref()
                .and_then(|batch| batch.first())
                .map(|point| point.timestamp),
            data_points: latest.as_ref().map_or(0, |batch| batch.len()),
            subscriber_count: self.subscriber_count(),
            cycles: self.cycles.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            consecutive_failures: self.consecutive_failures.load(Ordering::Relaxed),
        }
    }
}

/// Read-only status snapshot of a stream
///
/// Informational only; nothing in the registry gates on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStatus {
    /// Stream id
    pub id: String,
    /// Human readable label
    pub name: String,
    /// Provenance label
    pub source: String,
    /// Whether `start_all` starts this stream
    pub enabled: bool,
    /// Whether a poll task is active
    pub running: bool,
    /// Timestamp of the first point of the latest batch
    pub last_update: Option<i64>,
    /// Number of points in the latest batch
    pub data_points: usize,
    /// Number of listeners
    pub subscriber_count: usize,
    /// Successful cycles since registration
    pub cycles: u64,
    /// Failed cycles since registration
    pub failures: u64,
    /// Failed cycles since the last success
    pub consecutive_failures: u64,
}

impl StreamStatus {
    /// Running state as a two-state enum
    pub fn state(&self) -> StreamState {
        if self.running {
            StreamState::Running
        } else {
            StreamState::Stopped
        }
    }
}
