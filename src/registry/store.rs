//! Stream registry implementation
//!
//! The central registry that owns every stream definition, runs their poll
//! tasks, caches each stream's latest batch and fans batches out to
//! listeners.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::stream::{Batch, Fetcher, StreamConfig};

use super::config::RegistryConfig;
use super::entry::{StreamEntry, StreamStatus};
use super::error::RegistryError;
use super::listener::{StreamListener, Subscription};
use super::observer::{RegistryObserver, TracingObserver};
use super::runner;

/// Central registry for all streams
///
/// Thread-safe; the public API is synchronous. Starting a stream spawns a
/// tokio task, so lifecycle calls must be made from within a runtime.
/// Dropping the registry stops every stream.
pub struct StreamRegistry {
    /// Map of stream id to stream entry
    streams: RwLock<HashMap<String, Arc<StreamEntry>>>,

    /// Configuration
    config: RegistryConfig,

    /// HTTP client shared by networked streams
    fetcher: Fetcher,

    /// Lifecycle event sink
    observer: Arc<dyn RegistryObserver>,

    /// Source of listener ids
    next_listener_id: AtomicU64,
}

impl StreamRegistry {
    /// Create a new stream registry with default configuration
    pub fn new() -> Self {
        Self::from_parts(RegistryConfig::default(), Fetcher::default())
    }

    /// Create a new stream registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> crate::Result<Self> {
        let fetcher = Fetcher::new(config.http_client()?);
        Ok(Self::from_parts(config, fetcher))
    }

    fn from_parts(config: RegistryConfig, fetcher: Fetcher) -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
            config,
            fetcher,
            observer: Arc::new(TracingObserver),
            next_listener_id: AtomicU64::new(1),
        }
    }

    /// Replace the lifecycle observer
    pub fn with_observer(mut self, observer: impl RegistryObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn entry(&self, stream_id: &str) -> Result<Arc<StreamEntry>, RegistryError> {
        self.streams
            .read()
            .get(stream_id)
            .cloned()
            .ok_or_else(|| RegistryError::StreamNotFound(stream_id.to_string()))
    }

    fn entries(&self) -> Vec<(String, Arc<StreamEntry>)> {
        let mut entries: Vec<_> = self
            .streams
            .read()
            .iter()
            .map(|(id, entry)| (id.clone(), Arc::clone(entry)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Register a stream
    ///
    /// Re-registering an id replaces its definition. Listeners and cached
    /// data are kept; a running stream uses the new parser and endpoint from
    /// its next cycle, and a new interval from its next start.
    pub fn register_stream(&self, config: StreamConfig) {
        let replaced = {
            let mut streams = self.streams.write();
            match streams.get(&config.id) {
                Some(entry) => {
                    entry.replace_config(config.clone());
                    true
                }
                None => {
                    streams.insert(config.id.clone(), Arc::new(StreamEntry::new(config.clone())));
                    false
                }
            }
        };

        self.observer.stream_registered(&config, replaced);
    }

    /// Subscribe to a stream
    ///
    /// The listener receives every batch and cycle failure until the
    /// returned [`Subscription`] is unsubscribed or dropped. Subscribing
    /// does not start the stream.
    pub fn subscribe(
        self: &Arc<Self>,
        stream_id: &str,
        listener: impl StreamListener + 'static,
    ) -> Result<Subscription, RegistryError> {
        let entry = self.entry(stream_id)?;
        let listener_id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);

        entry.add_listener(listener_id, Arc::new(listener));

        tracing::debug!(
            stream = %stream_id,
            listener_id = listener_id,
            subscribers = entry.subscriber_count(),
            "Subscriber added"
        );

        Ok(Subscription::new(self, stream_id.to_string(), listener_id))
    }

    /// Remove a listener, stopping the stream when it was the last one
    pub(super) fn remove_listener(&self, stream_id: &str, listener_id: u64) {
        let Ok(entry) = self.entry(stream_id) else {
            return;
        };

        if let Some(remaining) = entry.remove_listener(listener_id) {
            tracing::debug!(
                stream = %stream_id,
                listener_id = listener_id,
                subscribers = remaining,
                "Subscriber removed"
            );

            if remaining == 0 && entry.stop() {
                self.observer.stream_stopped(stream_id);
            }
        }
    }

    /// Start polling a stream
    ///
    /// The first cycle fires immediately. Starting a running stream is a
    /// no-op reported to the observer.
    pub fn start_stream(&self, stream_id: &str) -> Result<(), RegistryError> {
        let entry = self.entry(stream_id)?;
        let config = entry.config();

        let started = entry.start_with(|| {
            tokio::spawn(runner::run_stream(
                stream_id.to_string(),
                Arc::clone(&entry),
                self.fetcher.clone(),
                Arc::clone(&self.observer),
                config.interval,
            ))
        });

        if started {
            self.observer.stream_started(&config);
        } else {
            self.observer.stream_already_running(stream_id);
        }

        Ok(())
    }

    /// Stop polling a stream
    ///
    /// Cached data is kept. Stopping a stopped stream is a no-op.
    pub fn stop_stream(&self, stream_id: &str) -> Result<(), RegistryError> {
        let entry = self.entry(stream_id)?;

        if entry.stop() {
            self.observer.stream_stopped(stream_id);
        }

        Ok(())
    }

    /// Stop the stream if running, start it otherwise
    ///
    /// Returns whether the stream is running afterwards.
    pub fn toggle_stream(&self, stream_id: &str) -> Result<bool, RegistryError> {
        if self.entry(stream_id)?.is_running() {
            self.stop_stream(stream_id)?;
            Ok(false)
        } else {
            self.start_stream(stream_id)?;
            Ok(true)
        }
    }

    /// Start every enabled stream that is not already running
    ///
    /// Returns the number of streams started.
    pub fn start_all(&self) -> usize {
        let mut started = 0;

        for (id, entry) in self.entries() {
            if !entry.config().enabled || entry.is_running() {
                continue;
            }
            if self.start_stream(&id).is_ok() {
                started += 1;
            }
        }

        started
    }

    /// Stop every running stream
    ///
    /// Returns the number of streams stopped.
    pub fn stop_all(&self) -> usize {
        let stopped = self
            .entries()
            .into_iter()
            .filter(|(_, entry)| entry.stop())
            .count();

        self.observer.all_stopped(stopped);
        stopped
    }

    /// Stop every stream; the registry stays usable
    pub fn shutdown(&self) {
        self.stop_all();
    }

    /// Get the most recent batch of a stream
    ///
    /// `None` if the stream is unknown or has never completed a cycle.
    pub fn latest_data(&self, stream_id: &str) -> Option<Batch> {
        self.entry(stream_id).ok()?.latest()
    }

    /// Get a status snapshot of a stream
    pub fn status(&self, stream_id: &str) -> Result<StreamStatus, RegistryError> {
        Ok(self.entry(stream_id)?.status(stream_id))
    }

    /// Status snapshots of every stream, sorted by id
    pub fn statuses(&self) -> Vec<StreamStatus> {
        self.entries()
            .into_iter()
            .map(|(id, entry)| entry.status(&id))
            .collect()
    }

    /// Check if a stream exists and is running
    pub fn is_running(&self, stream_id: &str) -> bool {
        self.entry(stream_id).is_ok_and(|entry| entry.is_running())
    }

    /// Number of listeners on a stream
    pub fn subscriber_count(&self, stream_id: &str) -> Option<usize> {
        self.entry(stream_id).ok().map(|entry| entry.subscriber_count())
    }

    /// Registered stream ids, sorted
    pub fn stream_ids(&self) -> Vec<String> {
        self.entries().into_iter().map(|(id, _)| id).collect()
    }

    /// Get total number of streams
    pub fn stream_count(&self) -> usize {
        self.streams.read().len()
    }
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StreamRegistry {
    fn drop(&mut self) {
        for entry in self.streams.get_mut().values() {
            entry.stop();
        }
    }
}
