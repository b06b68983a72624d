//! Registry lifecycle observer
//!
//! The registry reports lifecycle events through a [`RegistryObserver`]
//! instead of logging directly. [`TracingObserver`] is the default.

use std::time::Duration;

use crate::stream::{CycleError, StreamConfig};

/// Hook for registry lifecycle events
///
/// All methods default to no-ops. Implementations must not block: they run
/// on the registry's call path and on stream tasks.
pub trait RegistryObserver: Send + Sync {
    /// A stream definition was inserted or replaced
    fn stream_registered(&self, _config: &StreamConfig, _replaced: bool) {}

    /// A stream moved from stopped to running
    fn stream_started(&self, _config: &StreamConfig) {}

    /// Start was requested for a stream that is already running
    fn stream_already_running(&self, _stream_id: &str) {}

    /// A stream moved from running to stopped
    fn stream_stopped(&self, _stream_id: &str) {}

    /// Every running stream was stopped
    fn all_stopped(&self, _count: usize) {}

    /// A cycle replaced the stream's latest batch
    fn cycle_completed(&self, _stream_id: &str, _points: usize, _listeners: usize, _elapsed: Duration) {}

    /// A cycle failed
    fn cycle_failed(&self, _stream_id: &str, _error: &CycleError, _consecutive_failures: u64) {}
}

/// Observer that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RegistryObserver for TracingObserver {
    fn stream_registered(&self, config: &StreamConfig, replaced: bool) {
        tracing::info!(
            stream = %config.id,
            name = %config.name,
            replaced = replaced,
            "Stream registered"
        );
    }

    fn stream_started(&self, config: &StreamConfig) {
        tracing::info!(
            stream = %config.id,
            name = %config.name,
            interval_ms = config.interval.as_millis() as u64,
            networked = config.is_networked(),
            "Stream started"
        );
    }

    fn stream_already_running(&self, stream_id: &str) {
        tracing::warn!(stream = %stream_id, "Stream already running");
    }

    fn stream_stopped(&self, stream_id: &str) {
        tracing::info!(stream = %stream_id, "Stream stopped");
    }

    fn all_stopped(&self, count: usize) {
        tracing::info!(stopped = count, "All streams stopped");
    }

    fn cycle_completed(&self, stream_id: &str, points: usize, listeners: usize, elapsed: Duration) {
        tracing::debug!(
            stream = %stream_id,
            points = points,
            listeners = listeners,
            elapsed_ms = elapsed.as_millis() as u64,
            "Cycle completed"
        );
    }

    fn cycle_failed(&self, stream_id: &str, error: &CycleError, consecutive_failures: u64) {
        tracing::warn!(
            stream = %stream_id,
            error = %error,
            consecutive_failures = consecutive_failures,
            "Cycle failed"
        );
    }
}
