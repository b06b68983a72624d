//! Stream listeners and subscription handles

use std::fmt;
use std::sync::{Arc, Weak};

use crate::stream::{Batch, CycleError};

use super::store::StreamRegistry;

/// Receives a stream's batches and cycle failures
///
/// Callbacks run synchronously on the stream's task, in subscription order.
/// They may call back into the registry.
pub trait StreamListener: Send + Sync {
    /// A cycle completed; `batch` is the stream's new latest data
    fn on_data(&self, batch: &Batch);

    /// A cycle failed; the stream keeps its previous data and retries
    fn on_error(&self, _error: &CycleError) {}
}

impl<T: StreamListener + ?Sized> StreamListener for Arc<T> {
    fn on_data(&self, batch: &Batch) {
        (**self).on_data(batch)
    }

    fn on_error(&self, error: &CycleError) {
        (**self).on_error(error)
    }
}

type DataFn = Box<dyn Fn(&Batch) + Send + Sync>;
type ErrorFn = Box<dyn Fn(&CycleError) + Send + Sync>;

/// Listener built from closures
pub struct FnListener {
    on_data: DataFn,
    on_error: Option<ErrorFn>,
}

impl FnListener {
    /// Create a listener that calls `on_data` for every batch
    pub fn new(on_data: impl Fn(&Batch) + Send + Sync + 'static) -> Self {
        Self {
            on_data: Box::new(on_data),
            on_error: None,
        }
    }

    /// Also call `on_error` for every failed cycle
    pub fn on_error(mut self, on_error: impl Fn(&CycleError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(on_error));
        self
    }
}

impl StreamListener for FnListener {
    fn on_data(&self, batch: &Batch) {
        (self.on_data)(batch)
    }

    fn on_error(&self, error: &CycleError) {
        if let Some(ref on_error) = self.on_error {
            on_error(error)
        }
    }
}

impl fmt::Debug for FnListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener")
            .field("on_error", &self.on_error.is_some())
            .finish_non_exhaustive()
    }
}

/// Listener handle returned by [`StreamRegistry::subscribe`]
///
/// Unsubscribes when [`unsubscribe`](Self::unsubscribe) is called or the
/// handle is dropped. Removing a stream's last listener stops the stream.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    registry: Weak<StreamRegistry>,
    stream_id: String,
    listener_id: u64,
    active: bool,
}

impl Subscription {
    pub(super) fn new(registry: &Arc<StreamRegistry>, stream_id: String, listener_id: u64) -> Self {
        Self {
            registry: Arc::downgrade(registry),
            stream_id,
            listener_id,
            active: true,
        }
    }

    /// Id of the subscribed stream
    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    /// Stop receiving updates
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        if let Some(registry) = self.registry.upgrade() {
            registry.remove_listener(&self.stream_id, self.listener_id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("stream_id", &self.stream_id)
            .field("listener_id", &self.listener_id)
            .field("active", &self.active)
            .finish()
    }
}
