//! Stream registry and dispatcher
//!
//! The registry owns the catalog of streams, runs one poll task per running
//! stream, caches each stream's latest batch and fans every batch out to the
//! stream's listeners.
//!
//! # Architecture
//!
//! ```text
//!                          Arc<StreamRegistry>
//!                     ┌─────────────────────────┐
//!                     │ streams: HashMap<Id,    │
//!                     │   StreamEntry {         │
//!                     │     config, listeners,  │
//!                     │     latest, task,       │
//!                     │   }                     │
//!                     │ >                       │
//!                     └───────────┬─────────────┘
//!                                 │ start_stream()
//!                                 ▼
//!                        run_stream() task
//!                  tick ─► GET endpoint (optional)
//!                       ─► parser ─► latest = batch
//!                                 │
//!         ┌───────────────────────┼───────────────────────┐
//!         ▼                       ▼                       ▼
//!    [Listener]              [Listener]              [Listener]
//!    on_data(&batch)         on_data(&batch)         on_data(&batch)
//! ```
//!
//! # Lifecycle
//!
//! A stream is either stopped or running. `start_stream` spawns its task
//! and fires the first cycle immediately; `stop_stream`, `stop_all` or the
//! last listener unsubscribing aborts the task. Cached data survives a stop.
//!
//! # Failures
//!
//! A failed cycle (network error, non-2xx status, invalid JSON, parser error
//! or panic) leaves the cache untouched and is reported to listeners through
//! [`StreamListener::on_error`]. The stream retries at its next tick, with no
//! backoff. Operations on an unregistered id return
//! [`RegistryError::StreamNotFound`].

pub mod config;
pub mod entry;
pub mod error;
pub mod listener;
pub mod observer;
mod runner;
pub mod store;

pub use config::RegistryConfig;
pub use entry::{StreamState, StreamStatus};
pub use error::RegistryError;
pub use listener::{FnListener, StreamListener, Subscription};
pub use observer::{RegistryObserver, TracingObserver};
pub use store::StreamRegistry;
