//! Real-time stream registry for the Virtual Kenya digital twin
//!
//! Named data sources are polled on their own intervals, shaped into
//! uniform [`StreamDataPoint`]s and fanned out to listeners. The registry
//! keeps only the latest batch per stream.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use twin_streams::{feeds, FnListener, StreamRegistry};
//!
//! # async fn example() -> twin_streams::Result<()> {
//! let registry = Arc::new(StreamRegistry::new());
//! feeds::initialize_streams(&registry)?;
//!
//! let _subscription = registry.subscribe(
//!     "traffic-live",
//!     FnListener::new(|batch| println!("{} corridors updated", batch.len())),
//! )?;
//!
//! feeds::start_all_streams(&registry);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod feeds;
pub mod registry;
pub mod stream;

pub use error::{Error, Result};
pub use registry::{
    FnListener, RegistryConfig, RegistryError, RegistryObserver, StreamListener, StreamRegistry,
    StreamState, StreamStatus, Subscription, TracingObserver,
};
pub use stream::{
    parser_fn, Batch, ConfigError, CycleError, ParseError, Payload, PayloadKind, PayloadParser,
    StreamConfig, StreamDataPoint,
};
