//! Stream definitions and data model
//!
//! A stream is a named, independently scheduled source of data points.
//! Its [`StreamConfig`] says where data comes from (an optional HTTP
//! endpoint), how often to poll, and how to shape each cycle's payload
//! into [`StreamDataPoint`]s.

pub mod config;
pub mod error;
pub mod fetch;
pub mod parser;
pub mod payload;
pub mod point;

pub use config::{StreamConfig, StreamConfigBuilder};
pub use error::{ConfigError, CycleError, ParseError};
pub use fetch::Fetcher;
pub use parser::{parser_fn, PassthroughParser, PayloadParser};
pub use payload::{
    AircraftPosition, AirQualitySample, CommodityPrice, GridLoad, Payload, PayloadKind,
    TrafficCorridor, WeatherSample,
};
pub use point::{now_millis, Batch, StreamDataPoint};
