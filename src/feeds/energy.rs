//! Simulated national grid load
//!
//! Total load follows a sinusoidal cycle around a 2400 MW base with a little
//! noise; solar output follows the same cycle.

use std::time::Duration;

use rand::Rng;
use serde_json::Value;

use crate::stream::{now_millis, ConfigError, GridLoad, ParseError, Payload, StreamConfig, StreamDataPoint};

pub const STREAM_ID: &str = "energy-grid-live";

const BASE_LOAD_MW: f64 = 2400.0;
const CYCLE_MS: f64 = 3_600_000.0;

pub fn config() -> Result<StreamConfig, ConfigError> {
    StreamConfig::builder(STREAM_ID, "Live Energy Grid Load")
        .source("Kenya Power")
        .interval(Duration::from_secs(60))
        .parser(generate)
        .build()
}

pub fn generate(_raw: Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError> {
    let now = now_millis();
    Ok(vec![StreamDataPoint::new("grid-load", Payload::GridLoad(sample_at(now)), "Kenya Power")
        .with_timestamp(now)
        .with_confidence(0.92)])
}

fn sample_at(now_ms: i64) -> GridLoad {
    let mut rng = rand::thread_rng();
    let phase = (now_ms as f64 / CYCLE_MS).sin();

    GridLoad {
        total_load: BASE_LOAD_MW + phase * 300.0 + rng.gen_range(-50.0..50.0),
        geothermal: 700.0 + rng.gen_range(0.0..50.0),
        hydro: 400.0 + rng.gen_range(0.0..100.0),
        wind: 150.0 + rng.gen_range(0.0..50.0),
        solar: (200.0 + phase * 150.0).max(0.0),
        thermal: 950.0 + rng.gen_range(0.0..100.0),
    }
}
