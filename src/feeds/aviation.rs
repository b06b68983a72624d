//! Live aviation tracking from the OpenSky Network
//!
//! Polls OpenSky's `states/all` endpoint over a bounding box around Kenya
//! and keeps airborne aircraft with a known position.

use std::time::Duration;

use serde_json::Value;

use crate::stream::{
    AircraftPosition, ConfigError, ParseError, Payload, StreamConfig, StreamDataPoint,
};

pub const STREAM_ID: &str = "aviation-live";

pub const ENDPOINT: &str =
    "https://opensky-network.org/api/states/all?lamin=-5&lomin=33&lamax=5&lomax=42";

// OpenSky state vector columns
const ICAO24: usize = 0;
const CALLSIGN: usize = 1;
const ORIGIN_COUNTRY: usize = 2;
const LONGITUDE: usize = 5;
const LATITUDE: usize = 6;
const BARO_ALTITUDE: usize = 7;
const ON_GROUND: usize = 8;
const VELOCITY: usize = 9;
const TRUE_TRACK: usize = 10;

pub fn config() -> Result<StreamConfig, ConfigError> {
    StreamConfig::builder(STREAM_ID, "Live Aviation Tracking")
        .source("OpenSky Network")
        .interval(Duration::from_secs(10))
        .endpoint(ENDPOINT)
        .parser(parse)
        .build()
}

/// Parse an OpenSky `states/all` response
///
/// A missing or null `states` field yields an empty batch.
pub fn parse(raw: Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError> {
    let Some(states) = raw.and_then(|data| data.get("states")) else {
        return Ok(Vec::new());
    };
    if states.is_null() {
        return Ok(Vec::new());
    }
    let states = states
        .as_array()
        .ok_or_else(|| ParseError::new("OpenSky `states` is not an array"))?;

    Ok(states.iter().filter_map(parse_state).collect())
}

fn parse_state(state: &Value) -> Option<StreamDataPoint> {
    let row = state.as_array()?;
    let column = |index: usize| row.get(index).filter(|v| !v.is_null());

    let lat = column(LATITUDE)?.as_f64()?;
    let lon = column(LONGITUDE)?.as_f64()?;
    if column(ON_GROUND).and_then(Value::as_bool).unwrap_or(false) {
        return None;
    }

    let icao24 = column(ICAO24)?.as_str()?.to_string();
    let position = AircraftPosition {
        callsign: column(CALLSIGN)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        origin: column(ORIGIN_COUNTRY).and_then(Value::as_str).map(str::to_string),
        lat,
        lon,
        altitude: column(BARO_ALTITUDE).and_then(Value::as_f64),
        velocity: column(VELOCITY).and_then(Value::as_f64),
        heading: column(TRUE_TRACK).and_then(Value::as_f64),
        icao24,
    };

    Some(
        StreamDataPoint::new(
            format!("aircraft-{}", position.icao24),
            Payload::Aviation(position),
            "OpenSky",
        )
        .with_confidence(0.95),
    )
}
