//! Simulated traffic flow on major Nairobi corridors

use std::time::Duration;

use rand::Rng;
use serde_json::Value;

use crate::stream::{ConfigError, ParseError, Payload, StreamConfig, StreamDataPoint, TrafficCorridor};

pub const STREAM_ID: &str = "traffic-live";

pub const CORRIDORS: [&str; 5] = [
    "Nairobi-Mombasa",
    "Nairobi-Kisumu",
    "Nairobi-Nakuru",
    "Nairobi CBD",
    "Westlands-CBD",
];

pub fn config() -> Result<StreamConfig, ConfigError> {
    StreamConfig::builder(STREAM_ID, "Live Traffic Flow")
        .source("Urban Mobility")
        .interval(Duration::from_secs(30))
        .parser(generate)
        .build()
}

pub fn generate(_raw: Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError> {
    let mut rng = rand::thread_rng();

    Ok(CORRIDORS
        .iter()
        .map(|&corridor| {
            let traffic = TrafficCorridor {
                corridor: corridor.to_string(),
                congestion_level: rng.gen_range(0.0..100.0),
                average_speed: 20.0 + rng.gen_range(0.0..40.0),
                vehicle_count: rng.gen_range(100..600),
                incidents: rng.gen_range(0..3),
            };
            StreamDataPoint::new(corridor_id(corridor), Payload::Traffic(traffic), "Urban Mobility")
                .with_confidence(0.80)
        })
        .collect())
}

/// `traffic-` followed by the lowercased corridor name, whitespace runs as `-`
fn corridor_id(corridor: &str) -> String {
    let slug = corridor.split_whitespace().collect::<Vec<_>>().join("-");
    format!("traffic-{}", slug.to_lowercase())
}
