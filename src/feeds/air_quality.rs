//! Simulated air quality for Nairobi

use std::time::Duration;

use rand::Rng;
use serde_json::Value;

use crate::stream::{AirQualitySample, ConfigError, ParseError, Payload, StreamConfig, StreamDataPoint};

pub const STREAM_ID: &str = "air-quality-live";

const SOURCE: &str = "Environmental Monitoring";

pub fn config() -> Result<StreamConfig, ConfigError> {
    StreamConfig::builder(STREAM_ID, "Live Air Quality")
        .source(SOURCE)
        .interval(Duration::from_secs(5 * 60))
        .parser(generate)
        .build()
}

pub fn generate(_raw: Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError> {
    let mut rng = rand::thread_rng();
    let sample = AirQualitySample {
        location: "Nairobi".to_string(),
        aqi: 50.0 + rng.gen_range(0.0..100.0),
        pm25: 15.0 + rng.gen_range(0.0..50.0),
        pm10: 25.0 + rng.gen_range(0.0..75.0),
        no2: 20.0 + rng.gen_range(0.0..40.0),
        o3: 30.0 + rng.gen_range(0.0..50.0),
    };

    Ok(vec![
        StreamDataPoint::new("aqi-nairobi", Payload::AirQuality(sample), SOURCE).with_confidence(0.82),
    ])
}
