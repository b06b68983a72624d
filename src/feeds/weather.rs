//! Simulated weather observations for Nairobi

use std::time::Duration;

use rand::Rng;
use serde_json::Value;

use crate::stream::{ConfigError, ParseError, Payload, StreamConfig, StreamDataPoint, WeatherSample};

pub const STREAM_ID: &str = "weather-live";

pub fn config() -> Result<StreamConfig, ConfigError> {
    StreamConfig::builder(STREAM_ID, "Live Weather Data")
        .source("NOAA/OpenWeather")
        .interval(Duration::from_secs(10 * 60))
        .parser(generate)
        .build()
}

pub fn generate(_raw: Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError> {
    let mut rng = rand::thread_rng();
    let sample = WeatherSample {
        location: "Nairobi".to_string(),
        temperature: 20.0 + rng.gen_range(0.0..8.0),
        humidity: 40.0 + rng.gen_range(0.0..40.0),
        wind_speed: 5.0 + rng.gen_range(0.0..15.0),
        rainfall: rng.gen_range(0.0..10.0),
        cloud_cover: rng.gen_range(0.0..100.0),
    };

    Ok(vec![
        StreamDataPoint::new("weather-nairobi", Payload::Weather(sample), "NOAA").with_confidence(0.88),
    ])
}
