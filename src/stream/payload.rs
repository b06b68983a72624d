//! Typed payloads for the known stream kinds
//!
//! Each known feed gets its own variant; anything else travels as
//! [`Payload::Json`].

use serde::Serialize;

/// Payload carried by a [`StreamDataPoint`](super::StreamDataPoint)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    /// Airborne aircraft position
    Aviation(AircraftPosition),
    /// Market price for one commodity
    Commodity(CommodityPrice),
    /// National grid load and generation mix
    GridLoad(GridLoad),
    /// Traffic conditions on one corridor
    Traffic(TrafficCorridor),
    /// Weather observation
    Weather(WeatherSample),
    /// Air quality observation
    AirQuality(AirQualitySample),
    /// Untyped payload from an unknown source
    Json(serde_json::Value),
}

/// Discriminant of [`Payload`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Aviation,
    Commodity,
    GridLoad,
    Traffic,
    Weather,
    AirQuality,
    Json,
}

impl Payload {
    /// Get the payload kind
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Aviation(_) => PayloadKind::Aviation,
            Payload::Commodity(_) => PayloadKind::Commodity,
            Payload::GridLoad(_) => PayloadKind::GridLoad,
            Payload::Traffic(_) => PayloadKind::Traffic,
            Payload::Weather(_) => PayloadKind::Weather,
            Payload::AirQuality(_) => PayloadKind::AirQuality,
            Payload::Json(_) => PayloadKind::Json,
        }
    }

    /// One-line human readable summary, for dashboards and logs
    pub fn summary(&self) -> String {
        match self {
            Payload::Aviation(a) => format!(
                "{} ({}) at {:.3},{:.3} alt {}m",
                a.callsign.as_deref().unwrap_or("?"),
                a.icao24,
                a.lat,
                a.lon,
                a.altitude.map_or_else(|| "?".to_string(), |v| format!("{:.0}", v)),
            ),
            Payload::Commodity(c) => format!("{} {:.2} {}", c.commodity, c.price, c.unit),
            Payload::GridLoad(g) => format!(
                "load {:.0} MW (geo {:.0}, hydro {:.0}, wind {:.0}, solar {:.0}, thermal {:.0})",
                g.total_load, g.geothermal, g.hydro, g.wind, g.solar, g.thermal
            ),
            Payload::Traffic(t) => format!(
                "{}: {:.0}% congested, {:.0} km/h, {} vehicles, {} incidents",
                t.corridor, t.congestion_level, t.average_speed, t.vehicle_count, t.incidents
            ),
            Payload::Weather(w) => format!(
                "{}: {:.1}°C, {:.0}% humidity, wind {:.1} km/h, rain {:.1} mm",
                w.location, w.temperature, w.humidity, w.wind_speed, w.rainfall
            ),
            Payload::AirQuality(q) => format!(
                "{}: AQI {:.0}, PM2.5 {:.1}, PM10 {:.1}",
                q.location, q.aqi, q.pm25, q.pm10
            ),
            Payload::Json(v) => v.to_string(),
        }
    }
}

/// Aircraft state vector
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftPosition {
    pub icao24: String,
    pub callsign: Option<String>,
    pub origin: Option<String>,
    pub lat: f64,
    pub lon: f64,
    /// Barometric altitude in metres
    pub altitude: Option<f64>,
    /// Ground speed in m/s
    pub velocity: Option<f64>,
    /// True track in degrees clockwise from north
    pub heading: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommodityPrice {
    pub commodity: String,
    pub price: f64,
    pub unit: String,
}

/// Grid load in MW
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLoad {
    pub total_load: f64,
    pub geothermal: f64,
    pub hydro: f64,
    pub wind: f64,
    pub solar: f64,
    pub thermal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficCorridor {
    pub corridor: String,
    /// Percentage, 0-100
    pub congestion_level: f64,
    /// km/h
    pub average_speed: f64,
    pub vehicle_count: u32,
    pub incidents: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    pub location: String,
    /// Degrees Celsius
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub rainfall: f64,
    pub cloud_cover: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualitySample {
    pub location: String,
    pub aqi: f64,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
}
