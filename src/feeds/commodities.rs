//! Simulated commodity prices from Kenyan markets

use std::time::Duration;

use rand::Rng;
use serde_json::Value;

use crate::stream::{CommodityPrice, ConfigError, ParseError, Payload, StreamConfig, StreamDataPoint};

pub const STREAM_ID: &str = "commodities-live";

/// (commodity, base price, spread, unit)
const COMMODITIES: [(&str, f64, f64, &str); 4] = [
    ("tea", 120.0, 10.0, "KES/kg"),
    ("coffee", 180.0, 20.0, "KES/kg"),
    ("maize", 45.0, 5.0, "KES/kg"),
    ("sugarcane", 3500.0, 200.0, "KES/tonne"),
];

pub fn config() -> Result<StreamConfig, ConfigError> {
    StreamConfig::builder(STREAM_ID, "Live Commodity Prices")
        .source("Kenya Markets")
        .interval(Duration::from_secs(5 * 60))
        .parser(generate)
        .build()
}

/// Generate one price per commodity
pub fn generate(_raw: Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError> {
    let mut rng = rand::thread_rng();

    Ok(COMMODITIES
        .iter()
        .map(|&(commodity, base, spread, unit)| {
            let price = CommodityPrice {
                commodity: commodity.to_string(),
                price: base + rng.gen_range(0.0..spread),
                unit: unit.to_string(),
            };
            StreamDataPoint::new(format!("commodity-{}", commodity), Payload::Commodity(price), "KNBS")
                .with_confidence(0.85)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prices_within_bands() {
        for _ in 0..50 {
            let points = generate(None).unwrap();
            assert_eq!(points.len(), 4);

            for (point, &(name, base, spread, unit)) in points.iter().zip(COMMODITIES.iter()) {
                assert_eq!(point.id, format!("commodity-{}", name));
                assert_eq!(point.source, "KNBS");
                let Payload::Commodity(ref price) = point.value else {
                    panic!("expected commodity payload");
                };
                assert_eq!(price.unit, unit);
                assert!(price.price >= base && price.price < base + spread);
            }
        }
    }

    #[test]
    fn test_sugarcane_priced_per_tonne() {
        let points = generate(None).unwrap();
        let Payload::Commodity(ref sugarcane) = points[3].value else {
            panic!("expected commodity payload");
        };
        assert_eq!(sugarcane.commodity, "sugarcane");
        assert_eq!(sugarcane.unit, "KES/tonne");
    }
}
