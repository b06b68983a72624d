//! Preconfigured streams for the Kenya digital twin
//!
//! | Stream | Source | Interval | Kind |
//! |---|---|---|---|
//! | `aviation-live` | OpenSky Network | 10 s | HTTP |
//! | `commodities-live` | Kenya Markets | 5 min | generated |
//! | `energy-grid-live` | Kenya Power | 1 min | generated |
//! | `traffic-live` | Urban Mobility | 30 s | generated |
//! | `weather-live` | NOAA/OpenWeather | 10 min | generated |
//! | `air-quality-live` | Environmental Monitoring | 5 min | generated |

pub mod air_quality;
pub mod aviation;
pub mod commodities;
pub mod energy;
pub mod traffic;
pub mod weather;

use crate::registry::StreamRegistry;
use crate::stream::{ConfigError, StreamConfig};

/// Definitions of every Kenya stream
pub fn kenya_streams() -> Result<Vec<StreamConfig>, ConfigError> {
    Ok(vec![
        aviation::config()?,
        commodities::config()?,
        energy::config()?,
        traffic::config()?,
        weather::config()?,
        air_quality::config()?,
    ])
}

/// Register every Kenya stream
pub fn initialize_streams(registry: &StreamRegistry) -> Result<(), ConfigError> {
    let streams = kenya_streams()?;
    let count = streams.len();

    for config in streams {
        registry.register_stream(config);
    }

    tracing::info!(streams = count, "Initialized Kenya digital twin streams");
    Ok(())
}

/// Start every enabled stream; returns the number started
pub fn start_all_streams(registry: &StreamRegistry) -> usize {
    registry.start_all()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::registry::RegistryConfig;
    use crate::stream::PayloadKind;

    #[test]
    fn test_kenya_streams_unique_ids() {
        let streams = kenya_streams().unwrap();
        let ids: HashSet<_> = streams.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(streams.len(), 6);
        assert_eq!(ids.len(), 6);
        assert!(streams.iter().all(|s| s.enabled));
        assert_eq!(streams.iter().filter(|s| s.is_networked()).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generated_streams_populate_registry() {
        let registry = Arc::new(StreamRegistry::with_config(RegistryConfig::default().no_proxy()).unwrap());
        initialize_streams(&registry).unwrap();
        assert_eq!(registry.stream_count(), 6);

        for id in [
            commodities::STREAM_ID,
            energy::STREAM_ID,
            traffic::STREAM_ID,
            weather::STREAM_ID,
            air_quality::STREAM_ID,
        ] {
            registry.start_stream(id).unwrap();
        }
        tokio::time::sleep(Duration::from_millis(1)).await;

        let kinds = [
            (commodities::STREAM_ID, PayloadKind::Commodity, 4),
            (energy::STREAM_ID, PayloadKind::GridLoad, 1),
            (traffic::STREAM_ID, PayloadKind::Traffic, 5),
            (weather::STREAM_ID, PayloadKind::Weather, 1),
            (air_quality::STREAM_ID, PayloadKind::AirQuality, 1),
        ];
        for (id, kind, len) in kinds {
            let batch = registry.latest_data(id).unwrap();
            assert_eq!(batch.len(), len, "{}", id);
            assert!(batch.iter().all(|p| p.value.kind() == kind), "{}", id);
        }

        assert_eq!(registry.stop_all(), 5);
        assert!(!registry.is_running(aviation::STREAM_ID));
    }
}
