//! Data points and batches
//!
//! A poll cycle produces a [`Batch`]: the ordered data points for one stream.
//! Batches are immutable and shared, so every subscriber of a cycle receives
//! the same allocation.

use std::sync::Arc;

use serde::Serialize;

use super::payload::Payload;

/// The ordered data points produced by one poll cycle
///
/// Cheap to clone: clones share the underlying slice.
pub type Batch = Arc<[StreamDataPoint]>;

/// A single timestamped, sourced unit of data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamDataPoint {
    /// Identifier, unique within its batch
    pub id: String,
    /// Production time in epoch milliseconds
    pub timestamp: i64,
    /// Stream-specific payload
    pub value: Payload,
    /// Provenance label assigned by the parser
    pub source: String,
    /// Informational confidence in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl StreamDataPoint {
    /// Create a data point stamped with the current time
    pub fn new(id: impl Into<String>, value: Payload, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: now_millis(),
            value,
            source: source.into(),
            confidence: None,
        }
    }

    /// Set the confidence, clamped into [0, 1]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        });
        self
    }

    /// Override the production timestamp
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stamps_current_time() {
        let before = now_millis();
        let point = StreamDataPoint::new("p1", Payload::Json(serde_json::json!({"n": 1})), "test");
        let after = now_millis();

        assert!(point.timestamp >= before && point.timestamp <= after);
        assert_eq!(point.id, "p1");
        assert_eq!(point.source, "test");
        assert!(point.confidence.is_none());
    }

    #[test]
    fn test_confidence_is_clamped() {
        let value = Payload::Json(serde_json::Value::Null);

        let high = StreamDataPoint::new("a", value.clone(), "s").with_confidence(1.7);
        let low = StreamDataPoint::new("b", value.clone(), "s").with_confidence(-0.2);
        let nan = StreamDataPoint::new("c", value, "s").with_confidence(f32::NAN);

        assert_eq!(high.confidence, Some(1.0));
        assert_eq!(low.confidence, Some(0.0));
        assert_eq!(nan.confidence, Some(0.0));
    }

    #[test]
    fn test_serializes_camel_case_without_empty_confidence() {
        let point = StreamDataPoint::new("p1", Payload::Json(serde_json::json!(3)), "test")
            .with_timestamp(42);
        let json = serde_json::to_value(&point).unwrap();

        assert_eq!(json["timestamp"], 42);
        assert_eq!(json["value"]["kind"], "json");
        assert!(json.get("confidence").is_none());
    }
}
