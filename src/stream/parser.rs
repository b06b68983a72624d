//! Payload parsers
//!
//! A parser turns the raw payload of one cycle (or nothing, for generated
//! streams) into the cycle's data points. Parsers own all domain-specific
//! shaping; the registry treats their output opaquely.

use serde_json::Value;

use super::error::ParseError;
use super::payload::Payload;
use super::point::StreamDataPoint;

/// Shapes one cycle's raw payload into data points
pub trait PayloadParser: Send + Sync {
    /// Parse the fetched payload, or generate points when `raw` is `None`
    fn parse(&self, raw: Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError>;
}

impl<F> PayloadParser for F
where
    F: Fn(Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError> + Send + Sync,
{
    fn parse(&self, raw: Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError> {
        self(raw)
    }
}

/// Pin a closure to the parser signature
///
/// Lets closures infer their argument and error types:
/// `parser_fn(|_| Ok(Vec::new()))`.
pub fn parser_fn<F>(f: F) -> F
where
    F: Fn(Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError> + Send + Sync,
{
    f
}

/// Parser used when a stream defines none
///
/// Wraps the raw payload as a single JSON point; yields nothing when there
/// is no payload.
#[derive(Debug, Clone)]
pub struct PassthroughParser {
    stream_id: String,
    source: String,
}

impl PassthroughParser {
    pub fn new(stream_id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            source: source.into(),
        }
    }
}

impl PayloadParser for PassthroughParser {
    fn parse(&self, raw: Option<&Value>) -> Result<Vec<StreamDataPoint>, ParseError> {
        Ok(raw
            .map(|value| {
                vec![StreamDataPoint::new(
                    format!("{}-raw", self.stream_id),
                    Payload::Json(value.clone()),
                    self.source.clone(),
                )]
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_passthrough_wraps_payload() {
        let parser = PassthroughParser::new("x", "test");
        let points = parser.parse(Some(&json!({"a": 1}))).unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, "x-raw");
        assert_eq!(points[0].value, Payload::Json(json!({"a": 1})));
    }

    #[test]
    fn test_passthrough_without_payload() {
        let parser = PassthroughParser::new("x", "test");
        assert!(parser.parse(None).unwrap().is_empty());
    }

    #[test]
    fn test_closure_parser() {
        let parser = parser_fn(|raw| match raw {
            Some(_) => Err(ParseError::new("unexpected payload")),
            None => Ok(Vec::new()),
        });

        assert!(parser.parse(None).unwrap().is_empty());
        assert_eq!(
            parser.parse(Some(&json!(1))).unwrap_err().message(),
            "unexpected payload"
        );
    }
}
