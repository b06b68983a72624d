//! Stream definitions

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::error::ConfigError;
use super::parser::{PassthroughParser, PayloadParser};

/// Interval used when a builder sets none
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Immutable definition of one stream
///
/// Cheap to clone: the parser is shared.
#[derive(Clone)]
pub struct StreamConfig {
    /// Unique stream id
    pub id: String,
    /// Human readable label
    pub name: String,
    /// Provenance label (free text)
    pub source: String,
    /// Time between poll cycles
    pub interval: Duration,
    /// URL fetched each cycle; generated streams have none
    pub endpoint: Option<String>,
    /// Shapes each cycle's payload into data points
    pub parser: Arc<dyn PayloadParser>,
    /// Started by `start_all`; ignored by explicit start/stop
    pub enabled: bool,
}

impl StreamConfig {
    /// Start building a stream definition
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> StreamConfigBuilder {
        StreamConfigBuilder {
            id: id.into(),
            name: name.into(),
            source: String::new(),
            interval: DEFAULT_INTERVAL,
            endpoint: None,
            parser: None,
            enabled: true,
        }
    }

    /// Whether cycles perform network I/O
    pub fn is_networked(&self) -> bool {
        self.endpoint.is_some()
    }
}

impl fmt::Debug for StreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("source", &self.source)
            .field("interval", &self.interval)
            .field("endpoint", &self.endpoint)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Builder for [`StreamConfig`]
pub struct StreamConfigBuilder {
    id: String,
    name: String,
    source: String,
    interval: Duration,
    endpoint: Option<String>,
    parser: Option<Arc<dyn PayloadParser>>,
    enabled: bool,
}

impl StreamConfigBuilder {
    /// Set the provenance label
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the poll interval
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the poll interval in milliseconds
    pub fn interval_ms(self, millis: u64) -> Self {
        self.interval(Duration::from_millis(millis))
    }

    /// Fetch this URL each cycle
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the payload parser
    pub fn parser(mut self, parser: impl PayloadParser + 'static) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Set whether `start_all` starts this stream
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Validate and build the definition
    pub fn build(self) -> Result<StreamConfig, ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::EmptyId);
        }
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval {
                id: self.id,
                interval: self.interval,
            });
        }

        let parser = match self.parser {
            Some(parser) => parser,
            None => Arc::new(PassthroughParser::new(self.id.clone(), self.source.clone())),
        };

        Ok(StreamConfig {
            id: self.id,
            name: self.name,
            source: self.source,
            interval: self.interval,
            endpoint: self.endpoint,
            parser,
            enabled: self.enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = StreamConfig::builder("x", "Stream X").build().unwrap();

        assert_eq!(config.id, "x");
        assert_eq!(config.name, "Stream X");
        assert_eq!(config.interval, DEFAULT_INTERVAL);
        assert!(config.enabled);
        assert!(!config.is_networked());
    }

    #[test]
    fn test_builder_chaining() {
        let config = StreamConfig::builder("y", "Stream Y")
            .source("test")
            .interval_ms(250)
            .endpoint("http://localhost/data")
            .enabled(false)
            .build()
            .unwrap();

        assert_eq!(config.source, "test");
        assert_eq!(config.interval, Duration::from_millis(250));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost/data"));
        assert!(config.is_networked());
        assert!(!config.enabled);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = StreamConfig::builder("z", "Z").interval_ms(0).build();
        assert!(matches!(result, Err(ConfigError::ZeroInterval { .. })));
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = StreamConfig::builder("", "nameless").build();
        assert_eq!(result.unwrap_err(), ConfigError::EmptyId);
    }

    #[test]
    fn test_default_parser_is_passthrough() {
        let config = StreamConfig::builder("raw", "Raw").source("lab").build().unwrap();
        let points = config.parser.parse(Some(&json!([1, 2]))).unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, "raw-raw");
        assert_eq!(points[0].source, "lab");
    }
}
