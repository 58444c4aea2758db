//! Aggregates the “business logic” layer.

pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod metrics;

// re-export frequently-used items for convenience
pub use config::{ConfigBuilder, Glyphs, RenderProfile, Settings};
pub use constants::DECIMAL_PRECISION;
pub use data::{Interval, MeasurementRecord, StreamSample};
pub use error::{ConfigError, GraphError, InputError, RenderError};
pub use metrics::{DataPoint, ExtractedMetrics, Metric, MetricSeries, extract};
