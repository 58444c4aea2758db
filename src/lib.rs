//! Public-facing crate root – re-exports + one-shot helper.

pub mod cli;
pub mod core;
pub mod render;

pub use crate::core::{
    config::{ConfigBuilder, Glyphs, RenderProfile, Settings, load_profile},
    data::MeasurementRecord,
    error::{ConfigError, GraphError, InputError, RenderError},
    metrics::{ExtractedMetrics, Metric, MetricSeries, extract},
};

pub use crate::render::{
    AxisLabels, BatchReport, CharacterGrid, Orchestrator, build_script, post_process, render_file,
};

/// Post-process already-captured engine output for one metric, without
/// touching the filesystem.
#[must_use]
pub fn clean_chart(raw: &str, metric: Metric, profile: &RenderProfile) -> String {
    let labels = AxisLabels {
        x: metric.x_label(),
        y: metric.y_label(),
    };
    post_process(raw, &labels, profile).to_string()
}
