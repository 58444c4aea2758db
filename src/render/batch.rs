//! Drives the per-metric pipeline: script → engine → post-process → artifact.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    core::{
        config::RenderProfile,
        data::MeasurementRecord,
        error::{GraphError, RenderError},
        metrics::{ExtractedMetrics, Metric, MetricSeries, extract},
    },
    render::{
        ascii::{AxisLabels, post_process},
        invoker::{ChartFiles, render_raw},
        script::build_script,
    },
};

/// Outcome tally of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Enabled metrics.
    pub attempted: usize,
    pub rendered: usize,
    /// Enabled metrics with no data.
    pub empty: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
    /// Final chart files, in metric order.
    pub charts: Vec<PathBuf>,
}

pub struct Orchestrator<'a> {
    profile: &'a RenderProfile,
}

impl<'a> Orchestrator<'a> {
    #[must_use]
    pub fn new(profile: &'a RenderProfile) -> Self {
        Self { profile }
    }

    /// Render every enabled metric. Per-metric failures are logged and
    /// counted; only an unusable output directory aborts the run.
    pub fn run(&self, metrics: &ExtractedMetrics, stem: &str) -> Result<BatchReport, GraphError> {
        let p = self.profile;
        fs::create_dir_all(&p.output_dir).map_err(|source| GraphError::OutputDir {
            path: p.output_dir.clone(),
            source,
        })?;

        if p.tracking.bandwidth {
            warn!("track_bandwidth is enabled but bandwidth charts are not produced");
        }
        if p.tracking.retransmissions {
            warn!("track_retransmissions is enabled but retransmission charts are not produced");
        }

        let mut report = BatchReport {
            output_dir: p.output_dir.clone(),
            ..BatchReport::default()
        };

        for metric in Metric::ALL.into_iter().filter(|&m| p.tracking.enabled(m)) {
            report.attempted += 1;
            let series = metrics.series(metric);
            if series.is_empty() {
                warn!("no data available for {metric}");
                report.empty += 1;
                continue;
            }
            if p.verbose {
                info!("generating {metric} visualization...");
            }

            match self.render_metric(metric, series, stem) {
                Ok(chart) => {
                    if p.verbose {
                        info!("  ✓ {metric} graph saved to {}", chart.display());
                    }
                    report.rendered += 1;
                    report.charts.push(chart);
                }
                Err(e) => {
                    warn!("  ✗ failed to generate {metric} graph: {e}");
                    report.failed += 1;
                }
            }
        }

        if p.verbose {
            info!(
                "processing complete: {}/{} graphs generated successfully",
                report.rendered, report.attempted
            );
            info!("ASCII graphs saved in: {}", report.output_dir.display());
        }
        Ok(report)
    }

    fn render_metric(
        &self,
        metric: Metric,
        series: &MetricSeries,
        stem: &str,
    ) -> Result<PathBuf, RenderError> {
        let p = self.profile;
        let files = ChartFiles::new(&p.output_dir, metric, stem);
        let script = build_script(p, &files.data, metric.title(), metric.y_label());

        let raw = render_raw(
            &files,
            &script,
            series,
            p.precision,
            &p.engine,
            p.engine_timeout,
        )?;

        let labels = AxisLabels {
            x: metric.x_label(),
            y: metric.y_label(),
        };
        let chart = post_process(&raw, &labels, p);
        fs::write(&files.chart, chart.to_string())?;
        Ok(files.chart)
    }
}

/// Load `input`, extract its series and render every enabled metric.
///
/// Artifacts are named after the input file's stem.
pub fn render_file(input: &Path, profile: &RenderProfile) -> Result<BatchReport, GraphError> {
    let record = MeasurementRecord::from_path(input)?;
    if profile.verbose {
        info!("extracting performance metrics from iperf3 data...");
    }
    let metrics = extract(&record, profile.skip_malformed)?;
    let stem = input
        .file_stem()
        .map_or_else(|| "data".to_owned(), |s| s.to_string_lossy().into_owned());
    Orchestrator::new(profile).run(&metrics, &stem)
}
