use std::path::Path;

use tracing::info;

use crate::{
    core::{
        config::{RenderProfile, load_profile},
        constants::CONFIG_FILE,
        error::GraphError,
    },
    render::batch::{BatchReport, render_file},
};

use super::parse::Cli;

/// Resolve configuration and input path, then render every enabled metric.
pub fn render(cli: Cli) -> Result<BatchReport, GraphError> {
    let profile = load_profile(Path::new(CONFIG_FILE));
    let input = cli.input.unwrap_or_else(|| profile.input_file.clone());

    if profile.verbose {
        banner(&profile, &input);
    }
    render_file(&input, &profile)
}

/// Startup summary printed in verbose mode.
fn banner(p: &RenderProfile, input: &Path) {
    info!("iperf3 Network Performance Visualization Tool");
    info!("input file: {}", input.display());
    info!("output directory: {}", p.output_dir.display());
    info!("graph dimensions: {}x{}", p.width, p.height);
    info!("grid enabled: {}", p.grid);
    info!("legend enabled: {}", p.legend.is_some());
}
