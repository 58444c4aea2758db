//! Run-time configuration: the file-facing `Settings`, the resolved
//! `RenderProfile` and a fluent builder between them.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::core::{constants::DECIMAL_PRECISION, error::ConfigError, metrics::Metric};

// --- Typed pieces ---

/// Custom glyphs handed to the engine and substituted by the post-processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub primary: char,
    pub secondary: char,
    pub points: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            primary: '*',
            secondary: 'A',
            points: '+',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YLabelRotation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YLabelPosition {
    Left,
    Right,
}

/// How the y-axis label is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YLabelLayout {
    pub inline: bool,
    pub compact: bool,
    pub rotation: YLabelRotation,
    pub position: YLabelPosition,
}

impl YLabelLayout {
    /// True when the post-processor should write the label down the left margin.
    #[inline]
    #[must_use]
    pub fn overlay_vertical_left(&self) -> bool {
        self.inline
            && self.rotation == YLabelRotation::Vertical
            && self.position == YLabelPosition::Left
    }
}

impl Default for YLabelLayout {
    fn default() -> Self {
        Self {
            inline: true,
            compact: true,
            rotation: YLabelRotation::Vertical,
            position: YLabelPosition::Left,
        }
    }
}

/// Per-metric enable flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Tracking {
    pub sender_bytes: bool,
    pub receiver_bytes: bool,
    pub packet_loss: bool,
    pub jitter: bool,
    /// Recognised but not charted.
    pub bandwidth: bool,
    /// Recognised but not charted.
    pub retransmissions: bool,
}

impl Tracking {
    #[must_use]
    pub const fn enabled(&self, metric: Metric) -> bool {
        match metric {
            Metric::SenderBytes => self.sender_bytes,
            Metric::ReceiverBytes => self.receiver_bytes,
            Metric::PacketLoss => self.packet_loss,
            Metric::Jitter => self.jitter,
        }
    }

    fn set(&mut self, metric: Metric, on: bool) {
        match metric {
            Metric::SenderBytes => self.sender_bytes = on,
            Metric::ReceiverBytes => self.receiver_bytes = on,
            Metric::PacketLoss => self.packet_loss = on,
            Metric::Jitter => self.jitter = on,
        }
    }
}

impl Default for Tracking {
    fn default() -> Self {
        Self {
            sender_bytes: true,
            receiver_bytes: true,
            packet_loss: true,
            jitter: true,
            bandwidth: false,
            retransmissions: false,
        }
    }
}

// --- RenderProfile ---

/// Immutable parameters shared by every stage of one run.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderProfile {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub width: usize,
    pub height: usize,
    pub precision: usize,
    pub glyphs: Glyphs,
    pub plot_style: String,
    pub y_label: YLabelLayout,
    pub axis_info_below: bool,
    pub terminal: String,
    pub grid: bool,
    /// Key position, or `None` to suppress the key.
    pub legend: Option<String>,
    pub tracking: Tracking,
    pub skip_malformed: bool,
    pub verbose: bool,
    pub engine: String,
    pub engine_timeout: Duration,
}

impl RenderProfile {
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("data/data.json"),
            output_dir: PathBuf::from("graphs_ascii"),
            width: 120,
            height: 30,
            precision: DECIMAL_PRECISION,
            glyphs: Glyphs::default(),
            plot_style: "linespoints".into(),
            y_label: YLabelLayout::default(),
            axis_info_below: false,
            terminal: "dumb".into(),
            grid: true,
            legend: Some("top left".into()),
            tracking: Tracking::default(),
            skip_malformed: true,
            verbose: true,
            engine: "gnuplot".into(),
            engine_timeout: Duration::from_secs(30),
        }
    }
}

// --- Builder ---

/// Fluent builder starting from the documented defaults.
#[derive(Debug)]
pub struct ConfigBuilder {
    profile: RenderProfile,
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self {
            profile: RenderProfile::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn input_file(mut self, p: impl Into<PathBuf>) -> Self {
        self.profile.input_file = p.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn output_dir(mut self, p: impl Into<PathBuf>) -> Self {
        self.profile.output_dir = p.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn canvas(mut self, width: usize, height: usize) -> Self {
        self.profile.width = width;
        self.profile.height = height;
        self
    }
    #[inline]
    #[must_use]
    pub fn precision(mut self, digits: usize) -> Self {
        self.profile.precision = digits;
        self
    }
    #[inline]
    #[must_use]
    pub fn glyphs(mut self, g: Glyphs) -> Self {
        self.profile.glyphs = g;
        self
    }
    #[inline]
    #[must_use]
    pub fn plot_style(mut self, s: impl Into<String>) -> Self {
        self.profile.plot_style = s.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn y_label(mut self, layout: YLabelLayout) -> Self {
        self.profile.y_label = layout;
        self
    }
    #[inline]
    #[must_use]
    pub fn axis_info_below(mut self, on: bool) -> Self {
        self.profile.axis_info_below = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn terminal(mut self, t: impl Into<String>) -> Self {
        self.profile.terminal = t.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn grid(mut self, on: bool) -> Self {
        self.profile.grid = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn legend(mut self, position: Option<String>) -> Self {
        self.profile.legend = position;
        self
    }
    #[inline]
    #[must_use]
    pub fn tracking(mut self, t: Tracking) -> Self {
        self.profile.tracking = t;
        self
    }
    #[inline]
    #[must_use]
    pub fn track(mut self, metric: Metric, on: bool) -> Self {
        self.profile.tracking.set(metric, on);
        self
    }
    #[inline]
    #[must_use]
    pub fn skip_malformed(mut self, on: bool) -> Self {
        self.profile.skip_malformed = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn verbose(mut self, on: bool) -> Self {
        self.profile.verbose = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn engine(mut self, cmd: impl Into<String>) -> Self {
        self.profile.engine = cmd.into();
        self
    }
    #[inline]
    #[must_use]
    pub fn engine_timeout(mut self, d: Duration) -> Self {
        self.profile.engine_timeout = d;
        self
    }

    pub fn build(self) -> Result<RenderProfile, ConfigError> {
        let p = self.profile;
        if p.width == 0 {
            return Err(ConfigError::InvalidDimension { key: "graph_width" });
        }
        if p.height == 0 {
            return Err(ConfigError::InvalidDimension { key: "graph_height" });
        }
        if p.engine_timeout.is_zero() {
            return Err(ConfigError::InvalidDimension {
                key: "engine_timeout_secs",
            });
        }
        Ok(p)
    }
}

// --- File-facing settings ---

/// Key/value surface of the configuration file. Unset keys keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    pub default_input_file: String,
    pub default_output_dir: String,
    pub graph_width: usize,
    pub graph_height: usize,
    pub precision_digits: usize,
    pub plot_char_primary: String,
    pub plot_char_secondary: String,
    pub plot_char_points: String,
    pub plot_style: String,
    pub show_ylabel_inline: bool,
    pub ylabel_position: String,
    pub ylabel_rotation: String,
    pub compact_ylabel: bool,
    pub show_axis_info_below: bool,
    pub terminal_type: String,
    pub enable_grid: bool,
    pub enable_legend: bool,
    pub legend_position: String,
    pub skip_malformed_entries: bool,
    pub verbose_output: bool,
    pub track_sender_bytes: bool,
    pub track_receiver_bytes: bool,
    pub track_packet_loss: bool,
    pub track_jitter: bool,
    pub track_bandwidth: bool,
    pub track_retransmissions: bool,
    pub engine_command: String,
    pub engine_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_input_file: "data/data.json".into(),
            default_output_dir: "graphs_ascii".into(),
            graph_width: 120,
            graph_height: 30,
            precision_digits: DECIMAL_PRECISION,
            plot_char_primary: "*".into(),
            plot_char_secondary: "A".into(),
            plot_char_points: "+".into(),
            plot_style: "linespoints".into(),
            show_ylabel_inline: true,
            ylabel_position: "left".into(),
            ylabel_rotation: "vertical".into(),
            compact_ylabel: true,
            show_axis_info_below: false,
            terminal_type: "dumb".into(),
            enable_grid: true,
            enable_legend: true,
            legend_position: "top left".into(),
            skip_malformed_entries: true,
            verbose_output: true,
            track_sender_bytes: true,
            track_receiver_bytes: true,
            track_packet_loss: true,
            track_jitter: true,
            track_bandwidth: false,
            track_retransmissions: false,
            engine_command: "gnuplot".into(),
            engine_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Read a configuration file; keys may be top-level or under `[DEFAULT]`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;

        for section in ["DEFAULT", "default"] {
            match cfg.get::<Settings>(section) {
                Ok(s) => return Ok(s),
                Err(config::ConfigError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(cfg.try_deserialize()?)
    }

    /// Validate and convert into the typed profile.
    pub fn resolve(self) -> Result<RenderProfile, ConfigError> {
        let glyphs = Glyphs {
            primary: single_char("plot_char_primary", &self.plot_char_primary)?,
            secondary: single_char("plot_char_secondary", &self.plot_char_secondary)?,
            points: single_char("plot_char_points", &self.plot_char_points)?,
        };
        let rotation = match self.ylabel_rotation.trim().to_ascii_lowercase().as_str() {
            "vertical" => YLabelRotation::Vertical,
            "horizontal" => YLabelRotation::Horizontal,
            _ => {
                return Err(ConfigError::InvalidOption {
                    key: "ylabel_rotation",
                    value: self.ylabel_rotation,
                });
            }
        };
        let position = match self.ylabel_position.trim().to_ascii_lowercase().as_str() {
            "left" => YLabelPosition::Left,
            "right" => YLabelPosition::Right,
            _ => {
                return Err(ConfigError::InvalidOption {
                    key: "ylabel_position",
                    value: self.ylabel_position,
                });
            }
        };

        RenderProfile::builder()
            .input_file(self.default_input_file)
            .output_dir(self.default_output_dir)
            .canvas(self.graph_width, self.graph_height)
            .precision(self.precision_digits)
            .glyphs(glyphs)
            .plot_style(self.plot_style)
            .y_label(YLabelLayout {
                inline: self.show_ylabel_inline,
                compact: self.compact_ylabel,
                rotation,
                position,
            })
            .axis_info_below(self.show_axis_info_below)
            .terminal(self.terminal_type)
            .grid(self.enable_grid)
            .legend(self.enable_legend.then_some(self.legend_position))
            .tracking(Tracking {
                sender_bytes: self.track_sender_bytes,
                receiver_bytes: self.track_receiver_bytes,
                packet_loss: self.track_packet_loss,
                jitter: self.track_jitter,
                bandwidth: self.track_bandwidth,
                retransmissions: self.track_retransmissions,
            })
            .skip_malformed(self.skip_malformed_entries)
            .verbose(self.verbose_output)
            .engine(self.engine_command)
            .engine_timeout(Duration::from_secs(self.engine_timeout_secs))
            .build()
    }
}

fn single_char(key: &'static str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidGlyph {
            key,
            value: value.to_owned(),
        }),
    }
}

/// Load the profile, falling back to defaults (with a warning) on any problem.
#[must_use]
pub fn load_profile(path: &Path) -> RenderProfile {
    if !path.exists() {
        warn!(
            "config file {} not found, using defaults",
            path.display()
        );
        return RenderProfile::default();
    }
    match Settings::from_file(path).and_then(Settings::resolve) {
        Ok(profile) => {
            info!("configuration loaded from {}", path.display());
            profile
        }
        Err(e) => {
            warn!("error reading config file: {e}; using defaults");
            RenderProfile::default()
        }
    }
}
