//! Centralised error types used across the crate.

use std::{io, path::PathBuf, process::ExitStatus};

/// Faults in the measurement record. Always fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("JSON file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON format: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid iperf3 JSON: missing 'intervals' section")]
    MissingIntervals,
    #[error("interval {interval}, stream {stream}: missing or non-numeric `{field}`")]
    MalformedSample {
        interval: usize,
        stream: usize,
        field: &'static str,
    },
}

/// Precise configuration faults. Callers fall back to defaults on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("`{key}` must be exactly one character, got {value:?}")]
    InvalidGlyph { key: &'static str, value: String },
    #[error("`{key}` must be greater than zero")]
    InvalidDimension { key: &'static str },
    #[error("`{key}` does not accept {value:?}")]
    InvalidOption { key: &'static str, value: String },
}

/// Failure to produce one chart. The batch logs it and moves on.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{0} not found, please install it")]
    EngineNotFound(String),
    #[error("{engine} exited with {status}: {stderr}")]
    EngineFailed {
        engine: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("{engine} did not finish within {secs}s")]
    Timeout { engine: String, secs: u64 },
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("cannot prepare output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
