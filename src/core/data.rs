//! iperf3 JSON record model and loader.
//!
//! Only the fields the charts need are modelled; everything else in the
//! document (`start`, `end` summaries, per-interval `sum`) is ignored.

use std::{fs, io, path::Path};

use serde::{Deserialize, Deserializer};

use crate::core::error::InputError;

// --- Public Row Structs ---

/// Parsed iperf3 output: the reporting intervals in file order.
#[derive(Debug, Clone, Default)]
pub struct MeasurementRecord {
    pub intervals: Vec<Interval>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Interval {
    #[serde(default)]
    pub streams: Vec<StreamSample>,
}

/// One directional data point.
///
/// Numeric fields that are absent or not numbers deserialize to `None`, so a
/// single odd stream never poisons the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamSample {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub sender: Option<bool>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub end: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bytes: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lost_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub jitter_ms: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sender,
    Receiver,
}

impl StreamSample {
    /// `None` for samples whose direction flag is absent; those are skipped.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.sender.map(|s| {
            if s {
                Direction::Sender
            } else {
                Direction::Receiver
            }
        })
    }
}

// --- Helpers ---

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(serde_json::Value::deserialize(d)?.as_f64())
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(serde_json::Value::deserialize(d)?.as_bool())
}

#[derive(Deserialize)]
struct RawRecord {
    intervals: Option<Vec<Interval>>,
}

// --- Loading ---

impl MeasurementRecord {
    /// Parse a JSON document; a missing `intervals` key is an error.
    pub fn from_json_str(text: &str) -> Result<Self, InputError> {
        let raw: RawRecord = serde_json::from_str(text)?;
        let intervals = raw.intervals.ok_or(InputError::MissingIntervals)?;
        Ok(Self { intervals })
    }

    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
            _ => InputError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::from_json_str(&text)
    }

    /// Total number of stream samples across all intervals.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.intervals.iter().map(|i| i.streams.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_streams_and_tolerates_missing_optionals() {
        let rec = MeasurementRecord::from_json_str(
            r#"{"start": {}, "intervals": [{"streams": [
                {"sender": true, "end": 1.0, "bytes": 1000},
                {"sender": false, "end": 1.0, "bytes": 900, "lost_percent": 0.5}
            ], "sum": {}}]}"#,
        )
        .unwrap();

        assert_eq!(rec.sample_count(), 2);
        let s = &rec.intervals[0].streams;
        assert_eq!(s[0].direction(), Some(Direction::Sender));
        assert_eq!(s[0].bytes, Some(1000.0));
        assert_eq!(s[1].direction(), Some(Direction::Receiver));
        assert_eq!(s[1].lost_percent, Some(0.5));
        assert_eq!(s[1].jitter_ms, None);
    }

    #[test]
    fn missing_intervals_is_reported() {
        let err = MeasurementRecord::from_json_str(r#"{"start": {}}"#).unwrap_err();
        assert!(matches!(err, InputError::MissingIntervals));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = MeasurementRecord::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, InputError::Json(_)));
    }

    #[test]
    fn non_boolean_sender_is_unknown_direction() {
        let rec = MeasurementRecord::from_json_str(
            r#"{"intervals": [{"streams": [{"sender": "yes", "end": "x", "bytes": 1}]}]}"#,
        )
        .unwrap();
        let s = &rec.intervals[0].streams[0];
        assert_eq!(s.direction(), None);
        assert_eq!(s.end, None);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = MeasurementRecord::from_path(Path::new("/nonexistent/iperf.json")).unwrap_err();
        assert!(matches!(err, InputError::NotFound(_)));
    }
}
