//! Metric catalogue and the record → series walk.

use std::fmt;

use tracing::warn;

use crate::core::{
    data::{Direction, MeasurementRecord, StreamSample},
    error::InputError,
};

/// One `(time, value)` pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataPoint {
    pub time: f64,
    pub value: f64,
}

/// Ordered points for one tracked quantity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricSeries {
    pub points: Vec<DataPoint>,
}

impl MetricSeries {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    #[inline]
    fn push(&mut self, time: f64, value: f64) {
        self.points.push(DataPoint { time, value });
    }
}

/// Quantities charted by the tool, in output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    SenderBytes,
    ReceiverBytes,
    PacketLoss,
    Jitter,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Self::SenderBytes,
        Self::ReceiverBytes,
        Self::PacketLoss,
        Self::Jitter,
    ];

    /// Stem used in artifact file names.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SenderBytes => "senderBytes",
            Self::ReceiverBytes => "receiverBytes",
            Self::PacketLoss => "packetLoss",
            Self::Jitter => "jitter",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SenderBytes => "Network Throughput: Sender Bytes Over Time",
            Self::ReceiverBytes => "Network Throughput: Receiver Bytes Over Time",
            Self::PacketLoss => "Network Quality: Packet Loss Percentage Over Time",
            Self::Jitter => "Network Quality: Jitter Measurements Over Time",
        }
    }

    #[must_use]
    pub const fn x_label(self) -> &'static str {
        "Time (seconds)"
    }

    #[must_use]
    pub const fn y_label(self) -> &'static str {
        match self {
            Self::SenderBytes => "Bytes Transmitted",
            Self::ReceiverBytes => "Bytes Received",
            Self::PacketLoss => "Packet Loss (%)",
            Self::Jitter => "Jitter (ms)",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The four series extracted from one record.
///
/// Loss and jitter are pushed for every receiver sample, so their lengths
/// always equal `receiver_bytes.len()`.
#[derive(Clone, Debug, Default)]
pub struct ExtractedMetrics {
    pub sender_bytes: MetricSeries,
    pub receiver_bytes: MetricSeries,
    pub packet_loss: MetricSeries,
    pub jitter: MetricSeries,
}

impl ExtractedMetrics {
    #[must_use]
    pub fn series(&self, metric: Metric) -> &MetricSeries {
        match metric {
            Metric::SenderBytes => &self.sender_bytes,
            Metric::ReceiverBytes => &self.receiver_bytes,
            Metric::PacketLoss => &self.packet_loss,
            Metric::Jitter => &self.jitter,
        }
    }
}

/// Walk intervals in file order and split samples by direction.
///
/// Samples without a direction flag are ignored. A directed sample missing
/// `end` or `bytes` is skipped with a warning when `skip_malformed` is set,
/// otherwise it aborts the walk.
pub fn extract(
    record: &MeasurementRecord,
    skip_malformed: bool,
) -> Result<ExtractedMetrics, InputError> {
    let mut out = ExtractedMetrics::default();

    for (i, interval) in record.intervals.iter().enumerate() {
        for (s, sample) in interval.streams.iter().enumerate() {
            let Some(direction) = sample.direction() else {
                continue;
            };
            let (end, bytes) = match required_fields(sample) {
                Ok(pair) => pair,
                Err(field) if skip_malformed => {
                    warn!(interval = i, stream = s, field, "skipping malformed stream sample");
                    continue;
                }
                Err(field) => {
                    return Err(InputError::MalformedSample {
                        interval: i,
                        stream: s,
                        field,
                    });
                }
            };

            match direction {
                Direction::Sender => out.sender_bytes.push(end, bytes),
                Direction::Receiver => {
                    out.receiver_bytes.push(end, bytes);
                    out.packet_loss.push(end, sample.lost_percent.unwrap_or(0.0));
                    out.jitter.push(end, sample.jitter_ms.unwrap_or(0.0));
                }
            }
        }
    }
    Ok(out)
}

fn required_fields(sample: &StreamSample) -> Result<(f64, f64), &'static str> {
    let end = sample.end.ok_or("end")?;
    let bytes = sample.bytes.ok_or("bytes")?;
    Ok((end, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::Interval;

    fn sample(sender: Option<bool>, end: f64, bytes: f64) -> StreamSample {
        StreamSample {
            sender,
            end: Some(end),
            bytes: Some(bytes),
            ..StreamSample::default()
        }
    }

    fn record(streams: Vec<Vec<StreamSample>>) -> MeasurementRecord {
        MeasurementRecord {
            intervals: streams.into_iter().map(|streams| Interval { streams }).collect(),
        }
    }

    #[test]
    fn series_lengths_follow_direction_counts() {
        let rec = record(vec![
            vec![
                sample(Some(true), 1.0, 10.0),
                sample(Some(false), 1.0, 9.0),
                sample(None, 1.0, 1.0),
            ],
            vec![sample(Some(false), 2.0, 8.0), sample(Some(false), 2.0, 7.0)],
        ]);
        let m = extract(&rec, true).unwrap();

        assert_eq!(m.sender_bytes.len(), 1);
        assert_eq!(m.receiver_bytes.len(), 3);
        assert_eq!(m.packet_loss.len(), 3);
        assert_eq!(m.jitter.len(), 3);
    }

    #[test]
    fn optional_quality_fields_default_to_zero() {
        let mut rx = sample(Some(false), 1.0, 900.0);
        rx.lost_percent = Some(0.5);
        let rec = record(vec![vec![rx, sample(Some(false), 2.0, 800.0)]]);
        let m = extract(&rec, true).unwrap();

        assert_eq!(
            m.packet_loss.points,
            vec![
                DataPoint { time: 1.0, value: 0.5 },
                DataPoint { time: 2.0, value: 0.0 }
            ]
        );
        assert!(m.jitter.points.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn intervals_keep_file_order() {
        let rec = record(vec![
            vec![sample(Some(true), 1.0, 1.0)],
            vec![sample(Some(true), 2.0, 2.0)],
            vec![sample(Some(true), 3.0, 3.0)],
        ]);
        let m = extract(&rec, true).unwrap();
        let times: Vec<f64> = m.sender_bytes.points.iter().map(|p| p.time).collect();
        assert_eq!(times, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_record_gives_empty_series() {
        let m = extract(&MeasurementRecord::default(), true).unwrap();
        assert!(Metric::ALL.iter().all(|&k| m.series(k).is_empty()));
    }

    #[test]
    fn malformed_sample_skipped_or_fatal() {
        let broken = StreamSample {
            sender: Some(true),
            end: Some(1.0),
            ..StreamSample::default()
        };
        let rec = record(vec![vec![broken, sample(Some(true), 2.0, 5.0)]]);

        let m = extract(&rec, true).unwrap();
        assert_eq!(m.sender_bytes.len(), 1);

        let err = extract(&rec, false).unwrap_err();
        assert!(matches!(
            err,
            InputError::MalformedSample { interval: 0, stream: 0, field: "bytes" }
        ));
    }
}
