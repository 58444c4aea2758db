//! Boundary around the external plotting engine.
//!
//! Writes the data and script files, runs the engine on the script and
//! returns its standard output. The child is killed and reaped on every exit
//! path, including timeouts and I/O errors.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use tracing::debug;

use crate::core::{error::RenderError, metrics::Metric, metrics::MetricSeries};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Artifact paths for one metric: `<metric>_<stem>.{dat,plt,txt}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartFiles {
    pub data: PathBuf,
    pub script: PathBuf,
    pub chart: PathBuf,
}

impl ChartFiles {
    #[must_use]
    pub fn new(output_dir: &Path, metric: Metric, stem: &str) -> Self {
        let name = |ext: &str| output_dir.join(format!("{}_{stem}.{ext}", metric.key()));
        Self {
            data: name("dat"),
            script: name("plt"),
            chart: name("txt"),
        }
    }
}

/// One `time value` pair per line at fixed precision.
pub fn write_data_file(path: &Path, series: &MetricSeries, precision: usize) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for p in &series.points {
        writeln!(out, "{:.precision$} {:.precision$}", p.time, p.value)?;
    }
    out.flush()
}

// --- Helpers ---

/// Kills and reaps the child on drop unless it has already exited.
struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.0.try_wait() {
            let _ = self.0.kill();
            let _ = self.0.wait();
        }
    }
}

/// Read a pipe to the end on its own thread so a chatty child never blocks.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut p) = pipe {
            let _ = p.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Run `engine <script>` and capture its standard output.
pub fn run_engine(engine: &str, script: &Path, timeout: Duration) -> Result<String, RenderError> {
    let child = Command::new(engine)
        .arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RenderError::EngineNotFound(engine.to_owned()),
            _ => RenderError::Io(e),
        })?;
    let mut child = ChildGuard(child);
    debug!(engine, script = %script.display(), pid = child.0.id(), "engine started");

    let stdout = drain(child.0.stdout.take());
    let stderr = drain(child.0.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.0.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            return Err(RenderError::Timeout {
                engine: engine.to_owned(),
                secs: timeout.as_secs(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();
    if !status.success() {
        return Err(RenderError::EngineFailed {
            engine: engine.to_owned(),
            status,
            stderr: stderr.trim().to_owned(),
        });
    }
    Ok(stdout)
}

/// Persist inputs for one chart and run the engine on them.
pub fn render_raw(
    files: &ChartFiles,
    script: &str,
    series: &MetricSeries,
    precision: usize,
    engine: &str,
    timeout: Duration,
) -> Result<String, RenderError> {
    write_data_file(&files.data, series, precision)?;
    fs::write(&files.script, script)?;
    run_engine(engine, &files.script, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::DataPoint;

    #[test]
    fn artifact_names_follow_metric_and_stem() {
        let f = ChartFiles::new(Path::new("out"), Metric::PacketLoss, "run1");
        assert_eq!(f.data, Path::new("out/packetLoss_run1.dat"));
        assert_eq!(f.script, Path::new("out/packetLoss_run1.plt"));
        assert_eq!(f.chart, Path::new("out/packetLoss_run1.txt"));
    }

    #[test]
    fn data_file_uses_fixed_precision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d.dat");
        let series = MetricSeries {
            points: vec![
                DataPoint { time: 1.0, value: 1000.0 },
                DataPoint { time: 2.5, value: 0.125 },
            ],
        };
        write_data_file(&path, &series, 3).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1.000 1000.000\n2.500 0.125\n"
        );
    }

    #[test]
    fn missing_engine_is_reported() {
        let err = run_engine(
            "iperf-chart-no-such-engine",
            Path::new("x.plt"),
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::EngineNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn stdout_is_captured() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("s.plt");
        fs::write(&script, "hello\nchart\n").unwrap();
        let out = run_engine("cat", &script, Duration::from_secs(5)).unwrap();
        assert_eq!(out, "hello\nchart\n");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_engine("cat", &dir.path().join("absent.plt"), Duration::from_secs(5))
            .unwrap_err();
        assert!(matches!(err, RenderError::EngineFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn slow_engine_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("pause");
        fs::write(&script, "sleep 5\n").unwrap();
        let started = Instant::now();
        let err = run_engine("sh", &script, Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, RenderError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
