#![cfg(unix)]

use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

fn run(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_iperf-chart"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn combined(out: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    )
}

fn write_config(dir: &Path, engine: &str) {
    fs::write(
        dir.join("config.ini"),
        format!("[DEFAULT]\ndefault_output_dir = graphs\nengine_command = {engine}\n"),
    )
    .unwrap();
}

#[test]
fn missing_intervals_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "cat");
    fs::write(dir.path().join("bad.json"), r#"{"start": {}}"#).unwrap();

    let out = run(dir.path(), &["bad.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(combined(&out).contains("missing 'intervals'"));
}

#[test]
fn missing_file_and_bad_json_exit_with_one() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run(dir.path(), &["absent.json"]).status.code(), Some(1));

    fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
    assert_eq!(run(dir.path(), &["broken.json"]).status.code(), Some(1));
}

#[test]
fn renders_charts_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "cat");
    fs::write(
        dir.path().join("run.json"),
        r#"{"intervals": [{"streams": [
            {"sender": true, "end": 1.0, "bytes": 1000},
            {"sender": false, "end": 1.0, "bytes": 900}
        ]}]}"#,
    )
    .unwrap();

    let out = run(dir.path(), &["run.json"]);
    assert_eq!(out.status.code(), Some(0), "{}", combined(&out));
    for m in ["senderBytes", "receiverBytes", "packetLoss", "jitter"] {
        assert!(dir.path().join(format!("graphs/{m}_run.txt")).exists(), "{m}");
    }
}

#[test]
fn engine_failures_still_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "iperf-chart-missing-engine");
    fs::write(
        dir.path().join("run.json"),
        r#"{"intervals": [{"streams": [{"sender": true, "end": 1.0, "bytes": 1}]}]}"#,
    )
    .unwrap();

    let out = run(dir.path(), &["run.json"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(combined(&out).contains("iperf-chart-missing-engine not found"));
}
