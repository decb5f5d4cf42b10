#![cfg(feature = "cli")]

use std::process::Command;

use rfshow_frame::{RadioFrame, FRAME_SIZE};

fn rfshow() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rfshow"));
    cmd.arg("--log-level").arg("error");
    cmd
}

#[test]
fn frames_json_lists_one_object_per_frame() {
    let output = rfshow()
        .arg("--format")
        .arg("json")
        .arg("frames")
        .arg("--fill")
        .arg("9")
        .arg("--count")
        .arg("35")
        .output()
        .expect("frames should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be json"))
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["sequence"], 0);
    assert_eq!(lines[0]["first_channel"], 1);
    assert_eq!(lines[0]["last_channel"], 30);
    assert_eq!(lines[1]["sequence"], 1);
    assert_eq!(lines[1]["last_channel"], 35);
}

#[test]
fn frames_raw_emits_full_width_frames() {
    let output = rfshow()
        .arg("--format")
        .arg("raw")
        .arg("frames")
        .arg("255,0,255,0,255,255")
        .output()
        .expect("frames should run");

    assert!(output.status.success());
    assert_eq!(output.stdout.len(), FRAME_SIZE);
    let frame = RadioFrame::from_bytes(&output.stdout).expect("stdout should be one frame");
    assert_eq!(&frame.payload()[..6], &[255, 0, 255, 0, 255, 255]);
    assert_eq!(frame.sequence(), 0);
    assert_eq!(frame.reserved(), 0);
}

#[test]
fn frames_full_universe_is_eighteen_frames() {
    let output = rfshow()
        .arg("--format")
        .arg("raw")
        .arg("frames")
        .arg("--fill")
        .arg("1")
        .arg("--count")
        .arg("512")
        .output()
        .expect("frames should run");

    assert!(output.status.success());
    assert_eq!(output.stdout.len(), 18 * FRAME_SIZE);
}

#[test]
fn frames_over_a_universe_exits_with_usage() {
    let output = rfshow()
        .arg("frames")
        .arg("--fill")
        .arg("1")
        .arg("--count")
        .arg("513")
        .output()
        .expect("frames should run");

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn frames_without_values_prints_nothing() {
    let output = rfshow()
        .arg("--format")
        .arg("json")
        .arg("frames")
        .output()
        .expect("frames should run");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn version_reports_package_version() {
    let output = rfshow().arg("version").output().expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("rfshow {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_extended_reports_frame_layout() {
    let output = rfshow()
        .arg("version")
        .arg("--extended")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("frame: 32 bytes (30 channels), max_channels: 512"));
}
