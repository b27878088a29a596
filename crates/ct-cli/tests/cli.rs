// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

/// Matches a `metric | value` row of the summary table.
fn row(metric: &str, value: &str) -> predicates::str::RegexPredicate {
    predicate::str::is_match(format!(r"{metric}\W+{value}\W")).unwrap()
}

fn cmd(config: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ct-scan").unwrap();
    cmd.arg("--config-dir").arg(config.path());
    cmd
}

#[test]
fn fine_scan_summary() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["run", "--speed", "1", "--dt", "0.1"])
        .assert()
        .success()
        .stdout(row("rows painted", "179"))
        .stdout(row("projections", "179"))
        .stdout(row("log entries", "36"))
        .stdout(row("elapsed \\(s\\)", "36.000"))
        .stdout(row("completed", "true"));
}

#[test]
fn json_export_carries_rows_and_log() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("sino.json");
    cmd(&dir)
        .args(["run", "--speed", "1", "--dt", "0.1", "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!(json["rows"], 180);
    assert_eq!(json["cols"], 360);
    assert_eq!(json["projection_count"], 179);
    assert_eq!(json["sinogram"].as_array().unwrap().len(), 180);
    let log = json["reconstruction_log"].as_array().unwrap();
    assert_eq!(log.len(), 36);
    assert_eq!(log.last().unwrap()["angle_deg"], 0.0);
}

#[test]
fn image_exports_decode_to_the_sinogram_size() {
    let dir = TempDir::new().unwrap();
    for (name, format) in [("sino.png", "png"), ("sino.pgm", "pgm")] {
        let out = dir.path().join(name);
        cmd(&dir)
            .args(["run", "--speed", "10", "--format", format, "--output"])
            .arg(&out)
            .assert()
            .success();
        let img = image::open(&out).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (360, 180), "{name}");
        // Row 0 is never written; row 1 (2°) is painted, and the default
        // scene leaves most of it bright.
        assert!(img.rows().next().unwrap().all(|p| p.0 == [0]), "{name}");
        assert!(img.rows().nth(1).unwrap().any(|p| p.0[0] > 0), "{name}");
    }
}

#[test]
fn tick_cap_leaves_scan_incomplete() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["run", "--max-ticks", "5"])
        .assert()
        .success()
        .stdout(row("ticks", "5"))
        .stdout(row("completed", "false"));
}

#[test]
fn show_log_prints_samples() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["run", "--speed", "1", "--dt", "0.1", "--show-log"])
        .assert()
        .success()
        .stdout(contains("avg attenuation"))
        .stdout(contains("350.00"));
}

#[test]
fn sample_hits_and_misses() {
    let dir = TempDir::new().unwrap();
    // Horizontal ray through the cylinder.
    cmd(&dir)
        .args(["sample", "--angle", "0", "--detector", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.000000").not());
    cmd(&dir)
        .args(["sample", "--angle", "0", "--detector", "0.0"])
        .assert()
        .success()
        .stdout("0.000000\n");
    cmd(&dir)
        .args(["sample", "--angle", "0", "--detector", "0.5", "--density", "0"])
        .assert()
        .success()
        .stdout("0.000000\n");
}

#[test]
fn sample_rejects_detector_outside_unit_range() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["sample", "--angle", "0", "--detector", "1.5"])
        .assert()
        .failure()
        .stderr(contains("--detector"));
}

#[test]
fn prefs_save_then_show() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["prefs", "save", "--speed", "12", "--density", "7"])
        .assert()
        .success();
    assert!(dir.path().join("scan_prefs.json").exists());

    cmd(&dir)
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(contains("\"scan_speed\": 12"))
        .stdout(contains("\"density\": 7"));

    // --no-prefs ignores what was saved.
    cmd(&dir)
        .args(["--no-prefs", "prefs", "show"])
        .assert()
        .success()
        .stdout(contains("\"scan_speed\": 5"));
}

#[test]
fn invalid_saved_scene_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("scan_prefs.json"),
        r#"{"scan_speed": 9, "block": {"x": 0.0, "z": 0.0, "scale": -2.0}}"#,
    )
    .unwrap();
    cmd(&dir)
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(contains("\"scan_speed\": 5"));
    cmd(&dir)
        .args(["prefs", "save", "--speed", "3"])
        .assert()
        .success();
    let saved: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("scan_prefs.json")).unwrap())
            .unwrap();
    assert_eq!(saved["scan_speed"], 3);
    assert_eq!(saved["block"]["scale"], 1.0);
}

#[test]
fn no_prefs_cannot_save() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--no-prefs", "prefs", "save", "--speed", "3"])
        .assert()
        .failure();
    assert!(!dir.path().join("scan_prefs.json").exists());
}

#[test]
fn rejects_bad_sliders_and_frames() {
    let dir = TempDir::new().unwrap();
    cmd(&dir).args(["run", "--speed", "0"]).assert().failure();
    cmd(&dir)
        .args(["run", "--dt=0"])
        .assert()
        .failure()
        .stderr(contains("--dt"));
}
