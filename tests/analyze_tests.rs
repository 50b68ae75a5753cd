//! Integration tests for `rigor analyze`
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a 30-seed paired cell where the candidate is clearly worse
fn write_results(dir: &Path) -> PathBuf {
    let path = dir.join("johnson_audit_20260801.jsonl");
    let mut f = std::fs::File::create(&path).unwrap();
    for seed in 0..30 {
        for (integrator, base) in [("lkh", 426.0), ("EdgeRand", 610.0)] {
            let length = base + (seed % 5) as f64;
            writeln!(
                f,
                r#"{{"instance": "eil51", "integrator": "{}", "budget_s": 10.0, "seed": {}, "best_length": {}, "hk_bound": 426.0, "gap_pct": {}, "wall_time_s": 9.8}}"#,
                integrator,
                seed,
                length,
                (length - 426.0) / 426.0 * 100.0
            )
            .unwrap();
        }
    }
    path
}

#[test]
fn test_analyze_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path());
    let out_dir = dir.path().join("out");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rigor");
    cmd.arg("analyze")
        .arg("--results")
        .arg(&results)
        .arg("--out-dir")
        .arg(&out_dir);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("STATISTICAL ENFORCEMENT REPORT"))
        .stdout(predicate::str::contains("Compliant comparisons: 1/1"))
        .stdout(predicate::str::contains("✅ PASS"));

    assert!(out_dir.join("statistical_enforcement.csv").exists());
    assert!(out_dir.join("full_data_with_normalized.csv").exists());
}

#[test]
fn test_analyze_json_output_parses() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rigor");
    cmd.arg("analyze")
        .arg("--results")
        .arg(&results)
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["format"], "rigor-json-v1");
    assert_eq!(parsed["summary"]["total_comparisons"], 1);
    assert_eq!(parsed["summary"]["compliant_comparisons"], 1);
    assert_eq!(parsed["comparisons"][0]["protocol_compliant"], true);
    assert_eq!(parsed["comparisons"][0]["effect_size_cliffs_delta"], 1.0);
}

#[test]
fn test_analyze_csv_output() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rigor");
    cmd.arg("analyze")
        .arg("--results")
        .arg(&results)
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .arg("--format")
        .arg("csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "instance,baseline,candidate,n_samples",
        ))
        .stdout(predicate::str::contains("eil51@10s,lkh,EdgeRand,30"));
}

#[test]
fn test_analyze_html_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path());
    let out_dir = dir.path().join("out");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rigor");
    cmd.arg("analyze")
        .arg("--results")
        .arg(&results)
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--format")
        .arg("html");

    cmd.assert().success();

    let html_path = out_dir.join("enforcement_report.html");
    assert!(html_path.exists());
    let html = std::fs::read_to_string(html_path).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("lkh vs EdgeRand"));
}

#[test]
fn test_analyze_discovers_newest_results() {
    let dir = tempfile::tempdir().unwrap();
    write_results(dir.path());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rigor");
    cmd.arg("analyze")
        .arg("--results-dir")
        .arg(dir.path())
        .arg("--prefix")
        .arg("johnson_audit_")
        .arg("--out-dir")
        .arg(dir.path().join("out"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("johnson_audit_20260801.jsonl"));
}

#[test]
fn test_analyze_missing_results_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rigor");
    cmd.arg("analyze").arg("--results-dir").arg(dir.path());

    cmd.assert().failure();
}

#[test]
fn test_analyze_permissive_accepts_small_cells() {
    let dir = tempfile::tempdir().unwrap();
    // Only 10 seeds: fails the default gate, passes the permissive one
    let path = dir.path().join("small.jsonl");
    let mut f = std::fs::File::create(&path).unwrap();
    for seed in 0..10 {
        for (integrator, base) in [("lkh", 426.0), ("EdgeRand", 610.0)] {
            writeln!(
                f,
                r#"{{"instance": "eil51", "integrator": "{}", "budget_s": 1.0, "seed": {}, "best_length": {}, "wall_time_s": 0.9}}"#,
                integrator,
                seed,
                base + (seed % 5) as f64
            )
            .unwrap();
        }
    }

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rigor");
    cmd.arg("analyze")
        .arg("--results")
        .arg(&path)
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .arg("--permissive");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Compliant comparisons: 1/1"));
}

#[test]
fn test_summary_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rigor");
    cmd.arg("summary").arg("--results").arg(&results);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SUMMARY STATISTICS"))
        .stdout(predicate::str::contains("eil51"))
        .stdout(predicate::str::contains("EdgeRand"));
}

#[test]
fn test_summary_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rigor");
    cmd.arg("summary")
        .arg("--results")
        .arg(&results)
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(parsed["format"], "rigor-json-v1");
    assert!(parsed["groups"].as_array().unwrap().len() >= 2);
    assert_eq!(parsed["screens"][0]["significant"], true);
}
