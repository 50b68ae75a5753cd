//! Loading and grouping of precomputed benchmark results
//!
//! Results arrive as JSONL: one run per line, written by the experiment
//! driver. This module never computes statistics; it only gets rows into
//! memory, validates them, and arranges them into paired cells.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors for results loading
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is empty: {}", .0.display())]
    Empty(PathBuf),

    #[error("Invalid JSONL at {}:{}: {source}", .path.display(), .line)]
    Parse {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("No '{}*.jsonl' results found in {}", .prefix, .dir.display())]
    NoResults { dir: PathBuf, prefix: String },
}

/// One benchmark run, one JSONL line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub instance: String,
    pub integrator: String,
    pub budget_s: f64,
    pub seed: u64,
    pub best_length: f64,

    /// Held-Karp lower bound (or TSPLIB optimal used in its place)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hk_bound: Option<f64>,

    /// Gap to the bound in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_pct: Option<f64>,

    pub wall_time_s: f64,

    /// Host description captured by the driver (free-form JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_info: Option<serde_json::Value>,

    /// Protocol deviations recorded for this run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deviations: Vec<String>,
}

/// Load a JSONL results file, rejecting empty files and bad rows
pub fn load_jsonl(path: &Path) -> Result<Vec<RunRecord>, DatasetError> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Err(DatasetError::Empty(path.to_path_buf()));
    }

    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: RunRecord = serde_json::from_str(line).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            line: i + 1,
            source,
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(DatasetError::Empty(path.to_path_buf()));
    }

    Ok(records)
}

/// Find the most recent `<prefix>*.jsonl` in a directory by mtime
pub fn latest_jsonl(dir: &Path, prefix: &str) -> Result<PathBuf, DatasetError> {
    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if !name.starts_with(prefix) || !name.ends_with(".jsonl") {
            continue;
        }

        let mtime = entry.metadata()?.modified()?;
        if newest.as_ref().map(|(t, _)| mtime > *t).unwrap_or(true) {
            newest = Some((mtime, path));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| DatasetError::NoResults {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
        })
}

/// Paired run groups for one `(instance, budget)` cell
#[derive(Debug, Clone)]
pub struct PairedGroup {
    pub instance: String,
    pub budget_s: f64,
    /// Best tour lengths of the baseline integrator, sorted by seed
    pub baseline_lengths: Vec<f64>,
    /// Best tour lengths of the candidate integrator, sorted by seed
    pub candidate_lengths: Vec<f64>,
}

impl PairedGroup {
    /// Cell label used in reports, e.g. "eil51@10s"
    pub fn label(&self) -> String {
        format!("{}@{}s", self.instance, self.budget_s)
    }
}

/// Group records into paired cells for two integrators
///
/// Each `(instance, budget)` cell collects the best lengths of both
/// integrators, sorted by seed so rows pair up even when the driver
/// interleaved them. Cells where either integrator is absent are dropped;
/// deciding whether a cell has *enough* runs is the enforcement layer's
/// job, not ours.
pub fn group_pairs(records: &[RunRecord], baseline: &str, candidate: &str) -> Vec<PairedGroup> {
    // Budget keyed in millis: f64 is not Ord and budgets are short decimals
    let mut cells: BTreeMap<(String, u64), (Vec<(u64, f64)>, Vec<(u64, f64)>)> = BTreeMap::new();

    for r in records {
        let key = (r.instance.clone(), (r.budget_s * 1000.0).round() as u64);
        let cell = cells.entry(key).or_default();
        if r.integrator == baseline {
            cell.0.push((r.seed, r.best_length));
        } else if r.integrator == candidate {
            cell.1.push((r.seed, r.best_length));
        }
    }

    cells
        .into_iter()
        .filter(|(_, (base, cand))| !base.is_empty() && !cand.is_empty())
        .map(|((instance, budget_millis), (mut base, mut cand))| {
            base.sort_by_key(|(seed, _)| *seed);
            cand.sort_by_key(|(seed, _)| *seed);
            PairedGroup {
                instance,
                budget_s: budget_millis as f64 / 1000.0,
                baseline_lengths: base.into_iter().map(|(_, v)| v).collect(),
                candidate_lengths: cand.into_iter().map(|(_, v)| v).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(instance: &str, integrator: &str, budget: f64, seed: u64, length: f64) -> RunRecord {
        RunRecord {
            instance: instance.to_string(),
            integrator: integrator.to_string(),
            budget_s: budget,
            seed,
            best_length: length,
            hk_bound: Some(426.0),
            gap_pct: Some((length - 426.0) / 426.0 * 100.0),
            wall_time_s: budget,
            machine_info: None,
            deviations: vec![],
        }
    }

    fn write_jsonl(records: &[RunRecord]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit_20260101.jsonl");
        let mut f = fs::File::create(&path).unwrap();
        for r in records {
            writeln!(f, "{}", serde_json::to_string(r).unwrap()).unwrap();
        }
        (dir, path)
    }

    #[test]
    fn test_load_jsonl_round_trip() {
        let records = vec![
            record("eil51", "lkh", 1.0, 1, 429.0),
            record("eil51", "EdgeRand", 1.0, 1, 512.0),
        ];
        let (_dir, path) = write_jsonl(&records);

        let loaded = load_jsonl(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].instance, "eil51");
        assert_eq!(loaded[1].best_length, 512.0);
    }

    #[test]
    fn test_load_jsonl_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jsonl");
        fs::write(&path, "").unwrap();

        match load_jsonl(&path) {
            Err(DatasetError::Empty(_)) => {}
            other => panic!("expected Empty, got {:?}", other),
        }
    }

    #[test]
    fn test_load_jsonl_reports_bad_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        let good = serde_json::to_string(&record("eil51", "lkh", 1.0, 1, 429.0)).unwrap();
        fs::write(&path, format!("{}\nnot json\n", good)).unwrap();

        match load_jsonl(&path) {
            Err(DatasetError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_load_jsonl_missing_required_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.jsonl");
        fs::write(&path, r#"{"instance": "eil51", "integrator": "lkh"}"#).unwrap();
        assert!(load_jsonl(&path).is_err());
    }

    #[test]
    fn test_load_jsonl_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gaps.jsonl");
        let good = serde_json::to_string(&record("eil51", "lkh", 1.0, 1, 429.0)).unwrap();
        fs::write(&path, format!("{}\n\n{}\n", good, good)).unwrap();
        assert_eq!(load_jsonl(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_latest_jsonl_picks_newest() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("audit_old.jsonl");
        let new = dir.path().join("audit_new.jsonl");
        fs::write(&old, "{}").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(&new, "{}").unwrap();

        let picked = latest_jsonl(dir.path(), "audit_").unwrap();
        assert_eq!(picked, new);
    }

    #[test]
    fn test_latest_jsonl_no_match() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        match latest_jsonl(dir.path(), "audit_") {
            Err(DatasetError::NoResults { .. }) => {}
            other => panic!("expected NoResults, got {:?}", other),
        }
    }

    #[test]
    fn test_group_pairs_aligns_by_seed() {
        // Candidate rows arrive in reverse seed order; pairing must fix it
        let mut records = Vec::new();
        for seed in 1..=3 {
            records.push(record("eil51", "lkh", 1.0, seed, 400.0 + seed as f64));
        }
        for seed in (1..=3).rev() {
            records.push(record("eil51", "EdgeRand", 1.0, seed, 500.0 + seed as f64));
        }

        let groups = group_pairs(&records, "lkh", "EdgeRand");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].baseline_lengths, vec![401.0, 402.0, 403.0]);
        assert_eq!(groups[0].candidate_lengths, vec![501.0, 502.0, 503.0]);
    }

    #[test]
    fn test_group_pairs_splits_budgets() {
        let records = vec![
            record("eil51", "lkh", 1.0, 1, 429.0),
            record("eil51", "EdgeRand", 1.0, 1, 512.0),
            record("eil51", "lkh", 10.0, 1, 427.0),
            record("eil51", "EdgeRand", 10.0, 1, 470.0),
        ];

        let groups = group_pairs(&records, "lkh", "EdgeRand");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].budget_s, 1.0);
        assert_eq!(groups[1].budget_s, 10.0);
        assert_eq!(groups[0].label(), "eil51@1s");
    }

    #[test]
    fn test_group_pairs_drops_one_sided_cells() {
        let records = vec![
            record("eil51", "lkh", 1.0, 1, 429.0),
            record("berlin52", "EdgeRand", 1.0, 1, 8000.0),
        ];
        assert!(group_pairs(&records, "lkh", "EdgeRand").is_empty());
    }

    #[test]
    fn test_group_pairs_ignores_other_integrators() {
        let records = vec![
            record("eil51", "lkh", 1.0, 1, 429.0),
            record("eil51", "EdgeRand", 1.0, 1, 512.0),
            record("eil51", "eax", 1.0, 1, 430.0),
        ];
        let groups = group_pairs(&records, "lkh", "EdgeRand");
        assert_eq!(groups[0].baseline_lengths.len(), 1);
        assert_eq!(groups[0].candidate_lengths.len(), 1);
    }
}
