//! The analyze pipeline: results file in, artifacts out
//!
//! Wires the loading, normalization, and enforcement layers together and
//! owns the on-disk artifact names the audit later checks for.

use crate::audit::{ENFORCEMENT_CSV_NAME, HTML_REPORT_NAME, NORMALIZED_CSV_NAME};
use crate::csv_output;
use crate::dataset::{self, PairedGroup};
use crate::enforcement::{
    paired_comparison, ComparisonLabels, EnforcementConfig, EnforcementReport,
};
use crate::html_output::HtmlReport;
use crate::normalize::{add_normalized_times, NormalizedRecord};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Options for one analyze run
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Explicit results file; when absent the newest matching JSONL in
    /// `results_dir` is used
    pub results_path: Option<PathBuf>,
    pub results_dir: PathBuf,
    /// File-name prefix for results discovery (empty matches any .jsonl)
    pub prefix: String,
    pub baseline: String,
    pub candidate: String,
    pub out_dir: PathBuf,
    pub config: EnforcementConfig,
    pub write_html: bool,
}

/// Everything the analyze run produced
#[derive(Debug)]
pub struct AnalyzeOutcome {
    pub source: PathBuf,
    pub report: EnforcementReport,
    pub normalized: Vec<NormalizedRecord>,
    pub enforcement_csv_path: PathBuf,
    pub normalized_csv_path: PathBuf,
    pub html_path: Option<PathBuf>,
}

fn resolve_source(opts: &AnalyzeOptions) -> Result<PathBuf> {
    match &opts.results_path {
        Some(path) => Ok(path.clone()),
        None => {
            let path = dataset::latest_jsonl(&opts.results_dir, &opts.prefix)?;
            tracing::info!("Using most recent JSONL: {}", path.display());
            Ok(path)
        }
    }
}

/// Decide per cell whether the comparison can run, and with what reason to
/// skip it otherwise. Unequal groups cannot be paired; below 2 runs there
/// is nothing to test. Small-but-equal cells run and fail the n gate with
/// a required-n hint instead of disappearing from the report.
fn compare_group(
    group: &PairedGroup,
    opts: &AnalyzeOptions,
) -> std::result::Result<ComparisonLabels, String> {
    let (nb, nc) = (group.baseline_lengths.len(), group.candidate_lengths.len());
    if nb != nc {
        return Err(format!("{} ({} vs {} runs)", group.label(), nb, nc));
    }
    if nb < 2 {
        return Err(format!("{} (single run)", group.label()));
    }
    Ok(ComparisonLabels {
        instance: group.label(),
        baseline: opts.baseline.clone(),
        candidate: opts.candidate.clone(),
    })
}

/// Run the full enforcement pipeline and write the CSV/HTML artifacts
pub fn analyze(opts: &AnalyzeOptions) -> Result<AnalyzeOutcome> {
    opts.config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let source = resolve_source(opts)?;
    let records = dataset::load_jsonl(&source)?;

    let normalized = add_normalized_times(&records);
    let groups = dataset::group_pairs(&records, &opts.baseline, &opts.candidate);

    let mut results = Vec::new();
    let mut skipped = Vec::new();
    for group in &groups {
        match compare_group(group, opts) {
            Ok(labels) => {
                let result = paired_comparison(
                    &group.baseline_lengths,
                    &group.candidate_lengths,
                    labels,
                    &opts.config,
                )?;
                results.push(result);
            }
            Err(reason) => {
                tracing::warn!("Skipping cell: {}", reason);
                skipped.push(reason);
            }
        }
    }

    let report = EnforcementReport {
        results,
        skipped,
        config: opts.config.clone(),
    };

    std::fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("Failed to create {}", opts.out_dir.display()))?;

    let enforcement_csv_path = write_artifact(
        &opts.out_dir,
        ENFORCEMENT_CSV_NAME,
        &csv_output::enforcement_csv(&report.results),
    )?;
    let normalized_csv_path = write_artifact(
        &opts.out_dir,
        NORMALIZED_CSV_NAME,
        &csv_output::normalized_csv(&normalized),
    )?;

    let html_path = if opts.write_html {
        let html = HtmlReport::new(&report).to_html();
        Some(write_artifact(&opts.out_dir, HTML_REPORT_NAME, &html)?)
    } else {
        None
    };

    Ok(AnalyzeOutcome {
        source,
        report,
        normalized,
        enforcement_csv_path,
        normalized_csv_path,
        html_path,
    })
}

fn write_artifact(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
