//! Summary statistics over a results file
//!
//! The per-cell enforcement verdict answers "is this difference real"; the
//! summary answers "what do the runs look like": per instance x integrator
//! medians with bootstrap CIs, plus an instance-level Mann-Whitney screen
//! between two integrators.

use crate::dataset::RunRecord;
use crate::enforcement::{mann_whitney_u, median_ci, percentile};
use serde::Serialize;
use std::collections::BTreeMap;

/// Default resamples for the summary CIs (the enforcement CI uses 10x more;
/// the summary is descriptive, not a gate)
pub const SUMMARY_RESAMPLES: usize = 1_000;

/// Significance level for the pairwise screen
pub const SCREEN_ALPHA: f64 = 0.05;

/// Minimum runs per side before the pairwise screen says anything
pub const SCREEN_MIN_RUNS: usize = 5;

/// Descriptive statistics for one instance x integrator group
#[derive(Debug, Clone, Serialize)]
pub struct IntegratorSummary {
    pub instance: String,
    pub integrator: String,
    pub n_runs: usize,
    pub median_gap_pct: f64,
    pub gap_ci_95: (f64, f64),
    pub median_wall_time_s: f64,
    pub time_ci_95: (f64, f64),
}

/// Outcome of the instance-level Mann-Whitney screen
#[derive(Debug, Clone, Serialize)]
pub struct PairwiseScreen {
    pub instance: String,
    pub baseline: String,
    pub candidate: String,
    pub p_value: f64,
    /// Common language effect size: P(baseline gap > candidate gap)
    pub effect_size: f64,
    pub significant: bool,
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    v
}

/// Per-instance integrator summary with 95% bootstrap CIs
///
/// Records without a gap are summarized by wall time only (their gap median
/// is reported over the runs that do carry one).
pub fn summarize(records: &[RunRecord], seed: u64) -> Vec<IntegratorSummary> {
    let mut groups: BTreeMap<(String, String), Vec<&RunRecord>> = BTreeMap::new();
    for r in records {
        groups
            .entry((r.instance.clone(), r.integrator.clone()))
            .or_default()
            .push(r);
    }

    groups
        .into_iter()
        .map(|((instance, integrator), runs)| {
            let gaps: Vec<f64> = runs.iter().filter_map(|r| r.gap_pct).collect();
            let times: Vec<f64> = runs.iter().map(|r| r.wall_time_s).collect();

            IntegratorSummary {
                instance,
                integrator,
                n_runs: runs.len(),
                median_gap_pct: percentile(&sorted(&gaps), 50.0),
                gap_ci_95: median_ci(&gaps, SUMMARY_RESAMPLES, 0.95, seed),
                median_wall_time_s: percentile(&sorted(&times), 50.0),
                time_ci_95: median_ci(&times, SUMMARY_RESAMPLES, 0.95, seed),
            }
        })
        .collect()
}

/// Mann-Whitney screen between two integrators, per instance, on gaps
///
/// Fewer than 5 runs on either side yields the conservative "nothing to
/// see" row (p = 1.0, effect 0.5) rather than an error: exploratory files
/// routinely hold partial cells.
pub fn pairwise_screen(
    records: &[RunRecord],
    baseline: &str,
    candidate: &str,
) -> Vec<PairwiseScreen> {
    let mut instances: BTreeMap<String, (Vec<f64>, Vec<f64>)> = BTreeMap::new();

    for r in records {
        let Some(gap) = r.gap_pct else { continue };
        let cell = instances.entry(r.instance.clone()).or_default();
        if r.integrator == baseline {
            cell.0.push(gap);
        } else if r.integrator == candidate {
            cell.1.push(gap);
        }
    }

    instances
        .into_iter()
        .map(|(instance, (base, cand))| {
            if base.len() < SCREEN_MIN_RUNS || cand.len() < SCREEN_MIN_RUNS {
                return PairwiseScreen {
                    instance,
                    baseline: baseline.to_string(),
                    candidate: candidate.to_string(),
                    p_value: 1.0,
                    effect_size: 0.5,
                    significant: false,
                };
            }

            match mann_whitney_u(&base, &cand) {
                Ok(test) => PairwiseScreen {
                    instance,
                    baseline: baseline.to_string(),
                    candidate: candidate.to_string(),
                    p_value: test.pvalue,
                    effect_size: test.effect_size,
                    significant: test.pvalue < SCREEN_ALPHA,
                },
                Err(e) => {
                    tracing::warn!("Mann-Whitney screen failed for {}: {}", instance, e);
                    PairwiseScreen {
                        instance,
                        baseline: baseline.to_string(),
                        candidate: candidate.to_string(),
                        p_value: 1.0,
                        effect_size: 0.5,
                        significant: false,
                    }
                }
            }
        })
        .collect()
}

/// Render the summary as an aligned text table
pub fn to_report_string(summaries: &[IntegratorSummary], screens: &[PairwiseScreen]) -> String {
    let mut out = String::new();

    out.push_str(&"=".repeat(72));
    out.push_str("\nSUMMARY STATISTICS\n");
    out.push_str(&"=".repeat(72));
    out.push('\n');
    out.push_str(&format!(
        "{:<12} {:<10} {:>6} {:>12} {:>22}\n",
        "instance", "integrator", "runs", "median gap%", "95% CI"
    ));
    for s in summaries {
        out.push_str(&format!(
            "{:<12} {:<10} {:>6} {:>12.3} {:>22}\n",
            s.instance,
            s.integrator,
            s.n_runs,
            s.median_gap_pct,
            format!("[{:.3}, {:.3}]", s.gap_ci_95.0, s.gap_ci_95.1),
        ));
    }

    if !screens.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "{:<12} {:>12} {:>10} {:>12}\n",
            "instance", "p-value", "P(b>c)", "significant"
        ));
        for s in screens {
            out.push_str(&format!(
                "{:<12} {:>12.3e} {:>10.3} {:>12}\n",
                s.instance,
                s.p_value,
                s.effect_size,
                if s.significant { "yes" } else { "no" },
            ));
        }
    }

    out
}
