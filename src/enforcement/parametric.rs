// Parametric cross-check for the rank-based enforcement verdict
//
// The protocol verdict rests on the Wilcoxon test; this module runs Welch's
// independent t-test alongside it so reviewers can see when the parametric
// and non-parametric views disagree (heavy tails, outlier seeds).
//
// Scientific Foundation:
// - Welch's t-test variant handles unequal variances between groups
// - Uses trueno::Vector for SIMD-optimized statistics (variance)
// - Uses aprender::stats::DescriptiveStats for quantiles/median

use anyhow::{Context, Result};
use aprender::stats::DescriptiveStats;
use trueno::Vector;

/// Result of Welch's independent t-test between two run groups
#[derive(Debug, Clone)]
pub struct WelchTest {
    /// t-statistic value
    pub statistic: f32,

    /// p-value (two-tailed)
    pub pvalue: f32,

    /// Degrees of freedom
    pub df: f32,

    /// Median of the baseline group
    pub baseline_median: f32,

    /// Median of the candidate group
    pub candidate_median: f32,

    /// Variance of the baseline group
    pub baseline_variance: f32,

    /// Variance of the candidate group
    pub candidate_variance: f32,
}

/// Compare two run groups using Welch's independent t-test
///
/// Uses aprender's `ttest_ind()` with unequal variance assumption (Welch's
/// test). Tour lengths are not normally distributed in general, which is
/// why this is a cross-check and never the verdict.
///
/// # Arguments
/// * `baseline` - Tour lengths (or gaps) from the baseline integrator
/// * `candidate` - Tour lengths (or gaps) from the candidate integrator
pub fn welch_cross_check(baseline: &[f32], candidate: &[f32]) -> Result<WelchTest> {
    if baseline.is_empty() || candidate.is_empty() {
        anyhow::bail!("Cannot compare empty run groups");
    }

    if baseline.len() < 2 || candidate.len() < 2 {
        anyhow::bail!("Need at least 2 runs per group for a t-test");
    }

    let ttest_result = aprender::stats::hypothesis::ttest_ind(baseline, candidate, false)
        .context("Failed to compute t-test")?;

    let baseline_vec = Vector::from_slice(baseline);
    let candidate_vec = Vector::from_slice(candidate);

    let baseline_median = median(&baseline_vec)?;
    let candidate_median = median(&candidate_vec)?;

    let baseline_variance = baseline_vec
        .variance()
        .context("Failed to compute baseline variance")?;
    let candidate_variance = candidate_vec
        .variance()
        .context("Failed to compute candidate variance")?;

    Ok(WelchTest {
        statistic: ttest_result.statistic,
        pvalue: ttest_result.pvalue,
        df: ttest_result.df,
        baseline_median,
        candidate_median,
        baseline_variance,
        candidate_variance,
    })
}

/// Calculate median using aprender's DescriptiveStats
///
/// Median is robust to the occasional runaway seed, making it the right
/// location estimate for tour-length distributions.
pub fn median(vector: &Vector<f32>) -> Result<f32> {
    let stats = DescriptiveStats::new(vector);
    stats
        .quantile(0.5)
        .map_err(|e| anyhow::anyhow!("Failed to compute median: {}", e))
}
