// Compliance verdict for one paired integrator comparison
//
// This is the gatekeeper: a comparison is protocol-compliant only when
// n >= min_samples, the Wilcoxon p-value clears alpha, and |Cliff's delta|
// clears the meaningfulness floor. Everything else is reported as FAIL with
// the sample size that would have been needed.

use crate::enforcement::bootstrap::mean_diff_ci;
use crate::enforcement::config::EnforcementConfig;
use crate::enforcement::effect_size::{cliffs_delta, EffectMagnitude};
use crate::enforcement::parametric::{welch_cross_check, WelchTest};
use crate::enforcement::power::{cliffs_delta_to_cohen_d, power_paired, required_samples};
use crate::enforcement::rank_test::wilcoxon_signed_rank;
use anyhow::Result;

/// Identifies the cell a comparison belongs to
#[derive(Debug, Clone)]
pub struct ComparisonLabels {
    /// Instance name, optionally suffixed with the budget (e.g. "eil51@10s")
    pub instance: String,
    /// Baseline integrator label
    pub baseline: String,
    /// Candidate integrator label
    pub candidate: String,
}

/// Outcome of enforcing the protocol on one paired comparison
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub instance: String,
    pub baseline: String,
    pub candidate: String,

    /// Paired samples per group
    pub n_samples: usize,

    /// Two-sided Wilcoxon p-value
    pub p_value: f64,

    /// Cliff's delta of baseline vs candidate
    pub effect_size: f64,

    /// Qualitative magnitude of the effect (Romano thresholds)
    pub magnitude: EffectMagnitude,

    /// 95% bootstrap CI for mean(baseline) - mean(candidate)
    pub ci_lower: f64,
    pub ci_upper: f64,

    /// Achieved power at the observed effect size
    pub achieved_power: f64,

    /// Samples needed to reach the target power, when the comparison
    /// failed and the effect is non-zero
    pub required_n: Option<usize>,

    /// Whether the comparison clears all three protocol gates
    pub compliant: bool,

    /// Parametric cross-check (absent when the t-test was not computable)
    pub welch: Option<WelchTest>,
}

fn all_equal(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

fn run_welch(a: &[f64], b: &[f64], labels: &ComparisonLabels) -> Option<WelchTest> {
    let a32: Vec<f32> = a.iter().map(|&v| v as f32).collect();
    let b32: Vec<f32> = b.iter().map(|&v| v as f32).collect();
    match welch_cross_check(&a32, &b32) {
        Ok(test) => Some(test),
        Err(e) => {
            tracing::warn!("Welch cross-check failed for {}: {}", labels.instance, e);
            None
        }
    }
}

/// Enforce the protocol on one paired comparison
///
/// Zero-variance groups short-circuit the rank test:
/// - both groups constant and identical: no difference and no statistical
///   power, p = 1.0, never compliant
/// - one group degenerate (or two different constants): treated as an
///   extreme result, p = 1e-15, with the dominance count deciding whether
///   the effect clears the meaningfulness floor
///
/// # Example
/// ```
/// use rigor::enforcement::{paired_comparison, ComparisonLabels, EnforcementConfig};
///
/// let a: Vec<f64> = (0..30).map(|i| 420.0 + (i % 3) as f64).collect();
/// let b: Vec<f64> = (0..30).map(|i| 470.0 + (i % 3) as f64).collect();
/// let labels = ComparisonLabels {
///     instance: "eil51@10s".into(),
///     baseline: "lkh".into(),
///     candidate: "EdgeRand".into(),
/// };
/// let result = paired_comparison(&a, &b, labels, &EnforcementConfig::default()).unwrap();
/// assert!(result.compliant);
/// assert_eq!(result.effect_size, 1.0);
/// ```
pub fn paired_comparison(
    a: &[f64],
    b: &[f64],
    labels: ComparisonLabels,
    cfg: &EnforcementConfig,
) -> Result<ComparisonResult> {
    cfg.validate().map_err(|e| anyhow::anyhow!(e))?;

    if a.is_empty() || b.is_empty() {
        anyhow::bail!("Cannot compare empty run groups");
    }
    if a.len() != b.len() {
        anyhow::bail!(
            "Paired comparison requires equal group sizes (got {} vs {})",
            a.len(),
            b.len()
        );
    }

    let n = a.len();

    if all_equal(a) || all_equal(b) {
        if all_equal(a) && all_equal(b) && a[0] == b[0] {
            // Identical constants: nothing to test and nothing to learn
            return Ok(ComparisonResult {
                instance: labels.instance,
                baseline: labels.baseline,
                candidate: labels.candidate,
                n_samples: n,
                p_value: 1.0,
                effect_size: 0.0,
                magnitude: EffectMagnitude::Negligible,
                ci_lower: 0.0,
                ci_upper: 0.0,
                achieved_power: 0.0,
                required_n: None,
                compliant: false,
                welch: None,
            });
        }

        // One side degenerate: rank test is meaningless, but the dominance
        // count still says how separated the groups are
        let delta = cliffs_delta(a, b);
        let compliant = n >= cfg.min_samples && delta.abs() > cfg.min_effect_size;
        let d = cliffs_delta_to_cohen_d(delta);
        return Ok(ComparisonResult {
            instance: labels.instance,
            baseline: labels.baseline,
            candidate: labels.candidate,
            n_samples: n,
            p_value: 1e-15,
            effect_size: delta,
            magnitude: EffectMagnitude::from_delta(delta),
            ci_lower: 0.0,
            ci_upper: 0.0,
            achieved_power: power_paired(n, d, cfg.alpha),
            required_n: if compliant {
                None
            } else {
                required_samples(d, cfg.alpha, cfg.target_power)
            },
            compliant,
            welch: None,
        });
    }

    let test = wilcoxon_signed_rank(a, b)?;
    let delta = cliffs_delta(a, b);
    let (ci_lower, ci_upper) = mean_diff_ci(a, b, cfg.bootstrap_resamples, cfg.bootstrap_seed);

    let compliant =
        n >= cfg.min_samples && test.pvalue < cfg.alpha && delta.abs() > cfg.min_effect_size;

    let d = cliffs_delta_to_cohen_d(delta);
    let welch = run_welch(a, b, &labels);

    Ok(ComparisonResult {
        instance: labels.instance,
        baseline: labels.baseline,
        candidate: labels.candidate,
        n_samples: n,
        p_value: test.pvalue,
        effect_size: delta,
        magnitude: EffectMagnitude::from_delta(delta),
        ci_lower,
        ci_upper,
        achieved_power: power_paired(n, d, cfg.alpha),
        required_n: if compliant {
            None
        } else {
            required_samples(d, cfg.alpha, cfg.target_power)
        },
        compliant,
        welch,
    })
}

/// Full enforcement report over every comparison in a results file
#[derive(Debug, Clone)]
pub struct EnforcementReport {
    pub results: Vec<ComparisonResult>,
    /// Cells skipped because their group sizes were unequal or too small
    pub skipped: Vec<String>,
    pub config: EnforcementConfig,
}

impl EnforcementReport {
    pub fn compliant_count(&self) -> usize {
        self.results.iter().filter(|r| r.compliant).count()
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str(&"=".repeat(60));
        report.push_str("\nSTATISTICAL ENFORCEMENT REPORT\n");
        report.push_str(&"=".repeat(60));
        report.push('\n');
        report.push_str(&format!(
            "Compliant comparisons: {}/{}\n",
            self.compliant_count(),
            self.results.len()
        ));
        report.push_str(&format!(
            "Gates: n>={}, p<{}, |δ|>{}\n",
            self.config.min_samples, self.config.alpha, self.config.min_effect_size
        ));

        for r in &self.results {
            let status = if r.compliant { "✅ PASS" } else { "❌ FAIL" };
            report.push_str(&format!(
                "\n{} | {} vs {}\n",
                r.instance, r.baseline, r.candidate
            ));
            report.push_str(&format!(
                "  n={}, p={:.2e}, δ={:.3} ({})\n",
                r.n_samples, r.p_value, r.effect_size, r.magnitude
            ));
            report.push_str(&format!(
                "  CI=[{:.2}, {:.2}], power={:.2}\n",
                r.ci_lower, r.ci_upper, r.achieved_power
            ));
            if let Some(welch) = &r.welch {
                report.push_str(&format!(
                    "  Welch cross-check: t={:.2}, p={:.2e}\n",
                    welch.statistic, welch.pvalue
                ));
            }
            match r.required_n {
                Some(required) if !r.compliant => {
                    report.push_str(&format!("  {} (need n≈{})\n", status, required));
                }
                _ => report.push_str(&format!("  {}\n", status)),
            }
        }

        if !self.skipped.is_empty() {
            report.push_str(&format!(
                "\n🔇 Skipped cells ({}):\n",
                self.skipped.len()
            ));
            for cell in &self.skipped {
                report.push_str(&format!("  - {}\n", cell));
            }
        }

        report
    }
}
