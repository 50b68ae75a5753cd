// Configuration for statistical enforcement
//
// The protocol values are deliberately stricter than the usual p < 0.05
// convention: heuristic benchmarks are cheap to rerun, so the gate demands
// n >= 30 paired seeds, p < 0.001, and |delta| > 0.1 before a comparison
// may be reported as a finding.

use serde::{Deserialize, Serialize};

/// Thresholds applied to every paired integrator comparison
///
/// # Example
/// ```
/// use rigor::enforcement::EnforcementConfig;
///
/// let config = EnforcementConfig::default();
/// assert_eq!(config.min_samples, 30);
/// assert_eq!(config.alpha, 0.001);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnforcementConfig {
    /// Minimum paired samples per group (Johnson Principle 1)
    ///
    /// Rank tests are usable from a handful of samples, but the protocol
    /// requires 30 seeds so the normal approximation holds and the test
    /// has enough power to resolve |delta| near 0.1.
    pub min_samples: usize,

    /// Significance level for the two-sided Wilcoxon signed-rank test
    ///
    /// Default 0.001. Heuristic comparisons run hundreds of
    /// instance x budget cells, so the per-cell alpha is kept far below
    /// the conventional 0.05.
    pub alpha: f64,

    /// Minimum |Cliff's delta| for a difference to count as meaningful
    ///
    /// Default 0.1: below that, one integrator beats the other on barely
    /// more than 55% of seed pairs, which no practitioner would act on.
    pub min_effect_size: f64,

    /// Resamples for the percentile bootstrap CI of the mean difference
    pub bootstrap_resamples: usize,

    /// Seed for bootstrap resampling (deterministic reports)
    pub bootstrap_seed: u64,

    /// Target power used when reporting the required sample size for
    /// underpowered comparisons
    pub target_power: f64,
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self {
            min_samples: 30,
            alpha: 0.001,
            min_effect_size: 0.1,
            bootstrap_resamples: 10_000,
            bootstrap_seed: 42,
            target_power: 0.8,
        }
    }
}

impl EnforcementConfig {
    /// Stricter gate for camera-ready results
    pub fn strict() -> Self {
        Self {
            min_samples: 50,
            alpha: 0.0001,
            min_effect_size: 0.147, // Romano's "small" boundary
            bootstrap_resamples: 20_000,
            bootstrap_seed: 42,
            target_power: 0.9,
        }
    }

    /// Looser gate for exploratory laptop runs
    pub fn permissive() -> Self {
        Self {
            min_samples: 10,
            alpha: 0.01,
            min_effect_size: 0.05,
            bootstrap_resamples: 2_000,
            bootstrap_seed: 42,
            target_power: 0.8,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..1.0).contains(&self.alpha) || self.alpha == 0.0 {
            return Err(format!("alpha must be in (0, 1), got {}", self.alpha));
        }

        if self.min_samples < 5 {
            return Err(format!(
                "min_samples must be >= 5 for a paired rank test, got {}",
                self.min_samples
            ));
        }

        if !(0.0..=1.0).contains(&self.min_effect_size) {
            return Err(format!(
                "min_effect_size must be in [0, 1], got {}",
                self.min_effect_size
            ));
        }

        if self.bootstrap_resamples < 100 {
            return Err(format!(
                "bootstrap_resamples must be >= 100 for a stable CI, got {}",
                self.bootstrap_resamples
            ));
        }

        if !(0.0..1.0).contains(&self.target_power) || self.target_power == 0.0 {
            return Err(format!(
                "target_power must be in (0, 1), got {}",
                self.target_power
            ));
        }

        Ok(())
    }
}
