// Statistical Enforcement for Heuristic Benchmark Comparisons
//
// This module implements the protocol gate for publishing a comparison
// between two TSP integrators: a comparison only counts when it has enough
// paired samples, a significant non-parametric test, and a meaningful
// effect size.
//
// Scientific Foundation:
// [1] Johnson, D. S. (2002). A theoretician's guide to the experimental
//     analysis of algorithms. Data Structures, Near Neighbor Searches,
//     and Methodology. Principles 1 and 9: sample sizes and effect sizes.
// [2] Cliff, N. (1993). Dominance statistics: ordinal analyses to answer
//     ordinal questions. Psychological Bulletin 114(3).
// [3] Wilcoxon, F. (1945). Individual comparisons by ranking methods.
//     Biometrics Bulletin 1(6).
//
// Implementation:
// - Rank tests use the normal approximation with tie correction, which is
//   the only regime the protocol accepts (n >= 25)
// - Uses statrs (crates.io) for the normal distribution
// - Uses aprender (crates.io) for the parametric Welch cross-check
// - Uses trueno (crates.io) for SIMD-optimized vector statistics
// - Bootstrap resampling is deterministic (seeded StdRng)

mod bootstrap;
mod config;
mod effect_size;
mod parametric;
mod power;
mod verdict;

pub use bootstrap::{mean_diff_ci, median_ci, percentile};
pub use config::EnforcementConfig;
pub use effect_size::{cliffs_delta, common_language, EffectMagnitude};
pub use parametric::{welch_cross_check, WelchTest};
pub use power::{cliffs_delta_to_cohen_d, power_paired, required_samples};
pub use rank_test::{mann_whitney_u, wilcoxon_signed_rank, MannWhitneyTest, WilcoxonTest};
pub use verdict::{paired_comparison, ComparisonLabels, ComparisonResult, EnforcementReport};
