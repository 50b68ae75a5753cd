//! JSON output format for machine-readable reports
//!
//! Every top-level report carries a `version` and `format` marker so
//! downstream consumers can detect schema changes.

use crate::enforcement::{ComparisonResult, EnforcementReport};
use crate::summary::{IntegratorSummary, PairwiseScreen};
use serde::{Deserialize, Serialize};

/// Format identifier embedded in every JSON report
pub const FORMAT: &str = "rigor-json-v1";

/// One paired comparison in JSON form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonComparison {
    pub instance: String,
    pub baseline: String,
    pub candidate: String,
    pub n_samples: usize,
    pub p_value: f64,
    pub effect_size_cliffs_delta: f64,
    pub magnitude: String,
    pub ci_95_lower: f64,
    pub ci_95_upper: f64,
    pub achieved_power: f64,
    /// Samples needed for the target power (failed comparisons only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_n: Option<usize>,
    pub protocol_compliant: bool,
    /// Parametric cross-check p-value, when the t-test was computable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welch_p_value: Option<f64>,
}

impl From<&ComparisonResult> for JsonComparison {
    fn from(r: &ComparisonResult) -> Self {
        Self {
            instance: r.instance.clone(),
            baseline: r.baseline.clone(),
            candidate: r.candidate.clone(),
            n_samples: r.n_samples,
            p_value: r.p_value,
            effect_size_cliffs_delta: r.effect_size,
            magnitude: r.magnitude.to_string(),
            ci_95_lower: r.ci_lower,
            ci_95_upper: r.ci_upper,
            achieved_power: r.achieved_power,
            required_n: r.required_n,
            protocol_compliant: r.compliant,
            welch_p_value: r.welch.as_ref().map(|w| f64::from(w.pvalue)),
        }
    }
}

/// Totals for the enforcement run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEnforcementSummary {
    pub total_comparisons: usize,
    pub compliant_comparisons: usize,
    pub skipped_cells: usize,
}

/// Root JSON structure for `rigor analyze --format json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEnforcementReport {
    pub version: String,
    pub format: String,
    pub comparisons: Vec<JsonComparison>,
    pub summary: JsonEnforcementSummary,
}

impl From<&EnforcementReport> for JsonEnforcementReport {
    fn from(report: &EnforcementReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: FORMAT.to_string(),
            comparisons: report.results.iter().map(JsonComparison::from).collect(),
            summary: JsonEnforcementSummary {
                total_comparisons: report.results.len(),
                compliant_comparisons: report.compliant_count(),
                skipped_cells: report.skipped.len(),
            },
        }
    }
}

/// Root JSON structure for `rigor summary --format json`
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummaryReport<'a> {
    pub version: String,
    pub format: String,
    pub groups: &'a [IntegratorSummary],
    pub screens: &'a [PairwiseScreen],
}

impl<'a> JsonSummaryReport<'a> {
    pub fn new(groups: &'a [IntegratorSummary], screens: &'a [PairwiseScreen]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: FORMAT.to_string(),
            groups,
            screens,
        }
    }
}

/// Root JSON structure for `rigor power`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPowerReport {
    pub version: String,
    pub format: String,
    pub cohen_d: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliffs_delta: Option<f64>,
    pub alpha: f64,
    pub n_samples: usize,
    pub achieved_power: f64,
    pub target_power: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_n: Option<usize>,
}
