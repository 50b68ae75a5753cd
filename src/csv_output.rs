//! CSV output for enforcement and summary tables
//!
//! The CSV artifacts are what downstream paper tooling ingests, so field
//! escaping follows RFC 4180 (quote fields containing commas, quotes, or
//! newlines; double embedded quotes).

use crate::enforcement::ComparisonResult;
use crate::normalize::NormalizedRecord;
use crate::summary::IntegratorSummary;

/// Escape CSV field (handle commas, quotes, newlines)
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn optional<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// Render the enforcement table (`statistical_enforcement.csv`)
pub fn enforcement_csv(results: &[ComparisonResult]) -> String {
    let mut out = String::from(
        "instance,baseline,candidate,n_samples,p_value,effect_size_cliffs_delta,\
         ci_95_lower,ci_95_upper,achieved_power,required_n,protocol_compliant\n",
    );

    for r in results {
        out.push_str(&format!(
            "{},{},{},{},{:e},{},{},{},{},{},{}\n",
            escape_field(&r.instance),
            escape_field(&r.baseline),
            escape_field(&r.candidate),
            r.n_samples,
            r.p_value,
            r.effect_size,
            r.ci_lower,
            r.ci_upper,
            r.achieved_power,
            optional(&r.required_n),
            r.compliant,
        ));
    }

    out
}

/// Render the normalized-times table (`full_data_with_normalized.csv`)
pub fn normalized_csv(records: &[NormalizedRecord]) -> String {
    let mut out = String::from(
        "instance,integrator,budget_s,seed,best_length,hk_bound,gap_pct,wall_time_s,\
         n_nodes,normalized_time\n",
    );

    for n in records {
        let r = &n.record;
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{:e}\n",
            escape_field(&r.instance),
            escape_field(&r.integrator),
            r.budget_s,
            r.seed,
            r.best_length,
            optional(&r.hk_bound),
            optional(&r.gap_pct),
            r.wall_time_s,
            n.n_nodes,
            n.normalized_time,
        ));
    }

    out
}

/// Render the summary table
pub fn summary_csv(summaries: &[IntegratorSummary]) -> String {
    let mut out = String::from(
        "instance,integrator,n_runs,median_gap_pct,gap_ci_lower,gap_ci_upper,\
         median_wall_time_s,time_ci_lower,time_ci_upper\n",
    );

    for s in summaries {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            escape_field(&s.instance),
            escape_field(&s.integrator),
            s.n_runs,
            s.median_gap_pct,
            s.gap_ci_95.0,
            s.gap_ci_95.1,
            s.median_wall_time_s,
            s.time_ci_95.0,
            s.time_ci_95.1,
        ));
    }

    out
}
