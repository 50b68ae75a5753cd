//! Size-normalized wall-clock times
//!
//! Raw wall times are incomparable across instance sizes: a local-search
//! sweep is Θ(n log n) per improvement pass, so the protocol reports
//! `wall_time_s / (n ln n)` alongside the raw number. The node count comes
//! from the instance name itself (TSPLIB convention: trailing digits are
//! the city count).

use crate::dataset::RunRecord;
use regex::Regex;
use std::sync::OnceLock;

/// Fallback node count when the instance name carries no trailing digits
const DEFAULT_NODE_COUNT: u32 = 50;

fn trailing_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)$").expect("static regex is valid"))
}

/// Extract the node count from an instance name
///
/// `eil51` → 51, `dsj1000` → 1000, `kroA100` → 100. Names without trailing
/// digits fall back to 50.
///
/// # Example
/// ```
/// use rigor::normalize::node_count;
///
/// assert_eq!(node_count("eil51"), 51);
/// assert_eq!(node_count("pla33810"), 33810);
/// assert_eq!(node_count("weird"), 50);
/// ```
pub fn node_count(instance: &str) -> u32 {
    trailing_digits()
        .captures(instance)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_NODE_COUNT)
}

/// Wall time divided by `n ln n`
///
/// Node counts below 2 are clamped to 2 so `ln n` never reaches zero.
pub fn normalized_time(wall_time_s: f64, n: u32) -> f64 {
    let n = f64::from(n.max(2));
    wall_time_s / (n * n.ln())
}

/// A run record with its derived size-normalized columns
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub record: RunRecord,
    pub n_nodes: u32,
    pub normalized_time: f64,
}

/// Attach node counts and normalized times to every record
pub fn add_normalized_times(records: &[RunRecord]) -> Vec<NormalizedRecord> {
    records
        .iter()
        .map(|r| {
            let n = node_count(&r.instance);
            NormalizedRecord {
                record: r.clone(),
                n_nodes: n,
                normalized_time: normalized_time(r.wall_time_s, n),
            }
        })
        .collect()
}
