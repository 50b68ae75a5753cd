//! Optimal tour lengths
//!
//! TSPLIB publishes optima in a loose `solutions.txt` format
//! (`dsj1000 : 18660188 (CEIL_2D)`); downstream tooling wants a clean CSV.
//! When no solutions file exists the well-known optima for the standard
//! testbed are embedded here so gap calculations still work.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Known TSPLIB optima used when no solutions.txt is available
pub const MANUAL_OPTIMA: &[(&str, u64)] = &[
    ("eil51", 429),
    ("eil76", 538),
    ("berlin52", 7542),
    ("kroA100", 21282),
    ("dsj1000", 18660188),
    ("pr2392", 378032),
    ("pcb3038", 137694),
    ("rl5915", 565530),
];

fn leading_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)").expect("static regex is valid"))
}

/// Parse `solutions.txt` text into `(instance, optimal_length)` pairs
///
/// Accepts `name : 1234`, `name : 1234 (CEIL_2D)`, and skips comments,
/// blank lines, and lines whose value has no leading digits.
pub fn parse_solutions(text: &str) -> Vec<(String, u64)> {
    let mut out = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };

        let value_part = value.trim().split_whitespace().next().unwrap_or("");
        if let Some(m) = leading_number().find(value_part) {
            if let Ok(n) = m.as_str().parse::<u64>() {
                out.push((name.trim().to_string(), n));
            }
        }
    }

    out
}

/// Convert a solutions file to `optimal_values.csv`
///
/// Without a solutions file, falls back to the embedded optima table.
/// Returns the number of rows written.
pub fn convert_to_csv(solutions_path: &Path, output_csv: &Path) -> Result<usize> {
    let rows: Vec<(String, u64)> = if solutions_path.exists() {
        let text = std::fs::read_to_string(solutions_path)
            .with_context(|| format!("Failed to read {}", solutions_path.display()))?;
        parse_solutions(&text)
    } else {
        tracing::warn!(
            "No {} found, using embedded optima",
            solutions_path.display()
        );
        MANUAL_OPTIMA
            .iter()
            .map(|(name, n)| (name.to_string(), *n))
            .collect()
    };

    let mut csv = String::from("instance,optimal_length\n");
    for (name, n) in &rows {
        csv.push_str(&format!("{},{}\n", name, n));
    }

    std::fs::write(output_csv, csv)
        .with_context(|| format!("Failed to write {}", output_csv.display()))?;
    Ok(rows.len())
}

/// Read `optimal_values.csv` back into a name → length map
///
/// Header-tolerant and accepts float-formatted integers ("1234.0"), which
/// older conversion scripts produced.
pub fn read_csv(path: &Path) -> Result<BTreeMap<String, u64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut map = BTreeMap::new();
    for row in text.lines() {
        let mut fields = row.split(',');
        let (Some(name), Some(value)) = (fields.next(), fields.next()) else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || name.to_lowercase().starts_with("instance") {
            continue;
        }
        if let Ok(v) = value.trim().parse::<f64>() {
            map.insert(name.trim_end_matches(".tsp").to_string(), v as u64);
        }
    }

    Ok(map)
}
