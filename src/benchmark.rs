//! Benchmark-set validation
//!
//! The testbed is organized in four size tiers; the seed budget per tier
//! shrinks as instances grow. Validation reports, per tier, which `.tsp`
//! files are present, their parsed dimension, and whether optimal-tour
//! data exists for them. The inventory listing covers whatever is actually
//! in the directory, tiered or not.

use crate::optima;
use crate::tsplib;
use anyhow::Result;
use std::path::Path;

/// A size tier of the benchmark set
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub name: &'static str,
    pub seeds: u32,
    pub instances: &'static [&'static str],
}

/// The four benchmark tiers
pub const TIERS: [Tier; 4] = [
    Tier {
        name: "TIER 1 (<=200c)",
        seeds: 1000,
        instances: &[
            "eil101", "kroC100", "kroD100", "ch130", "ch150", "brg180", "gr202", "tsp225",
        ],
    },
    Tier {
        name: "TIER 2 (200-1000c)",
        seeds: 100,
        instances: &[
            "a280", "lin318", "pcb442", "pa561", "rat575", "gr666", "rat783", "pr1002",
        ],
    },
    Tier {
        name: "TIER 3 (1000-5000c)",
        seeds: 10,
        instances: &["dsj1000", "pr2392", "pcb3038"],
    },
    Tier {
        name: "TIER 4 (>5000c)",
        seeds: 5,
        instances: &["rl5915", "pla7397", "rl11849", "pla33810"],
    },
];

/// Where the optimal tour length for an instance can come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimalSource {
    OptTourFile,
    SolutionsFile,
    None,
}

impl OptimalSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimalSource::OptTourFile => ".opt.tour",
            OptimalSource::SolutionsFile => "solutions.txt",
            OptimalSource::None => "missing",
        }
    }
}

/// Validation status of one instance
#[derive(Debug, Clone)]
pub struct InstanceStatus {
    pub name: String,
    pub present: bool,
    pub dimension: Option<u32>,
    pub size_kb: f64,
    pub optimal: OptimalSource,
}

fn instance_status(dir: &Path, name: &str, solutions: &[(String, u64)]) -> InstanceStatus {
    let tsp = dir.join(format!("{}.tsp", name));

    let (present, dimension, size_kb) = if tsp.exists() {
        let size_kb = std::fs::metadata(&tsp)
            .map(|m| m.len() as f64 / 1024.0)
            .unwrap_or(0.0);
        let dimension = tsplib::parse_dimension(&tsp).ok().flatten();
        (true, dimension, size_kb)
    } else {
        (false, None, 0.0)
    };

    let optimal = if dir.join(format!("{}.opt.tour", name)).exists() {
        OptimalSource::OptTourFile
    } else if solutions.iter().any(|(n, _)| n == name) {
        OptimalSource::SolutionsFile
    } else {
        OptimalSource::None
    };

    InstanceStatus {
        name: name.to_string(),
        present,
        dimension,
        size_kb,
        optimal,
    }
}

fn load_solutions(dir: &Path) -> Vec<(String, u64)> {
    let path = dir.join("solutions.txt");
    std::fs::read_to_string(path)
        .map(|text| optima::parse_solutions(&text))
        .unwrap_or_default()
}

/// Validate the tiered benchmark set against a TSPLIB directory
pub fn validate(dir: &Path) -> Result<String> {
    let solutions = load_solutions(dir);
    let mut out = String::new();

    out.push_str("TSPLIB Benchmark Validation\n");
    out.push_str(&"=".repeat(60));
    out.push('\n');

    for tier in &TIERS {
        out.push_str(&format!("\n{} ({} seeds):\n", tier.name, tier.seeds));
        for name in tier.instances {
            let status = instance_status(dir, name, &solutions);
            let tsp_col = if status.present {
                format!(
                    "✅ TSP ({}c, {:.0}KB)",
                    status
                        .dimension
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "?".to_string()),
                    status.size_kb
                )
            } else {
                "❌ TSP missing".to_string()
            };
            out.push_str(&format!(
                "  {:<12} {:<25} | {}\n",
                status.name,
                tsp_col,
                status.optimal.as_str()
            ));
        }
    }

    out.push('\n');
    out.push_str(&"=".repeat(60));
    out.push('\n');
    Ok(out)
}

/// List every `.tsp` in the directory with size, dimension, optimal status
pub fn inventory(dir: &Path) -> Result<String> {
    let solutions = load_solutions(dir);

    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let path = e.path();
            if path.extension().and_then(|x| x.to_str()) == Some("tsp") {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            } else {
                None
            }
        })
        .collect();
    names.sort();

    let mut out = String::new();
    out.push_str("LIVE INVENTORY\n");
    out.push_str(&"-".repeat(48));
    out.push('\n');

    for name in &names {
        let status = instance_status(dir, name, &solutions);
        out.push_str(&format!(
            "{:>6}c | {:<12} | {:>8.1}KB | opt: {}\n",
            status
                .dimension
                .map(|d| d.to_string())
                .unwrap_or_else(|| "?".to_string()),
            status.name,
            status.size_kb,
            status.optimal.as_str()
        ));
    }

    out.push_str(&"-".repeat(48));
    out.push('\n');
    out.push_str(&format!("{} instances\n", names.len()));
    Ok(out)
}
