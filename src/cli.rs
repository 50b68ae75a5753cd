//! CLI argument parsing for Rigor

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
    /// Self-contained HTML report
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "rigor")]
#[command(version)]
#[command(about = "Statistical rigor auditor for TSP heuristic benchmark results", long_about = None)]
pub struct Cli {
    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the statistical enforcement pipeline on a results JSONL
    Analyze {
        /// Results JSONL file (default: newest matching file in --results-dir)
        #[arg(long, value_name = "FILE")]
        results: Option<PathBuf>,

        /// Directory searched for results files
        #[arg(long, default_value = "results", value_name = "DIR")]
        results_dir: PathBuf,

        /// File-name prefix for results discovery
        #[arg(long, default_value = "", value_name = "PREFIX")]
        prefix: String,

        /// Baseline integrator
        #[arg(long, default_value = "lkh")]
        baseline: String,

        /// Candidate integrator compared against the baseline
        #[arg(long, default_value = "EdgeRand")]
        candidate: String,

        /// Directory for CSV/HTML artifacts
        #[arg(long, default_value = "results", value_name = "DIR")]
        out_dir: PathBuf,

        /// Use the strict threshold preset
        #[arg(long, conflicts_with = "permissive")]
        strict: bool,

        /// Use the permissive threshold preset
        #[arg(long)]
        permissive: bool,

        /// Override the minimum samples gate
        #[arg(long, value_name = "N")]
        min_samples: Option<usize>,

        /// Override the significance level
        #[arg(long, value_name = "ALPHA")]
        alpha: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Summary statistics and a pairwise Mann-Whitney screen
    Summary {
        /// Results JSONL file (default: newest matching file in --results-dir)
        #[arg(long, value_name = "FILE")]
        results: Option<PathBuf>,

        #[arg(long, default_value = "results", value_name = "DIR")]
        results_dir: PathBuf,

        #[arg(long, default_value = "", value_name = "PREFIX")]
        prefix: String,

        #[arg(long, default_value = "lkh")]
        baseline: String,

        #[arg(long, default_value = "EdgeRand")]
        candidate: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Johnson compliance audit of an experiment
    Audit {
        /// Experiment config JSON
        #[arg(long, default_value = "configs/minimal_johnson.json", value_name = "FILE")]
        config: PathBuf,

        /// Results JSONL file (default: newest matching file in --results-dir)
        #[arg(long, value_name = "FILE")]
        results: Option<PathBuf>,

        #[arg(long, default_value = "results", value_name = "DIR")]
        results_dir: PathBuf,

        #[arg(long, default_value = "", value_name = "PREFIX")]
        prefix: String,

        /// Directory holding pipeline artifacts; the audit JSON is written here
        #[arg(long, default_value = "results", value_name = "DIR")]
        artifacts_dir: PathBuf,

        /// README checked for the Johnson citation
        /// (default: docs/README.md, then README.md)
        #[arg(long, value_name = "FILE")]
        readme: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// LaTeX compliance table from an audit JSON
    Table {
        /// Audit JSON file
        #[arg(long, default_value = "results/johnson_audit.json", value_name = "FILE")]
        json: PathBuf,

        /// Output LaTeX file
        #[arg(
            long,
            default_value = "paper/tables/table1_compliance.tex",
            value_name = "FILE"
        )]
        output: PathBuf,
    },

    /// Power analysis for a paired comparison
    Power {
        /// Standardized effect size (Cohen's d)
        #[arg(long, value_name = "D", conflicts_with = "cliffs_delta")]
        cohen_d: Option<f64>,

        /// Cliff's delta, converted internally to Cohen's d
        #[arg(long, value_name = "DELTA")]
        cliffs_delta: Option<f64>,

        /// Significance level
        #[arg(long, default_value = "0.05")]
        alpha: f64,

        /// Paired samples available
        #[arg(long, default_value = "30", value_name = "N")]
        n: usize,

        /// Power to reach when reporting the required sample size
        #[arg(long, default_value = "0.8")]
        target_power: f64,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate the tiered benchmark set or list the live inventory
    Validate {
        /// TSPLIB directory
        #[arg(default_value = "data/tsplib", value_name = "DIR")]
        dir: PathBuf,

        /// List every .tsp file instead of checking the tiers
        #[arg(long)]
        inventory: bool,
    },

    /// Convert a solutions.txt into optimal_values.csv
    Optima {
        /// Input solutions file (embedded optima are used when missing)
        #[arg(long, default_value = "data/solutions.txt", value_name = "FILE")]
        solutions: PathBuf,

        /// Output CSV
        #[arg(long, default_value = "data/optimal_values.csv", value_name = "FILE")]
        output: PathBuf,
    },

    /// Rewrite float-coordinate .tsp files with integer coordinates
    ScaleTsp {
        /// Directory of .tsp files to convert in place
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Collect machine specs for reproducibility reporting
    Specs {
        /// Output JSON file
        #[arg(long, default_value = "data/machine_specs.json", value_name = "FILE")]
        output: PathBuf,
    },
}
