use anyhow::{Context, Result};
use clap::Parser;
use rigor::audit;
use rigor::cli::{Cli, Command, OutputFormat};
use rigor::config::ExperimentConfig;
use rigor::enforcement::{
    cliffs_delta_to_cohen_d, power_paired, required_samples, EnforcementConfig,
};
use rigor::json_output::{JsonEnforcementReport, JsonPowerReport, JsonSummaryReport, FORMAT};
use rigor::pipeline::{analyze, AnalyzeOptions};
use rigor::{benchmark, csv_output, dataset, machine, optima, summary, tsplib};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Bootstrap seed shared by the summary command (reports are reproducible)
const SUMMARY_SEED: u64 = 42;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn resolve_results(
    results: Option<PathBuf>,
    results_dir: &Path,
    prefix: &str,
) -> Result<PathBuf> {
    match results {
        Some(path) => Ok(path),
        None => Ok(dataset::latest_jsonl(results_dir, prefix)?),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_analyze(
    results: Option<PathBuf>,
    results_dir: PathBuf,
    prefix: String,
    baseline: String,
    candidate: String,
    out_dir: PathBuf,
    strict: bool,
    permissive: bool,
    min_samples: Option<usize>,
    alpha: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = if strict {
        EnforcementConfig::strict()
    } else if permissive {
        EnforcementConfig::permissive()
    } else {
        EnforcementConfig::default()
    };
    if let Some(n) = min_samples {
        config.min_samples = n;
    }
    if let Some(a) = alpha {
        config.alpha = a;
    }

    let opts = AnalyzeOptions {
        results_path: results,
        results_dir,
        prefix,
        baseline,
        candidate,
        out_dir,
        config,
        write_html: matches!(format, OutputFormat::Html),
    };

    let outcome = analyze(&opts)?;

    match format {
        OutputFormat::Text => {
            println!("Source: {}", outcome.source.display());
            println!("{}", outcome.report.to_report_string());
            println!("Saved: {}", outcome.enforcement_csv_path.display());
            println!("Saved: {}", outcome.normalized_csv_path.display());
        }
        OutputFormat::Json => {
            let json = JsonEnforcementReport::from(&outcome.report);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Csv => {
            print!("{}", csv_output::enforcement_csv(&outcome.report.results));
        }
        OutputFormat::Html => {
            let path = outcome
                .html_path
                .expect("analyze writes the HTML artifact in html mode");
            println!("Saved: {}", path.display());
        }
    }

    Ok(())
}

fn cmd_summary(
    results: Option<PathBuf>,
    results_dir: PathBuf,
    prefix: String,
    baseline: String,
    candidate: String,
    format: OutputFormat,
) -> Result<()> {
    let source = resolve_results(results, &results_dir, &prefix)?;
    let records = dataset::load_jsonl(&source)?;

    let groups = summary::summarize(&records, SUMMARY_SEED);
    let screens = summary::pairwise_screen(&records, &baseline, &candidate);

    match format {
        OutputFormat::Text => {
            println!("Source: {}", source.display());
            println!("{}", summary::to_report_string(&groups, &screens));
        }
        OutputFormat::Json => {
            let json = JsonSummaryReport::new(&groups, &screens);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Csv => {
            print!("{}", csv_output::summary_csv(&groups));
        }
        OutputFormat::Html => {
            anyhow::bail!("HTML output is only available for `rigor analyze`");
        }
    }

    Ok(())
}

fn find_readme(explicit: Option<PathBuf>) -> Option<String> {
    let candidates = match explicit {
        Some(path) => vec![path],
        None => vec![PathBuf::from("docs/README.md"), PathBuf::from("README.md")],
    };
    candidates
        .into_iter()
        .find_map(|p| std::fs::read_to_string(p).ok())
}

#[allow(clippy::too_many_arguments)]
fn cmd_audit(
    config: PathBuf,
    results: Option<PathBuf>,
    results_dir: PathBuf,
    prefix: String,
    artifacts_dir: PathBuf,
    readme: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let experiment = ExperimentConfig::from_json(&config)?;

    let source = resolve_results(results, &results_dir, &prefix)
        .context("No results to audit; run the protocol first")?;
    let records = dataset::load_jsonl(&source)?;

    let ctx = audit::AuditContext {
        config: &experiment,
        records: &records,
        readme: find_readme(readme),
        artifacts_dir: artifacts_dir.clone(),
    };

    let report = audit::run_audit(&ctx);
    let json_path = report.save_json(&artifacts_dir)?;

    match format {
        OutputFormat::Text => {
            println!("{}", report.to_report_string());
            println!("Saved: {}", json_path.display());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.to_json())?);
        }
        _ => anyhow::bail!("Audit reports support text or json output"),
    }

    Ok(())
}

fn cmd_power(
    cohen_d: Option<f64>,
    cliffs_delta: Option<f64>,
    alpha: f64,
    n: usize,
    target_power: f64,
    format: OutputFormat,
) -> Result<()> {
    if !(0.0..1.0).contains(&alpha) || alpha == 0.0 {
        anyhow::bail!("alpha must be in (0, 1), got {}", alpha);
    }
    if !(0.0..1.0).contains(&target_power) || target_power == 0.0 {
        anyhow::bail!("target_power must be in (0, 1), got {}", target_power);
    }

    let d = match (cohen_d, cliffs_delta) {
        (Some(d), None) => d,
        (None, Some(delta)) => {
            if !(-1.0..=1.0).contains(&delta) {
                anyhow::bail!("Cliff's delta must be in [-1, 1], got {}", delta);
            }
            cliffs_delta_to_cohen_d(delta)
        }
        (None, None) => anyhow::bail!("Provide an effect size: --cohen-d or --cliffs-delta"),
        (Some(_), Some(_)) => unreachable!("clap rejects conflicting effect sizes"),
    };

    let achieved = power_paired(n, d, alpha);
    let required = required_samples(d, alpha, target_power);

    match format {
        OutputFormat::Text => {
            if let Some(delta) = cliffs_delta {
                println!("Cliff's δ = {} (Cohen's d = {:.3})", delta, d);
            } else {
                println!("Cohen's d = {:.3}", d);
            }
            println!("Achieved power at n={}: {:.3} (α={})", n, achieved, alpha);
            match required {
                Some(required) => {
                    println!("Required n for power {}: {}", target_power, required)
                }
                None => println!("Required n for power {}: unreachable (zero effect)", target_power),
            }
        }
        OutputFormat::Json => {
            let json = JsonPowerReport {
                version: env!("CARGO_PKG_VERSION").to_string(),
                format: FORMAT.to_string(),
                cohen_d: d,
                cliffs_delta,
                alpha,
                n_samples: n,
                achieved_power: achieved,
                target_power,
                required_n: required,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => anyhow::bail!("Power reports support text or json output"),
    }

    Ok(())
}

fn cmd_scale_tsp(dir: PathBuf) -> Result<()> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|x| x.to_str()) == Some("tsp"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        anyhow::bail!("No .tsp files found in {}", dir.display());
    }

    let mut total = 0usize;
    for path in &paths {
        let outcome = tsplib::scale_to_integer(path)?;
        if !outcome.scale_found {
            tracing::warn!(
                "No SCALE tag in {}; small floats may truncate to zero",
                path.display()
            );
        }
        println!(
            "{}: {} coordinates converted",
            path.display(),
            outcome.coords_converted
        );
        total += outcome.coords_converted;
    }

    println!("Converted {} coordinates across {} files", total, paths.len());
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    match args.command {
        Command::Analyze {
            results,
            results_dir,
            prefix,
            baseline,
            candidate,
            out_dir,
            strict,
            permissive,
            min_samples,
            alpha,
            format,
        } => cmd_analyze(
            results,
            results_dir,
            prefix,
            baseline,
            candidate,
            out_dir,
            strict,
            permissive,
            min_samples,
            alpha,
            format,
        ),
        Command::Summary {
            results,
            results_dir,
            prefix,
            baseline,
            candidate,
            format,
        } => cmd_summary(results, results_dir, prefix, baseline, candidate, format),
        Command::Audit {
            config,
            results,
            results_dir,
            prefix,
            artifacts_dir,
            readme,
            format,
        } => cmd_audit(
            config,
            results,
            results_dir,
            prefix,
            artifacts_dir,
            readme,
            format,
        ),
        Command::Table { json, output } => {
            audit::write_table(&json, &output)?;
            println!("Saved: {}", output.display());
            Ok(())
        }
        Command::Power {
            cohen_d,
            cliffs_delta,
            alpha,
            n,
            target_power,
            format,
        } => cmd_power(cohen_d, cliffs_delta, alpha, n, target_power, format),
        Command::Validate { dir, inventory } => {
            let report = if inventory {
                benchmark::inventory(&dir)?
            } else {
                benchmark::validate(&dir)?
            };
            print!("{}", report);
            Ok(())
        }
        Command::Optima { solutions, output } => {
            let count = optima::convert_to_csv(&solutions, &output)?;
            println!("Wrote {} optima to {}", count, output.display());
            Ok(())
        }
        Command::ScaleTsp { dir } => cmd_scale_tsp(dir),
        Command::Specs { output } => {
            let specs = machine::collect();
            specs.save(&output)?;
            println!("{}", serde_json::to_string_pretty(&specs)?);
            println!("Saved: {}", output.display());
            Ok(())
        }
    }
}
