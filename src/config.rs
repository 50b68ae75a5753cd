//! Experiment configuration loaded from JSON
//!
//! The config file describes the factorial design that produced a results
//! file: which TSPLIB instances, which integrators, which time budgets and
//! which seeds. The auditor only reads it; it never runs a solver.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Integrator names accepted in experiment configs
///
/// "EdgeRand" is the historical spelling used in result rows; "edge_rand"
/// appears in older configs. Both map to the same integrator.
pub const KNOWN_INTEGRATORS: &[&str] = &["lkh", "eax", "ucr", "edge_rand", "EdgeRand", "popmusic"];

/// Master experiment config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Directory holding `<instance>.tsp` files
    pub tsplib_dir: PathBuf,

    /// TSPLIB instance names without extension (e.g. "eil51")
    pub instances: Vec<String>,

    /// Integrators compared in this experiment
    pub integrators: Vec<String>,

    /// Wall-clock budgets in seconds
    pub budgets: Vec<f64>,

    /// Seeds; the same set is reused for every integrator (paired design)
    pub seeds: Vec<u64>,

    /// Candidate-list size passed to the solvers
    pub candidate_k: u32,

    /// Hourly compute rate used for cost reporting
    #[serde(default)]
    pub aws_hourly_rate: f64,
}

impl ExperimentConfig {
    /// Load from file
    pub fn from_json(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid experiment config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on invalid config
    pub fn validate(&self) -> Result<()> {
        if self.instances.is_empty() {
            anyhow::bail!("Config must name at least one instance");
        }
        if self.integrators.is_empty() {
            anyhow::bail!("Config must name at least one integrator");
        }
        if self.budgets.is_empty() {
            anyhow::bail!("Config must name at least one budget");
        }
        if self.seeds.len() < 5 {
            anyhow::bail!("Minimum 5 seeds required (got {})", self.seeds.len());
        }
        if !(8..=96).contains(&self.candidate_k) {
            anyhow::bail!("candidate_k must be in 8..=96 (got {})", self.candidate_k);
        }
        if self.aws_hourly_rate < 0.0 {
            anyhow::bail!("aws_hourly_rate must be non-negative");
        }
        if self.budgets.iter().any(|b| *b <= 0.0) {
            anyhow::bail!("Budgets must be positive seconds");
        }

        for name in &self.integrators {
            if !KNOWN_INTEGRATORS.contains(&name.as_str()) {
                anyhow::bail!(
                    "Unknown integrator: {} (expected one of {:?})",
                    name,
                    KNOWN_INTEGRATORS
                );
            }
        }

        Ok(())
    }

    /// Check that every named instance file exists under `tsplib_dir`
    pub fn check_instances(&self) -> Result<()> {
        for inst in &self.instances {
            let path = self.tsplib_dir.join(format!("{}.tsp", inst));
            if !path.exists() {
                anyhow::bail!("Missing instance: {}", path.display());
            }
        }
        Ok(())
    }

    /// Total runs in the full factorial design
    pub fn total_runs(&self) -> usize {
        self.instances.len() * self.integrators.len() * self.budgets.len() * self.seeds.len()
    }
}
