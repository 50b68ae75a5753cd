//! Machine specs for reproducibility reporting
//!
//! Johnson Principle 6 requires every result row to be traceable to the
//! hardware it ran on; Principle 7 asks for a LINPACK calibration so
//! readers can compare wall-clock numbers across machines. Everything is
//! read from /proc (this is a Linux-only tool, like the solvers it audits).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

/// Host description written to `machine_specs.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSpecs {
    pub cpu: String,
    pub memory_gb: f64,
    pub os: String,
    pub hostname: String,
    pub cpu_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linpack_mflops: Option<f64>,
}

fn proc_line(path: &str, key: &str) -> Option<String> {
    let text = std::fs::read_to_string(path).ok()?;
    text.lines()
        .find(|line| line.starts_with(key))
        .and_then(|line| line.split(':').nth(1))
        .map(|v| v.trim().to_string())
}

fn read_trimmed(path: &str) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
}

fn cpu_model() -> String {
    proc_line("/proc/cpuinfo", "model name").unwrap_or_else(|| "Unknown CPU".to_string())
}

fn memory_gb() -> f64 {
    // MemTotal is reported in kB
    proc_line("/proc/meminfo", "MemTotal")
        .and_then(|v| v.split_whitespace().next().map(str::to_string))
        .and_then(|kb| kb.parse::<f64>().ok())
        .map(|kb| (kb * 1024.0 / 1e9 * 10.0).round() / 10.0)
        .unwrap_or(0.0)
}

fn os_release() -> String {
    let ostype = read_trimmed("/proc/sys/kernel/ostype").unwrap_or_else(|| "Linux".to_string());
    let release = read_trimmed("/proc/sys/kernel/osrelease").unwrap_or_else(|| "?".to_string());
    format!("{} {}", ostype, release)
}

fn hostname() -> String {
    read_trimmed("/proc/sys/kernel/hostname").unwrap_or_else(|| "unknown".to_string())
}

fn cpu_count() -> u32 {
    // SAFETY: sysconf with a valid name has no preconditions
    let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
    if n > 0 {
        n as u32
    } else {
        1
    }
}

/// Run the `linpack` binary if present and parse its MFLOPS line
fn linpack_mflops() -> Option<f64> {
    let output = Command::new("linpack")
        .args(["-n", "100", "-m", "200"])
        .output()
        .ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rest = stdout.split("MFLOPS:").nth(1)?;
    rest.split_whitespace().next()?.parse().ok()
}

/// Collect specs from the running host
pub fn collect() -> MachineSpecs {
    MachineSpecs {
        cpu: cpu_model(),
        memory_gb: memory_gb(),
        os: os_release(),
        hostname: hostname(),
        cpu_count: cpu_count(),
        linpack_mflops: linpack_mflops(),
    }
}

impl MachineSpecs {
    /// Write specs JSON to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
