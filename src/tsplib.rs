//! Minimal TSPLIB file handling
//!
//! Only what the auditor needs: reading the `DIMENSION` header to size an
//! instance, and rewriting float-coordinate files (with an embedded
//! `SCALE :` factor) into the integer coordinates downstream solvers
//! expect. Full TSPLIB parsing is out of scope.

use anyhow::{Context, Result};
use std::path::Path;

/// Parse the `DIMENSION` header of a `.tsp` file
///
/// Returns `Ok(None)` for files without the header; malformed values are
/// an error so a corrupt benchmark set fails loudly during validation.
pub fn parse_dimension(path: &Path) -> Result<Option<u32>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    for line in text.lines() {
        if let Some(rest) = line.trim().strip_prefix("DIMENSION") {
            let value = rest.trim_start_matches(':').trim();
            let n: u32 = value
                .parse()
                .with_context(|| format!("Bad DIMENSION in {}: '{}'", path.display(), value))?;
            return Ok(Some(n));
        }
    }

    Ok(None)
}

/// Outcome of a float-to-integer coordinate conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleOutcome {
    pub coords_converted: usize,
    pub scale_found: bool,
}

/// Rewrite a float-coordinate `.tsp` file with integer coordinates
///
/// Coordinates are multiplied by the file's `SCALE :` factor and rounded;
/// the `SCALE` line itself is dropped on rewrite because solvers reject
/// it. Without a `SCALE` tag the factor defaults to 1.0, which truncates
/// small floats to zero, so the caller is told whether one was found.
pub fn scale_to_integer(path: &Path) -> Result<ScaleOutcome> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let lines: Vec<&str> = text.lines().collect();

    let mut scale_factor = 1.0f64;
    let mut scale_found = false;
    for line in &lines {
        if line.contains("SCALE") && line.contains(':') {
            if let Some(value) = line.splitn(2, ':').nth(1) {
                scale_factor = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Bad SCALE in {}: '{}'", path.display(), line))?;
                scale_found = true;
            }
        }
    }

    let mut new_lines: Vec<String> = Vec::with_capacity(lines.len());
    let mut in_coord_section = false;
    let mut coords_converted = 0usize;

    for line in &lines {
        if line.contains("SCALE") {
            continue;
        }

        if line.contains("NODE_COORD_SECTION") {
            new_lines.push(line.trim().to_string());
            in_coord_section = true;
            continue;
        }

        if line.contains("EOF") {
            new_lines.push(line.trim().to_string());
            continue;
        }

        if in_coord_section {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 3 && parts[0].chars().all(|c| c.is_ascii_digit()) {
                match (parts[1].parse::<f64>(), parts[2].parse::<f64>()) {
                    (Ok(x), Ok(y)) => {
                        let x_int = (x * scale_factor).round() as i64;
                        let y_int = (y * scale_factor).round() as i64;
                        new_lines.push(format!("{} {} {}", parts[0], x_int, y_int));
                        coords_converted += 1;
                        continue;
                    }
                    _ => new_lines.push((*line).to_string()),
                }
            } else if !line.trim().is_empty() {
                new_lines.push((*line).to_string());
            }
        } else {
            new_lines.push((*line).to_string());
        }
    }

    if coords_converted > 0 {
        std::fs::write(path, new_lines.join("\n") + "\n")
            .with_context(|| format!("Failed to rewrite {}", path.display()))?;
    }

    Ok(ScaleOutcome {
        coords_converted,
        scale_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_tsp(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    const FLOAT_TSP: &str = "NAME : geld_16\n\
TYPE : TSP\n\
DIMENSION : 3\n\
SCALE : 10000\n\
EDGE_WEIGHT_TYPE : EUC_2D\n\
NODE_COORD_SECTION\n\
1 0.1234 0.5678\n\
2 0.9 0.1\n\
3 0.25 0.75\n\
EOF\n";

    #[test]
    fn test_parse_dimension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tsp(dir.path(), "a.tsp", FLOAT_TSP);
        assert_eq!(parse_dimension(&path).unwrap(), Some(3));
    }

    #[test]
    fn test_parse_dimension_missing_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tsp(dir.path(), "b.tsp", "NAME : x\nEOF\n");
        assert_eq!(parse_dimension(&path).unwrap(), None);
    }

    #[test]
    fn test_parse_dimension_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tsp(dir.path(), "c.tsp", "DIMENSION : lots\n");
        assert!(parse_dimension(&path).is_err());
    }

    #[test]
    fn test_scale_converts_and_drops_scale_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tsp(dir.path(), "geld.tsp", FLOAT_TSP);

        let outcome = scale_to_integer(&path).unwrap();
        assert_eq!(outcome.coords_converted, 3);
        assert!(outcome.scale_found);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("SCALE"));
        assert!(text.contains("1 1234 5678"));
        assert!(text.contains("2 9000 1000"));
        assert!(text.contains("3 2500 7500"));
        assert!(text.contains("EOF"));
    }

    #[test]
    fn test_scale_without_tag_defaults_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let content = FLOAT_TSP.replace("SCALE : 10000\n", "");
        let path = write_tsp(dir.path(), "noscale.tsp", &content);

        let outcome = scale_to_integer(&path).unwrap();
        assert!(!outcome.scale_found);
        assert_eq!(outcome.coords_converted, 3);

        // 0.1234 * 1.0 rounds to 0: the warning case the caller reports
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("1 0 1"));
    }

    #[test]
    fn test_scale_leaves_headers_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tsp(dir.path(), "geld.tsp", FLOAT_TSP);
        scale_to_integer(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("NAME : geld_16"));
        assert!(text.contains("EDGE_WEIGHT_TYPE : EUC_2D"));
        assert!(text.contains("DIMENSION : 3"));
    }

    #[test]
    fn test_scale_no_coordinates_no_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let content = "NAME : empty\nNODE_COORD_SECTION\nEOF\n";
        let path = write_tsp(dir.path(), "empty.tsp", content);

        let outcome = scale_to_integer(&path).unwrap();
        assert_eq!(outcome.coords_converted, 0);
        // File untouched
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }
}
