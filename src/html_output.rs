//! HTML output format for enforcement reports
//!
//! Self-contained report with embedded CSS: the full story of a results
//! file in one artifact (Johnson Principle 8). The compliance audit checks
//! for this file's presence.

use crate::enforcement::EnforcementReport;

/// HTML report renderer
#[derive(Debug)]
pub struct HtmlReport<'a> {
    report: &'a EnforcementReport,
}

impl<'a> HtmlReport<'a> {
    pub fn new(report: &'a EnforcementReport) -> Self {
        Self { report }
    }

    /// Escape HTML special characters
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        tr:hover {
            background-color: #f0f0f0;
        }
        .pass {
            color: #2e7d32;
            font-weight: bold;
        }
        .fail {
            color: #c62828;
            font-weight: bold;
        }
        .num {
            font-family: monospace;
            text-align: right;
        }
        .summary-box {
            background-color: white;
            padding: 12px 16px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        "#
    }

    fn summary_section(&self) -> String {
        let cfg = &self.report.config;
        format!(
            r#"<div class="summary-box">
<p><strong>{}</strong> of <strong>{}</strong> comparisons compliant
(gates: n&ge;{}, p&lt;{}, |&delta;|&gt;{}).</p>
<p>{} cells skipped.</p>
</div>
"#,
            self.report.compliant_count(),
            self.report.results.len(),
            cfg.min_samples,
            cfg.alpha,
            cfg.min_effect_size,
            self.report.skipped.len(),
        )
    }

    fn comparison_table(&self) -> String {
        let mut html = String::from(
            "<table>\n<tr><th>Cell</th><th>Comparison</th><th>n</th><th>p-value</th>\
             <th>Cliff's &delta;</th><th>Magnitude</th><th>95% CI</th><th>Power</th>\
             <th>Verdict</th></tr>\n",
        );

        for r in &self.report.results {
            let (class, verdict) = if r.compliant {
                ("pass", "PASS".to_string())
            } else {
                match r.required_n {
                    Some(n) => ("fail", format!("FAIL (need n&asymp;{})", n)),
                    None => ("fail", "FAIL".to_string()),
                }
            };

            html.push_str(&format!(
                "<tr><td>{}</td><td>{} vs {}</td><td class=\"num\">{}</td>\
                 <td class=\"num\">{:.2e}</td><td class=\"num\">{:.3}</td><td>{}</td>\
                 <td class=\"num\">[{:.2}, {:.2}]</td><td class=\"num\">{:.2}</td>\
                 <td class=\"{}\">{}</td></tr>\n",
                Self::escape_html(&r.instance),
                Self::escape_html(&r.baseline),
                Self::escape_html(&r.candidate),
                r.n_samples,
                r.p_value,
                r.effect_size,
                r.magnitude,
                r.ci_lower,
                r.ci_upper,
                r.achieved_power,
                class,
                verdict,
            ));
        }

        html.push_str("</table>\n");
        html
    }

    fn skipped_section(&self) -> String {
        if self.report.skipped.is_empty() {
            return String::new();
        }

        let mut html = String::from("<h2>Skipped Cells</h2>\n<ul>\n");
        for cell in &self.report.skipped {
            html.push_str(&format!("<li>{}</li>\n", Self::escape_html(cell)));
        }
        html.push_str("</ul>\n");
        html
    }

    /// Generate the complete HTML document
    pub fn to_html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Statistical Enforcement Report</title>
<style>{}</style>
</head>
<body>
<h1>Statistical Enforcement Report</h1>
{}
<h2>Paired Comparisons</h2>
{}
{}
</body>
</html>
"#,
            Self::generate_styles(),
            self.summary_section(),
            self.comparison_table(),
            self.skipped_section(),
        )
    }
}
