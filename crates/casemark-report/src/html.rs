//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use casemark_core::model::Assessment;
use casemark_core::report::MarkingReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a marking report.
pub fn generate_html(report: &MarkingReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>casemark report — {}</title>\n",
        html_escape(&report.question_id)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>casemark report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Question: <strong>{}</strong> | {} answers | {} scored | {}</p>\n",
        html_escape(&report.question_id),
        report.cohort.total,
        report.cohort.scored,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Cohort summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str(
        "<thead><tr><th>Answers</th><th>Gated</th><th>Scored</th><th>Mean</th><th>Min</th><th>Max</th></tr></thead>\n",
    );
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td><td>{}</td></tr></tbody>\n",
        report.cohort.total,
        report.cohort.gated,
        report.cohort.scored,
        report.cohort.mean_score,
        report
            .cohort
            .min_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into()),
        report
            .cohort
            .max_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into()),
    ));
    html.push_str("</table>\n");

    // Per-answer summary table
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Source</th><th onclick=\"sortTable(1)\">Status</th><th onclick=\"sortTable(2)\">Score</th><th onclick=\"sortTable(3)\">Words</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for answer in &report.answers {
        let (class, status, score) = match &answer.assessment {
            Assessment::Gated(_) => ("gated", "gated", "-".to_string()),
            Assessment::Scored(s) => ("scored", "scored", format!("{}/10", s.score)),
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(&answer.source),
            status,
            score,
            answer.assessment.word_count(),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-answer detail
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Answers</h2>\n");
    for answer in &report.answers {
        html.push_str(&format!(
            "<article class=\"answer\">\n<h3>{}</h3>\n",
            html_escape(&answer.source)
        ));
        match &answer.assessment {
            Assessment::Gated(g) => {
                html.push_str(&format!(
                    "<p class=\"gated-message\">{} ({} words)</p>\n",
                    html_escape(&g.message),
                    g.word_count
                ));
            }
            Assessment::Scored(s) => {
                html.push_str(&format!(
                    "<p class=\"score\">Score: <strong>{}/10</strong> ({} words)</p>\n",
                    s.score, s.word_count
                ));

                if !s.strengths.is_empty() {
                    html.push_str("<h4>Strengths</h4>\n<ul>\n");
                    for strength in &s.strengths {
                        html.push_str(&format!("<li>{}</li>\n", html_escape(strength)));
                    }
                    html.push_str("</ul>\n");
                }

                html.push_str("<h4>Feedback</h4>\n");
                html.push_str(&format!("<pre>{}</pre>\n", html_escape(&s.feedback)));

                html.push_str("<h4>Diagnostic grid</h4>\n<table class=\"grid\">\n<tbody>\n");
                for row in &s.grid {
                    let status_class = row.status.to_string().to_lowercase();
                    html.push_str(&format!(
                        "<tr><td>{}</td><td class=\"{}\">{}</td></tr>\n",
                        html_escape(&row.dimension),
                        status_class,
                        row.status
                    ));
                }
                html.push_str("</tbody></table>\n");

                html.push_str("<details>\n<summary>Model answer</summary>\n");
                html.push_str(&format!("<pre>{}</pre>\n", html_escape(&s.model_answer)));
                html.push_str("</details>\n");

                if !s.frameworks.is_empty() {
                    html.push_str("<details>\n<summary>Framework notes</summary>\n<dl>\n");
                    for framework in &s.frameworks {
                        html.push_str(&format!(
                            "<dt>{}</dt>\n<dd>{}</dd>\n<dd class=\"case\">{}</dd>\n",
                            html_escape(&framework.name),
                            html_escape(&framework.expectation),
                            html_escape(&framework.case)
                        ));
                    }
                    html.push_str("</dl>\n</details>\n");
                }
            }
        }
        html.push_str("</article>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &MarkingReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --ok: #dcfce7; --mid: #fef9c3; --bad: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --ok: #064e3b; --mid: #713f12; --bad: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2, h3 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.secure { background: var(--ok); }
.developing { background: var(--mid); }
.missing { background: var(--bad); }
.gated-message { font-style: italic; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; white-space: pre-wrap; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
dd.case { color: #6b7280; }
article.answer { border-top: 1px solid var(--border); padding-top: 1rem; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
