//! HTML summary report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use roster_core::report::{format_mean, RosterReport, StudentSummary};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a roster report.
pub fn generate_html(report: &RosterReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>roster report</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>roster report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} students | {} courses | average grade <strong>{:.2}</strong> | {}</p>\n",
        report.student_count,
        report.course_count,
        report.average_all,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Averages
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Average by major</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Major</th><th>Average</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (major, avg) in &report.average_by_major {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}</td></tr>\n",
            html_escape(major),
            avg
        ));
    }
    html.push_str("</tbody></table>\n");

    if !report.top_performers.is_empty() {
        html.push_str(&generate_bar_chart(&report.top_performers));
    }
    html.push_str("</section>\n");

    html.push_str(&student_section(
        "Top performers",
        "top",
        &report.top_performers,
    ));
    html.push_str(&student_section(
        "Consistently good students",
        "good",
        &report.consistently_good,
    ));

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
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
pub fn write_html_report(report: &RosterReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn student_section(title: &str, table_id: &str, students: &[StudentSummary]) -> String {
    let mut html = format!("<section class=\"students\">\n<h2>{title}</h2>\n");
    if students.is_empty() {
        html.push_str("<p class=\"meta\">none</p>\n</section>\n");
        return html;
    }

    html.push_str(&format!(
        "<table class=\"students-table\" id=\"{table_id}\">\n\
         <thead><tr><th onclick=\"sortTable('{table_id}', 0)\">Name</th>\
         <th onclick=\"sortTable('{table_id}', 1)\">Major</th>\
         <th onclick=\"sortTable('{table_id}', 2)\">Mean grade</th>\
         <th onclick=\"sortTable('{table_id}', 3)\">Courses</th></tr></thead>\n"
    ));
    html.push_str("<tbody>\n");
    for s in students {
        let class = match s.mean_grade {
            Some(m) if m >= 60.0 => "pass",
            Some(_) => "fail",
            None => "empty",
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(&s.name),
            html_escape(&s.major),
            format_mean(s.mean_grade),
            s.course_count
        ));
    }
    html.push_str("</tbody></table>\n</section>\n");
    html
}

fn generate_bar_chart(students: &[StudentSummary]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = students.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, student) in students.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let grade = student.mean_grade.unwrap_or(0.0).clamp(0.0, 100.0);
        let width = (grade / 100.0 * max_width as f64) as usize;

        let color = if grade >= 80.0 {
            "#22c55e"
        } else if grade >= 60.0 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&student.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            format_mean(student.mean_grade)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(id, col) {
  const table = document.getElementById(id);
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, { numeric: true }) : vb.localeCompare(va, undefined, { numeric: true });
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
