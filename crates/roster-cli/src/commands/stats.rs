//! The `roster stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use roster_core::config::load_config_from;
use roster_core::parser;
use roster_core::report::{format_mean, RosterReport, StudentSummary};
use roster_report::html::write_html_report;

pub fn execute(
    roster_path: PathBuf,
    major: Option<String>,
    top: Option<usize>,
    format: String,
    html: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let top = top.unwrap_or(config.top_count);

    let manager = parser::load_roster(&roster_path)?;
    tracing::info!(
        roster = %roster_path.display(),
        students = manager.len(),
        top,
        "building roster report"
    );

    let mut report = RosterReport::build(&manager, top);
    if let Some(m) = &major {
        report = report.with_major(&manager, m);
    }

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => {
            println!(
                "Roster: {} students, {} courses",
                report.student_count, report.course_count
            );
            println!("Average performance (all): {:.2}", report.average_all);
            if let Some(focus) = &report.major_average {
                println!(
                    "Average performance ({}): {:.2}",
                    focus.major, focus.average
                );
            }

            println!("\nTop performers:");
            print_students(&report.top_performers);

            println!("\nConsistently good students:");
            print_students(&report.consistently_good);
        }
        other => anyhow::bail!("unknown output format: {other}"),
    }

    if let Some(path) = html {
        write_html_report(&report, &path)?;
        println!("HTML report written to {}", path.display());
    }

    Ok(())
}

fn print_students(students: &[StudentSummary]) {
    if students.is_empty() {
        println!("  (none)");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Major", "Mean grade", "Courses"]);
    for s in students {
        table.add_row(vec![
            s.name.clone(),
            s.major.clone(),
            format_mean(s.mean_grade),
            s.course_count.to_string(),
        ]);
    }
    println!("{table}");
}
