//! Roster summary report with JSON persistence and markdown rendering.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::manager::StudentManager;
use crate::model::{Student, StudentId};

/// A snapshot of the roster's aggregate queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub student_count: usize,
    pub course_count: usize,
    /// Mean grade over every course in the roster.
    pub average_all: f64,
    /// Mean grade per major.
    pub average_by_major: BTreeMap<String, f64>,
    /// Best students by mean grade, best first.
    pub top_performers: Vec<StudentSummary>,
    /// Students passing every mandatory course, in roster order.
    pub consistently_good: Vec<StudentSummary>,
    /// Average of one requested major, set by [`RosterReport::with_major`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_average: Option<MajorAverage>,
}

/// Mean grade of a single requested major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorAverage {
    pub major: String,
    /// `0.0` when no student has this major.
    pub average: f64,
}

/// A student as listed in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: StudentId,
    pub name: String,
    pub major: String,
    /// `None` for students without courses.
    pub mean_grade: Option<f64>,
    pub course_count: usize,
}

impl From<&Student> for StudentSummary {
    fn from(s: &Student) -> Self {
        Self {
            id: s.id(),
            name: s.name().to_string(),
            major: s.major().to_string(),
            mean_grade: s.mean_grade(),
            course_count: s.courses().len(),
        }
    }
}

impl RosterReport {
    /// Run the aggregate queries over `manager`.
    pub fn build(manager: &StudentManager, top_count: usize) -> Self {
        let average_by_major = manager
            .majors()
            .into_iter()
            .map(|m| (m.to_string(), manager.average_performance(Some(m))))
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            student_count: manager.len(),
            course_count: manager.students().iter().map(|s| s.courses().len()).sum(),
            average_all: manager.average_performance(None),
            average_by_major,
            top_performers: manager
                .top_performers(top_count)
                .into_iter()
                .map(StudentSummary::from)
                .collect(),
            consistently_good: manager
                .consistently_good_students()
                .into_iter()
                .map(StudentSummary::from)
                .collect(),
            major_average: None,
        }
    }

    /// Attach the average of `major`, which need not appear in the roster.
    pub fn with_major(mut self, manager: &StudentManager, major: &str) -> Self {
        self.major_average = Some(MajorAverage {
            major: major.to_string(),
            average: manager.average_performance(Some(major)),
        });
        self
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: RosterReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} students, {} courses, average grade {:.2}\n\n",
            self.student_count, self.course_count, self.average_all
        ));

        if let Some(focus) = &self.major_average {
            md.push_str(&format!(
                "**Average ({}):** {:.2}\n\n",
                focus.major, focus.average
            ));
        }

        if !self.average_by_major.is_empty() {
            md.push_str("### Average by major\n\n");
            md.push_str("| Major | Average |\n");
            md.push_str("|-------|---------|\n");
            for (major, avg) in &self.average_by_major {
                md.push_str(&format!("| {major} | {avg:.2} |\n"));
            }
            md.push('\n');
        }

        md.push_str("### Top performers\n\n");
        push_student_table(&mut md, &self.top_performers);

        md.push_str("### Consistently good students\n\n");
        push_student_table(&mut md, &self.consistently_good);

        md
    }
}

/// Format a mean grade for display, `-` when there is none.
pub fn format_mean(mean: Option<f64>) -> String {
    mean.map(|m| format!("{m:.2}")).unwrap_or_else(|| "-".into())
}

fn push_student_table(md: &mut String, students: &[StudentSummary]) {
    if students.is_empty() {
        md.push_str("_none_\n\n");
        return;
    }
    md.push_str("| Name | Major | Mean grade | Courses |\n");
    md.push_str("|------|-------|------------|---------|\n");
    for s in students {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            s.name,
            s.major,
            format_mean(s.mean_grade),
            s.course_count
        ));
    }
    md.push('\n');
}
