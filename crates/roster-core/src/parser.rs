//! TOML roster file parser.
//!
//! Loads rosters from TOML files and directories.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::manager::StudentManager;
use crate::model::{Course, Student, StudentId};

/// Intermediate TOML structure for parsing roster files.
#[derive(Debug, Deserialize)]
struct TomlRosterFile {
    #[serde(default)]
    students: Vec<TomlStudent>,
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    #[serde(default)]
    id: Option<String>,
    name: String,
    age: u32,
    #[serde(default)]
    major: String,
    #[serde(default)]
    courses: Vec<TomlCourse>,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    name: String,
    #[serde(default)]
    instructor: String,
    grade: i32,
    #[serde(default)]
    optional: bool,
}

/// Parse a single TOML roster file.
pub fn parse_roster(path: &Path) -> Result<StudentManager> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file: {}", path.display()))?;

    parse_roster_str(&content, path)
}

/// Parse a TOML string into a roster (useful for testing).
pub fn parse_roster_str(content: &str, source_path: &Path) -> Result<StudentManager> {
    let parsed: TomlRosterFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut manager = StudentManager::new();
    for s in parsed.students {
        let mut student = match s.id {
            Some(raw) => {
                let id = raw.parse::<StudentId>().with_context(|| {
                    format!("invalid id '{raw}' for student '{}'", s.name)
                })?;
                Student::with_id(id, s.name, s.age, s.major)
            }
            None => Student::new(s.name, s.age, s.major),
        };

        for c in s.courses {
            student.add_course(Course::new(c.name, c.instructor, c.grade, c.optional));
        }
        manager.add_student(student);
    }

    Ok(manager)
}

/// Load every `.toml` roster in `dir` (recursively) into one roster.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_roster_directory(dir: &Path) -> Result<StudentManager> {
    let mut manager = StudentManager::new();
    load_into(dir, &mut manager)?;
    Ok(manager)
}

fn load_into(dir: &Path, manager: &mut StudentManager) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            load_into(&path, manager)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_roster(&path) {
                Ok(roster) => {
                    for student in roster.into_students() {
                        manager.add_student(student);
                    }
                }
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(())
}

/// Load a roster from a file, or from every roster file under a directory.
pub fn load_roster(path: &Path) -> Result<StudentManager> {
    if path.is_dir() {
        load_roster_directory(path)
    } else {
        parse_roster(path)
    }
}
