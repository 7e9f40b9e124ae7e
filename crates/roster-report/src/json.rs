//! JSON export of the roster.
//!
//! Serializes the same filtered view as the XML export, so the age and
//! course visibility rules apply identically.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use roster_core::error::ExportError;
use roster_core::export::{ensure_parent_dir, RosterExport};
use roster_core::StudentManager;

/// Render the export view as pretty-printed JSON.
pub fn generate_json(export: &RosterExport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(export)?)
}

/// Write the roster of `manager` as JSON to `path`, flushing before returning.
pub fn write_json_export(manager: &StudentManager, path: &Path) -> Result<(), ExportError> {
    let json = generate_json(&manager.to_export())?;
    ensure_parent_dir(path)?;

    let write = || -> std::io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        w.write_all(json.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()
    };
    write().map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::model::{Course, Student};

    fn make_manager() -> StudentManager {
        let mut anna = Student::new("Anna", 20, "Informatika");
        anna.add_course(Course::new("A", "Dr. Nagy", 85, false));
        anna.add_course(Course::new("B", "Dr. Kiss", 50, true));

        let mut bela = Student::new("Béla", 19, "Matematika");
        bela.add_course(Course::new("C", "Dr. Nagy", 40, false));

        let mut m = StudentManager::new();
        m.add_student(anna);
        m.add_student(bela);
        m
    }

    #[test]
    fn json_applies_visibility_rules() {
        let m = make_manager();
        let json: serde_json::Value =
            serde_json::from_str(&generate_json(&m.to_export()).unwrap()).unwrap();

        let students = json["students"].as_array().unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0]["major"], "Informatika");
        assert_eq!(students[0]["courses"].as_array().unwrap().len(), 1);
        assert_eq!(students[0]["id"], m.students()[0].id().to_string());
        assert!(students[1].get("major").is_none());
        assert_eq!(students[1]["courses"][0]["is_optional"], false);
    }

    #[test]
    fn json_export_write_to_file() {
        let m = make_manager();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("students.json");

        write_json_export(&m, &path).unwrap();

        let loaded: RosterExport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, m.to_export());
    }

    #[test]
    fn json_export_to_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_json_export(&make_manager(), dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
