//! Filtered export view of the roster and its XML rendering.
//!
//! Two visibility rules shape every export:
//!
//! - a student's major is shown only from [`MAJOR_MIN_AGE`] upwards;
//! - mandatory courses are always shown, optional ones only when their grade
//!   is strictly above [`OPTIONAL_COURSE_MIN_GRADE`].
//!
//! The view is format-agnostic; XML is written here and other renderings
//! (JSON) serialize the same [`RosterExport`].

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::model::{Course, Student, StudentId};

/// Age from which a student's major is exported. Inclusive.
pub const MAJOR_MIN_AGE: u32 = 20;

/// Optional courses are exported only above this grade. Exclusive.
pub const OPTIONAL_COURSE_MIN_GRADE: i32 = 50;

/// Whether a student of `age` has their major exported.
pub fn major_visible(age: u32) -> bool {
    age >= MAJOR_MIN_AGE
}

/// Whether `course` appears in an export.
pub fn course_visible(course: &Course) -> bool {
    course.is_mandatory() || course.grade > OPTIONAL_COURSE_MIN_GRADE
}

/// Output formats for a roster export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xml,
    Json,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xml => "xml",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(ExportFormat::Xml),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Export view
// ---------------------------------------------------------------------------

/// The roster as it appears in an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterExport {
    pub students: Vec<StudentRecord>,
}

/// One exported student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub age: u32,
    /// Absent for students younger than [`MAJOR_MIN_AGE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    pub courses: Vec<CourseRecord>,
}

/// One exported course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub name: String,
    pub instructor: String,
    pub grade: i32,
    pub is_optional: bool,
}

impl RosterExport {
    /// Apply the visibility rules to `students`, preserving order.
    pub fn from_students<'a, I>(students: I) -> Self
    where
        I: IntoIterator<Item = &'a Student>,
    {
        Self {
            students: students.into_iter().map(StudentRecord::from_student).collect(),
        }
    }
}

impl StudentRecord {
    fn from_student(student: &Student) -> Self {
        Self {
            id: student.id(),
            name: student.name().to_string(),
            age: student.age(),
            major: major_visible(student.age()).then(|| student.major().to_string()),
            courses: student
                .courses()
                .iter()
                .filter(|c| course_visible(c))
                .map(|c| CourseRecord {
                    name: c.name.clone(),
                    instructor: c.instructor.clone(),
                    grade: c.grade,
                    is_optional: c.is_optional,
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// XML rendering
// ---------------------------------------------------------------------------

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// Whether `c` may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Escape a string for XML text content, or for an attribute value when
/// `attribute` is set.
///
/// Fails with `InvalidData` on characters XML 1.0 cannot represent.
fn xml_escape(s: &str, attribute: bool) -> io::Result<String> {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\r' => out.push_str("&#xD;"),
            '\t' if attribute => out.push_str("&#x9;"),
            '\n' if attribute => out.push_str("&#xA;"),
            c if !is_xml_char(c) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("character U+{:04X} is not allowed in XML", c as u32),
                ));
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

fn write_leaf<W: Write>(w: &mut W, indent: usize, tag: &str, value: &str) -> io::Result<()> {
    let value = xml_escape(value, false)?;
    writeln!(w, "{:indent$}<{tag}>{value}</{tag}>", "", indent = indent)
}

/// Stream `export` as an XML document to `w`.
///
/// Fails with `InvalidData` if a value holds a character XML cannot carry;
/// whatever was written before that point is incomplete.
pub fn write_markup<W: Write>(export: &RosterExport, w: &mut W) -> io::Result<()> {
    writeln!(w, "{XML_DECLARATION}")?;
    if export.students.is_empty() {
        return writeln!(w, "<Students />");
    }

    writeln!(w, "<Students>")?;
    for student in &export.students {
        let id = xml_escape(&student.id.to_string(), true)?;
        writeln!(w, "  <Student Id=\"{id}\">")?;
        write_leaf(w, 4, "Name", &student.name)?;
        write_leaf(w, 4, "Age", &student.age.to_string())?;
        if let Some(major) = &student.major {
            write_leaf(w, 4, "Major", major)?;
        }

        if student.courses.is_empty() {
            writeln!(w, "    <Courses />")?;
        } else {
            writeln!(w, "    <Courses>")?;
            for course in &student.courses {
                writeln!(w, "      <Course>")?;
                write_leaf(w, 8, "Name", &course.name)?;
                write_leaf(w, 8, "Instructor", &course.instructor)?;
                write_leaf(w, 8, "Grade", &course.grade.to_string())?;
                write_leaf(w, 8, "IsOptional", &course.is_optional.to_string())?;
                writeln!(w, "      </Course>")?;
            }
            writeln!(w, "    </Courses>")?;
        }
        writeln!(w, "  </Student>")?;
    }
    writeln!(w, "</Students>")
}

/// Render `export` as an XML string.
pub fn to_markup_string(export: &RosterExport) -> io::Result<String> {
    let mut buf = Vec::new();
    write_markup(export, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write `export` as XML to `path`, flushing before returning.
///
/// The document is rendered before the file is opened, so content XML cannot
/// carry never leaves a partial file behind.
pub fn write_markup_file(export: &RosterExport, path: &Path) -> Result<(), ExportError> {
    let xml = to_markup_string(export).map_err(ExportError::Encode)?;
    ensure_parent_dir(path)?;

    let write = || -> io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        w.write_all(xml.as_bytes())?;
        w.flush()
    };
    write().map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        students = export.students.len(),
        "data exported"
    );
    Ok(())
}
