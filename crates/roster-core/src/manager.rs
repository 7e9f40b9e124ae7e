//! The roster aggregate and its read-only queries.

use std::path::Path;

use crate::error::ExportError;
use crate::export::{self, RosterExport};
use crate::model::{Student, StudentId};
use crate::statistics::{mean_grade, rank_students};

/// Minimum grade every mandatory course needs for a student to count as
/// consistently good. Inclusive.
pub const PASSING_GRADE: i32 = 60;

/// Holds the roster in registration order.
#[derive(Debug, Default)]
pub struct StudentManager {
    students: Vec<Student>,
}

impl StudentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a student to the roster.
    pub fn add_student(&mut self, student: Student) {
        tracing::debug!(student = %student.id(), name = student.name(), "student registered");
        self.students.push(student);
    }

    /// The roster, in registration order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Consume the manager, yielding the roster.
    pub fn into_students(self) -> Vec<Student> {
        self.students
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    /// Mutable access for enrolling a registered student in more courses.
    pub fn student_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Distinct majors, in order of first appearance in the roster.
    pub fn majors(&self) -> Vec<&str> {
        let mut majors: Vec<&str> = Vec::new();
        for s in &self.students {
            if !majors.contains(&s.major()) {
                majors.push(s.major());
            }
        }
        majors
    }

    /// Mean grade over every course of every student, optionally restricted
    /// to students whose major is exactly `major`.
    ///
    /// Returns `0.0` when no course matches.
    pub fn average_performance(&self, major: Option<&str>) -> f64 {
        let courses = self
            .students
            .iter()
            .filter(|s| major.map_or(true, |m| s.major() == m))
            .flat_map(|s| s.courses());
        mean_grade(courses).unwrap_or(0.0)
    }

    /// The `count` students with the highest mean course grade, best first.
    ///
    /// Students with no courses rank after all others; ties keep roster
    /// order. A `count` larger than the roster returns the whole roster.
    pub fn top_performers(&self, count: usize) -> Vec<&Student> {
        rank_students(&self.students, count)
    }

    /// Students whose mandatory courses all have a passing grade, in roster
    /// order. Optional courses are ignored; a student without mandatory
    /// courses qualifies.
    pub fn consistently_good_students(&self) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| {
                s.courses()
                    .iter()
                    .filter(|c| c.is_mandatory())
                    .all(|c| c.grade >= PASSING_GRADE)
            })
            .collect()
    }

    /// Build the filtered export view of the roster.
    pub fn to_export(&self) -> RosterExport {
        RosterExport::from_students(&self.students)
    }

    /// Write the roster as XML to `path`.
    pub fn export_to_markup(&self, path: &Path) -> Result<(), ExportError> {
        export::write_markup_file(&self.to_export(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Course;

    fn student(name: &str, age: u32, major: &str, courses: &[(i32, bool)]) -> Student {
        let mut s = Student::new(name, age, major);
        for (i, (grade, optional)) in courses.iter().enumerate() {
            s.add_course(Course::new(format!("{name}-{i}"), "Dr. Kiss", *grade, *optional));
        }
        s
    }

    fn manager(students: Vec<Student>) -> StudentManager {
        let mut m = StudentManager::new();
        for s in students {
            m.add_student(s);
        }
        m
    }

    fn names(students: &[&Student]) -> Vec<String> {
        students.iter().map(|s| s.name().to_string()).collect()
    }

    #[test]
    fn average_of_empty_roster_is_zero() {
        let m = StudentManager::new();
        assert_eq!(m.average_performance(None), 0.0);
        assert_eq!(m.average_performance(Some("Informatika")), 0.0);
    }

    #[test]
    fn average_with_no_courses_is_zero() {
        let m = manager(vec![student("a", 20, "X", &[]), student("b", 21, "Y", &[])]);
        assert_eq!(m.average_performance(None), 0.0);
    }

    #[test]
    fn average_over_all_courses() {
        let m = manager(vec![
            student("Anna", 21, "Informatika", &[(85, false), (92, true)]),
            student("Béla", 19, "Matematika", &[(70, false)]),
        ]);
        let avg = m.average_performance(None);
        assert!((avg - 247.0 / 3.0).abs() < 1e-9, "got {avg}");
    }

    #[test]
    fn average_filtered_by_major() {
        let m = manager(vec![
            student("Anna", 21, "Informatika", &[(85, false), (92, true)]),
            student("Béla", 19, "Matematika", &[(70, false)]),
            student("Cili", 22, "Informatika", &[(60, false)]),
        ]);
        let avg = m.average_performance(Some("Informatika"));
        assert!((avg - 79.0).abs() < 1e-9, "got {avg}");
        assert_eq!(m.average_performance(Some("Matematika")), 70.0);
        assert_eq!(m.average_performance(Some("informatika")), 0.0);
        assert_eq!(m.average_performance(Some("Fizika")), 0.0);
    }

    #[test]
    fn top_performers_sorted_descending() {
        let m = manager(vec![
            student("mid", 20, "X", &[(70, false)]),
            student("top", 20, "X", &[(95, false), (85, true)]),
            student("low", 20, "X", &[(40, false)]),
        ]);
        assert_eq!(names(&m.top_performers(2)), ["top", "mid"]);
        assert_eq!(names(&m.top_performers(1)), ["top"]);
    }

    #[test]
    fn top_performers_zero_is_empty() {
        let m = manager(vec![student("a", 20, "X", &[(70, false)])]);
        assert!(m.top_performers(0).is_empty());
    }

    #[test]
    fn top_performers_count_beyond_roster_returns_all_sorted() {
        let m = manager(vec![
            student("none", 20, "X", &[]),
            student("b", 20, "X", &[(50, false)]),
            student("a", 20, "X", &[(90, false)]),
        ]);
        assert_eq!(names(&m.top_performers(10)), ["a", "b", "none"]);
    }

    #[test]
    fn consistently_good_includes_vacuous_and_ignores_optional() {
        let m = manager(vec![
            student("only-optional", 20, "X", &[(10, true)]),
            student("no-courses", 20, "X", &[]),
            student("failing", 20, "X", &[(90, false), (59, false)]),
            student("borderline", 20, "X", &[(60, false), (0, true)]),
        ]);
        assert_eq!(
            names(&m.consistently_good_students()),
            ["only-optional", "no-courses", "borderline"]
        );
    }

    #[test]
    fn majors_in_first_appearance_order() {
        let m = manager(vec![
            student("a", 20, "Matematika", &[]),
            student("b", 20, "Informatika", &[]),
            student("c", 20, "Matematika", &[]),
        ]);
        assert_eq!(m.majors(), ["Matematika", "Informatika"]);
    }

    #[test]
    fn student_mut_allows_enrolling_after_registration() {
        let s = student("a", 20, "X", &[]);
        let id = s.id();
        let mut m = manager(vec![s]);

        m.student_mut(id)
            .unwrap()
            .add_course(Course::new("Late", "Dr. Kiss", 88, false));

        assert_eq!(m.student(id).unwrap().courses().len(), 1);
        assert_eq!(m.average_performance(None), 88.0);
        assert!(m.student_mut(StudentId::new()).is_none());
    }
}
