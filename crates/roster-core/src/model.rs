//! Core data model types for roster.
//!
//! A [`Course`] is a plain value; a [`Student`] has a stable identity, an
//! append-only list of courses and a per-instance list of course-added
//! listeners.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::statistics::mean_grade;

/// Unique identifier of a student, generated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for StudentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A course a student is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course title.
    pub name: String,
    /// Teaching instructor.
    pub instructor: String,
    /// Numeric grade.
    pub grade: i32,
    /// Whether the course is an elective.
    #[serde(default)]
    pub is_optional: bool,
}

impl Course {
    pub fn new(
        name: impl Into<String>,
        instructor: impl Into<String>,
        grade: i32,
        is_optional: bool,
    ) -> Self {
        Self {
            name: name.into(),
            instructor: instructor.into(),
            grade,
            is_optional,
        }
    }

    /// Returns `true` for courses that are not optional.
    pub fn is_mandatory(&self) -> bool {
        !self.is_optional
    }
}

// ---------------------------------------------------------------------------
// Course-added listeners
// ---------------------------------------------------------------------------

/// Receives a notification each time a course is added to a student.
///
/// Listeners run synchronously on the caller's thread, after the course has
/// been appended. Any `Fn(&Student, &Course)` closure is a listener.
pub trait CourseListener: Send + Sync {
    fn on_course_added(&self, student: &Student, course: &Course);
}

impl<F> CourseListener for F
where
    F: Fn(&Student, &Course) + Send + Sync,
{
    fn on_course_added(&self, student: &Student, course: &Course) {
        self(student, course)
    }
}

/// Handle returned by [`Student::subscribe`], used to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

/// A student and the courses they are enrolled in.
///
/// Serializes its data fields only; listeners are neither serialized nor
/// cloned.
#[derive(Serialize)]
pub struct Student {
    id: StudentId,
    name: String,
    age: u32,
    major: String,
    courses: Vec<Course>,
    #[serde(skip)]
    listeners: Vec<(ListenerId, Box<dyn CourseListener>)>,
    #[serde(skip)]
    next_listener: u64,
}

impl Student {
    /// Create a student with a freshly generated id and no courses.
    pub fn new(name: impl Into<String>, age: u32, major: impl Into<String>) -> Self {
        Self::with_id(StudentId::new(), name, age, major)
    }

    /// Create a student with a known id.
    pub fn with_id(
        id: StudentId,
        name: impl Into<String>,
        age: u32,
        major: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            major: major.into(),
            courses: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    /// Courses in enrollment order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Mean grade across all of this student's courses, `None` if there are none.
    pub fn mean_grade(&self) -> Option<f64> {
        mean_grade(&self.courses)
    }

    /// Append a course, then notify every listener in registration order.
    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
        let Some(added) = self.courses.last() else {
            return;
        };

        tracing::debug!(
            student = %self.id,
            course = %added.name,
            listeners = self.listeners.len(),
            "course added"
        );

        for (_, listener) in &self.listeners {
            listener.on_course_added(self, added);
        }
    }

    /// Register a course-added listener.
    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: CourseListener + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        let listener: Box<dyn CourseListener> = Box::new(listener);
        self.listeners.push((id, listener));
        id
    }

    /// Detach a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Student")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("age", &self.age)
            .field("major", &self.major)
            .field("courses", &self.courses)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn course(name: &str, grade: i32, optional: bool) -> Course {
        Course::new(name, "Dr. Nagy", grade, optional)
    }

    #[test]
    fn add_course_preserves_order_and_notifies_each_time() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut student = Student::new("Anna", 21, "Informatika");

        let sink = Arc::clone(&seen);
        student.subscribe(move |s: &Student, c: &Course| {
            sink.lock().unwrap().push((s.name().to_string(), c.name.clone()));
        });

        for name in ["A", "B", "C"] {
            student.add_course(course(name, 70, false));
        }

        let names: Vec<_> = student.courses().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], ("Anna".to_string(), "A".to_string()));
        assert_eq!(seen[2].1, "C");
    }

    #[test]
    fn listener_sees_course_already_appended() {
        let counts = Arc::new(Mutex::new(Vec::new()));
        let mut student = Student::new("Béla", 19, "Matematika");

        let sink = Arc::clone(&counts);
        student.subscribe(move |s: &Student, _: &Course| {
            sink.lock().unwrap().push(s.courses().len());
        });

        student.add_course(course("A", 50, false));
        student.add_course(course("B", 60, true));

        assert_eq!(*counts.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn listeners_called_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut student = Student::new("Anna", 21, "Informatika");

        for tag in ["first", "second", "third"] {
            let sink = Arc::clone(&log);
            student.subscribe(move |_: &Student, _: &Course| sink.lock().unwrap().push(tag));
        }

        student.add_course(course("A", 80, false));
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_detaches_only_that_listener() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut student = Student::new("Anna", 21, "Informatika");

        let a = Arc::clone(&log);
        let first = student.subscribe(move |_: &Student, _: &Course| a.lock().unwrap().push("a"));
        let b = Arc::clone(&log);
        student.subscribe(move |_: &Student, _: &Course| b.lock().unwrap().push("b"));

        assert!(student.unsubscribe(first));
        assert!(!student.unsubscribe(first));
        assert_eq!(student.listener_count(), 1);

        student.add_course(course("A", 80, false));
        assert_eq!(*log.lock().unwrap(), vec!["b"]);
    }

    #[test]
    fn add_course_without_listeners() {
        let mut student = Student::new("Anna", 21, "Informatika");
        student.add_course(course("A", 80, false));
        assert_eq!(student.courses().len(), 1);
    }

    #[test]
    fn student_ids_are_unique() {
        let a = Student::new("A", 20, "X");
        let b = Student::new("B", 20, "X");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn student_id_display_and_parse() {
        let id = StudentId::from_uuid(Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
        assert_eq!(id.to_string().parse::<StudentId>().unwrap(), id);
        assert!("not-a-uuid".parse::<StudentId>().is_err());
    }

    #[test]
    fn mean_grade_of_student() {
        let mut student = Student::new("Anna", 21, "Informatika");
        assert_eq!(student.mean_grade(), None);
        student.add_course(course("A", 85, false));
        student.add_course(course("B", 92, true));
        assert_eq!(student.mean_grade(), Some(88.5));
    }

    #[test]
    fn debug_hides_listeners() {
        let mut student = Student::new("Anna", 21, "Informatika");
        student.subscribe(|_: &Student, _: &Course| {});
        let dbg = format!("{student:?}");
        assert!(dbg.contains("Anna"));
        assert!(dbg.contains("listeners: 1"));
    }
}
