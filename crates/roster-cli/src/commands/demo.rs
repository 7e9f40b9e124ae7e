//! The `roster demo` command.
//!
//! Builds a two-student roster in code, announces every enrollment through a
//! course-added listener, exports it and prints the aggregate queries.

use std::path::PathBuf;

use anyhow::Result;

use roster_core::model::{Course, Student};
use roster_core::StudentManager;

pub fn execute(output: PathBuf) -> Result<()> {
    let mut manager = StudentManager::new();

    let mut anna = Student::new("Anna", 21, "Informatika");
    anna.subscribe(|s: &Student, c: &Course| {
        println!("New course added: {}, {}, {}", s.name(), c.name, c.instructor);
    });
    anna.add_course(Course::new("Adatbázisok", "Dr. Nagy", 85, false));
    anna.add_course(Course::new("Analízis", "Dr. Kiss", 92, true));

    let mut bela = Student::new("Béla", 19, "Matematika");
    bela.add_course(Course::new("Adatbázisok", "Dr. Nagy", 70, false));

    manager.add_student(anna);
    manager.add_student(bela);

    manager.export_to_markup(&output)?;
    println!("Data exported to {}", output.display());

    println!(
        "Average performance (all): {}",
        manager.average_performance(None)
    );
    println!(
        "Average performance (Informatika): {}",
        manager.average_performance(Some("Informatika"))
    );

    println!("Top performer:");
    for student in manager.top_performers(1) {
        println!("{}", student.name());
    }

    println!("Consistently good students:");
    for student in manager.consistently_good_students() {
        println!("{}", student.name());
    }

    Ok(())
}
