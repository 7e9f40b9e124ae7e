//! The `roster init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("roster.toml").exists() {
        println!("roster.toml already exists, skipping.");
    } else {
        std::fs::write("roster.toml", SAMPLE_CONFIG)?;
        println!("Created roster.toml");
    }

    std::fs::create_dir_all("rosters")?;
    let example_path = std::path::Path::new("rosters/example.toml");
    if example_path.exists() {
        println!("rosters/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ROSTER)?;
        println!("Created rosters/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit rosters/example.toml with your students");
    println!("  2. Run: roster stats --roster rosters/example.toml");
    println!("  3. Run: roster export --roster rosters/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# roster configuration

output_dir = "./roster-output"
default_format = "xml"
top_count = 1
"#;

const EXAMPLE_ROSTER: &str = r#"[[students]]
name = "Anna"
age = 21
major = "Informatika"

[[students.courses]]
name = "Adatbázisok"
instructor = "Dr. Nagy"
grade = 85

[[students.courses]]
name = "Analízis"
instructor = "Dr. Kiss"
grade = 92
optional = true

[[students]]
name = "Béla"
age = 19
major = "Matematika"

[[students.courses]]
name = "Adatbázisok"
instructor = "Dr. Nagy"
grade = 70
"#;
