//! roster-core — Student roster data model, queries, and export.
//!
//! This crate defines the course/student data model, the roster aggregate
//! with its reporting queries, and the filtered markup export that the rest
//! of roster builds on.

pub mod config;
pub mod error;
pub mod export;
pub mod manager;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;

pub use error::ExportError;
pub use export::{ExportFormat, RosterExport};
pub use manager::StudentManager;
pub use model::{Course, CourseListener, ListenerId, Student, StudentId};
