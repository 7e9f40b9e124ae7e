//! roster-report — JSON export and HTML summary rendering for roster.

pub mod html;
pub mod json;
