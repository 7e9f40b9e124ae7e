//! The `roster export` command.

use std::path::PathBuf;

use anyhow::Result;

use roster_core::config::load_config_from;
use roster_core::export::ExportFormat;
use roster_core::parser;
use roster_report::json::write_json_export;

pub fn execute(
    roster_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let format = match format {
        Some(f) => f
            .parse::<ExportFormat>()
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        None => config.default_format,
    };

    let manager = parser::load_roster(&roster_path)?;
    let output = output.unwrap_or_else(|| {
        config
            .output_dir
            .join(format!("students.{}", format.extension()))
    });

    tracing::info!(
        roster = %roster_path.display(),
        students = manager.len(),
        %format,
        output = %output.display(),
        "exporting roster"
    );

    match format {
        ExportFormat::Xml => manager.export_to_markup(&output)?,
        ExportFormat::Json => write_json_export(&manager, &output)?,
    }

    println!("Data exported to {}", output.display());
    Ok(())
}
