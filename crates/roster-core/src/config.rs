//! Roster configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;

/// Top-level roster configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Directory exports are written to when no explicit output is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Export format used when none is requested.
    #[serde(default = "default_format")]
    pub default_format: ExportFormat,
    /// Number of top performers listed by `stats`.
    #[serde(default = "default_top_count")]
    pub top_count: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./roster-output")
}
fn default_format() -> ExportFormat {
    ExportFormat::Xml
}
fn default_top_count() -> usize {
    1
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
            top_count: default_top_count(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `roster.toml` in the current directory
/// 2. `~/.config/roster/config.toml`
///
/// Environment variable overrides: `ROSTER_OUTPUT_DIR`, `ROSTER_TOP_COUNT`.
pub fn load_config() -> Result<RosterConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<RosterConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("roster.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => RosterConfig::default(),
    };

    if let Ok(dir) = std::env::var("ROSTER_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Ok(count) = std::env::var("ROSTER_TOP_COUNT") {
        config.top_count = count
            .parse()
            .with_context(|| format!("ROSTER_TOP_COUNT is not a count: {count}"))?;
    }

    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));
    tracing::debug!(?config, "configuration loaded");

    Ok(config)
}

/// Parse a TOML configuration string.
pub fn parse_config_str(content: &str) -> Result<RosterConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("roster"))
}
