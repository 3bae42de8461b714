//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Client analysis and insight listing
//! - `propose` - Proposal generation
//! - `stats` - Dataset statistics (descriptive, outliers, correlation, categorical, report)
//! - `knowledge` - Knowledge base listing
//! - `serve` - Web server command

pub mod analyze;
pub mod knowledge;
pub mod propose;
pub mod serve;
pub mod stats;

// Re-export command functions for main.rs
pub use analyze::*;
pub use knowledge::*;
pub use propose::*;
pub use serve::*;
pub use stats::*;

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use marketeer_core::{AnalysisConfig, ClientProfile, Dataset};

/// How a command prints its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => anyhow::bail!("Unknown format: {}. Available: text, json, markdown", s),
        }
    }
}

/// Parse a format, rejecting the ones a command cannot produce
pub fn parse_format(format: &str, allowed: &[OutputFormat]) -> Result<OutputFormat> {
    let parsed: OutputFormat = format.parse()?;
    if !allowed.contains(&parsed) {
        anyhow::bail!("Format '{}' is not supported by this command", format);
    }
    Ok(parsed)
}

/// Load the analysis config from `--config`, the override dir, or built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let config = match path {
        Some(path) => AnalysisConfig::load_from(path),
        None => AnalysisConfig::load(),
    };
    config.context("Failed to load analysis config")
}

/// Read an intake JSON record from a file, or stdin for "-"
pub fn read_profile(input: &Path) -> Result<ClientProfile> {
    let content = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read intake from stdin")?;
        buf
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read intake file {}", input.display()))?
    };

    let raw: serde_json::Value =
        serde_json::from_str(&content).context("Intake file is not valid JSON")?;
    Ok(marketeer_core::build_profile(&raw)?)
}

pub fn load_dataset(file: &Path) -> Result<Dataset> {
    Dataset::from_path(file).with_context(|| format!("Failed to load dataset {}", file.display()))
}

/// Split a comma-separated column list
pub fn split_columns(columns: Option<&str>) -> Option<Vec<String>> {
    columns.map(|list| {
        list.split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    })
}

/// Write to a file, or print when no path is given
pub fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
