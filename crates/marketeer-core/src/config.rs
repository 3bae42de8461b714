//! Analysis configuration
//!
//! Thresholds for the statistics module and the fixed business constants used
//! when assembling proposals.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/marketeer/config/analysis.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::stats::outliers::IQR_FENCE;
use crate::stats::OutlierMethod;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analysis.toml");

/// Statistics thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsConfig {
    pub correlation_threshold: f64,
    pub zscore_threshold: f64,
    pub modified_zscore_threshold: f64,
    pub default_outlier_method: OutlierMethod,
    pub min_sample_size: usize,
    /// Percentage of missing cells considered high
    pub missing_data_threshold: f64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: 0.7,
            zscore_threshold: 3.0,
            modified_zscore_threshold: 3.5,
            default_outlier_method: OutlierMethod::Iqr,
            min_sample_size: 30,
            missing_data_threshold: 20.0,
        }
    }
}

impl StatisticsConfig {
    /// Threshold used when the caller does not supply one
    pub fn threshold_for(&self, method: OutlierMethod) -> f64 {
        match method {
            OutlierMethod::Iqr => IQR_FENCE,
            OutlierMethod::ZScore => self.zscore_threshold,
            OutlierMethod::ModifiedZScore => self.modified_zscore_threshold,
        }
    }
}

/// Proposal business constants
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalConfig {
    pub consultant_name: String,
    pub setup_cost: u64,
    pub projection_multiplier: f64,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            consultant_name: "Marketing Consultant".to_string(),
            setup_cost: 5000,
            projection_multiplier: 1.8,
        }
    }
}

/// Full analysis configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    pub statistics: StatisticsConfig,
    pub proposal: ProposalConfig,
}

impl AnalysisConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path (embedded defaults if the file does not exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("marketeer").join("config").join("analysis.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<AnalysisConfig> {
    let candidate = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match candidate {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading analysis config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    statistics: Option<RawStatistics>,
    proposal: Option<RawProposal>,
}

#[derive(Debug, Deserialize)]
struct RawStatistics {
    correlation_threshold: Option<f64>,
    zscore_threshold: Option<f64>,
    modified_zscore_threshold: Option<f64>,
    default_outlier_method: Option<String>,
    min_sample_size: Option<usize>,
    missing_data_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawProposal {
    consultant_name: Option<String>,
    setup_cost: Option<u64>,
    projection_multiplier: Option<f64>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AnalysisConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalysisConfig::default();

    if let Some(stats) = raw.statistics {
        if let Some(v) = stats.correlation_threshold {
            config.statistics.correlation_threshold = v;
        }
        if let Some(v) = stats.zscore_threshold {
            config.statistics.zscore_threshold = v;
        }
        if let Some(v) = stats.modified_zscore_threshold {
            config.statistics.modified_zscore_threshold = v;
        }
        if let Some(method) = stats.default_outlier_method {
            config.statistics.default_outlier_method = method
                .parse()
                .map_err(|_| Error::Config(format!("Unknown outlier method: {}", method)))?;
        }
        if let Some(v) = stats.min_sample_size {
            config.statistics.min_sample_size = v;
        }
        if let Some(v) = stats.missing_data_threshold {
            config.statistics.missing_data_threshold = v;
        }
    }

    if let Some(proposal) = raw.proposal {
        if let Some(name) = proposal.consultant_name {
            config.proposal.consultant_name = name;
        }
        if let Some(cost) = proposal.setup_cost {
            config.proposal.setup_cost = cost;
        }
        if let Some(mult) = proposal.projection_multiplier {
            config.proposal.projection_multiplier = mult;
        }
    }

    Ok(config)
}
