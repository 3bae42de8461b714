//! Outlier detection
//!
//! Three methods over the non-missing values of each numeric column:
//!
//! - **IQR**: outside `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`
//! - **Z-score**: `|x - mean| / std > threshold`, population std
//! - **Modified z-score**: `|0.6745 * (x - median) / MAD| > threshold`
//!
//! A column with zero spread (std = 0 or MAD = 0) has no outliers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dataset::Dataset;
use super::{mean, median, population_std, quantile_sorted, sorted};
use crate::error::{Error, Result};

/// Fence multiplier for the IQR method
pub const IQR_FENCE: f64 = 1.5;

const MODIFIED_ZSCORE_SCALE: f64 = 0.6745;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierMethod {
    Iqr,
    #[serde(rename = "zscore")]
    ZScore,
    #[serde(rename = "modified_zscore")]
    ModifiedZScore,
}

impl OutlierMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iqr => "iqr",
            Self::ZScore => "zscore",
            Self::ModifiedZScore => "modified_zscore",
        }
    }

    /// Threshold used when none is given
    pub fn default_threshold(&self) -> f64 {
        match self {
            Self::Iqr => IQR_FENCE,
            Self::ZScore => 3.0,
            Self::ModifiedZScore => 3.5,
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutlierMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "iqr" => Ok(Self::Iqr),
            "zscore" | "z_score" | "z-score" => Ok(Self::ZScore),
            "modified_zscore" | "modified_z_score" | "modified-zscore" => Ok(Self::ModifiedZScore),
            _ => Err(Error::UnknownMethod(format!(
                "'{}' (expected iqr, zscore or modified_zscore)",
                s
            ))),
        }
    }
}

/// Outliers found in one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    pub column: String,
    /// 0-based row indices into the dataset
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
    pub count: usize,
    /// Share of the column's non-missing values
    pub percentage: f64,
    pub method: OutlierMethod,
    /// Effective threshold (the IQR fence multiplier for `iqr`)
    pub threshold: f64,
}

/// Flag outliers among `(row_index, value)` pairs, returning the flagged row indices
pub fn detect_outlier_indices(
    values: &[(usize, f64)],
    method: OutlierMethod,
    threshold: f64,
) -> Vec<usize> {
    let raw: Vec<f64> = values.iter().map(|(_, v)| *v).collect();

    let is_outlier: Box<dyn Fn(f64) -> bool> = match method {
        OutlierMethod::Iqr => {
            let s = sorted(&raw);
            let (Some(q1), Some(q3)) = (quantile_sorted(&s, 0.25), quantile_sorted(&s, 0.75))
            else {
                return Vec::new();
            };
            let iqr = q3 - q1;
            let lower = q1 - IQR_FENCE * iqr;
            let upper = q3 + IQR_FENCE * iqr;
            Box::new(move |x| x < lower || x > upper)
        }
        OutlierMethod::ZScore => {
            let (Some(m), Some(std)) = (mean(&raw), population_std(&raw)) else {
                return Vec::new();
            };
            if std == 0.0 {
                return Vec::new();
            }
            Box::new(move |x| ((x - m) / std).abs() > threshold)
        }
        OutlierMethod::ModifiedZScore => {
            let Some(med) = median(&raw) else {
                return Vec::new();
            };
            let deviations: Vec<f64> = raw.iter().map(|v| (v - med).abs()).collect();
            let mad = median(&deviations).unwrap_or(0.0);
            if mad == 0.0 {
                return Vec::new();
            }
            Box::new(move |x| (MODIFIED_ZSCORE_SCALE * (x - med) / mad).abs() > threshold)
        }
    };

    values
        .iter()
        .filter(|(_, v)| is_outlier(*v))
        .map(|(i, _)| *i)
        .collect()
}

/// Detect outliers in every numeric column
///
/// `threshold` applies to the score-based methods; `None` uses the method default.
pub fn detect_outliers(
    dataset: &Dataset,
    method: OutlierMethod,
    threshold: Option<f64>,
) -> Vec<ColumnOutliers> {
    let threshold = match method {
        OutlierMethod::Iqr => IQR_FENCE,
        _ => threshold.unwrap_or_else(|| method.default_threshold()),
    };

    dataset
        .numeric_columns()
        .into_iter()
        .map(|column| {
            let present = column.present_numbers();
            let indices = detect_outlier_indices(&present, method, threshold);
            let values: Vec<f64> = indices
                .iter()
                .filter_map(|&i| column.number_at(i))
                .collect();
            let percentage = if present.is_empty() {
                0.0
            } else {
                indices.len() as f64 / present.len() as f64 * 100.0
            };

            debug!(
                column = column.name(),
                method = %method,
                count = indices.len(),
                "Detected outliers"
            );

            ColumnOutliers {
                column: column.name().to_string(),
                count: indices.len(),
                indices,
                values,
                percentage,
                method,
                threshold,
            }
        })
        .collect()
}
