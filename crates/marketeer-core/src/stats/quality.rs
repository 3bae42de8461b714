//! Data quality summary and plain-text dataset insights

use std::fmt;

use serde::{Deserialize, Serialize};

use super::categorical::categorical_analysis;
use super::correlation::{correlation_analysis, CorrelationMethod};
use super::dataset::Dataset;
use super::outliers::detect_outliers;
use crate::config::StatisticsConfig;

/// Samples above this size are called robust
const ROBUST_SAMPLE_SIZE: usize = 1000;
/// Missing-data percentage below which quality is called good
const LOW_MISSING_PERCENTAGE: f64 = 5.0;
const HIGH_CONCENTRATION: f64 = 0.8;
const HIGH_DIVERSITY: f64 = 2.0;
/// More strong pairs than this suggests multicollinearity
const MULTICOLLINEARITY_PAIRS: usize = 3;
const HIGH_OUTLIER_PERCENTAGE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Excellent,
    Good,
    Acceptable,
    Low,
}

impl QualityLevel {
    /// Level for a completeness percentage
    pub fn from_completeness(completeness: f64) -> Self {
        if completeness >= 95.0 {
            Self::Excellent
        } else if completeness >= 85.0 {
            Self::Good
        } else if completeness >= 70.0 {
            Self::Acceptable
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    pub total_rows: usize,
    pub total_columns: usize,
    pub numeric_columns: usize,
    pub text_columns: usize,
    pub missing_cells: usize,
    /// Percentage of non-missing cells
    pub completeness: f64,
    pub duplicate_rows: usize,
    pub quality_level: QualityLevel,
}

pub fn data_quality(dataset: &Dataset) -> DataQuality {
    let completeness = 100.0 - dataset.missing_percentage();
    DataQuality {
        total_rows: dataset.row_count(),
        total_columns: dataset.column_count(),
        numeric_columns: dataset.numeric_columns().len(),
        text_columns: dataset.text_columns().len(),
        missing_cells: dataset.missing_cells(),
        completeness,
        duplicate_rows: dataset.duplicate_rows(),
        quality_level: QualityLevel::from_completeness(completeness),
    }
}

/// Short observations about sample size, missing data, categorical
/// concentration, correlations and outliers
pub fn dataset_insights(dataset: &Dataset, config: &StatisticsConfig) -> Vec<String> {
    let mut insights = Vec::new();

    let rows = dataset.row_count();
    if rows < config.min_sample_size {
        insights.push(format!(
            "Small sample (< {} records). Results may not be representative.",
            config.min_sample_size
        ));
    } else if rows > ROBUST_SAMPLE_SIZE {
        insights.push(format!(
            "Robust sample with more than {} records.",
            ROBUST_SAMPLE_SIZE
        ));
    } else {
        insights.push(format!("Moderate sample with {} records.", rows));
    }

    let missing = dataset.missing_percentage();
    if missing > config.missing_data_threshold {
        insights.push(format!(
            "High share of missing data ({:.1}%). Consider improving collection.",
            missing
        ));
    } else if missing < LOW_MISSING_PERCENTAGE {
        insights.push("Low share of missing data. Good data quality.".to_string());
    } else {
        insights.push(format!("Moderate share of missing data ({:.1}%).", missing));
    }

    if let Ok(summaries) = categorical_analysis(dataset, None) {
        for summary in summaries {
            if summary.concentration_ratio > HIGH_CONCENTRATION {
                insights.push(format!(
                    "Column '{}' is highly concentrated ({:.1}%) on '{}'.",
                    summary.column,
                    summary.concentration_ratio * 100.0,
                    summary.most_frequent.as_deref().unwrap_or_default()
                ));
            } else if summary.shannon_diversity > HIGH_DIVERSITY {
                insights.push(format!(
                    "Column '{}' shows high value diversity.",
                    summary.column
                ));
            }
        }
    }

    let correlations = correlation_analysis(
        dataset,
        CorrelationMethod::Pearson,
        config.correlation_threshold,
    );
    if !correlations.strong.is_empty() {
        insights.push(format!(
            "Found {} strong correlations between numeric columns.",
            correlations.strong.len()
        ));
        if correlations.strong.len() > MULTICOLLINEARITY_PAIRS {
            insights.push("Many strong correlations may indicate multicollinearity.".to_string());
        }
    }

    let method = config.default_outlier_method;
    let noisy: Vec<String> = detect_outliers(dataset, method, Some(config.threshold_for(method)))
        .into_iter()
        .filter(|o| o.percentage > HIGH_OUTLIER_PERCENTAGE)
        .map(|o| o.column)
        .collect();
    if !noisy.is_empty() {
        insights.push(format!(
            "Columns with many outliers (>{}%): {}",
            HIGH_OUTLIER_PERCENTAGE,
            noisy.join(", ")
        ));
    }

    insights
}
