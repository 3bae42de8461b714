//! Statistics over tabular survey/CRM data
//!
//! Pure functions over a [`Dataset`] snapshot: descriptive statistics,
//! correlation, outlier detection and categorical summaries. Numerical edge
//! cases (zero spread, too few points) yield `None` or "no outliers" rather
//! than NaN.
//!
//! [`DatasetAnalyzer`] wraps one dataset with a caller-owned cache for
//! repeated requests.

pub mod analyzer;
pub mod categorical;
pub mod correlation;
pub mod dataset;
pub mod descriptive;
pub mod outliers;
pub mod quality;
pub mod report;

pub use analyzer::{AnalysisCache, DatasetAnalyzer};
pub use categorical::{categorical_analysis, CategoricalSummary, ValueCount};
pub use correlation::{
    correlation_analysis, CorrelationMatrix, CorrelationMethod, CorrelationResult,
    StrongCorrelation,
};
pub use dataset::{standardize_column_name, Column, Dataset};
pub use descriptive::{descriptive_statistics, ColumnStats};
pub use outliers::{detect_outlier_indices, detect_outliers, ColumnOutliers, OutlierMethod};
pub use quality::{data_quality, dataset_insights, DataQuality, QualityLevel};
pub use report::render_dataset_report;

/// Running mean, clamped to the observed range
///
/// Updating incrementally, dividing before subtracting, keeps large finite
/// inputs of either sign from overflowing.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    let (mut m, mut lo, mut hi) = (*first, *first, *first);
    for (k, x) in rest.iter().enumerate() {
        let n = (k + 2) as f64;
        m += x / n - m / n;
        lo = lo.min(*x);
        hi = hi.max(*x);
    }
    Some(m.clamp(lo, hi))
}

pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Quantile with linear interpolation between closest ranks; `sorted` must be ascending
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

pub(crate) fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

/// Largest absolute deviation from `mean`; 0 for constant input
pub(crate) fn deviation_scale(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).abs()).fold(0.0, f64::max)
}

/// Standard deviation around `mean` with `n - ddof` in the denominator
///
/// Deviations are divided by their largest magnitude before squaring, so the
/// result stays finite whenever the true value is. `None` below `ddof + 1`
/// values or when the result still is not finite.
pub(crate) fn std_dev(values: &[f64], mean: f64, ddof: usize) -> Option<f64> {
    if values.len() <= ddof {
        return None;
    }
    let scale = deviation_scale(values, mean);
    if scale == 0.0 {
        return Some(0.0);
    }
    let ss: f64 = values.iter().map(|v| ((v - mean) / scale).powi(2)).sum();
    Some(scale * (ss / (values.len() - ddof) as f64).sqrt()).filter(|s| s.is_finite())
}

/// Population standard deviation (divides by n)
pub(crate) fn population_std(values: &[f64]) -> Option<f64> {
    std_dev(values, mean(values)?, 0)
}
