//! Descriptive statistics for numeric columns

use serde::{Deserialize, Serialize};

use super::dataset::{Column, Dataset};
use super::{mean, quantile_sorted, sorted, std_dev};
use crate::error::{Error, Result};

/// Summary of one numeric column's non-missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Smallest of the most frequent values
    pub mode: f64,
    /// Sample standard deviation (n - 1); needs at least two values
    pub std: Option<f64>,
    pub variance: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub q25: f64,
    pub q75: f64,
    pub iqr: f64,
    /// Bias-corrected sample skewness; needs three values and non-zero spread
    pub skewness: Option<f64>,
    /// Bias-corrected excess kurtosis; needs four values and non-zero spread
    pub kurtosis: Option<f64>,
    /// std / mean * 100; undefined when the mean is zero
    pub coefficient_variation: Option<f64>,
}

impl ColumnStats {
    /// Summarise raw values; `None` when there are none
    pub fn from_values(column: impl Into<String>, values: &[f64]) -> Option<Self> {
        let n = values.len();
        let m = mean(values)?;
        let s = sorted(values);
        let q25 = quantile_sorted(&s, 0.25)?;
        let median = quantile_sorted(&s, 0.5)?;
        let q75 = quantile_sorted(&s, 0.75)?;
        let min = s[0];
        let max = s[n - 1];

        let std = std_dev(values, m, 1);
        // The variance of huge values can exceed f64 even when the std does not
        let variance = std.map(|sd| sd * sd).filter(|v| v.is_finite());
        let spread = std.filter(|s| *s > 0.0);

        let nf = n as f64;
        let skewness = spread
            .filter(|_| n >= 3)
            .map(|sd| {
                let m3: f64 = values.iter().map(|v| ((v - m) / sd).powi(3)).sum();
                nf / ((nf - 1.0) * (nf - 2.0)) * m3
            })
            .filter(|v| v.is_finite());
        let kurtosis = spread
            .filter(|_| n >= 4)
            .map(|sd| {
                let m4: f64 = values.iter().map(|v| ((v - m) / sd).powi(4)).sum();
                nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * m4
                    - 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0))
            })
            .filter(|v| v.is_finite());
        let coefficient_variation = match std {
            Some(sd) if m != 0.0 => Some(sd / m * 100.0).filter(|v| v.is_finite()),
            _ => None,
        };

        Some(Self {
            column: column.into(),
            count: n,
            mean: m,
            median,
            mode: mode_sorted(&s),
            std,
            variance,
            min,
            max,
            range: max - min,
            q25,
            q75,
            iqr: q75 - q25,
            skewness,
            kurtosis,
            coefficient_variation,
        })
    }
}

/// Smallest value among those with the highest frequency; `sorted` must be ascending and non-empty
fn mode_sorted(sorted: &[f64]) -> f64 {
    let mut best = sorted[0];
    let mut best_run = 0;
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        if j - i > best_run {
            best_run = j - i;
            best = sorted[i];
        }
        i = j;
    }
    best
}

/// Descriptive statistics for numeric columns, in dataset order
///
/// With `columns`, only those are summarised; naming a missing or non-numeric
/// column is an error. Columns with no values at all are omitted.
pub fn descriptive_statistics(
    dataset: &Dataset,
    columns: Option<&[String]>,
) -> Result<Vec<ColumnStats>> {
    let selected: Vec<&Column> = match columns {
        Some(names) => names
            .iter()
            .map(|name| match dataset.column(name) {
                Some(col) if col.is_numeric() => Ok(col),
                Some(_) => Err(Error::InvalidData(format!("Column '{}' is not numeric", name))),
                None => Err(Error::InvalidData(format!("Unknown column '{}'", name))),
            })
            .collect::<Result<_>>()?,
        None => dataset.numeric_columns(),
    };

    Ok(selected
        .into_iter()
        .filter_map(|col| {
            let values: Vec<f64> = col.present_numbers().into_iter().map(|(_, v)| v).collect();
            ColumnStats::from_values(col.name(), &values)
        })
        .collect())
}
