//! Pairwise correlation between numeric columns
//!
//! Each pair uses only the rows where both columns have a value. A coefficient
//! that cannot be computed (fewer than two shared rows, or a constant side) is
//! `None` and never counts as strong.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::dataset::{Column, Dataset};
use super::{deviation_scale, mean};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationMethod {
    #[default]
    Pearson,
    Spearman,
    Kendall,
}

impl CorrelationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pearson => "pearson",
            Self::Spearman => "spearman",
            Self::Kendall => "kendall",
        }
    }

    /// Coefficient for paired observations
    pub fn coefficient(&self, x: &[f64], y: &[f64]) -> Option<f64> {
        match self {
            Self::Pearson => pearson(x, y),
            Self::Spearman => pearson(&average_ranks(x), &average_ranks(y)),
            Self::Kendall => kendall_tau_b(x, y),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CorrelationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pearson" => Ok(Self::Pearson),
            "spearman" => Ok(Self::Spearman),
            "kendall" => Ok(Self::Kendall),
            _ => Err(Error::UnknownMethod(format!(
                "'{}' (expected pearson, spearman or kendall)",
                s
            ))),
        }
    }
}

/// Square, symmetric matrix over the numeric columns in dataset order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// A column pair whose coefficient exceeds the strong threshold in absolute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongCorrelation {
    pub first: String,
    pub second: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub method: CorrelationMethod,
    pub matrix: CorrelationMatrix,
    /// Upper triangle, row-major order
    pub strong: Vec<StrongCorrelation>,
}

/// Correlation matrix plus strong pairs (`|r| > threshold`)
pub fn correlation_analysis(
    dataset: &Dataset,
    method: CorrelationMethod,
    threshold: f64,
) -> CorrelationResult {
    let columns = dataset.numeric_columns();
    if columns.len() < 2 {
        warn!(
            numeric_columns = columns.len(),
            "Fewer than 2 numeric columns, skipping correlation"
        );
        return CorrelationResult {
            method,
            ..Default::default()
        };
    }

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    let mut strong = Vec::new();

    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let (x, y) = paired(columns[i], columns[j]);
            let r = method.coefficient(&x, &y);
            values[i][j] = r;
            values[j][i] = r;

            if let Some(r) = r.filter(|r| r.abs() > threshold) {
                strong.push(StrongCorrelation {
                    first: columns[i].name().to_string(),
                    second: columns[j].name().to_string(),
                    coefficient: r,
                });
            }
        }
    }

    debug!(method = %method, columns = n, strong = strong.len(), "Computed correlations");

    CorrelationResult {
        method,
        matrix: CorrelationMatrix {
            columns: columns.iter().map(|c| c.name().to_string()).collect(),
            values,
        },
        strong,
    }
}

/// Values from rows where both columns are present
fn paired(a: &Column, b: &Column) -> (Vec<f64>, Vec<f64>) {
    (0..a.len())
        .filter_map(|row| Some((a.number_at(row)?, b.number_at(row)?)))
        .unzip()
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || x.len() != y.len() {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;
    // r is scale-invariant; dividing each side by its largest deviation keeps the sums finite
    let sx = deviation_scale(x, mx);
    let sy = deviation_scale(y, my);
    if sx == 0.0 || sy == 0.0 {
        return None;
    }

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let da = (a - mx) / sx;
        let db = (b - my) / sy;
        cov += da * db;
        vx += da * da;
        vy += db * db;
    }
    let r = cov / (vx * vy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// 1-based ranks, ties receive the average of their positions
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        i = j + 1;
    }
    ranks
}

fn kendall_tau_b(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n < 2 || n != y.len() {
        return None;
    }

    let mut concordant = 0i64;
    let mut discordant = 0i64;
    let mut ties_x = 0i64;
    let mut ties_y = 0i64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i] - x[j];
            let dy = y[i] - y[j];
            if dx == 0.0 && dy == 0.0 {
                continue;
            } else if dx == 0.0 {
                ties_x += 1;
            } else if dy == 0.0 {
                ties_y += 1;
            } else if (dx > 0.0) == (dy > 0.0) {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let untied_x = (concordant + discordant + ties_y) as f64;
    let untied_y = (concordant + discordant + ties_x) as f64;
    let denom = (untied_x * untied_y).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some((concordant - discordant) as f64 / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    const CSV: &str = "\
spend,leads,returns,constant
1,2,9,5
2,4,7,5
3,6,8,5
4,8,3,5
5,11,1,5
";

    #[test]
    fn test_pearson_perfect_linear() {
        let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!(approx(r, 1.0));
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!(approx(r, -1.0));
    }

    #[test]
    fn test_pearson_large_magnitudes() {
        let r = pearson(&[1e200, 2e200, 3e200], &[1.0, 2.0, 3.0]).unwrap();
        assert!(approx(r, 1.0));

        let ds = Dataset::from_csv_str("a,b\n1e200,1\n2e200,2\n3e200,3\n").unwrap();
        let result = correlation_analysis(&ds, CorrelationMethod::Pearson, 0.7);
        assert_eq!(result.strong.len(), 1);
        assert!(approx(result.strong[0].coefficient, 1.0));
    }

    #[test]
    fn test_pearson_overflowing_deviation_is_undefined() {
        assert!(approx(pearson(&[-1.7e308, 1.7e308], &[1.0, 2.0]).unwrap(), 1.0));
        // The last deviation from the mean exceeds f64::MAX
        let x = [-1.7e308, -1.7e308, -1.7e308, 1.7e308];
        assert_eq!(pearson(&x, &[1.0, 2.0, 3.0, 4.0]), None);
    }

    #[test]
    fn test_average_ranks_with_ties() {
        assert_eq!(average_ranks(&[10.0, 20.0, 20.0, 5.0]), vec![2.0, 3.5, 3.5, 1.0]);
    }

    #[test]
    fn test_spearman_monotonic() {
        let r = CorrelationMethod::Spearman
            .coefficient(&[1.0, 2.0, 3.0, 4.0], &[1.0, 4.0, 9.0, 100.0])
            .unwrap();
        assert!(approx(r, 1.0));
    }

    #[test]
    fn test_kendall_tau_b() {
        let r = kendall_tau_b(&[1.0, 2.0, 3.0, 4.0], &[1.0, 3.0, 2.0, 4.0]).unwrap();
        // 5 concordant, 1 discordant
        assert!(approx(r, 4.0 / 6.0));
        assert_eq!(kendall_tau_b(&[1.0, 1.0], &[2.0, 3.0]), None);
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        let result = correlation_analysis(&ds, CorrelationMethod::Pearson, 0.7);
        let m = &result.matrix;
        assert_eq!(m.columns.len(), 4);
        for i in 0..4 {
            assert_eq!(m.values[i][i], Some(1.0));
            for j in 0..4 {
                assert_eq!(m.values[i][j], m.values[j][i]);
            }
        }
        // Constant column never correlates
        assert_eq!(m.get("spend", "constant"), None);
    }

    #[test]
    fn test_strong_pairs_in_traversal_order() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        let result = correlation_analysis(&ds, CorrelationMethod::Pearson, 0.7);
        let pairs: Vec<(&str, &str)> = result
            .strong
            .iter()
            .map(|s| (s.first.as_str(), s.second.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("spend", "leads"), ("spend", "returns"), ("leads", "returns")]
        );
        assert!(result.strong.iter().all(|s| s.coefficient.abs() > 0.7));
    }

    #[test]
    fn test_pairwise_complete_observations() {
        let ds = Dataset::from_csv_str("a,b\n1,2\n2,\n3,6\n,8\n4,8\n").unwrap();
        let result = correlation_analysis(&ds, CorrelationMethod::Pearson, 0.7);
        assert!(approx(result.matrix.get("a", "b").unwrap(), 1.0));
    }

    #[test]
    fn test_single_numeric_column_is_empty() {
        let ds = Dataset::from_csv_str("a,label\n1,x\n2,y\n").unwrap();
        let result = correlation_analysis(&ds, CorrelationMethod::Kendall, 0.7);
        assert!(result.matrix.is_empty());
        assert!(result.strong.is_empty());
    }

    #[test]
    fn test_parse_method() {
        assert_eq!("Spearman".parse::<CorrelationMethod>().unwrap(), CorrelationMethod::Spearman);
        assert!(matches!(
            "cosine".parse::<CorrelationMethod>(),
            Err(Error::UnknownMethod(_))
        ));
    }
}
