//! Frequency summaries for text columns

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::dataset::{Column, Dataset};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub total_count: usize,
    pub unique_values: usize,
    pub most_frequent: Option<String>,
    pub most_frequent_count: usize,
    pub most_frequent_percentage: f64,
    pub least_frequent: Option<String>,
    pub least_frequent_count: usize,
    /// Most frequent first; ties keep first-seen order
    pub value_distribution: Vec<ValueCount>,
    /// Share of the most frequent value (0-1)
    pub concentration_ratio: f64,
    /// Shannon entropy of the value distribution (natural log)
    pub shannon_diversity: f64,
    pub top_3_values: Vec<ValueCount>,
}

impl CategoricalSummary {
    pub fn from_values(column: impl Into<String>, values: &[&str]) -> Self {
        // value -> (first seen, count)
        let mut seen: HashMap<&str, (usize, usize)> = HashMap::new();
        for (i, value) in values.iter().enumerate() {
            seen.entry(*value).or_insert((i, 0)).1 += 1;
        }
        let mut ranked: Vec<(&str, usize, usize)> = seen
            .into_iter()
            .map(|(value, (first, count))| (value, first, count))
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));
        let counts: Vec<ValueCount> = ranked
            .into_iter()
            .map(|(value, _, count)| ValueCount {
                value: value.to_string(),
                count,
            })
            .collect();

        let total = values.len();
        let share = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };

        let shannon_diversity: f64 = counts
            .iter()
            .map(|vc| share(vc.count))
            .filter(|p| *p > 0.0)
            .map(|p| -p * p.ln())
            .sum();

        let first = counts.first();
        let last = counts.last();
        let most_frequent_count = first.map(|vc| vc.count).unwrap_or(0);

        Self {
            column: column.into(),
            total_count: total,
            unique_values: counts.len(),
            most_frequent: first.map(|vc| vc.value.clone()),
            most_frequent_count,
            most_frequent_percentage: share(most_frequent_count) * 100.0,
            least_frequent: last.map(|vc| vc.value.clone()),
            least_frequent_count: last.map(|vc| vc.count).unwrap_or(0),
            concentration_ratio: share(most_frequent_count),
            shannon_diversity,
            top_3_values: counts.iter().take(3).cloned().collect(),
            value_distribution: counts,
        }
    }
}

/// Summaries for text columns, in dataset order
///
/// With `columns`, only those are summarised; naming a missing or numeric
/// column is an error.
pub fn categorical_analysis(
    dataset: &Dataset,
    columns: Option<&[String]>,
) -> Result<Vec<CategoricalSummary>> {
    let selected: Vec<&Column> = match columns {
        Some(names) => names
            .iter()
            .map(|name| match dataset.column(name) {
                Some(col) if !col.is_numeric() => Ok(col),
                Some(_) => Err(Error::InvalidData(format!("Column '{}' is numeric", name))),
                None => Err(Error::InvalidData(format!("Unknown column '{}'", name))),
            })
            .collect::<Result<_>>()?,
        None => dataset.text_columns(),
    };

    Ok(selected
        .into_iter()
        .map(|col| CategoricalSummary::from_values(col.name(), &col.present_text()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_summary() {
        let summary = CategoricalSummary::from_values(
            "channel",
            &["Email", "LinkedIn", "Email", "Ads", "Email", "LinkedIn"],
        );
        assert_eq!(summary.total_count, 6);
        assert_eq!(summary.unique_values, 3);
        assert_eq!(summary.most_frequent.as_deref(), Some("Email"));
        assert_eq!(summary.most_frequent_count, 3);
        assert!((summary.most_frequent_percentage - 50.0).abs() < 1e-9);
        assert_eq!(summary.least_frequent.as_deref(), Some("Ads"));
        assert_eq!(summary.least_frequent_count, 1);
        assert!((summary.concentration_ratio - 0.5).abs() < 1e-9);
        assert_eq!(summary.top_3_values.len(), 3);
    }

    #[test]
    fn test_shannon_diversity() {
        let uniform = CategoricalSummary::from_values("x", &["a", "b", "c", "d"]);
        assert!((uniform.shannon_diversity - 4f64.ln()).abs() < 1e-9);

        let single = CategoricalSummary::from_values("x", &["a", "a"]);
        assert_eq!(single.shannon_diversity, 0.0);
        assert_eq!(single.concentration_ratio, 1.0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let summary = CategoricalSummary::from_values("x", &["b", "a", "a", "b", "c"]);
        let order: Vec<&str> = summary
            .value_distribution
            .iter()
            .map(|vc| vc.value.as_str())
            .collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_high_cardinality_column() {
        let mut raw: Vec<String> = (0..5000).map(|i| format!("id-{}", i)).collect();
        raw.push("id-4999".to_string());
        let values: Vec<&str> = raw.iter().map(String::as_str).collect();

        let summary = CategoricalSummary::from_values("customer", &values);
        assert_eq!(summary.unique_values, 5000);
        assert_eq!(summary.most_frequent.as_deref(), Some("id-4999"));
        assert_eq!(summary.most_frequent_count, 2);
        assert_eq!(summary.value_distribution[1].value, "id-0");
        assert_eq!(summary.least_frequent.as_deref(), Some("id-4998"));
    }

    #[test]
    fn test_analysis_skips_numeric_columns() {
        let ds = Dataset::from_csv_str("region,spend\nNorth,1\nSouth,2\nNorth,\n").unwrap();
        let result = categorical_analysis(&ds, None).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].column, "region");
        assert!(categorical_analysis(&ds, Some(&["spend".to_string()])).is_err());
    }
}
