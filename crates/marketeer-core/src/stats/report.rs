//! Markdown rendering of a dataset analysis

use super::categorical::CategoricalSummary;
use super::correlation::CorrelationResult;
use super::descriptive::ColumnStats;
use super::quality::DataQuality;

fn opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Render the full dataset report
pub fn render_dataset_report(
    title: &str,
    quality: &DataQuality,
    stats: &[ColumnStats],
    categorical: &[CategoricalSummary],
    correlations: &CorrelationResult,
    insights: &[String],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", title));

    out.push_str("## Data Quality\n\n");
    out.push_str(&format!("- **Rows:** {}\n", quality.total_rows));
    out.push_str(&format!(
        "- **Columns:** {} ({} numeric, {} categorical)\n",
        quality.total_columns, quality.numeric_columns, quality.text_columns
    ));
    out.push_str(&format!("- **Completeness:** {:.1}%\n", quality.completeness));
    out.push_str(&format!("- **Duplicate rows:** {}\n", quality.duplicate_rows));
    out.push_str(&format!("- **Quality level:** {}\n\n", quality.quality_level));

    if !stats.is_empty() {
        out.push_str("## Numeric Summary\n\n");
        out.push_str("| Column | Count | Mean | Median | Std | Min | Max | CV % |\n");
        out.push_str("|---|---|---|---|---|---|---|---|\n");
        for s in stats {
            out.push_str(&format!(
                "| {} | {} | {:.2} | {:.2} | {} | {:.2} | {:.2} | {} |\n",
                s.column,
                s.count,
                s.mean,
                s.median,
                opt(s.std),
                s.min,
                s.max,
                opt(s.coefficient_variation)
            ));
        }
        out.push('\n');
    }

    if !categorical.is_empty() {
        out.push_str("## Categorical Summary\n\n");
        for c in categorical {
            out.push_str(&format!(
                "- **{}**: {} values, {} unique; most frequent '{}' ({:.1}%)\n",
                c.column,
                c.total_count,
                c.unique_values,
                c.most_frequent.as_deref().unwrap_or("-"),
                c.most_frequent_percentage
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!("## Strong Correlations ({})\n\n", correlations.method));
    if correlations.strong.is_empty() {
        out.push_str("No strong correlations found.\n\n");
    } else {
        for pair in &correlations.strong {
            out.push_str(&format!(
                "- {} / {}: {:.3}\n",
                pair.first, pair.second, pair.coefficient
            ));
        }
        out.push('\n');
    }

    if !insights.is_empty() {
        out.push_str("## Insights\n\n");
        for insight in insights {
            out.push_str(&format!("- {}\n", insight));
        }
    }

    out
}
