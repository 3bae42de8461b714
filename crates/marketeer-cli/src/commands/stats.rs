//! Dataset statistics command implementations

use std::path::Path;

use anyhow::Result;
use marketeer_core::stats::{CategoricalSummary, ColumnOutliers, ColumnStats, CorrelationResult};
use marketeer_core::{AnalysisConfig, CorrelationMethod, DatasetAnalyzer, OutlierMethod};

use super::{emit, load_dataset, parse_format, split_columns, truncate, OutputFormat};

const TEXT_OR_JSON: [OutputFormat; 2] = [OutputFormat::Text, OutputFormat::Json];

fn open_analyzer(config: &AnalysisConfig, file: &Path) -> Result<DatasetAnalyzer> {
    let dataset = load_dataset(file)?;
    Ok(DatasetAnalyzer::with_data(config.statistics.clone(), dataset))
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

pub fn cmd_stats(
    config: &AnalysisConfig,
    file: &Path,
    columns: Option<&str>,
    format: &str,
) -> Result<()> {
    let format = parse_format(format, &TEXT_OR_JSON)?;
    let mut analyzer = open_analyzer(config, file)?;
    let columns = split_columns(columns);
    let stats = analyzer.descriptive_statistics(columns.as_deref())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => {
            let quality = analyzer.data_quality()?;
            println!();
            println!("📊 Descriptive Statistics: {}", file.display());
            println!(
                "   Rows: {}   Columns: {}   Completeness: {:.1}% ({})",
                quality.total_rows,
                quality.total_columns,
                quality.completeness,
                quality.quality_level.as_str()
            );
            print!("{}", format_stats(&stats));
        }
    }
    Ok(())
}

pub fn format_stats(stats: &[ColumnStats]) -> String {
    let mut out = String::new();
    if stats.is_empty() {
        out.push_str("   No numeric columns.\n");
        return out;
    }

    out.push_str(&format!(
        "   {:20} │ {:>6} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │ {:>10}\n",
        "Column", "Count", "Mean", "Median", "Std", "Min", "Max"
    ));
    out.push_str("   ─────────────────────┼────────┼────────────┼────────────┼────────────┼────────────┼───────────\n");
    for s in stats {
        out.push_str(&format!(
            "   {:20} │ {:>6} │ {:>10.2} │ {:>10.2} │ {:>10} │ {:>10.2} │ {:>10.2}\n",
            truncate(&s.column, 20),
            s.count,
            s.mean,
            s.median,
            opt(s.std),
            s.min,
            s.max
        ));
    }
    out
}

pub fn cmd_outliers(
    config: &AnalysisConfig,
    file: &Path,
    method: Option<&str>,
    threshold: Option<f64>,
    format: &str,
) -> Result<()> {
    let format = parse_format(format, &TEXT_OR_JSON)?;
    let method = method.map(str::parse::<OutlierMethod>).transpose()?;
    let mut analyzer = open_analyzer(config, file)?;
    let outliers = analyzer.detect_outliers(method, threshold)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outliers)?),
        _ => print!("{}", format_outliers(&outliers)),
    }
    Ok(())
}

pub fn format_outliers(outliers: &[ColumnOutliers]) -> String {
    let mut out = String::new();
    out.push_str("\n🔎 Outliers\n");
    if outliers.is_empty() {
        out.push_str("   No numeric columns.\n");
        return out;
    }

    for o in outliers {
        if o.count == 0 {
            out.push_str(&format!("   ✅ {}: none ({})\n", o.column, o.method));
            continue;
        }
        let rows: Vec<String> = o
            .indices
            .iter()
            .zip(&o.values)
            .map(|(i, v)| format!("row {} = {}", i, v))
            .collect();
        out.push_str(&format!(
            "   ⚠️  {}: {} ({:.1}%, {} threshold {}) {}\n",
            o.column,
            o.count,
            o.percentage,
            o.method,
            o.threshold,
            rows.join(", ")
        ));
    }
    out
}

pub fn cmd_correlate(
    config: &AnalysisConfig,
    file: &Path,
    method: &str,
    format: &str,
) -> Result<()> {
    let format = parse_format(format, &TEXT_OR_JSON)?;
    let method: CorrelationMethod = method.parse()?;
    let mut analyzer = open_analyzer(config, file)?;
    let result = analyzer.correlation_analysis(method)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print!(
            "{}",
            format_correlation(&result, config.statistics.correlation_threshold)
        ),
    }
    Ok(())
}

pub fn format_correlation(result: &CorrelationResult, threshold: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n🔗 Correlation ({})\n", result.method));
    if result.matrix.is_empty() {
        out.push_str("   Need at least two numeric columns.\n");
        return out;
    }

    out.push_str(&format!("   {:14}", ""));
    for name in &result.matrix.columns {
        out.push_str(&format!(" {:>14}", truncate(name, 14)));
    }
    out.push('\n');
    for (name, row) in result.matrix.columns.iter().zip(&result.matrix.values) {
        out.push_str(&format!("   {:14}", truncate(name, 14)));
        for value in row {
            out.push_str(&format!(" {:>14}", opt(*value)));
        }
        out.push('\n');
    }

    if result.strong.is_empty() {
        out.push_str(&format!("\n   No pairs with |r| > {}\n", threshold));
    } else {
        out.push_str(&format!("\n   Strong pairs (|r| > {}):\n", threshold));
        for pair in &result.strong {
            out.push_str(&format!(
                "   • {} ↔ {}: {:.3}\n",
                pair.first, pair.second, pair.coefficient
            ));
        }
    }
    out
}

pub fn cmd_categorical(
    config: &AnalysisConfig,
    file: &Path,
    columns: Option<&str>,
    format: &str,
) -> Result<()> {
    let format = parse_format(format, &TEXT_OR_JSON)?;
    let mut analyzer = open_analyzer(config, file)?;
    let columns = split_columns(columns);
    let summaries = analyzer.categorical_analysis(columns.as_deref())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        _ => print!("{}", format_categorical(&summaries)),
    }
    Ok(())
}

pub fn format_categorical(summaries: &[CategoricalSummary]) -> String {
    let mut out = String::new();
    out.push_str("\n🏷️  Categorical Summary\n");
    if summaries.is_empty() {
        out.push_str("   No text columns.\n");
        return out;
    }

    for s in summaries {
        out.push_str(&format!(
            "   {} ({} values, {} unique, diversity {:.2})\n",
            s.column, s.total_count, s.unique_values, s.shannon_diversity
        ));
        for vc in s.value_distribution.iter().take(5) {
            out.push_str(&format!("      {:24} {:>6}\n", truncate(&vc.value, 24), vc.count));
        }
    }
    out
}

pub fn cmd_report(
    config: &AnalysisConfig,
    file: &Path,
    title: &str,
    output: Option<&Path>,
) -> Result<()> {
    let mut analyzer = open_analyzer(config, file)?;
    let report = analyzer.report(title)?;
    emit(&report, output)
}
