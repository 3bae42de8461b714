//! Client analysis command implementations

use std::path::Path;

use anyhow::Result;
use marketeer_core::{ClientAnalysis, MarketingAnalysisEngine, MarketingInsight};

use super::{parse_format, read_profile, truncate, OutputFormat};

pub fn cmd_analyze(input: &Path, format: &str) -> Result<()> {
    let format = parse_format(format, &[OutputFormat::Text, OutputFormat::Json])?;
    let profile = read_profile(input)?;
    let analysis = MarketingAnalysisEngine::new().analyze(&profile);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        _ => print!("{}", format_analysis(&analysis)),
    }
    Ok(())
}

pub fn cmd_insights(input: &Path, format: &str) -> Result<()> {
    let format = parse_format(format, &[OutputFormat::Text, OutputFormat::Json])?;
    let profile = read_profile(input)?;
    let analysis = MarketingAnalysisEngine::new().analyze(&profile);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis.insights)?),
        _ => print!("{}", format_insights(&analysis.insights)),
    }
    Ok(())
}

/// Human-readable analysis summary
pub fn format_analysis(analysis: &ClientAnalysis) -> String {
    let profile = &analysis.profile;
    let scores = &analysis.scores;
    let mut out = String::new();

    out.push_str(&format!("\n📊 Analysis: {}\n", profile.name));
    out.push_str(&format!(
        "   Sector: {}   Budget: {}   Deadline: {}\n",
        profile.sector, profile.budget, profile.deadline
    ));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    out.push_str(&format!("   Potential score:     {:.1}/10\n", scores.potential_score));
    out.push_str(&format!("   Complexity:          {}\n", scores.complexity_score));
    out.push_str(&format!("   Projected ROI:       {}\n", scores.roi_projection));
    out.push_str(&format!("   Priority:            {}\n", scores.priority));
    out.push_str(&format!("   Time to results:     {}\n", scores.time_to_results));
    out.push_str(&format!("   Success probability: {}\n", scores.success_probability));

    out.push_str(&format_insights(&analysis.insights));

    if !analysis.recommendations.is_empty() {
        out.push_str("\n💡 Recommendations\n");
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            out.push_str(&format!("   {}. {}\n", i + 1, rec));
        }
    }

    if !analysis.risk_assessment.is_empty() {
        out.push_str("\n⚠️  Risks\n");
        for risk in &analysis.risk_assessment {
            out.push_str(&format!("   • {}: {}\n", risk.risk, risk.mitigation));
        }
    }

    out.push_str("\n🎯 Success Metrics\n");
    for metric in &analysis.success_metrics {
        out.push_str(&format!(
            "   • {:24} {:>8}  ({})\n",
            metric.metric, metric.target, metric.period
        ));
    }
    out
}

pub fn format_insights(insights: &[MarketingInsight]) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n🔍 Insights ({})\n", insights.len()));

    if insights.is_empty() {
        out.push_str("   No insights for this profile.\n");
        return out;
    }

    out.push_str(&format!(
        "   {:8} │ {:11} │ {:40} │ {}\n",
        "Priority", "Category", "Title", "Timeframe"
    ));
    out.push_str("   ─────────┼─────────────┼──────────────────────────────────────────┼──────────\n");
    for insight in insights {
        out.push_str(&format!(
            "   {:8} │ {:11} │ {:40} │ {}\n",
            insight.priority.as_str(),
            insight.category.as_str(),
            truncate(&insight.title, 40),
            insight.timeframe
        ));
    }
    out
}
