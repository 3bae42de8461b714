//! Text renderings of a proposal

use super::generator::format_currency;
use super::types::MarketingProposal;

/// Full proposal as a markdown document
pub fn render_markdown(proposal: &MarketingProposal) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Marketing Proposal: {}\n\n", proposal.client_name));
    out.push_str(&format!("**Proposal:** {}\n", proposal.proposal_id));
    out.push_str(&format!("**Consultant:** {}\n", proposal.consultant_name));
    out.push_str(&format!(
        "**Date:** {}\n\n",
        proposal.created_at.format("%Y-%m-%d")
    ));

    out.push_str("## Executive Summary\n\n");
    out.push_str(&proposal.executive_summary);
    out.push_str("\n\n## Situation Analysis\n\n");
    out.push_str(&proposal.situation_analysis);
    out.push_str("\n\n");

    out.push_str("## Strategies\n\n");
    for (i, strategy) in proposal.strategies.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, strategy.name));
        out.push_str(&format!("{}\n\n", strategy.description));
        out.push_str(&format!("- **Objective:** {}\n", strategy.objective));
        out.push_str(&format!("- **Implementation:** {}\n", strategy.implementation));
        out.push_str(&format!("- **Investment:** {}\n", strategy.estimated_investment));
        out.push_str(&format!("- **Expected ROI:** {}\n", strategy.expected_roi));
        out.push_str(&format!("- **Timeframe:** {}\n", strategy.timeframe));
        out.push_str(&format!("- **Complexity:** {}\n", strategy.complexity));
        out.push_str(&format!("- **Metrics:** {}\n", strategy.success_metrics.join("; ")));
        out.push_str(&format!("- **Risks:** {}\n\n", strategy.risks.join("; ")));
    }

    let timeline = &proposal.implementation_timeline;
    out.push_str(&format!(
        "## Implementation Timeline ({})\n\n",
        timeline.total_duration
    ));
    for phase in &timeline.phases {
        out.push_str(&format!("### {} ({})\n\n", phase.phase, phase.duration));
        for activity in &phase.activities {
            out.push_str(&format!("- {}\n", activity));
        }
        out.push_str(&format!(
            "\n*Deliverables:* {}\n\n",
            phase.deliverables.join(", ")
        ));
    }
    out.push_str("### Milestones\n\n");
    out.push_str("| Week | Milestone |\n|------|-----------|\n");
    for m in &timeline.milestones {
        out.push_str(&format!("| {} | {} |\n", m.week, m.milestone));
    }
    out.push('\n');

    let inv = &proposal.investment_breakdown;
    out.push_str("## Investment\n\n");
    out.push_str("| Item | Amount | Notes |\n|------|--------|-------|\n");
    out.push_str(&format!(
        "| Setup | {} | {} |\n",
        format_currency(inv.setup.value),
        inv.setup.description
    ));
    out.push_str(&format!(
        "| Monthly | {} | {} |\n",
        format_currency(inv.monthly_recurring.value),
        inv.monthly_recurring.description
    ));
    out.push_str(&format!(
        "| Paid campaigns (60%) | {} | per month |\n",
        format_currency(inv.monthly_distribution.paid_campaigns)
    ));
    out.push_str(&format!(
        "| Tools/Software (25%) | {} | per month |\n",
        format_currency(inv.monthly_distribution.tools_software)
    ));
    out.push_str(&format!(
        "| Content/Creative (15%) | {} | per month |\n",
        format_currency(inv.monthly_distribution.content_creative)
    ));
    out.push_str(&format!(
        "\n**Total (6 months):** {}\n",
        proposal.total_investment
    ));
    out.push_str(&format!("**Projected return:** {}\n\n", inv.projected_roi));

    out.push_str("## Success Metrics\n\n");
    out.push_str("| Metric | Target | Period |\n|--------|--------|--------|\n");
    for m in &proposal.success_metrics {
        out.push_str(&format!("| {} | {} | {} |\n", m.metric, m.target, m.period));
    }
    out.push('\n');

    out.push_str("## Risks\n\n");
    for r in &proposal.risk_assessment {
        out.push_str(&format!(
            "- **{}**: {} *Mitigation:* {}\n",
            r.risk, r.description, r.mitigation
        ));
    }
    out.push('\n');

    out.push_str("## Next Steps\n\n");
    for step in &proposal.next_steps {
        out.push_str(&format!("{}\n", step));
    }

    out
}

/// Short plain-text summary
pub fn render_summary(proposal: &MarketingProposal) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} for {}\n",
        proposal.proposal_id, proposal.client_name
    ));
    out.push_str(&format!("  Strategies:       {}\n", proposal.strategies.len()));
    for strategy in &proposal.strategies {
        out.push_str(&format!("    - {} ({})\n", strategy.name, strategy.timeframe));
    }
    out.push_str(&format!("  Total investment: {}\n", proposal.total_investment));
    out.push_str(&format!("  Expected ROI:     {}\n", proposal.expected_roi));
    out.push_str(&format!("  Duration:         {}\n", proposal.project_duration));
    out.push_str(&format!("  Complexity:       {}\n", proposal.complexity_score));
    out
}
