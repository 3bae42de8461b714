//! Proposal assembly
//!
//! Everything here is template-driven: phases, milestones and the budget split
//! are fixed business rules applied to the analysis, not derived from it.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::analysis::{ClientAnalysis, Risk, SuccessMetric};
use crate::config::ProposalConfig;
use crate::insights::{InsightCategory, MarketingInsight, Priority};
use crate::models::{BudgetTier, ClientProfile, Objective, Sector};

use super::types::{
    CostItem, ImplementationTimeline, InvestmentBreakdown, MarketingProposal, MarketingStrategy,
    Milestone, MonthlyDistribution, TimelinePhase,
};

const MAX_STRATEGIES: usize = 4;
/// Strategies that get their own timeline phase and next step
const SCHEDULED_STRATEGIES: usize = 3;
const SUMMARY_CHALLENGES: usize = 3;
const SITUATION_OPPORTUNITIES: usize = 3;
const SITUATION_RECOMMENDATIONS: usize = 3;
const PROJECT_MONTHS: u64 = 6;
const TOTAL_DURATION: &str = "24 weeks";

const PAID_CAMPAIGNS_PCT: u64 = 60;
const TOOLS_SOFTWARE_PCT: u64 = 25;
const CONTENT_CREATIVE_PCT: u64 = 15;

/// Format whole dollars as `$12,345`
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

/// Reference monthly spend for a budget tier
pub fn monthly_reference(tier: &BudgetTier) -> u64 {
    match tier {
        BudgetTier::UpTo5k => 5_000,
        BudgetTier::From5kTo15k => 12_500,
        BudgetTier::From15kTo50k => 32_500,
        BudgetTier::From50kTo100k => 75_000,
        BudgetTier::Above100k => 100_000,
        BudgetTier::Unrecognized(_) => 10_000,
    }
}

/// `PROP-{initials}-{YYYYMMDDHHMM}` from the first three words of the client name
pub fn proposal_id(client_name: &str, at: DateTime<Utc>) -> String {
    let initials: String = client_name
        .split_whitespace()
        .take(3)
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect();
    format!("PROP-{}-{}", initials, at.format("%Y%m%d%H%M"))
}

/// Builds proposals from a completed analysis
#[derive(Debug, Clone, Default)]
pub struct ProposalGenerator {
    config: ProposalConfig,
}

impl ProposalGenerator {
    pub fn new(config: ProposalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProposalConfig {
        &self.config
    }

    pub fn generate_proposal(
        &self,
        profile: &ClientProfile,
        analysis: &ClientAnalysis,
    ) -> MarketingProposal {
        self.generate_proposal_at(profile, analysis, Utc::now())
    }

    /// Generate with a fixed creation time
    pub fn generate_proposal_at(
        &self,
        profile: &ClientProfile,
        analysis: &ClientAnalysis,
        created_at: DateTime<Utc>,
    ) -> MarketingProposal {
        let strategies = strategies(profile, &analysis.insights);
        let implementation_timeline = timeline(&strategies);
        let investment_breakdown = self.investment(&profile.budget);
        let next_steps = next_steps(&strategies);

        let proposal = MarketingProposal {
            client_name: profile.name.clone(),
            consultant_name: self.config.consultant_name.clone(),
            created_at,
            proposal_id: proposal_id(&profile.name, created_at),
            executive_summary: executive_summary(profile, analysis),
            situation_analysis: situation_analysis(profile, analysis),
            total_investment: format_currency(investment_breakdown.total_6_months),
            expected_roi: analysis.scores.roi_projection.clone(),
            project_duration: implementation_timeline.total_duration.clone(),
            complexity_score: analysis.scores.complexity_score,
            success_metrics: success_metrics(profile, &analysis.success_metrics),
            risk_assessment: risk_assessment(&analysis.risk_assessment),
            strategies,
            implementation_timeline,
            investment_breakdown,
            next_steps,
        };

        info!(
            proposal_id = %proposal.proposal_id,
            strategies = proposal.strategies.len(),
            total = %proposal.total_investment,
            "Proposal generated"
        );
        proposal
    }

    pub fn investment(&self, tier: &BudgetTier) -> InvestmentBreakdown {
        let monthly = monthly_reference(tier);
        let setup = self.config.setup_cost;
        let total = monthly * PROJECT_MONTHS + setup;
        let projected = (total as f64 * self.config.projection_multiplier).max(0.0) as u64;

        InvestmentBreakdown {
            setup: CostItem {
                value: setup,
                description: "Initial configuration, tool setup, training".to_string(),
            },
            monthly_recurring: CostItem {
                value: monthly,
                description: "Monthly investment in campaigns, tools and optimisation".to_string(),
            },
            monthly_distribution: MonthlyDistribution {
                paid_campaigns: monthly * PAID_CAMPAIGNS_PCT / 100,
                tools_software: monthly * TOOLS_SOFTWARE_PCT / 100,
                content_creative: monthly * CONTENT_CREATIVE_PCT / 100,
            },
            total_6_months: total,
            projected_roi: format_currency(projected),
        }
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn executive_summary(profile: &ClientProfile, analysis: &ClientAnalysis) -> String {
    let scores = &analysis.scores;
    let challenges = if profile.challenges.is_empty() {
        "Sustainable growth".to_string()
    } else {
        profile
            .challenges
            .iter()
            .take(SUMMARY_CHALLENGES)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Based on a detailed analysis of the profile of **{}**, we identified significant \
         opportunities to improve results in the **{}** sector.\n\n",
        or_default(&profile.name, "Client"),
        or_default(profile.sector.as_str(), "Specific sector"),
    ));
    out.push_str("**Current Situation:**\n");
    out.push_str(&format!("- Main challenges: {}\n", challenges));
    out.push_str(&format!(
        "- Available budget: {}\n",
        or_default(profile.budget.as_str(), "To be defined")
    ));
    out.push_str(&format!(
        "- Primary objective: {}\n\n",
        or_default(profile.primary_objective.as_str(), "Growth")
    ));
    out.push_str("**Our Recommendation:**\n");
    out.push_str(&format!("- Potential score: {:.1}/10\n", scores.potential_score));
    out.push_str(&format!("- Projected ROI: {}\n", scores.roi_projection));
    out.push_str(&format!("- Time to results: {}\n", scores.time_to_results));
    out.push_str(&format!("- Success probability: {}\n\n", scores.success_probability));
    out.push_str(
        "This strategic plan was built around the needs identified above to maximise the \
         return on investment.",
    );
    out
}

fn sector_strengths(sector: &Sector) -> &'static [&'static str] {
    match sector {
        Sector::CommercialRepresentation => &[
            "Established relationships with B2B clients",
            "Experience across multiple sales channels",
            "Deep knowledge of complex sales cycles",
            "Network of contacts in the sector",
        ],
        Sector::Ecommerce => &[
            "Digital operation already in place",
            "Ability to scale quickly",
            "Customer behaviour data available",
            "Flexibility to test new strategies",
        ],
        Sector::Consulting => &[
            "Recognised market expertise",
            "Close client relationships",
            "High average ticket",
            "Potential for recurring revenue",
        ],
        _ => &[
            "Consolidated market position",
            "Operational experience",
            "Established customer base",
        ],
    }
}

fn competition_summary(sector: &Sector) -> &'static str {
    match sector {
        Sector::CommercialRepresentation => {
            "Medium competition, with room to differentiate through technical specialisation \
             and relationships."
        }
        Sector::Ecommerce => {
            "High competition; focus on a specific niche and a differentiated customer experience."
        }
        Sector::Consulting => {
            "Expertise-driven competition; opportunity through content marketing and thought \
             leadership."
        }
        _ => "A detailed competitive analysis will be carried out during implementation.",
    }
}

fn bullets<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(|item| format!("- {}\n", item))
        .collect()
}

fn situation_analysis(profile: &ClientProfile, analysis: &ClientAnalysis) -> String {
    let opportunities = analysis
        .insights
        .iter()
        .filter(|i| i.category == InsightCategory::Opportunity)
        .take(SITUATION_OPPORTUNITIES)
        .map(|i| i.description.as_str());
    let recommendations = analysis
        .recommendations
        .iter()
        .take(SITUATION_RECOMMENDATIONS)
        .map(String::as_str);

    let mut out = String::new();
    out.push_str("**Identified Strengths:**\n");
    out.push_str(&bullets(sector_strengths(&profile.sector).iter().copied()));
    out.push_str("\n**Main Challenges:**\n");
    out.push_str(&bullets(profile.challenges.iter().map(String::as_str)));
    out.push_str("\n**Market Opportunities:**\n");
    out.push_str(&bullets(opportunities));
    out.push_str("\n**Competitive Landscape:**\n");
    out.push_str(competition_summary(&profile.sector));
    out.push_str("\n\n**Priority Recommendations:**\n");
    out.push_str(&bullets(recommendations));
    out.trim_end().to_string()
}

fn strategy_investment(tier: &BudgetTier) -> &'static str {
    match tier {
        BudgetTier::UpTo5k => "$2,000 - $3,000",
        BudgetTier::From5kTo15k => "$5,000 - $8,000",
        BudgetTier::From15kTo50k => "$15,000 - $25,000",
        BudgetTier::From50kTo100k => "$30,000 - $50,000",
        BudgetTier::Above100k => "$40,000 - $65,000",
        BudgetTier::Unrecognized(_) => "$5,000 - $10,000",
    }
}

fn strategy_roi(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "200-300%",
        Priority::Medium => "150-200%",
        Priority::Low => "120-150%",
    }
}

fn strategy(profile: &ClientProfile, insight: &MarketingInsight) -> MarketingStrategy {
    MarketingStrategy {
        name: insight.title.clone(),
        description: insight.description.clone(),
        objective: format!(
            "Contribute to: {} through {}",
            or_default(profile.primary_objective.as_str(), "Growth"),
            insight.title.to_lowercase()
        ),
        implementation: format!(
            "Implementation in {} through a structured methodology with A/B tests and \
             continuous optimisation.",
            insight.timeframe
        ),
        estimated_investment: strategy_investment(&profile.budget).to_string(),
        expected_roi: strategy_roi(insight.priority).to_string(),
        timeframe: insight.timeframe.clone(),
        complexity: insight.complexity,
        success_metrics: vec![
            format!("Implementation of {}", insight.title),
            "Improvement in the key metric".to_string(),
            "ROI of the specific strategy".to_string(),
        ],
        risks: vec![
            format!("Implementation complexity: {}", insight.complexity),
            "Adjustments needed during execution".to_string(),
        ],
    }
}

/// One strategy per high-priority insight, at most four
pub fn strategies(profile: &ClientProfile, insights: &[MarketingInsight]) -> Vec<MarketingStrategy> {
    insights
        .iter()
        .filter(|i| i.priority == Priority::High)
        .take(MAX_STRATEGIES)
        .map(|i| strategy(profile, i))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Setup phase, one phase per scheduled strategy, then the closing phase
pub fn timeline(strategies: &[MarketingStrategy]) -> ImplementationTimeline {
    let mut phases = vec![TimelinePhase {
        phase: "Phase 1: Setup and Planning".to_string(),
        duration: "2 weeks".to_string(),
        activities: strings(&[
            "Initial tool configuration",
            "KPI and metric definition",
            "Tracking and analytics setup",
            "Team alignment",
        ]),
        deliverables: strings(&["Metrics dashboard", "Detailed plan", "Tool configuration"]),
    }];

    for strategy in strategies.iter().take(SCHEDULED_STRATEGIES) {
        phases.push(TimelinePhase {
            phase: format!("Phase {}: {}", phases.len() + 1, strategy.name),
            duration: strategy.timeframe.clone(),
            activities: vec![
                format!("Implementation of {}", strategy.name),
                "Tests and optimisation".to_string(),
                "Results monitoring".to_string(),
                "Data-driven adjustments".to_string(),
            ],
            deliverables: vec![
                format!("{} strategy live", strategy.name),
                "Results report".to_string(),
                "Optimisations implemented".to_string(),
            ],
        });
    }

    phases.push(TimelinePhase {
        phase: format!("Phase {}: Analysis and Expansion", phases.len() + 1),
        duration: "4 weeks".to_string(),
        activities: strings(&[
            "Full results analysis",
            "Optimisation of successful strategies",
            "Expansion planning",
            "Final report and next steps",
        ]),
        deliverables: strings(&[
            "Full ROI report",
            "Expansion plan",
            "Recommendations for the next cycle",
        ]),
    });

    let milestones = [
        (2, "Setup complete"),
        (8, "First strategy live"),
        (16, "All strategies implemented"),
        (24, "Final analysis and report"),
    ]
    .into_iter()
    .map(|(week, milestone)| Milestone {
        week,
        milestone: milestone.to_string(),
    })
    .collect();

    ImplementationTimeline {
        phases,
        total_duration: TOTAL_DURATION.to_string(),
        milestones,
    }
}

fn objective_metrics(profile: &ClientProfile) -> Vec<SuccessMetric> {
    let period = "6 months";
    let growth = format!("+{}%", profile.growth_target);
    match profile.primary_objective {
        Objective::IncreaseSales => vec![
            SuccessMetric::new("Revenue", growth, period),
            SuccessMetric::new("Average ticket", "+15%", period),
            SuccessMetric::new("Conversion rate", "+25%", period),
        ],
        Objective::GenerateLeads => vec![
            SuccessMetric::new("Qualified leads", growth, period),
            SuccessMetric::new("Cost per lead", "-20%", period),
            SuccessMetric::new("Lead conversion rate", "+30%", period),
        ],
        Objective::Other(_) => vec![
            SuccessMetric::new("Primary objective", growth, period),
            SuccessMetric::new("ROI", "180%", period),
            SuccessMetric::new("ROAS", "4:1", "3 months"),
        ],
    }
}

/// The analysis metrics (or objective defaults) followed by the global targets
pub fn success_metrics(profile: &ClientProfile, from_analysis: &[SuccessMetric]) -> Vec<SuccessMetric> {
    let mut metrics = if from_analysis.is_empty() {
        objective_metrics(profile)
    } else {
        from_analysis.to_vec()
    };

    metrics.push(SuccessMetric::new("Global ROI", "180%", "6 months"));
    metrics.push(SuccessMetric::new("ROAS", "4:1", "3 months"));
    metrics.push(SuccessMetric::new("CAC reduction", "20%", "6 months"));
    metrics
}

pub fn risk_assessment(from_analysis: &[Risk]) -> Vec<Risk> {
    if !from_analysis.is_empty() {
        return from_analysis.to_vec();
    }
    vec![
        Risk::new(
            "Fierce competition",
            "A competitive market can raise acquisition costs",
            "Differentiate through a unique value proposition",
        ),
        Risk::new(
            "Market changes",
            "Shifts in consumer preferences",
            "Continuous monitoring and quick adaptation",
        ),
        Risk::new(
            "Budget limitations",
            "Insufficient resources to compete on every channel",
            "Focus on channels with proven ROI",
        ),
    ]
}

/// Numbered next steps
pub fn next_steps(strategies: &[MarketingStrategy]) -> Vec<String> {
    let mut steps: Vec<String> = strings(&[
        "Proposal approval and implementation schedule",
        "Initial tool setup and analytics configuration",
        "Final KPI definition and monitoring system",
    ]);
    steps.extend(
        strategies
            .iter()
            .take(SCHEDULED_STRATEGIES)
            .map(|s| format!("Start implementation: {}", s.name)),
    );
    steps.push("First follow-up meeting (week 2)".to_string());
    steps.push("Initial results report (week 4)".to_string());

    steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_client;
    use crate::insights::Complexity;
    use crate::models::{CompanySize, Deadline};
    use chrono::TimeZone;

    fn profile() -> ClientProfile {
        ClientProfile {
            name: "acme industrial supplies ltd".into(),
            sector: Sector::CommercialRepresentation,
            company_size: CompanySize::Small,
            budget: BudgetTier::From5kTo15k,
            challenges: vec!["Low lead generation".into(), "Low conversion".into()],
            current_channels: vec!["Email marketing".into()],
            primary_objective: Objective::IncreaseSales,
            deadline: Deadline::SixToTwelveMonths,
            growth_target: 40,
            notes: String::new(),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1000), "$1,000");
        assert_eq!(format_currency(80_000), "$80,000");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
    }

    #[test]
    fn test_proposal_id() {
        assert_eq!(
            proposal_id("acme industrial supplies ltd", fixed_time()),
            "PROP-AIS-202403051407"
        );
        assert_eq!(proposal_id("", fixed_time()), "PROP--202403051407");
    }

    #[test]
    fn test_investment_breakdown() {
        let generator = ProposalGenerator::default();
        let inv = generator.investment(&BudgetTier::From5kTo15k);

        assert_eq!(inv.setup.value, 5000);
        assert_eq!(inv.monthly_recurring.value, 12_500);
        assert_eq!(inv.monthly_distribution.paid_campaigns, 7500);
        assert_eq!(inv.monthly_distribution.tools_software, 3125);
        assert_eq!(inv.monthly_distribution.content_creative, 1875);
        assert_eq!(inv.total_6_months, 80_000);
        assert_eq!(inv.projected_roi, "$144,000");

        let unknown = generator.investment(&BudgetTier::Unrecognized("?".into()));
        assert_eq!(unknown.total_6_months, 65_000);
    }

    #[test]
    fn test_generate_proposal() {
        let p = profile();
        let analysis = analyze_client(&p);
        let proposal = ProposalGenerator::default().generate_proposal_at(&p, &analysis, fixed_time());

        assert_eq!(proposal.proposal_id, "PROP-AIS-202403051407");
        assert_eq!(proposal.consultant_name, "Marketing Consultant");
        assert_eq!(
            proposal.total_investment,
            format_currency(proposal.investment_breakdown.total_6_months)
        );
        assert_eq!(proposal.expected_roi, analysis.scores.roi_projection);
        assert_eq!(proposal.project_duration, "24 weeks");
        assert_eq!(proposal.complexity_score, analysis.scores.complexity_score);

        // More than four high-priority insights; strategies are capped
        assert_eq!(proposal.strategies.len(), 4);
        assert!(proposal.executive_summary.contains("**acme industrial supplies ltd**"));
        assert!(proposal.executive_summary.contains("Main challenges: Low lead generation, Low conversion"));
        assert!(proposal.situation_analysis.contains("Established relationships with B2B clients"));
    }

    #[test]
    fn test_strategy_fields() {
        let p = profile();
        let insight = MarketingInsight::new(
            InsightCategory::Opportunity,
            Priority::High,
            "Explore LinkedIn",
            "Unused channel",
        )
        .with_complexity(Complexity::Medium)
        .with_timeframe("1-2 months");

        let s = strategy(&p, &insight);
        assert_eq!(s.objective, "Contribute to: Increase sales through explore linkedin");
        assert_eq!(s.estimated_investment, "$5,000 - $8,000");
        assert_eq!(s.expected_roi, "200-300%");
        assert_eq!(s.risks[0], "Implementation complexity: Medium");
        assert_eq!(s.success_metrics.len(), 3);
    }

    #[test]
    fn test_timeline_phases_and_milestones() {
        let p = profile();
        let insight = MarketingInsight::new(InsightCategory::Strategy, Priority::High, "Program", "d")
            .with_timeframe("3-4 months");
        let one = vec![strategy(&p, &insight)];

        let t = timeline(&one);
        let names: Vec<&str> = t.phases.iter().map(|ph| ph.phase.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Phase 1: Setup and Planning",
                "Phase 2: Program",
                "Phase 3: Analysis and Expansion"
            ]
        );
        assert_eq!(t.phases[1].duration, "3-4 months");
        let weeks: Vec<u32> = t.milestones.iter().map(|m| m.week).collect();
        assert_eq!(weeks, vec![2, 8, 16, 24]);

        let empty = timeline(&[]);
        assert_eq!(empty.phases.len(), 2);
        assert_eq!(empty.milestones.len(), 4);
    }

    #[test]
    fn test_next_steps_numbered_consecutively() {
        let p = profile();
        let many: Vec<_> = (0..4)
            .map(|i| {
                strategy(
                    &p,
                    &MarketingInsight::new(InsightCategory::Challenge, Priority::High, format!("S{}", i), ""),
                )
            })
            .collect();

        let steps = next_steps(&many);
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[3], "4. Start implementation: S0");
        assert_eq!(steps[5], "6. Start implementation: S2");
        assert_eq!(steps[6], "7. First follow-up meeting (week 2)");
        assert_eq!(steps[7], "8. Initial results report (week 4)");

        let none = next_steps(&[]);
        assert_eq!(none.len(), 5);
        assert_eq!(none[3], "4. First follow-up meeting (week 2)");
    }

    #[test]
    fn test_metric_and_risk_defaults() {
        let p = ClientProfile {
            growth_target: 30,
            ..Default::default()
        };
        let metrics = success_metrics(&p, &[]);
        assert_eq!(metrics.len(), 6);
        assert_eq!(metrics[0].metric, "Primary objective");
        assert_eq!(metrics[0].target, "+30%");
        assert_eq!(metrics[5].metric, "CAC reduction");

        let analysis = analyze_client(&profile());
        let metrics = success_metrics(&profile(), &analysis.success_metrics);
        assert_eq!(metrics.len(), analysis.success_metrics.len() + 3);

        assert_eq!(risk_assessment(&[]).len(), 3);
        let one = vec![Risk::new("r", "d", "m")];
        assert_eq!(risk_assessment(&one), one);
    }
}
