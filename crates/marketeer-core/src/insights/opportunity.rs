//! Opportunity Insights
//!
//! Two generators: sector channels the client does not use yet, and
//! opportunities unlocked by a specific budget tier.

use crate::models::BudgetTier;

use super::engine::{AnalysisContext, InsightGenerator};
use super::types::{Complexity, GeneratorKind, InsightCategory, MarketingInsight, Priority};

/// Channels whose absence is a high-priority gap
const PRIORITY_CHANNELS: [&str; 2] = ["Google Ads", "LinkedIn"];

pub struct ChannelOpportunityGenerator;

impl InsightGenerator for ChannelOpportunityGenerator {
    fn id(&self) -> GeneratorKind {
        GeneratorKind::ChannelOpportunity
    }

    fn name(&self) -> &'static str {
        "Channel Opportunities"
    }

    fn generate(&self, ctx: &AnalysisContext<'_>) -> Vec<MarketingInsight> {
        let profile = ctx.profile;

        ctx.knowledge
            .effective_channels(&profile.sector)
            .iter()
            .filter(|channel| !profile.has_channel(channel))
            .map(|channel| {
                let priority = if PRIORITY_CHANNELS.contains(&channel.as_str()) {
                    Priority::High
                } else {
                    Priority::Medium
                };
                MarketingInsight::new(
                    InsightCategory::Opportunity,
                    priority,
                    format!("Explore {}", channel),
                    format!("Unused channel with high potential for {}", profile.sector),
                )
                .with_impact("High")
                .with_complexity(Complexity::Medium)
                .with_timeframe("1-2 months")
            })
            .collect()
    }
}

pub struct BudgetOpportunityGenerator;

impl InsightGenerator for BudgetOpportunityGenerator {
    fn id(&self) -> GeneratorKind {
        GeneratorKind::BudgetOpportunity
    }

    fn name(&self) -> &'static str {
        "Budget Opportunities"
    }

    fn generate(&self, ctx: &AnalysisContext<'_>) -> Vec<MarketingInsight> {
        if ctx.profile.budget != BudgetTier::From15kTo50k {
            return vec![];
        }

        vec![MarketingInsight::new(
            InsightCategory::Budget,
            Priority::High,
            "Implement Advanced Automation",
            "Budget allows full marketing automation",
        )
        .with_impact("Very High")
        .with_complexity(Complexity::Medium)
        .with_timeframe("2-3 months")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::models::{ClientProfile, Sector};

    #[test]
    fn test_missing_channels_become_opportunities() {
        let profile = ClientProfile {
            sector: Sector::CommercialRepresentation,
            current_channels: vec!["Email marketing".into()],
            ..Default::default()
        };
        let kb = KnowledgeBase::builtin();
        let insights = ChannelOpportunityGenerator.generate(&AnalysisContext::new(&profile, &kb));

        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Explore LinkedIn", "Explore Sector events", "Explore Strategic partnerships"]
        );
        assert_eq!(insights[0].priority, Priority::High);
        assert_eq!(insights[1].priority, Priority::Medium);
        assert_eq!(
            insights[0].description,
            "Unused channel with high potential for Commercial Representation"
        );
    }

    #[test]
    fn test_unknown_sector_has_no_channel_opportunities() {
        let profile = ClientProfile {
            sector: Sector::Other("Retail".into()),
            ..Default::default()
        };
        let kb = KnowledgeBase::builtin();
        assert!(ChannelOpportunityGenerator
            .generate(&AnalysisContext::new(&profile, &kb))
            .is_empty());
    }

    #[test]
    fn test_budget_opportunity_only_for_mid_high_tier() {
        let kb = KnowledgeBase::builtin();
        for tier in BudgetTier::known() {
            let profile = ClientProfile {
                budget: tier.clone(),
                ..Default::default()
            };
            let insights = BudgetOpportunityGenerator.generate(&AnalysisContext::new(&profile, &kb));
            if tier == BudgetTier::From15kTo50k {
                assert_eq!(insights.len(), 1);
                assert_eq!(insights[0].title, "Implement Advanced Automation");
                assert_eq!(insights[0].estimated_impact, "Very High");
            } else {
                assert!(insights.is_empty());
            }
        }
    }
}
