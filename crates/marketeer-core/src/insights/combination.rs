//! Combination Insight
//!
//! Strategies that only apply to a particular sector and objective together.

use crate::models::{Objective, Sector};

use super::engine::{AnalysisContext, InsightGenerator};
use super::types::{Complexity, GeneratorKind, InsightCategory, MarketingInsight, Priority};

pub struct CombinationGenerator;

impl InsightGenerator for CombinationGenerator {
    fn id(&self) -> GeneratorKind {
        GeneratorKind::Combination
    }

    fn name(&self) -> &'static str {
        "Sector and Objective Combinations"
    }

    fn generate(&self, ctx: &AnalysisContext<'_>) -> Vec<MarketingInsight> {
        let profile = ctx.profile;
        let mut insights = vec![];

        if profile.sector == Sector::CommercialRepresentation
            && profile.primary_objective == Objective::IncreaseSales
        {
            insights.push(
                MarketingInsight::new(
                    InsightCategory::Strategy,
                    Priority::High,
                    "B2B Relationship Program",
                    "Implement a structured relationship program for complex sales",
                )
                .with_impact("High")
                .with_complexity(Complexity::Medium)
                .with_timeframe("3-4 months"),
            );
        }

        insights
    }
}
