//! Insight Engine - runs the registered generators and merges their output

use std::cmp::Reverse;

use crate::knowledge::KnowledgeBase;
use crate::models::ClientProfile;

use super::types::{GeneratorKind, MarketingInsight};
use super::{
    BudgetOpportunityGenerator, ChallengeGenerator, ChannelOpportunityGenerator,
    CombinationGenerator,
};

/// Context provided to insight generators
pub struct AnalysisContext<'a> {
    pub profile: &'a ClientProfile,
    pub knowledge: &'a KnowledgeBase,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(profile: &'a ClientProfile, knowledge: &'a KnowledgeBase) -> Self {
        Self { profile, knowledge }
    }
}

/// An independent insight generator
///
/// Generators share no state, so they may run in any order.
pub trait InsightGenerator: Send + Sync {
    /// Unique identifier for this generator
    fn id(&self) -> GeneratorKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Produce insights for the profile
    fn generate(&self, ctx: &AnalysisContext<'_>) -> Vec<MarketingInsight>;
}

/// Runs generators and orders their insights
pub struct InsightEngine {
    generators: Vec<Box<dyn InsightGenerator>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in generators
    pub fn new() -> Self {
        let mut engine = Self { generators: vec![] };

        engine.register(Box::new(ChallengeGenerator));
        engine.register(Box::new(ChannelOpportunityGenerator));
        engine.register(Box::new(BudgetOpportunityGenerator));
        engine.register(Box::new(CombinationGenerator));

        engine
    }

    /// An engine with no generators
    pub fn empty() -> Self {
        Self { generators: vec![] }
    }

    pub fn register(&mut self, generator: Box<dyn InsightGenerator>) {
        self.generators.push(generator);
    }

    /// Run every generator, concatenate in registration order, then sort by
    /// priority (highest first) keeping generation order among equals
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Vec<MarketingInsight> {
        let mut all_insights = vec![];

        for generator in &self.generators {
            let insights = generator.generate(ctx);
            tracing::debug!(
                generator = generator.id().as_str(),
                count = insights.len(),
                "Insight generation complete"
            );
            all_insights.extend(insights);
        }

        // sort_by_key is stable
        all_insights.sort_by_key(|i| Reverse(i.priority.rank()));
        all_insights
    }

    pub fn generator_kinds(&self) -> Vec<GeneratorKind> {
        self.generators.iter().map(|g| g.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::{InsightCategory, Priority};
    use crate::models::{BudgetTier, Objective, Sector};

    struct Fixed(Vec<MarketingInsight>);

    impl InsightGenerator for Fixed {
        fn id(&self) -> GeneratorKind {
            GeneratorKind::Combination
        }

        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn generate(&self, _ctx: &AnalysisContext<'_>) -> Vec<MarketingInsight> {
            self.0.clone()
        }
    }

    fn insight(title: &str, priority: Priority) -> MarketingInsight {
        MarketingInsight::new(InsightCategory::Strategy, priority, title, "")
    }

    #[test]
    fn test_engine_creation() {
        let kinds = InsightEngine::new().generator_kinds();
        assert_eq!(
            kinds,
            vec![
                GeneratorKind::Challenge,
                GeneratorKind::ChannelOpportunity,
                GeneratorKind::BudgetOpportunity,
                GeneratorKind::Combination,
            ]
        );
    }

    #[test]
    fn test_sort_is_stable_by_priority() {
        let mut engine = InsightEngine::empty();
        engine.register(Box::new(Fixed(vec![
            insight("m1", Priority::Medium),
            insight("h1", Priority::High),
            insight("l1", Priority::Low),
        ])));
        engine.register(Box::new(Fixed(vec![
            insight("m2", Priority::Medium),
            insight("h2", Priority::High),
        ])));

        let profile = ClientProfile::default();
        let kb = KnowledgeBase::builtin();
        let titles: Vec<String> = engine
            .analyze_all(&AnalysisContext::new(&profile, &kb))
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["h1", "h2", "m1", "m2", "l1"]);
    }

    #[test]
    fn test_priorities_non_increasing() {
        let profile = ClientProfile {
            sector: Sector::Ecommerce,
            budget: BudgetTier::From15kTo50k,
            primary_objective: Objective::IncreaseSales,
            challenges: vec!["Low conversion".into(), "Seasonality".into()],
            current_channels: vec!["Marketplaces".into()],
            ..Default::default()
        };
        let kb = KnowledgeBase::builtin();
        let insights = InsightEngine::new().analyze_all(&AnalysisContext::new(&profile, &kb));

        assert!(!insights.is_empty());
        assert!(insights
            .windows(2)
            .all(|w| w[0].priority.rank() >= w[1].priority.rank()));
    }
}
