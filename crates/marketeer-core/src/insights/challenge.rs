//! Challenge Insight
//!
//! Maps each stated challenge with a known solution to an insight. Challenges
//! the knowledge base does not cover produce nothing.

use super::engine::{AnalysisContext, InsightGenerator};
use super::types::{Complexity, GeneratorKind, InsightCategory, MarketingInsight, Priority};

/// Number of solutions quoted in the insight description
const QUOTED_SOLUTIONS: usize = 2;

pub struct ChallengeGenerator;

impl InsightGenerator for ChallengeGenerator {
    fn id(&self) -> GeneratorKind {
        GeneratorKind::Challenge
    }

    fn name(&self) -> &'static str {
        "Challenge Solutions"
    }

    fn generate(&self, ctx: &AnalysisContext<'_>) -> Vec<MarketingInsight> {
        ctx.profile
            .challenges
            .iter()
            .filter_map(|challenge| {
                let solution = ctx.knowledge.challenge(challenge)?;
                let priority = if solution.high_priority {
                    Priority::High
                } else {
                    Priority::Medium
                };
                let quoted: Vec<&str> = solution
                    .solutions
                    .iter()
                    .take(QUOTED_SOLUTIONS)
                    .map(String::as_str)
                    .collect();

                Some(
                    MarketingInsight::new(
                        InsightCategory::Challenge,
                        priority,
                        format!("Solution for: {}", challenge),
                        format!("Implement: {}", quoted.join(", ")),
                    )
                    .with_impact(solution.time_to_results.clone())
                    .with_complexity(Complexity::from_count(solution.tools.len()))
                    .with_timeframe(solution.time_to_results.clone()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::models::ClientProfile;

    #[test]
    fn test_known_challenges_only() {
        let profile = ClientProfile {
            challenges: vec![
                "Low lead generation".into(),
                "Seasonality".into(),
                "Low conversion".into(),
            ],
            ..Default::default()
        };
        let kb = KnowledgeBase::builtin();
        let insights = ChallengeGenerator.generate(&AnalysisContext::new(&profile, &kb));

        assert_eq!(insights.len(), 2);
        let first = &insights[0];
        assert_eq!(first.title, "Solution for: Low lead generation");
        assert_eq!(first.description, "Implement: SEO optimisation, Lead magnets");
        assert_eq!(first.priority, Priority::High);
        assert_eq!(first.complexity, Complexity::High);
        assert_eq!(first.estimated_impact, "2-4 months");
        assert_eq!(first.timeframe, "2-4 months");
        assert_eq!(insights[1].title, "Solution for: Low conversion");
    }

    #[test]
    fn test_non_priority_challenge_is_medium() {
        let mut kb = KnowledgeBase::builtin();
        kb.challenges[0].high_priority = false;
        kb.challenges[0].tools.truncate(2);

        let profile = ClientProfile {
            challenges: vec!["Low lead generation".into()],
            ..Default::default()
        };
        let insights = ChallengeGenerator.generate(&AnalysisContext::new(&profile, &kb));
        assert_eq!(insights[0].priority, Priority::Medium);
        assert_eq!(insights[0].complexity, Complexity::Medium);
    }
}
