//! Scoring engine
//!
//! Deterministic formulas over a profile and its insights. Every score is
//! computed once per analysis.

use serde::{Deserialize, Serialize};

use crate::insights::{Complexity, MarketingInsight, Priority};
use crate::knowledge::KnowledgeBase;
use crate::models::{BudgetTier, ClientProfile};

/// Potential score when the budget tier is not in the table
const BASE_POTENTIAL: f64 = 5.0;
const MAX_POTENTIAL: f64 = 10.0;
const LONG_DEADLINE_BONUS: f64 = 0.5;
const PER_CHALLENGE_BONUS: f64 = 0.2;
const MAX_CHALLENGE_BONUS: f64 = 1.0;

/// ROI range quoted when the budget tier has no strategy entry
pub const DEFAULT_ROI_PROJECTION: &str = "150-180%";

const BASE_SUCCESS_PROBABILITY: u32 = 70;
const MAX_SUCCESS_PROBABILITY: u32 = 95;
/// At most this many challenges counts as a focused engagement
const FOCUSED_CHALLENGE_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    /// 0-10
    pub potential_score: f64,
    pub complexity_score: Complexity,
    pub roi_projection: String,
    pub priority: Priority,
    pub time_to_results: String,
    /// Percentage string, at most "95%"
    pub success_probability: String,
}

impl ScoreSet {
    pub fn compute(
        profile: &ClientProfile,
        insights: &[MarketingInsight],
        knowledge: &KnowledgeBase,
    ) -> Self {
        let potential_score = potential_score(profile);
        let complexity_score = complexity_score(insights);

        Self {
            potential_score,
            complexity_score,
            roi_projection: roi_projection(profile, knowledge),
            priority: overall_priority(potential_score, complexity_score),
            time_to_results: time_to_results(profile).to_string(),
            success_probability: format!("{}%", success_probability(profile)),
        }
    }
}

/// Starting score for a budget tier; replaces the base rather than adding to it
fn budget_potential(tier: &BudgetTier) -> Option<f64> {
    match tier {
        BudgetTier::UpTo5k => Some(6.0),
        BudgetTier::From5kTo15k => Some(7.5),
        BudgetTier::From15kTo50k => Some(9.0),
        BudgetTier::From50kTo100k => Some(9.5),
        BudgetTier::Above100k => Some(10.0),
        BudgetTier::Unrecognized(_) => None,
    }
}

pub fn potential_score(profile: &ClientProfile) -> f64 {
    let mut score = budget_potential(&profile.budget).unwrap_or(BASE_POTENTIAL);

    if profile.deadline.is_long() {
        score += LONG_DEADLINE_BONUS;
    }

    score += (profile.challenges.len() as f64 * PER_CHALLENGE_BONUS).min(MAX_CHALLENGE_BONUS);

    score.min(MAX_POTENTIAL)
}

/// Classify by the number of high-complexity insights
pub fn complexity_score(insights: &[MarketingInsight]) -> Complexity {
    let high = insights
        .iter()
        .filter(|i| i.complexity == Complexity::High)
        .count();
    Complexity::from_count(high)
}

pub fn roi_projection(profile: &ClientProfile, knowledge: &KnowledgeBase) -> String {
    knowledge
        .budget(&profile.budget)
        .map(|b| b.expected_roi.clone())
        .unwrap_or_else(|| DEFAULT_ROI_PROJECTION.to_string())
}

pub fn overall_priority(potential: f64, complexity: Complexity) -> Priority {
    if potential >= 8.0 && complexity != Complexity::High {
        Priority::High
    } else if potential >= 6.0 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

pub fn time_to_results(profile: &ClientProfile) -> &'static str {
    if profile.budget.is_top_tier() {
        "2-4 weeks"
    } else {
        "6-8 weeks"
    }
}

/// Success probability as a whole percentage
pub fn success_probability(profile: &ClientProfile) -> u32 {
    let mut score = BASE_SUCCESS_PROBABILITY;

    if profile.challenges.len() <= FOCUSED_CHALLENGE_COUNT {
        score += 10;
    }
    if profile.deadline.is_long() {
        score += 10;
    }
    if !profile.budget.is_lowest() {
        score += 10;
    }

    score.min(MAX_SUCCESS_PROBABILITY)
}
