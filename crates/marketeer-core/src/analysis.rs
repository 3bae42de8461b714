//! Client analysis
//!
//! [`MarketingAnalysisEngine`] runs the full pipeline for one profile:
//! sector, budget and competitive analyses, the insight generators, scoring,
//! recommendations, risks and success metrics.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::insights::{AnalysisContext, InsightEngine, MarketingInsight, Priority};
use crate::knowledge::{KnowledgeBase, SectorBenchmarks};
use crate::models::{BudgetTier, ClientProfile, Deadline, Objective, Sector};
use crate::scoring::ScoreSet;

const MAX_RECOMMENDATIONS: usize = 5;
const TOP_INSIGHT_RECOMMENDATIONS: usize = 3;
const FOCUS_RECOMMENDATIONS: usize = 2;
/// Fewer current channels than this leaves room to expand
const CHANNEL_EXPANSION_THRESHOLD: usize = 3;

const DIFFERENTIATION_STRATEGIES: [&str; 4] = [
    "Niche specialisation",
    "Personalised service",
    "Superior customer experience",
    "Competitive price with added value",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorAnalysis {
    pub characteristics: Vec<String>,
    pub typical_challenges: Vec<String>,
    pub opportunities: Vec<String>,
    pub recommended_channels: Vec<String>,
    pub benchmarks: Option<SectorBenchmarks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetShare {
    pub item: String,
    pub share: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAnalysis {
    pub recommended_focus: Vec<String>,
    pub limitations: Vec<String>,
    /// ROI range, or "Not defined" for tiers without a strategy
    pub expected_roi: String,
    pub suggested_distribution: Vec<BudgetShare>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionIntensity {
    Medium,
    High,
    VeryHigh,
}

impl CompetitionIntensity {
    pub fn for_sector(sector: &Sector) -> Self {
        match sector {
            Sector::Ecommerce | Sector::Consulting => Self::High,
            Sector::Technology => Self::VeryHigh,
            Sector::CommercialRepresentation | Sector::Other(_) => Self::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for CompetitionIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAnalysis {
    pub intensity: CompetitionIntensity,
    pub competitor_channels: Vec<String>,
    pub competitive_advantages: Vec<String>,
    pub differentiation_strategies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub risk: String,
    pub description: String,
    pub mitigation: String,
}

impl Risk {
    pub fn new(
        risk: impl Into<String>,
        description: impl Into<String>,
        mitigation: impl Into<String>,
    ) -> Self {
        Self {
            risk: risk.into(),
            description: description.into(),
            mitigation: mitigation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessMetric {
    pub metric: String,
    pub target: String,
    pub period: String,
}

impl SuccessMetric {
    pub fn new(
        metric: impl Into<String>,
        target: impl Into<String>,
        period: impl Into<String>,
    ) -> Self {
        Self {
            metric: metric.into(),
            target: target.into(),
            period: period.into(),
        }
    }
}

/// Everything derived from one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientAnalysis {
    pub profile: ClientProfile,
    pub sector_analysis: SectorAnalysis,
    pub budget_analysis: BudgetAnalysis,
    pub competitive_analysis: CompetitiveAnalysis,
    /// Sorted by priority, highest first
    pub insights: Vec<MarketingInsight>,
    pub scores: ScoreSet,
    pub recommendations: Vec<String>,
    pub risk_assessment: Vec<Risk>,
    pub success_metrics: Vec<SuccessMetric>,
}

impl ClientAnalysis {
    /// High-priority insights in order
    pub fn high_priority_insights(&self) -> impl Iterator<Item = &MarketingInsight> {
        self.insights
            .iter()
            .filter(|i| i.priority == Priority::High)
    }
}

/// Owns the knowledge base and insight generators
pub struct MarketingAnalysisEngine {
    knowledge: KnowledgeBase,
    insights: InsightEngine,
}

impl Default for MarketingAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketingAnalysisEngine {
    pub fn new() -> Self {
        Self::with_knowledge(KnowledgeBase::builtin())
    }

    pub fn with_knowledge(knowledge: KnowledgeBase) -> Self {
        Self {
            knowledge,
            insights: InsightEngine::new(),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Full analysis of one profile
    pub fn analyze(&self, profile: &ClientProfile) -> ClientAnalysis {
        let ctx = AnalysisContext::new(profile, &self.knowledge);
        let insights = self.insights.analyze_all(&ctx);
        let scores = ScoreSet::compute(profile, &insights, &self.knowledge);

        let analysis = ClientAnalysis {
            profile: profile.clone(),
            sector_analysis: self.sector_analysis(profile),
            budget_analysis: self.budget_analysis(profile),
            competitive_analysis: competitive_analysis(profile),
            recommendations: self.recommendations(profile, &insights),
            risk_assessment: assess_risks(profile),
            success_metrics: success_metrics(profile),
            insights,
            scores,
        };

        info!(
            client = %profile.name,
            insights = analysis.insights.len(),
            potential = analysis.scores.potential_score,
            priority = %analysis.scores.priority,
            "Client analysis complete"
        );
        analysis
    }

    pub fn sector_analysis(&self, profile: &ClientProfile) -> SectorAnalysis {
        match self.knowledge.sector(&profile.sector) {
            Some(sector) => SectorAnalysis {
                characteristics: sector.characteristics.clone(),
                typical_challenges: sector.common_challenges.clone(),
                opportunities: sector.opportunities.clone(),
                recommended_channels: sector.effective_channels.clone(),
                benchmarks: sector.benchmarks.clone(),
            },
            None => SectorAnalysis::default(),
        }
    }

    pub fn budget_analysis(&self, profile: &ClientProfile) -> BudgetAnalysis {
        let strategy = self.knowledge.budget(&profile.budget);
        BudgetAnalysis {
            recommended_focus: strategy.map(|s| s.focus.clone()).unwrap_or_default(),
            limitations: strategy.map(|s| s.limitations.clone()).unwrap_or_default(),
            expected_roi: strategy
                .map(|s| s.expected_roi.clone())
                .unwrap_or_else(|| "Not defined".to_string()),
            suggested_distribution: suggested_distribution(&profile.budget),
        }
    }

    /// Top high-priority insights, then budget focus areas; at most five
    pub fn recommendations(
        &self,
        profile: &ClientProfile,
        insights: &[MarketingInsight],
    ) -> Vec<String> {
        let mut recommendations: Vec<String> = insights
            .iter()
            .filter(|i| i.priority == Priority::High)
            .take(TOP_INSIGHT_RECOMMENDATIONS)
            .map(|i| format!("{}: {}", i.title, i.description))
            .collect();

        if let Some(strategy) = self.knowledge.budget(&profile.budget) {
            recommendations.extend(
                strategy
                    .focus
                    .iter()
                    .take(FOCUS_RECOMMENDATIONS)
                    .map(|area| format!("Prioritize investment in {}", area)),
            );
        }

        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }
}

/// Analyse a profile with the built-in knowledge base
pub fn analyze_client(profile: &ClientProfile) -> ClientAnalysis {
    MarketingAnalysisEngine::new().analyze(profile)
}

fn suggested_distribution(tier: &BudgetTier) -> Vec<BudgetShare> {
    if *tier != BudgetTier::From5kTo15k {
        return vec![];
    }
    [
        ("Paid campaigns", "60%"),
        ("Tools/Software", "25%"),
        ("Content/Creative", "15%"),
    ]
    .into_iter()
    .map(|(item, share)| BudgetShare {
        item: item.to_string(),
        share: share.to_string(),
    })
    .collect()
}

pub fn competitive_analysis(profile: &ClientProfile) -> CompetitiveAnalysis {
    let competitor_channels: &[&str] = match profile.sector {
        Sector::Ecommerce => &["Google Ads", "Facebook", "Instagram"],
        Sector::CommercialRepresentation => &["LinkedIn", "Email", "Events"],
        _ => &["Google Ads", "Social media"],
    };

    let mut competitive_advantages = vec![];
    if profile.current_channels.len() < CHANNEL_EXPANSION_THRESHOLD {
        competitive_advantages.push("Room to expand channels".to_string());
    }
    if profile.company_size.is_small() {
        competitive_advantages.push("Small-company agility and flexibility".to_string());
    }

    CompetitiveAnalysis {
        intensity: CompetitionIntensity::for_sector(&profile.sector),
        competitor_channels: competitor_channels.iter().map(|c| c.to_string()).collect(),
        competitive_advantages,
        differentiation_strategies: DIFFERENTIATION_STRATEGIES
            .iter()
            .take(2)
            .map(|s| s.to_string())
            .collect(),
    }
}

pub fn assess_risks(profile: &ClientProfile) -> Vec<Risk> {
    let mut risks = vec![];

    if profile.budget == BudgetTier::UpTo5k {
        risks.push(Risk::new(
            "Limited budget",
            "Insufficient resources for competitive paid campaigns",
            "Focus on organic and low-cost strategies",
        ));
    }

    if profile.sector == Sector::Ecommerce {
        risks.push(Risk::new(
            "High competition",
            "Saturated market with high acquisition costs",
            "Differentiate through a specific niche",
        ));
    }

    if profile.deadline == Deadline::OneToThreeMonths {
        risks.push(Risk::new(
            "Short deadline",
            "Results expected on a very tight timeline",
            "Focus on quick-impact strategies",
        ));
    }

    risks
}

/// Objective-specific targets over the client's deadline, then the global ROI/ROAS targets
pub fn success_metrics(profile: &ClientProfile) -> Vec<SuccessMetric> {
    let period = profile.deadline.as_str();
    let growth = format!("+{}%", profile.growth_target);

    let mut metrics = match profile.primary_objective {
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
        Objective::Other(_) => vec![],
    };

    metrics.push(SuccessMetric::new("ROI", "180%", "6 months"));
    metrics.push(SuccessMetric::new("ROAS", "4:1", "3 months"));
    metrics
}
