//! Proposal document types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{Risk, SuccessMetric};
use crate::insights::Complexity;

/// One strategy derived from a high-priority insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingStrategy {
    pub name: String,
    pub description: String,
    pub objective: String,
    pub implementation: String,
    pub estimated_investment: String,
    pub expected_roi: String,
    pub timeframe: String,
    pub complexity: Complexity,
    pub success_metrics: Vec<String>,
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePhase {
    pub phase: String,
    pub duration: String,
    pub activities: Vec<String>,
    pub deliverables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub week: u32,
    pub milestone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationTimeline {
    pub phases: Vec<TimelinePhase>,
    pub total_duration: String,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    /// Whole dollars
    pub value: u64,
    pub description: String,
}

/// Monthly budget split, truncated to whole dollars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDistribution {
    pub paid_campaigns: u64,
    pub tools_software: u64,
    pub content_creative: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentBreakdown {
    pub setup: CostItem,
    pub monthly_recurring: CostItem,
    pub monthly_distribution: MonthlyDistribution,
    /// Six months of recurring spend plus setup
    pub total_6_months: u64,
    /// Currency string
    pub projected_roi: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingProposal {
    pub client_name: String,
    pub consultant_name: String,
    pub created_at: DateTime<Utc>,
    /// `PROP-{initials}-{YYYYMMDDHHMM}`; unique only to the minute
    pub proposal_id: String,
    pub executive_summary: String,
    pub situation_analysis: String,
    pub strategies: Vec<MarketingStrategy>,
    pub implementation_timeline: ImplementationTimeline,
    pub investment_breakdown: InvestmentBreakdown,
    pub success_metrics: Vec<SuccessMetric>,
    pub risk_assessment: Vec<Risk>,
    pub next_steps: Vec<String>,
    /// `total_6_months` as currency
    pub total_investment: String,
    pub expected_roi: String,
    pub project_duration: String,
    pub complexity_score: Complexity,
}
