//! Proposal assembly and rendering
//!
//! A proposal turns a [`ClientAnalysis`](crate::analysis::ClientAnalysis) into a
//! client-facing document: strategies from the high-priority insights, a
//! template timeline, an investment breakdown and next steps.

mod generator;
mod render;
mod types;

pub use generator::{
    format_currency, monthly_reference, next_steps, proposal_id, risk_assessment, strategies,
    success_metrics, timeline, ProposalGenerator,
};
pub use render::{render_markdown, render_summary};
pub use types::{
    CostItem, ImplementationTimeline, InvestmentBreakdown, MarketingProposal, MarketingStrategy,
    Milestone, MonthlyDistribution, TimelinePhase,
};
