//! Marketeer Core Library
//!
//! Shared functionality for the Marketeer marketing analytics toolkit:
//! - Intake record parsing into typed client profiles
//! - Read-only marketing knowledge base
//! - Rule-based insight generators and scoring
//! - Proposal assembly with markdown rendering
//! - Descriptive statistics, correlation and outlier detection over CSV datasets

pub mod analysis;
pub mod config;
pub mod error;
pub mod insights;
pub mod knowledge;
pub mod models;
pub mod profile;
pub mod proposal;
pub mod scoring;
pub mod stats;

pub use analysis::{analyze_client, ClientAnalysis, MarketingAnalysisEngine};
pub use config::{AnalysisConfig, ProposalConfig, StatisticsConfig};
pub use error::{Error, Result};
pub use insights::{InsightEngine, MarketingInsight};
pub use knowledge::KnowledgeBase;
pub use models::{BudgetTier, ClientProfile, CompanySize, Deadline, Objective, Sector};
pub use profile::{build_profile, build_profile_from_map};
pub use proposal::{render_markdown, render_summary, MarketingProposal, ProposalGenerator};
pub use scoring::ScoreSet;
pub use stats::{CorrelationMethod, Dataset, DatasetAnalyzer, OutlierMethod};
