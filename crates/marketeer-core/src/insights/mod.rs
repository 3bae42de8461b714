//! Insight Engine - rule-based marketing insights
//!
//! Independent generators each map a [`ClientProfile`](crate::models::ClientProfile)
//! plus the [`KnowledgeBase`](crate::knowledge::KnowledgeBase) to insight records.
//! The engine concatenates their output and sorts it by priority.
//!
//! ## Built-in Generators
//!
//! - **Challenge** - canned solutions for stated challenges
//! - **Channel Opportunity** - sector channels the client is missing
//! - **Budget Opportunity** - automation for the $15,001 - $50,000 tier
//! - **Combination** - sector and objective combinations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use marketeer_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let insights = engine.analyze_all(&AnalysisContext::new(&profile, &knowledge));
//! ```

pub mod challenge;
pub mod combination;
pub mod engine;
pub mod opportunity;
pub mod types;

pub use challenge::ChallengeGenerator;
pub use combination::CombinationGenerator;
pub use engine::{AnalysisContext, InsightEngine, InsightGenerator};
pub use opportunity::{BudgetOpportunityGenerator, ChannelOpportunityGenerator};
pub use types::{Complexity, GeneratorKind, InsightCategory, MarketingInsight, Priority};
