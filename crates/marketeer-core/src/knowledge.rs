//! Marketing knowledge base
//!
//! Read-only reference data: per-sector characteristics and channels, canned
//! solutions for common challenges, and per-budget-tier strategy. Lookups for
//! values that are not in the base return `None`; callers fall back to empty
//! or default output.

use serde::{Deserialize, Serialize};

use crate::models::{BudgetTier, Sector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorBenchmarks {
    pub conversion_rate: String,
    pub sales_cycle: String,
    pub average_deal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorKnowledge {
    pub sector: Sector,
    pub characteristics: Vec<String>,
    pub common_challenges: Vec<String>,
    pub opportunities: Vec<String>,
    /// Channels that work well in this sector
    pub effective_channels: Vec<String>,
    pub benchmarks: Option<SectorBenchmarks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeSolution {
    pub challenge: String,
    pub solutions: Vec<String>,
    pub tools: Vec<String>,
    pub average_investment: String,
    pub time_to_results: String,
    /// Challenges in this set produce high-priority insights
    pub high_priority: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStrategy {
    pub tier: BudgetTier,
    pub focus: Vec<String>,
    pub limitations: Vec<String>,
    pub expected_roi: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub sectors: Vec<SectorKnowledge>,
    pub challenges: Vec<ChallengeSolution>,
    pub budgets: Vec<BudgetStrategy>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl KnowledgeBase {
    /// The built-in reference data
    pub fn builtin() -> Self {
        Self {
            sectors: vec![
                SectorKnowledge {
                    sector: Sector::CommercialRepresentation,
                    characteristics: strings(&[
                        "Long sales cycle",
                        "B2B relationships",
                        "Multiple products/suppliers",
                        "Reliance on networking",
                    ]),
                    common_challenges: strings(&[
                        "Hard to differentiate",
                        "Managing multiple product lines",
                        "Competition with direct sales",
                        "Need for technical credibility",
                    ]),
                    opportunities: strings(&[
                        "Process automation",
                        "Relationship marketing",
                        "Specialised educational content",
                        "Smart lead scoring",
                    ]),
                    effective_channels: strings(&[
                        "LinkedIn",
                        "Email marketing",
                        "Sector events",
                        "Strategic partnerships",
                    ]),
                    benchmarks: Some(SectorBenchmarks {
                        conversion_rate: "2-5%".to_string(),
                        sales_cycle: "3-6 months".to_string(),
                        average_deal: "$50k-500k".to_string(),
                    }),
                },
                SectorKnowledge {
                    sector: Sector::Ecommerce,
                    characteristics: strings(&[
                        "Short sales cycle",
                        "B2C relationships",
                        "High price competition",
                        "Reliance on digital traffic",
                    ]),
                    common_challenges: strings(&[
                        "Abandoned carts",
                        "High acquisition cost",
                        "Seasonality",
                        "Logistics and delivery",
                    ]),
                    opportunities: strings(&[
                        "Advanced remarketing",
                        "Personalised experience",
                        "Loyalty programme",
                        "Social commerce",
                    ]),
                    effective_channels: strings(&[
                        "Google Ads",
                        "Facebook/Instagram",
                        "Marketplaces",
                        "Influencers",
                    ]),
                    benchmarks: Some(SectorBenchmarks {
                        conversion_rate: "1-3%".to_string(),
                        sales_cycle: "1-7 days".to_string(),
                        average_deal: "$100-2000".to_string(),
                    }),
                },
            ],
            challenges: vec![
                ChallengeSolution {
                    challenge: "Low lead generation".to_string(),
                    solutions: strings(&[
                        "SEO optimisation",
                        "Lead magnets",
                        "Segmented paid campaigns",
                        "Viral content",
                    ]),
                    tools: strings(&["HubSpot", "RD Station", "Google Ads", "Facebook Ads"]),
                    average_investment: "$5,000 - $20,000/month".to_string(),
                    time_to_results: "2-4 months".to_string(),
                    high_priority: true,
                },
                ChallengeSolution {
                    challenge: "Low conversion".to_string(),
                    solutions: strings(&[
                        "A/B testing",
                        "Landing page optimisation",
                        "Remarketing",
                        "Social proof",
                    ]),
                    tools: strings(&["Hotjar", "Optimizely", "Google Optimize", "Unbounce"]),
                    average_investment: "$3,000 - $15,000/month".to_string(),
                    time_to_results: "1-3 months".to_string(),
                    high_priority: true,
                },
            ],
            budgets: vec![
                BudgetStrategy {
                    tier: BudgetTier::UpTo5k,
                    focus: strings(&["SEO", "Email marketing", "Organic social media"]),
                    limitations: strings(&["Little paid traffic", "Slower results"]),
                    expected_roi: "120-150%".to_string(),
                },
                BudgetStrategy {
                    tier: BudgetTier::From5kTo15k,
                    focus: strings(&["Google Ads", "Facebook Ads", "Content marketing"]),
                    limitations: strings(&["Limited competitiveness", "Basic segmentation"]),
                    expected_roi: "150-200%".to_string(),
                },
                BudgetStrategy {
                    tier: BudgetTier::From15kTo50k,
                    focus: strings(&["Full automation", "Multiple channels", "Personalisation"]),
                    limitations: strings(&["Needs specialised management"]),
                    expected_roi: "180-250%".to_string(),
                },
            ],
        }
    }

    pub fn sector(&self, sector: &Sector) -> Option<&SectorKnowledge> {
        self.sectors.iter().find(|s| &s.sector == sector)
    }

    pub fn challenge(&self, challenge: &str) -> Option<&ChallengeSolution> {
        self.challenges.iter().find(|c| c.challenge == challenge)
    }

    pub fn budget(&self, tier: &BudgetTier) -> Option<&BudgetStrategy> {
        self.budgets.iter().find(|b| &b.tier == tier)
    }

    /// Recommended channels for a sector (empty for unknown sectors)
    pub fn effective_channels(&self, sector: &Sector) -> &[String] {
        self.sector(sector)
            .map(|s| s.effective_channels.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}
