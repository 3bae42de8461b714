//! Domain models for Marketeer
//!
//! Intake answers arrive as free text. Every categorical field is parsed into a
//! closed enum with a catch-all variant that keeps the raw text, so that an
//! unrecognized value is carried through the pipeline and simply fails to match
//! any knowledge-base entry.

use serde::{Deserialize, Serialize};

/// Generates label parsing, `Display` and string serde for a categorical enum.
/// The variant named in parentheses carries unrecognized input verbatim.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($other:ident) {
            $( $variant:ident => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $variant, )+
            $other(String),
        }

        impl $name {
            /// Match an exact (trimmed) label; anything else is kept as-is
            pub fn from_label(label: &str) -> Self {
                match label.trim() {
                    $( $label => Self::$variant, )+
                    other => Self::$other(other.to_string()),
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::$other(raw) => raw.as_str(),
                }
            }

            /// Whether the label matched a known value
            pub fn is_recognized(&self) -> bool {
                !matches!(self, Self::$other(_))
            }

            /// All recognized values in declaration order
            pub fn known() -> Vec<Self> {
                vec![$( Self::$variant, )+]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$other(String::new())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from_label(&s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_label(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

labelled_enum! {
    /// Business sector of the client
    pub enum Sector (Other) {
        CommercialRepresentation => "Commercial Representation",
        Ecommerce => "E-commerce/Online Retail",
        Consulting => "Consulting/Services",
        Technology => "Technology/Software",
    }
}

labelled_enum! {
    /// Monthly marketing budget tier, ordered from lowest to highest
    pub enum BudgetTier (Unrecognized) {
        UpTo5k => "Up to $5,000",
        From5kTo15k => "$5,001 - $15,000",
        From15kTo50k => "$15,001 - $50,000",
        From50kTo100k => "$50,001 - $100,000",
        Above100k => "Above $100,000",
    }
}

impl BudgetTier {
    /// Position in the fixed tier ordering (1 = lowest); `None` if unrecognized
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::UpTo5k => Some(1),
            Self::From5kTo15k => Some(2),
            Self::From15kTo50k => Some(3),
            Self::From50kTo100k => Some(4),
            Self::Above100k => Some(5),
            Self::Unrecognized(_) => None,
        }
    }

    /// The lowest tier
    pub fn is_lowest(&self) -> bool {
        matches!(self, Self::UpTo5k)
    }

    /// The two highest tiers the fast time-to-results estimate applies to
    pub fn is_top_tier(&self) -> bool {
        matches!(self, Self::From15kTo50k | Self::Above100k)
    }
}

labelled_enum! {
    /// Deadline the client expects results within
    pub enum Deadline (Other) {
        OneToThreeMonths => "1-3 months",
        ThreeToSixMonths => "3-6 months",
        SixToTwelveMonths => "6-12 months",
        TwelvePlusMonths => "12+ months",
    }
}

impl Deadline {
    /// Long deadlines earn scoring bonuses
    pub fn is_long(&self) -> bool {
        matches!(self, Self::SixToTwelveMonths | Self::TwelvePlusMonths)
    }
}

labelled_enum! {
    /// Primary objective of the engagement
    pub enum Objective (Other) {
        IncreaseSales => "Increase sales",
        GenerateLeads => "Generate more leads",
    }
}

labelled_enum! {
    /// Company size tier
    pub enum CompanySize (Other) {
        Microenterprise => "Microenterprise",
        Small => "Small",
        Medium => "Medium",
        Large => "Large",
    }
}

impl CompanySize {
    pub fn is_small(&self) -> bool {
        matches!(self, Self::Microenterprise | Self::Small)
    }
}

/// Immutable snapshot of one client's intake answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    pub sector: Sector,
    pub company_size: CompanySize,
    pub budget: BudgetTier,
    /// Unique, order-irrelevant
    pub challenges: Vec<String>,
    pub current_channels: Vec<String>,
    pub primary_objective: Objective,
    pub deadline: Deadline,
    /// Growth target in percent
    pub growth_target: i64,
    pub notes: String,
}

impl ClientProfile {
    pub fn has_channel(&self, channel: &str) -> bool {
        self.current_channels.iter().any(|c| c == channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_tier_labels_round_trip() {
        for tier in BudgetTier::known() {
            assert_eq!(BudgetTier::from_label(tier.as_str()), tier);
        }
    }

    #[test]
    fn test_budget_tier_ranks_increase() {
        let ranks: Vec<u8> = BudgetTier::known().iter().filter_map(|t| t.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_unrecognized_budget_keeps_raw_text() {
        let tier = BudgetTier::from_label("R$ 5.001 - R$ 15.000");
        assert_eq!(tier, BudgetTier::Unrecognized("R$ 5.001 - R$ 15.000".into()));
        assert!(!tier.is_recognized());
        assert_eq!(tier.rank(), None);
        assert_eq!(tier.to_string(), "R$ 5.001 - R$ 15.000");
    }

    #[test]
    fn test_labels_are_trimmed_but_case_sensitive() {
        assert_eq!(Sector::from_label("  Consulting/Services "), Sector::Consulting);
        assert!(!Sector::from_label("consulting/services").is_recognized());
    }

    #[test]
    fn test_deadline_is_long() {
        assert!(Deadline::SixToTwelveMonths.is_long());
        assert!(Deadline::TwelvePlusMonths.is_long());
        assert!(!Deadline::OneToThreeMonths.is_long());
        assert!(!Deadline::default().is_long());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&BudgetTier::Above100k).unwrap();
        assert_eq!(json, "\"Above $100,000\"");

        let sector: Sector = serde_json::from_str("\"Retail\"").unwrap();
        assert_eq!(sector, Sector::Other("Retail".into()));
    }
}
