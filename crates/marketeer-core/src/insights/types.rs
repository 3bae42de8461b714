//! Core types for the insight generators

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registered insight generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Canned solutions for the client's stated challenges
    Challenge,
    /// Sector channels the client is not using yet
    ChannelOpportunity,
    /// Opportunities unlocked by the budget tier
    BudgetOpportunity,
    /// Sector and objective combinations
    Combination,
}

impl GeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::Challenge => "challenge",
            GeneratorKind::ChannelOpportunity => "channel_opportunity",
            GeneratorKind::BudgetOpportunity => "budget_opportunity",
            GeneratorKind::Combination => "combination",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "challenge" => Ok(GeneratorKind::Challenge),
            "channel_opportunity" => Ok(GeneratorKind::ChannelOpportunity),
            "budget_opportunity" => Ok(GeneratorKind::BudgetOpportunity),
            "combination" => Ok(GeneratorKind::Combination),
            _ => Err(format!("Unknown insight generator: {}", s)),
        }
    }
}

/// Tag describing where an insight came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Challenge,
    Opportunity,
    Budget,
    Strategy,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::Challenge => "Challenge",
            InsightCategory::Opportunity => "Opportunity",
            InsightCategory::Budget => "Budget",
            InsightCategory::Strategy => "Strategy",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority of an insight or of the overall engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Numeric rank for sorting (higher = more important)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Implementation complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Complexity {
    High,
    Medium,
    Low,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::High => "High",
            Complexity::Medium => "Medium",
            Complexity::Low => "Low",
        }
    }

    /// Classify a count against the shared `> 3` / `> 1` cut-offs
    pub fn from_count(count: usize) -> Self {
        if count > 3 {
            Complexity::High
        } else if count > 1 {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Complexity::High),
            "medium" => Ok(Complexity::Medium),
            "low" => Ok(Complexity::Low),
            _ => Err(format!("Unknown complexity: {}", s)),
        }
    }
}

/// A generated recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingInsight {
    pub category: InsightCategory,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Free text, e.g. "High" or "2-4 months"
    pub estimated_impact: String,
    pub complexity: Complexity,
    /// Free text, e.g. "1-2 months"
    pub timeframe: String,
}

impl MarketingInsight {
    /// Create an insight with medium complexity and no impact/timeframe text
    pub fn new(
        category: InsightCategory,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            description: description.into(),
            priority,
            estimated_impact: String::new(),
            complexity: Complexity::Medium,
            timeframe: String::new(),
        }
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.estimated_impact = impact.into();
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = timeframe.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn test_complexity_from_count() {
        assert_eq!(Complexity::from_count(4), Complexity::High);
        assert_eq!(Complexity::from_count(3), Complexity::Medium);
        assert_eq!(Complexity::from_count(2), Complexity::Medium);
        assert_eq!(Complexity::from_count(1), Complexity::Low);
        assert_eq!(Complexity::from_count(0), Complexity::Low);
    }

    #[test]
    fn test_parse_round_trip() {
        for p in [Priority::High, Priority::Medium, Priority::Low] {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
        }
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(
            "channel_opportunity".parse::<GeneratorKind>().unwrap(),
            GeneratorKind::ChannelOpportunity
        );
    }

    #[test]
    fn test_serialized_labels_match_display() {
        for p in [Priority::High, Priority::Medium, Priority::Low] {
            assert_eq!(serde_json::to_value(p).unwrap(), p.to_string());
        }
        for c in [Complexity::High, Complexity::Medium, Complexity::Low] {
            assert_eq!(serde_json::to_value(c).unwrap(), c.to_string());
        }
        let parsed: Priority = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
    }

    #[test]
    fn test_builder() {
        let insight = MarketingInsight::new(InsightCategory::Opportunity, Priority::High, "t", "d")
            .with_impact("High")
            .with_complexity(Complexity::Low)
            .with_timeframe("1-2 months");
        assert_eq!(insight.estimated_impact, "High");
        assert_eq!(insight.complexity, Complexity::Low);
        assert_eq!(insight.timeframe, "1-2 months");
    }
}
