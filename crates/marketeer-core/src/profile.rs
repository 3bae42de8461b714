//! Client profile builder
//!
//! Turns a raw intake record (a JSON object, as produced by a form or webhook)
//! into a [`ClientProfile`]. Missing keys default to empty values; nothing is
//! validated beyond the payload being an object.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{BudgetTier, ClientProfile, CompanySize, Deadline, Objective, Sector};

/// Build a profile from a raw intake payload
pub fn build_profile(raw: &Value) -> Result<ClientProfile> {
    let map = raw.as_object().ok_or_else(|| {
        Error::InvalidData(format!("intake payload must be a JSON object, got {}", kind(raw)))
    })?;
    Ok(build_profile_from_map(map))
}

/// Build a profile from an intake object
pub fn build_profile_from_map(map: &Map<String, Value>) -> ClientProfile {
    let profile = ClientProfile {
        name: text(map, "name"),
        sector: Sector::from_label(&text(map, "sector")),
        company_size: CompanySize::from_label(&text(map, "company_size")),
        budget: BudgetTier::from_label(&text(map, "budget")),
        challenges: dedup(list(map, "challenges")),
        current_channels: list(map, "current_channels"),
        primary_objective: Objective::from_label(&text(map, "primary_objective")),
        deadline: Deadline::from_label(&text(map, "deadline")),
        growth_target: integer(map, "growth_target"),
        notes: text(map, "notes"),
    };

    if !profile.sector.is_recognized() && !profile.sector.as_str().is_empty() {
        warn!(sector = %profile.sector, "Unrecognized sector, sector lookups will be empty");
    }
    if !profile.budget.is_recognized() && !profile.budget.as_str().is_empty() {
        warn!(budget = %profile.budget, "Unrecognized budget tier, using defaults");
    }

    debug!(
        name = %profile.name,
        challenges = profile.challenges.len(),
        channels = profile.current_channels.len(),
        "Built client profile"
    );
    profile
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn text(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Array of strings, or one comma-separated string; blanks dropped
fn list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    let items: Vec<String> = match map.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(|s| s.to_string()).collect(),
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

/// Integer, truncated float or numeric string; anything else is 0
fn integer(map: &Map<String, Value>, key: &str) -> i64 {
    match map.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim().trim_end_matches('%').trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn intake() -> Value {
        json!({
            "name": "Acme Representações",
            "sector": "Commercial Representation",
            "company_size": "Small",
            "budget": "$5,001 - $15,000",
            "challenges": ["Low lead generation", "Low conversion", "Low lead generation"],
            "current_channels": "Email marketing, , Website",
            "primary_objective": "Increase sales",
            "deadline": "6-12 months",
            "growth_target": 40,
            "notes": "Wants quick wins"
        })
    }

    #[test]
    fn test_build_full_profile() {
        let profile = build_profile(&intake()).unwrap();
        assert_eq!(profile.name, "Acme Representações");
        assert_eq!(profile.sector, Sector::CommercialRepresentation);
        assert_eq!(profile.company_size, CompanySize::Small);
        assert_eq!(profile.budget, BudgetTier::From5kTo15k);
        assert_eq!(profile.challenges, vec!["Low lead generation", "Low conversion"]);
        assert_eq!(profile.current_channels, vec!["Email marketing", "Website"]);
        assert_eq!(profile.primary_objective, Objective::IncreaseSales);
        assert_eq!(profile.deadline, Deadline::SixToTwelveMonths);
        assert_eq!(profile.growth_target, 40);
    }

    #[test]
    fn test_missing_keys_default() {
        let profile = build_profile(&json!({})).unwrap();
        assert_eq!(profile, ClientProfile::default());
    }

    #[test]
    fn test_growth_target_variants() {
        let cases = [
            (json!(25.9), 25),
            (json!("30"), 30),
            (json!("12.5%"), 12),
            (json!("lots"), 0),
            (json!(null), 0),
        ];
        for (value, expected) in cases {
            let profile = build_profile(&json!({ "growth_target": value })).unwrap();
            assert_eq!(profile.growth_target, expected, "for {}", value);
        }
    }

    #[test]
    fn test_unrecognized_values_are_kept() {
        let profile = build_profile(&json!({ "sector": "Retail", "budget": "a lot" })).unwrap();
        assert_eq!(profile.sector, Sector::Other("Retail".into()));
        assert_eq!(profile.budget, BudgetTier::Unrecognized("a lot".into()));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(
            build_profile(&json!(["not", "an", "object"])),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        let raw = intake();
        assert_eq!(build_profile(&raw).unwrap(), build_profile(&raw).unwrap());
    }
}
