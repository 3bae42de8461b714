//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::PathBuf;

use marketeer_core::{AnalysisConfig, MarketingAnalysisEngine};
use tempfile::TempDir;

use crate::commands::{self, truncate, OutputFormat};

const INTAKE: &str = r#"{
    "name": "Acme Supplies",
    "sector": "Commercial Representation",
    "budget": "$5,001 - $15,000",
    "challenges": "Low lead generation, Low conversion",
    "current_channels": ["Email marketing"],
    "primary_objective": "Increase sales",
    "deadline": "6-12 months",
    "growth_target": 40
}"#;

const CSV: &str = "Ad Spend,Leads,Channel\n1,2,Email\n2,4,Ads\n3,6,Email\n4,8,Ads\n100,9,Email\n";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ========== Helper Tests ==========

#[test]
fn test_output_format_parsing() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
    assert!("pdf".parse::<OutputFormat>().is_err());

    let allowed = [OutputFormat::Text, OutputFormat::Json];
    assert!(commands::parse_format("markdown", &allowed).is_err());
    assert_eq!(
        commands::parse_format("json", &allowed).unwrap(),
        OutputFormat::Json
    );
}

#[test]
fn test_split_columns() {
    assert_eq!(commands::split_columns(None), None);
    assert_eq!(
        commands::split_columns(Some("a, b,,c ")),
        Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    );
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer title", 10), "a much ...");
    assert_eq!(truncate("Representações", 20), "Representações");
}

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "analysis.toml", "[proposal]\nconsultant_name = \"Ana\"\n");

    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.proposal.consultant_name, "Ana");

    let bad = write_file(&dir, "bad.toml", "[statistics\n");
    assert!(commands::load_config(Some(&bad)).is_err());
}

#[test]
fn test_read_profile() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "intake.json", INTAKE);

    let profile = commands::read_profile(&path).unwrap();
    assert_eq!(profile.name, "Acme Supplies");
    assert_eq!(profile.challenges.len(), 2);

    let invalid = write_file(&dir, "invalid.json", "not json");
    assert!(commands::read_profile(&invalid).is_err());
    assert!(commands::read_profile(&dir.path().join("missing.json")).is_err());
}

// ========== Analysis Command Tests ==========

#[test]
fn test_cmd_analyze() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "intake.json", INTAKE);

    assert!(commands::cmd_analyze(&path, "text").is_ok());
    assert!(commands::cmd_analyze(&path, "json").is_ok());
    assert!(commands::cmd_analyze(&path, "markdown").is_err());
}

#[test]
fn test_format_analysis() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "intake.json", INTAKE);
    let profile = commands::read_profile(&path).unwrap();
    let analysis = MarketingAnalysisEngine::new().analyze(&profile);

    let text = commands::format_analysis(&analysis);
    assert!(text.contains("Analysis: Acme Supplies"));
    assert!(text.contains("B2B Relationship Program"));
    assert!(text.contains("Success probability: 95%"));
}

#[test]
fn test_cmd_insights() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "intake.json", INTAKE);
    assert!(commands::cmd_insights(&path, "text").is_ok());

    let text = commands::format_insights(&[]);
    assert!(text.contains("No insights"));
}

// ========== Proposal Command Tests ==========

#[test]
fn test_cmd_propose_writes_markdown() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "intake.json", INTAKE);
    let output = dir.path().join("proposal.md");

    commands::cmd_propose(&AnalysisConfig::default(), &input, "markdown", Some(&output)).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("# Marketing Proposal: Acme Supplies"));
    assert!(content.contains("**Total (6 months):** $80,000"));
}

#[test]
fn test_cmd_propose_json() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "intake.json", INTAKE);
    let output = dir.path().join("proposal.json");

    commands::cmd_propose(&AnalysisConfig::default(), &input, "json", Some(&output)).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["consultant_name"], "Marketing Consultant");
    assert_eq!(json["project_duration"], "24 weeks");
}

// ========== Statistics Command Tests ==========

#[test]
fn test_cmd_stats() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "survey.csv", CSV);
    let config = AnalysisConfig::default();

    assert!(commands::cmd_stats(&config, &file, None, "text").is_ok());
    assert!(commands::cmd_stats(&config, &file, Some("ad_spend"), "json").is_ok());
    assert!(commands::cmd_stats(&config, &file, Some("channel"), "text").is_err());
    assert!(commands::cmd_stats(&config, &dir.path().join("nope.csv"), None, "text").is_err());
}

#[test]
fn test_cmd_outliers() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "survey.csv", CSV);
    let config = AnalysisConfig::default();

    assert!(commands::cmd_outliers(&config, &file, None, None, "text").is_ok());
    assert!(commands::cmd_outliers(&config, &file, Some("zscore"), Some(1.5), "json").is_ok());
    assert!(commands::cmd_outliers(&config, &file, Some("dbscan"), None, "text").is_err());
}

#[test]
fn test_cmd_correlate_and_categorical() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "survey.csv", CSV);
    let config = AnalysisConfig::default();

    assert!(commands::cmd_correlate(&config, &file, "kendall", "text").is_ok());
    assert!(commands::cmd_correlate(&config, &file, "cosine", "text").is_err());
    assert!(commands::cmd_categorical(&config, &file, None, "text").is_ok());
}

#[test]
fn test_cmd_report_to_file() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "survey.csv", CSV);
    let output = dir.path().join("report.md");

    commands::cmd_report(&AnalysisConfig::default(), &file, "Survey", Some(&output)).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("# Survey"));
}

// ========== Knowledge Command Tests ==========

#[test]
fn test_cmd_knowledge() {
    assert!(commands::cmd_knowledge(None, "text").is_ok());
    assert!(commands::cmd_knowledge(Some("E-commerce/Online Retail"), "json").is_ok());
    assert!(commands::cmd_knowledge(Some("Agriculture"), "text").is_err());
}
