//! Proposal command implementation

use std::path::Path;

use anyhow::Result;
use marketeer_core::{
    render_markdown, render_summary, AnalysisConfig, MarketingAnalysisEngine, ProposalGenerator,
};

use super::{emit, parse_format, read_profile, OutputFormat};

pub fn cmd_propose(
    config: &AnalysisConfig,
    input: &Path,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format = parse_format(
        format,
        &[OutputFormat::Text, OutputFormat::Json, OutputFormat::Markdown],
    )?;
    let profile = read_profile(input)?;
    let analysis = MarketingAnalysisEngine::new().analyze(&profile);
    let proposal =
        ProposalGenerator::new(config.proposal.clone()).generate_proposal(&profile, &analysis);

    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&proposal)?,
        OutputFormat::Markdown => render_markdown(&proposal),
        OutputFormat::Text => render_summary(&proposal),
    };
    emit(&content, output)
}
