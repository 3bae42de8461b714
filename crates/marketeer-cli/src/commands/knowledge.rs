//! Knowledge base command implementation

use anyhow::Result;
use marketeer_core::{KnowledgeBase, Sector};

use super::{parse_format, OutputFormat};

pub fn cmd_knowledge(sector: Option<&str>, format: &str) -> Result<()> {
    let format = parse_format(format, &[OutputFormat::Text, OutputFormat::Json])?;
    let kb = KnowledgeBase::builtin();

    if let Some(label) = sector {
        let sector = Sector::from_label(label);
        let Some(entry) = kb.sector(&sector) else {
            let known: Vec<String> = kb.sectors.iter().map(|s| s.sector.to_string()).collect();
            anyhow::bail!(
                "No knowledge for sector: {}. Available: {}",
                label,
                known.join(", ")
            );
        };
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
            _ => print!("{}", format_sector(entry)),
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&kb)?),
        _ => print!("{}", format_knowledge(&kb)),
    }
    Ok(())
}

fn format_sector(entry: &marketeer_core::knowledge::SectorKnowledge) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n🏢 {}\n", entry.sector));
    out.push_str(&format!("   Characteristics: {}\n", entry.characteristics.join(", ")));
    out.push_str(&format!("   Challenges:      {}\n", entry.common_challenges.join(", ")));
    out.push_str(&format!("   Opportunities:   {}\n", entry.opportunities.join(", ")));
    out.push_str(&format!("   Channels:        {}\n", entry.effective_channels.join(", ")));
    if let Some(b) = &entry.benchmarks {
        out.push_str(&format!(
            "   Benchmarks:      conversion {}, cycle {}, deal {}\n",
            b.conversion_rate, b.sales_cycle, b.average_deal
        ));
    }
    out
}

pub fn format_knowledge(kb: &KnowledgeBase) -> String {
    let mut out = String::new();
    for entry in &kb.sectors {
        out.push_str(&format_sector(entry));
    }

    out.push_str("\n🧩 Challenges\n");
    for c in &kb.challenges {
        let marker = if c.high_priority { "!" } else { " " };
        out.push_str(&format!(
            "   {} {:28} {} ({})\n",
            marker,
            c.challenge,
            c.solutions.join(", "),
            c.time_to_results
        ));
    }

    out.push_str("\n💰 Budget Tiers\n");
    for b in &kb.budgets {
        out.push_str(&format!(
            "   {:20} ROI {:10} focus: {}\n",
            b.tier.as_str(),
            b.expected_roi,
            b.focus.join(", ")
        ));
    }
    out
}
