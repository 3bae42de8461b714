//! Marketeer CLI - Marketing analysis and proposals
//!
//! Usage:
//!   marketeer analyze --input intake.json      Analyze a client intake record
//!   marketeer propose --input intake.json      Generate a proposal
//!   marketeer stats --file survey.csv          Descriptive statistics
//!   marketeer serve --port 3000                Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { input, format } => commands::cmd_analyze(&input, &format),
        Commands::Insights { input, format } => commands::cmd_insights(&input, &format),
        Commands::Propose {
            input,
            format,
            output,
        } => commands::cmd_propose(&config, &input, &format, output.as_deref()),
        Commands::Stats {
            file,
            columns,
            format,
        } => commands::cmd_stats(&config, &file, columns.as_deref(), &format),
        Commands::Outliers {
            file,
            method,
            threshold,
            format,
        } => commands::cmd_outliers(&config, &file, method.as_deref(), threshold, &format),
        Commands::Correlate {
            file,
            method,
            format,
        } => commands::cmd_correlate(&config, &file, &method, &format),
        Commands::Categorical {
            file,
            columns,
            format,
        } => commands::cmd_categorical(&config, &file, columns.as_deref(), &format),
        Commands::Report {
            file,
            title,
            output,
        } => commands::cmd_report(&config, &file, &title, output.as_deref()),
        Commands::Knowledge { sector, format } => {
            commands::cmd_knowledge(sector.as_deref(), &format)
        }
        Commands::Serve {
            port,
            host,
            allow_origin,
        } => commands::cmd_serve(config, &host, port, allow_origin).await,
    }
}
