//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Marketeer - Marketing analysis and proposals from client intake data
#[derive(Parser)]
#[command(name = "marketeer")]
#[command(about = "Rule-based marketing analysis, proposals and dataset statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Analysis config file (defaults to the data dir override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a client intake record (JSON)
    Analyze {
        /// Intake JSON file ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the insights generated for a client intake record
    Insights {
        /// Intake JSON file ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Generate a marketing proposal for a client intake record
    Propose {
        /// Intake JSON file ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format: text, json, markdown
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write the proposal to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Descriptive statistics for numeric columns of a CSV file
    Stats {
        /// CSV file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Comma-separated columns (defaults to every numeric column)
        #[arg(short, long)]
        columns: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Detect outliers in numeric columns of a CSV file
    Outliers {
        /// CSV file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Method: iqr, zscore, modified_zscore (defaults to config)
        #[arg(short, long)]
        method: Option<String>,

        /// Score threshold for the z-score methods
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Correlation matrix between numeric columns of a CSV file
    Correlate {
        /// CSV file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Method: pearson, spearman, kendall
        #[arg(short, long, default_value = "pearson")]
        method: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Frequency summaries for text columns of a CSV file
    Categorical {
        /// CSV file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Comma-separated columns (defaults to every text column)
        #[arg(short, long)]
        columns: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Markdown report over a CSV file
    Report {
        /// CSV file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Report title
        #[arg(short, long, default_value = "Dataset Report")]
        title: String,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the built-in knowledge base
    Knowledge {
        /// Only show one sector (exact label)
        #[arg(short, long)]
        sector: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origin (repeatable)
        #[arg(long)]
        allow_origin: Vec<String>,
    },
}
