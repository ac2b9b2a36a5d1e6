//! Command line argument parsing for the marquee CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Marquee - an event catalog question answering chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "marquee")]
#[command(about = "Answer natural-language questions over an event catalog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct MarqueeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl MarqueeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Answer a single message
    Ask(AskArgs),

    /// Interactive question session on stdin
    Chat(ChatArgs),

    /// Show catalog and engine statistics
    Stats(StatsArgs),
}

/// Arguments for answering a single message
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// Path to the event catalog (CSV)
    #[arg(value_name = "CATALOG_FILE")]
    pub catalog: PathBuf,

    /// The message to answer
    #[arg(value_name = "MESSAGE")]
    pub message: String,

    /// Resolve relative time expressions against this date instead of today
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,
}

/// Arguments for the interactive session
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Path to the event catalog (CSV)
    #[arg(value_name = "CATALOG_FILE")]
    pub catalog: PathBuf,
}

/// Arguments for catalog statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the event catalog (CSV)
    #[arg(value_name = "CATALOG_FILE")]
    pub catalog: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
