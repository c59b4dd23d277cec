//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use prdlint_core::Category;

/// prdlint - Quality linter for product requirement documents
#[derive(Parser)]
#[command(name = "prdlint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint PRD files
    Lint(LintArgs),

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// List the built-in rules
    Rules {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(clap::Args)]
pub struct LintArgs {
    /// File paths or glob patterns to lint
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Apply auto-fixes to the files
    #[arg(long)]
    pub fix: bool,

    /// Preview fixes without applying them
    #[arg(long, requires = "fix")]
    pub dry_run: bool,

    /// Fail if any file scores below this value
    #[arg(long, value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_score: Option<u8>,

    /// Skip every rule in this category (repeatable)
    #[arg(long = "disable-category", value_name = "CATEGORY")]
    pub disabled_categories: Vec<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
