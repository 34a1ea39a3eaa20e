//! Command line argument parsing for the Lectern CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::content::ContentStatus;
use crate::store::SortField;

/// Lectern - relevance ranking and related content for article collections
#[derive(Parser, Debug, Clone)]
#[command(name = "lectern")]
#[command(about = "Rank articles against a query and find related articles")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LecternArgs {
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

    /// Scoring configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "LECTERN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LecternArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank records against a query
    Search(SearchArgs),

    /// Find records related to a record
    Related(RelatedArgs),

    /// Check a record file for invariant violations
    Validate(ValidateArgs),
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Record file (JSON array, or JSONL with a .jsonl extension)
    #[arg(value_name = "RECORDS_FILE")]
    pub records: PathBuf,

    /// Query string; omit to list records without ranking
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Offset for pagination (only used without a query)
    #[arg(short, long, default_value = "0")]
    pub offset: usize,

    /// Only records in this category (case-insensitive exact match)
    #[arg(long)]
    pub category: Option<String>,

    /// Only records with a tag containing this text
    #[arg(long)]
    pub tag: Option<String>,

    /// Only records whose author contains this text
    #[arg(long)]
    pub author: Option<String>,

    /// Only records in a series containing this text
    #[arg(long)]
    pub series: Option<String>,

    /// Only records with at least this many views
    #[arg(long)]
    pub min_views: Option<u64>,

    /// Only records with this status (default: published records only)
    #[arg(long)]
    pub status: Option<StatusArg>,

    /// Sort field used without a query
    #[arg(long, default_value = "created")]
    pub sort: SortArg,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,
}

/// Arguments for related-content lookup
#[derive(Parser, Debug, Clone)]
pub struct RelatedArgs {
    /// Record file (JSON array, or JSONL with a .jsonl extension)
    #[arg(value_name = "RECORDS_FILE")]
    pub records: PathBuf,

    /// Identifier of the reference record
    #[arg(value_name = "ID")]
    pub id: String,

    /// Maximum number of related records
    #[arg(short, long, default_value = "5")]
    pub limit: usize,
}

/// Arguments for validation
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Record file (JSON array, or JSONL with a .jsonl extension)
    #[arg(value_name = "RECORDS_FILE")]
    pub records: PathBuf,
}

/// Record status accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusArg {
    Draft,
    Published,
    Archived,
}

impl From<StatusArg> for ContentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Draft => ContentStatus::Draft,
            StatusArg::Published => ContentStatus::Published,
            StatusArg::Archived => ContentStatus::Archived,
        }
    }
}

/// Sort fields accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortArg {
    Created,
    Updated,
    Published,
    Views,
    Likes,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Created => SortField::CreatedAt,
            SortArg::Updated => SortField::UpdatedAt,
            SortArg::Published => SortField::PublishedAt,
            SortArg::Views => SortField::ViewCount,
            SortArg::Likes => SortField::LikeCount,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
