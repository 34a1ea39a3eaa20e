//! Output formatting for CLI commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::args::{LecternArgs, OutputFormat};
use crate::content::{ContentRecord, ValidationReport};
use crate::error::Result;
use crate::search::SearchHit;

/// A record as shown in command output.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: u64,
}

impl RecordSummary {
    pub fn from_record(record: &ContentRecord, score: Option<f64>) -> Self {
        RecordSummary {
            id: record.id.clone(),
            slug: record.slug.clone(),
            title: record.title.clone(),
            score,
            category: record.category.clone(),
            tags: record.tags.clone(),
            author: record.author.clone(),
            published_at: record.published_at,
            view_count: record.view_count,
        }
    }
}

impl From<&SearchHit> for RecordSummary {
    fn from(hit: &SearchHit) -> Self {
        RecordSummary::from_record(&hit.record, hit.score)
    }
}

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub ranked: bool,
    pub hits: Vec<RecordSummary>,
    pub total_hits: usize,
    pub duration_ms: u64,
}

/// Result structure for related-content lookups.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelatedResults {
    pub reference_id: String,
    pub hits: Vec<RecordSummary>,
    pub duration_ms: u64,
}

/// Something that can print itself for a terminal reader.
pub trait HumanOutput {
    fn print_human(&self);
}

impl HumanOutput for SearchResults {
    fn print_human(&self) {
        println!("Search Results:");
        println!("═══════════════");

        for (i, hit) in self.hits.iter().enumerate() {
            println!();
            match hit.score {
                Some(score) => println!("Result {}: (Score: {score:.3})", i + 1),
                None => println!("Result {}:", i + 1),
            }
            println!("─────────────");
            print_summary(hit);
        }

        println!();
        println!("Total hits: {}", self.total_hits);
        println!("Search time: {}ms", self.duration_ms);
    }
}

impl HumanOutput for RelatedResults {
    fn print_human(&self) {
        println!("Related to {}:", self.reference_id);
        println!("═══════════════");

        if self.hits.is_empty() {
            println!("No related records.");
        }
        for (i, hit) in self.hits.iter().enumerate() {
            println!();
            println!("Related {}:", i + 1);
            println!("─────────────");
            print_summary(hit);
        }

        println!();
        println!("Lookup time: {}ms", self.duration_ms);
    }
}

impl HumanOutput for ValidationReport {
    fn print_human(&self) {
        println!("Validation Report:");
        println!("══════════════════");
        println!("Records checked: {}", self.records);

        print_list("Duplicate ids", &self.duplicate_ids);
        print_list("Duplicate slugs", &self.duplicate_slugs);
        print_list("Published without publication time", &self.missing_published_at);
        print_list("Published status without published flag", &self.status_flag_mismatch);
        if !self.missing_ids.is_empty() {
            let positions: Vec<String> = self.missing_ids.iter().map(|p| p.to_string()).collect();
            print_list("Records without id (positions)", &positions);
        }

        println!();
        if self.is_valid() {
            println!("✓ No problems found");
        } else {
            println!("✗ {} problem(s) found", self.problem_count());
        }
    }
}

fn print_summary(hit: &RecordSummary) {
    println!("id: {}", hit.id);
    println!("title: {}", hit.title);
    println!("slug: {}", hit.slug);
    if !hit.category.is_empty() {
        println!("category: {}", hit.category);
    }
    if !hit.tags.is_empty() {
        println!("tags: {}", hit.tags.join(", "));
    }
    if !hit.author.is_empty() {
        println!("author: {}", hit.author);
    }
    if let Some(published_at) = hit.published_at {
        println!("published: {}", published_at.format("%Y-%m-%d"));
    }
    println!("views: {}", hit.view_count);
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{label}:");
    for item in items {
        println!("  {item}");
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &LecternArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{json}");
            Ok(())
        }
    }
}
