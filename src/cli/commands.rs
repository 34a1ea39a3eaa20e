//! Command implementations for the Lectern CLI.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::LecternConfig;
use crate::content::validate_records;
use crate::error::{LecternError, Result};
use crate::search::{SearchRequest, SearchService};
use crate::store::{MemoryRecordStore, RecordQuery, SortOrder, load_records};

/// Execute a CLI command.
pub fn execute_command(args: LecternArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search_records(search_args, &args),
        Command::Related(related_args) => related_records(related_args, &args),
        Command::Validate(validate_args) => validate_file(validate_args, &args),
    }
}

fn load_config(args: &LecternArgs) -> Result<LecternConfig> {
    match &args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            LecternConfig::from_file(path)
        }
        None => Ok(LecternConfig::default()),
    }
}

fn open_service(records_path: &Path, args: &LecternArgs) -> Result<SearchService<MemoryRecordStore>> {
    let config = load_config(args)?;
    let records = load_records(records_path)?;
    info!("loaded {} records from {}", records.len(), records_path.display());
    let store = MemoryRecordStore::from_records(records)?;
    Ok(SearchService::with_config(Arc::new(store), &config))
}

/// Build the store filter for a search invocation.
pub fn build_filters(args: &SearchArgs) -> RecordQuery {
    let order = if args.asc { SortOrder::Asc } else { SortOrder::Desc };
    let mut filters = RecordQuery::new()
        .sort_by(args.sort.into(), order)
        .offset(args.offset)
        .limit(args.limit);
    filters.category = args.category.clone();
    filters.tag = args.tag.clone();
    filters.author = args.author.clone();
    filters.series = args.series.clone();
    filters.min_views = args.min_views;
    filters.status = args.status.map(Into::into);
    filters
}

fn search_records(args: &SearchArgs, cli_args: &LecternArgs) -> Result<()> {
    let service = open_service(&args.records, cli_args)?;

    let start_time = Instant::now();
    let request = SearchRequest::new(args.query.clone()).filters(build_filters(args));
    let hits = service.search_hits_at(&request, chrono::Utc::now())?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    let results = SearchResults {
        query: args.query.clone(),
        ranked: service.engine().has_terms(&args.query),
        total_hits: hits.len(),
        hits: hits.iter().map(RecordSummary::from).collect(),
        duration_ms,
    };
    output_result("Search completed", &results, cli_args)
}

fn related_records(args: &RelatedArgs, cli_args: &LecternArgs) -> Result<()> {
    let service = open_service(&args.records, cli_args)?;

    let start_time = Instant::now();
    let related = service.related_to(&args.id, args.limit)?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    let results = RelatedResults {
        reference_id: args.id.clone(),
        hits: related
            .iter()
            .map(|record| RecordSummary::from_record(record, None))
            .collect(),
        duration_ms,
    };
    output_result("Related lookup completed", &results, cli_args)
}

fn validate_file(args: &ValidateArgs, cli_args: &LecternArgs) -> Result<()> {
    let records = load_records(&args.records)?;
    let report = validate_records(&records);
    output_result("Validation completed", &report, cli_args)?;

    if report.is_valid() {
        Ok(())
    } else {
        Err(LecternError::other(format!(
            "{} problem(s) in {}",
            report.problem_count(),
            args.records.display()
        )))
    }
}
