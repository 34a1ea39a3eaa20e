//! # Lectern
//!
//! Relevance ranking and related-content recommendation for in-memory
//! article collections, without an external search index.
//!
//! ## Features
//!
//! - Weighted multi-field query scoring (title, tags, category, author,
//!   excerpt, content) with recency and popularity bonuses
//! - Deterministic ordering: score, then effective date, then identifier
//! - Two-phase related content: curated relations, then similarity
//! - An in-memory record store with filtering, sorting and pagination
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lectern::prelude::*;
//!
//! # fn main() -> lectern::error::Result<()> {
//! let store = Arc::new(MemoryRecordStore::new());
//! store.create(NewRecord::new("JavaScript Tutorial").publish(true))?;
//! store.create(NewRecord::new("React Guide").tags(["javascript"]).publish(true))?;
//! store.create(NewRecord::new("Python Basics").publish(true))?;
//!
//! let service = SearchService::new(store);
//! let results = service.search(&SearchRequest::new("javascript"))?;
//! let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
//! assert_eq!(titles, vec!["JavaScript Tutorial", "React Guide"]);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod ranking;
pub mod recommendation;
pub mod search;
pub mod store;

pub mod prelude {
    pub use crate::config::LecternConfig;
    pub use crate::content::{ContentRecord, ContentStatus};
    pub use crate::error::{LecternError, Result};
    pub use crate::ranking::{RankingEngine, ScoredRecord, ScoringConfig};
    pub use crate::recommendation::{RelatedContentRecommender, SimilarityConfig};
    pub use crate::search::{SearchHit, SearchRequest, SearchService};
    pub use crate::store::{
        MemoryRecordStore, NewRecord, RecordQuery, RecordStore, RecordUpdate, SortField, SortOrder,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
