//! Caller-facing search and related-content operations.
//!
//! [`SearchService`] ties a [`crate::store::RecordStore`] to the ranking
//! engine and the recommender. Text queries are filtered by the store and
//! ranked by the engine; empty queries are answered by the store alone.

pub mod service;

pub use service::{SearchHit, SearchRequest, SearchService};
