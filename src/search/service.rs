//! Search service over a record store.

use std::sync::Arc;

use ahash::AHashSet;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::LecternConfig;
use crate::content::ContentRecord;
use crate::error::Result;
use crate::ranking::RankingEngine;
use crate::recommendation::RelatedContentRecommender;
use crate::store::{RecordQuery, RecordStore};

/// A search: free-text query plus store filters.
///
/// `filters.limit` caps ranked results. `filters.offset` only applies when
/// the query is empty and the store answers alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub query: String,
    pub filters: RecordQuery,
}

impl SearchRequest {
    pub fn new<S: Into<String>>(query: S) -> Self {
        SearchRequest {
            query: query.into(),
            filters: RecordQuery::default(),
        }
    }

    pub fn filters(mut self, filters: RecordQuery) -> Self {
        self.filters = filters;
        self
    }
}

/// One search result. `score` is `None` when no ranking pass ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub score: Option<f64>,
    pub record: ContentRecord,
}

/// Search and related-content operations over a record store.
#[derive(Debug, Clone)]
pub struct SearchService<S: RecordStore> {
    store: Arc<S>,
    engine: RankingEngine,
    recommender: RelatedContentRecommender,
}

impl<S: RecordStore> SearchService<S> {
    /// Create a service with default weights.
    pub fn new(store: Arc<S>) -> Self {
        SearchService {
            store,
            engine: RankingEngine::default(),
            recommender: RelatedContentRecommender::default(),
        }
    }

    /// Create a service with the weights from `config`.
    pub fn with_config(store: Arc<S>, config: &LecternConfig) -> Self {
        SearchService {
            store,
            engine: RankingEngine::new(config.scoring.clone()),
            recommender: RelatedContentRecommender::new(config.similarity.clone()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }

    /// Search with recency evaluated now.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<ContentRecord>> {
        self.search_at(request, Utc::now())
    }

    pub fn search_at(&self, request: &SearchRequest, now: DateTime<Utc>) -> Result<Vec<ContentRecord>> {
        Ok(self
            .search_hits_at(request, now)?
            .into_iter()
            .map(|hit| hit.record)
            .collect())
    }

    /// Search and keep scores.
    ///
    /// When the request constrains neither the published flag nor the status,
    /// only published records are considered.
    pub fn search_hits_at(
        &self,
        request: &SearchRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<SearchHit>> {
        let mut filters = request.filters.clone();
        if filters.is_visibility_unset() {
            filters.published = Some(true);
        }

        if !self.engine.has_terms(&request.query) {
            debug!("no query terms, listing from store");
            let records = self.store.list(&filters)?;
            return Ok(records
                .into_iter()
                .map(|record| SearchHit { score: None, record })
                .collect());
        }

        let candidates = self.store.list(&filters.without_pagination())?;
        let hits = self
            .engine
            .rank_scored_at(&request.query, &candidates, filters.limit, now)
            .into_iter()
            .map(|scored| SearchHit {
                score: Some(scored.score),
                record: scored.record.clone(),
            })
            .collect();
        Ok(hits)
    }

    /// Records related to `id`, with recency evaluated now.
    pub fn related_to(&self, id: &str, limit: usize) -> Result<Vec<ContentRecord>> {
        self.related_to_at(id, limit, Utc::now())
    }

    /// Records related to `id`: curated relations first, then the most
    /// similar published records. An unknown `id` yields no records.
    pub fn related_to_at(
        &self,
        id: &str,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<ContentRecord>> {
        let Some(reference) = self.store.get(id)? else {
            debug!("related: record {id} not found");
            return Ok(Vec::new());
        };
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut related = self.curated_for(&reference, limit)?;
        if related.len() >= limit {
            return Ok(related);
        }

        let remaining = limit - related.len();
        let mut pool_query = RecordQuery::new()
            .published(true)
            .exclude(reference.id.clone())
            .limit(self.recommender.pool_size_hint(remaining));
        for record in &related {
            pool_query = pool_query.exclude(record.id.clone());
        }
        let pool = self.store.list(&pool_query)?;

        let curated_ids: Vec<String> = related.iter().map(|r| r.id.clone()).collect();
        let exclude: AHashSet<&str> = curated_ids.iter().map(String::as_str).collect();
        let similar: Vec<ContentRecord> = self
            .recommender
            .similar(&reference, &pool, &exclude, remaining, now)
            .into_iter()
            .cloned()
            .collect();

        debug!(
            "related to {id}: {} curated, {} by similarity from a pool of {}",
            related.len(),
            similar.len(),
            pool.len()
        );
        related.extend(similar);
        Ok(related)
    }

    fn curated_for(&self, reference: &ContentRecord, limit: usize) -> Result<Vec<ContentRecord>> {
        if reference.related_posts.is_empty() {
            return Ok(Vec::new());
        }

        let mut valid = Vec::new();
        for related_id in &reference.related_posts {
            if self.store.contains(related_id)? {
                valid.push(related_id.clone());
            }
        }
        if valid.is_empty() {
            return Ok(Vec::new());
        }

        let pool = self.store.list(
            &RecordQuery::new()
                .published(true)
                .exclude(reference.id.clone())
                .include_only(valid),
        )?;
        Ok(self
            .recommender
            .curated(reference, &pool, limit)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStatus;
    use crate::store::MemoryRecordStore;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn published(id: &str, title: &str, age_days: i64) -> ContentRecord {
        let created = now() - Duration::days(age_days);
        ContentRecord::new(id, title, created).published_on(created)
    }

    fn service(records: Vec<ContentRecord>) -> SearchService<MemoryRecordStore> {
        SearchService::new(Arc::new(MemoryRecordStore::from_records(records).unwrap()))
    }

    #[test]
    fn test_search_hides_drafts_by_default() {
        let service = service(vec![
            published("a", "Rust Notes", 100),
            ContentRecord::new("b", "Rust Draft", now()),
        ]);
        let results = service.search_at(&SearchRequest::new("rust"), now()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");

        let request = SearchRequest::new("rust")
            .filters(RecordQuery::new().status(ContentStatus::Draft));
        let results = service.search_at(&request, now()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "b");
    }

    #[test]
    fn test_ranked_search_ignores_offset() {
        let service = service(vec![
            published("a", "rust", 100),
            published("b", "rust", 200),
            published("c", "rust", 300),
        ]);
        let request =
            SearchRequest::new("rust").filters(RecordQuery::new().offset(2).limit(2));
        let hits = service.search_hits_at(&request, now()).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.record.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(hits.iter().all(|h| h.score == Some(100.0)));
    }

    #[test]
    fn test_empty_query_uses_store_pagination() {
        let service = service(vec![
            published("a", "one", 100),
            published("b", "two", 200),
            published("c", "three", 300),
        ]);
        let request = SearchRequest::new("").filters(RecordQuery::new().offset(1).limit(1));
        let hits = service.search_hits_at(&request, now()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.id, "b");
        assert_eq!(hits[0].score, None);
    }

    #[test]
    fn test_related_to_unknown_record() {
        let service = service(vec![published("a", "x", 1)]);
        assert!(service.related_to_at("missing", 5, now()).unwrap().is_empty());
    }

    #[test]
    fn test_related_to_zero_limit() {
        let service = service(vec![published("a", "x", 1), published("b", "x", 1)]);
        assert!(service.related_to_at("a", 0, now()).unwrap().is_empty());
    }
}
