//! Two-phase related-content recommender.

use std::cmp::Ordering;

use ahash::{AHashMap, AHashSet};
use chrono::{DateTime, Utc};

use crate::content::ContentRecord;
use crate::recommendation::similarity::{SimilarityConfig, SimilarityScorer};

/// Picks records related to a reference record.
///
/// The recommender is pure: it reads the pools it is handed and never
/// consults a store. [`crate::search::SearchService`] fetches the pools.
#[derive(Debug, Clone, Default)]
pub struct RelatedContentRecommender {
    scorer: SimilarityScorer,
}

impl RelatedContentRecommender {
    pub fn new(config: SimilarityConfig) -> Self {
        RelatedContentRecommender {
            scorer: SimilarityScorer::new(config),
        }
    }

    pub fn config(&self) -> &SimilarityConfig {
        self.scorer.config()
    }

    /// How many candidates the automatic phase should be offered to fill
    /// `remaining` slots.
    pub fn pool_size_hint(&self, remaining: usize) -> usize {
        remaining.saturating_mul(self.config().pool_multiplier)
    }

    /// Curated phase: published records of `pool` named in the reference's
    /// `related_posts`, in `related_posts` order, at most `limit` of them.
    ///
    /// Identifiers with no record in `pool` are dropped.
    pub fn curated<'a>(
        &self,
        reference: &ContentRecord,
        pool: &'a [ContentRecord],
        limit: usize,
    ) -> Vec<&'a ContentRecord> {
        if reference.related_posts.is_empty() || limit == 0 {
            return Vec::new();
        }
        let mut positions: AHashMap<&str, usize> = AHashMap::new();
        for (position, id) in reference.related_posts.iter().enumerate() {
            positions.entry(id.as_str()).or_insert(position);
        }

        let mut seen = AHashSet::new();
        let mut picks: Vec<(usize, &'a ContentRecord)> = pool
            .iter()
            .filter(|candidate| is_eligible(reference, candidate))
            .filter(|candidate| seen.insert(candidate.id.as_str()))
            .filter_map(|candidate| {
                positions
                    .get(candidate.id.as_str())
                    .map(|&position| (position, candidate))
            })
            .collect();

        picks.sort_by_key(|(position, _)| *position);
        picks.truncate(limit);
        picks.into_iter().map(|(_, record)| record).collect()
    }

    /// Automatic phase: the `count` published records of `pool` most similar
    /// to the reference, skipping identifiers in `exclude`.
    ///
    /// Ties in similarity go to the newer effective date, then to the lower
    /// identifier.
    pub fn similar<'a>(
        &self,
        reference: &ContentRecord,
        pool: &'a [ContentRecord],
        exclude: &AHashSet<&str>,
        count: usize,
        now: DateTime<Utc>,
    ) -> Vec<&'a ContentRecord> {
        if count == 0 {
            return Vec::new();
        }

        let mut seen = AHashSet::new();
        let mut scored: Vec<(f64, &'a ContentRecord)> = pool
            .iter()
            .filter(|candidate| is_eligible(reference, candidate))
            .filter(|candidate| !exclude.contains(candidate.id.as_str()))
            .filter(|candidate| seen.insert(candidate.id.as_str()))
            .map(|candidate| (self.scorer.score(reference, candidate, now), candidate))
            .collect();

        scored.sort_by(|(score_a, a), (score_b, b)| compare_similarity(*score_a, a, *score_b, b));
        scored.truncate(count);
        scored.into_iter().map(|(_, record)| record).collect()
    }
}

fn is_eligible(reference: &ContentRecord, candidate: &ContentRecord) -> bool {
    candidate.published && candidate.id != reference.id
}

fn compare_similarity(
    score_a: f64,
    a: &ContentRecord,
    score_b: f64,
    b: &ContentRecord,
) -> Ordering {
    score_b
        .total_cmp(&score_a)
        .then_with(|| b.effective_date().cmp(&a.effective_date()))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn published(id: &str, category: &str) -> ContentRecord {
        let created = now() - Duration::days(200);
        ContentRecord::new(id, id, created)
            .with_category(category)
            .published_on(created)
    }

    fn ids(records: &[&ContentRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_curated_drops_dangling_and_unpublished() {
        let recommender = RelatedContentRecommender::default();
        let reference = published("a", "x").with_related(["b", "ghost", "d", "a"]);
        let mut draft = published("d", "x");
        draft.published = false;
        let pool = vec![published("b", "x"), published("c", "x"), draft, reference.clone()];

        let curated = recommender.curated(&reference, &pool, 5);
        assert_eq!(ids(&curated), vec!["b"]);
    }

    #[test]
    fn test_curated_fills_limit_exactly() {
        let recommender = RelatedContentRecommender::default();
        let reference = published("a", "x").with_related(["b", "c", "d"]);
        let pool = vec![published("b", "x"), published("c", "x"), published("d", "x")];

        let curated = recommender.curated(&reference, &pool, 2);
        assert_eq!(ids(&curated), vec!["b", "c"]);
    }

    #[test]
    fn test_curated_follows_related_posts_order() {
        let recommender = RelatedContentRecommender::default();
        let reference = published("a", "x").with_related(["c", "b", "c"]);
        let newer = ContentRecord::new("b", "b", now()).published_on(now());
        let pool = vec![newer, published("c", "x")];

        let curated = recommender.curated(&reference, &pool, 5);
        assert_eq!(ids(&curated), vec!["c", "b"]);
    }

    #[test]
    fn test_similarity_skips_excluded() {
        let recommender = RelatedContentRecommender::default();
        let reference = published("a", "rust").with_tags(["async"]);
        let pool = vec![
            published("far", "cooking"),
            published("near", "rust"),
            published("nearer", "rust").with_tags(["async"]),
            published("other", "go"),
        ];
        let exclude: AHashSet<&str> = ["nearer"].into_iter().collect();

        let similar = recommender.similar(&reference, &pool, &exclude, 2, now());
        assert_eq!(ids(&similar), vec!["near", "far"]);
    }

    #[test]
    fn test_never_includes_reference() {
        let recommender = RelatedContentRecommender::default();
        let reference = published("a", "rust").with_related(["a"]);
        let pool = vec![reference.clone(), published("b", "rust")];
        assert!(recommender.curated(&reference, &pool, 10).is_empty());
        let similar = recommender.similar(&reference, &pool, &AHashSet::new(), 10, now());
        assert_eq!(ids(&similar), vec!["b"]);
    }

    #[test]
    fn test_similarity_ties_break_by_id() {
        let recommender = RelatedContentRecommender::default();
        let reference = published("ref", "rust");
        let pool = vec![published("z", "rust"), published("m", "rust"), published("b", "rust")];
        let related = recommender.similar(&reference, &pool, &AHashSet::new(), 2, now());
        assert_eq!(ids(&related), vec!["b", "m"]);
    }

    #[test]
    fn test_zero_limit() {
        let recommender = RelatedContentRecommender::default();
        let reference = published("a", "rust").with_related(["b"]);
        let pool = vec![published("b", "rust")];
        assert!(recommender.curated(&reference, &pool, 0).is_empty());
        assert!(recommender.similar(&reference, &pool, &AHashSet::new(), 0, now()).is_empty());
    }

    #[test]
    fn test_pool_size_hint() {
        let recommender = RelatedContentRecommender::default();
        assert_eq!(recommender.pool_size_hint(4), 12);
    }
}
