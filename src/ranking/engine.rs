//! Ranking engine.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use log::{debug, trace};
use rayon::prelude::*;

use crate::analysis::QueryTokenizer;
use crate::content::ContentRecord;
use crate::ranking::scorer::{QueryScorer, ScoringConfig};

/// A candidate record together with its relevance score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecord<'a> {
    pub record: &'a ContentRecord,
    pub score: f64,
}

/// Ordering of ranked results: score descending, then effective date
/// descending, then identifier ascending.
pub fn compare_scored(a: &ScoredRecord<'_>, b: &ScoredRecord<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.record.effective_date().cmp(&a.record.effective_date()))
        .then_with(|| a.record.id.cmp(&b.record.id))
}

/// Scores, filters, sorts and truncates candidate records for a query.
///
/// The engine holds no state between calls. Candidates are borrowed and the
/// output is always a subset of them.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    tokenizer: QueryTokenizer,
    scorer: QueryScorer,
}

impl RankingEngine {
    pub fn new(config: ScoringConfig) -> Self {
        RankingEngine {
            tokenizer: QueryTokenizer::new(),
            scorer: QueryScorer::new(config),
        }
    }

    pub fn scorer(&self) -> &QueryScorer {
        &self.scorer
    }

    /// Whether `query` contains at least one token.
    pub fn has_terms(&self, query: &str) -> bool {
        !self.tokenizer.tokenize(query).is_empty()
    }

    /// Rank `candidates` for `query`, evaluating recency against the current
    /// time.
    pub fn rank<'a>(
        &self,
        query: &str,
        candidates: &'a [ContentRecord],
        limit: Option<usize>,
    ) -> Vec<&'a ContentRecord> {
        self.rank_at(query, candidates, limit, Utc::now())
    }

    /// Rank `candidates` for `query` with recency evaluated at `now`.
    pub fn rank_at<'a>(
        &self,
        query: &str,
        candidates: &'a [ContentRecord],
        limit: Option<usize>,
        now: DateTime<Utc>,
    ) -> Vec<&'a ContentRecord> {
        self.rank_scored_at(query, candidates, limit, now)
            .into_iter()
            .map(|scored| scored.record)
            .collect()
    }

    /// Rank and keep the scores.
    ///
    /// A query without tokens returns every candidate in its incoming order
    /// with a score of zero; no scoring pass runs and nothing is truncated.
    pub fn rank_scored_at<'a>(
        &self,
        query: &str,
        candidates: &'a [ContentRecord],
        limit: Option<usize>,
        now: DateTime<Utc>,
    ) -> Vec<ScoredRecord<'a>> {
        let tokens = self.tokenizer.tokenize(query);
        if tokens.is_empty() {
            debug!("empty query, returning {} candidates unscored", candidates.len());
            return candidates
                .iter()
                .map(|record| ScoredRecord { record, score: 0.0 })
                .collect();
        }

        let score_one = |record: &'a ContentRecord| {
            let score = self.scorer.score(record, &tokens, now);
            trace!("record {} scored {score}", record.id);
            (score > 0.0).then_some(ScoredRecord { record, score })
        };

        let mut results: Vec<ScoredRecord<'a>> =
            if candidates.len() >= self.scorer.config().parallel_threshold {
                candidates.par_iter().filter_map(score_one).collect()
            } else {
                candidates.iter().filter_map(score_one).collect()
            };

        results.sort_by(compare_scored);
        if let Some(limit) = limit {
            results.truncate(limit);
        }

        debug!(
            "ranked {} of {} candidates for {} tokens",
            results.len(),
            candidates.len(),
            tokens.len()
        );
        results
    }
}
