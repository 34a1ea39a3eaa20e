//! Weighted multi-field query scoring.
//!
//! For every query token the scorer adds:
//!
//! - title: exact 100, prefix 50, substring 30 (first match wins)
//! - tags: 25 per tag equal to or containing the token
//! - category: exact 20, substring 10 (first match wins)
//! - author: 15 on substring
//! - excerpt: 10 + 2 per extra occurrence
//! - content: 5 + occurrences, capped at 10
//!
//! A record with a non-zero text score then receives a recency bonus and a
//! popularity bonus once. A record with a zero text score stays at zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::count_occurrences;
use crate::content::ContentRecord;
use crate::error::{LecternError, Result};
use crate::ranking::tier::{MatchTier, TierTable};

/// Configuration for query scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub title_exact: f64,
    pub title_prefix: f64,
    pub title_contains: f64,
    /// Points per matching tag.
    pub tag_match: f64,
    pub category_exact: f64,
    pub category_contains: f64,
    pub author_contains: f64,
    /// Points for the first excerpt occurrence.
    pub excerpt_base: f64,
    /// Points for every excerpt occurrence after the first.
    pub excerpt_per_extra: f64,
    /// Points for any content occurrence.
    pub content_base: f64,
    /// Content occurrences counted beyond the base, at one point each.
    pub content_occurrence_cap: usize,
    pub recency_bonus: f64,
    /// Days before evaluation time that still count as recent.
    pub recency_window_days: i64,
    /// View count divided by this is the popularity bonus.
    pub popularity_divisor: f64,
    pub popularity_cap: f64,
    /// Candidate count at which scoring switches to rayon.
    pub parallel_threshold: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            title_exact: 100.0,
            title_prefix: 50.0,
            title_contains: 30.0,
            tag_match: 25.0,
            category_exact: 20.0,
            category_contains: 10.0,
            author_contains: 15.0,
            excerpt_base: 10.0,
            excerpt_per_extra: 2.0,
            content_base: 5.0,
            content_occurrence_cap: 10,
            recency_bonus: 5.0,
            recency_window_days: 30,
            popularity_divisor: 100.0,
            popularity_cap: 5.0,
            parallel_threshold: 2048,
        }
    }
}

impl ScoringConfig {
    /// Reject weights that would break ranking invariants.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("title_exact", self.title_exact),
            ("title_prefix", self.title_prefix),
            ("title_contains", self.title_contains),
            ("tag_match", self.tag_match),
            ("category_exact", self.category_exact),
            ("category_contains", self.category_contains),
            ("author_contains", self.author_contains),
            ("excerpt_base", self.excerpt_base),
            ("excerpt_per_extra", self.excerpt_per_extra),
            ("content_base", self.content_base),
            ("recency_bonus", self.recency_bonus),
            ("popularity_cap", self.popularity_cap),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(LecternError::config(format!(
                    "scoring.{name} must be a non-negative number, got {weight}"
                )));
            }
        }
        if !(self.popularity_divisor.is_finite() && self.popularity_divisor > 0.0) {
            return Err(LecternError::config(
                "scoring.popularity_divisor must be positive",
            ));
        }
        if self.recency_window_days < 0 {
            return Err(LecternError::config(
                "scoring.recency_window_days must not be negative",
            ));
        }
        Ok(())
    }

    pub fn title_tiers(&self) -> TierTable {
        TierTable::new(vec![
            (MatchTier::Exact, self.title_exact),
            (MatchTier::Prefix, self.title_prefix),
            (MatchTier::Contains, self.title_contains),
        ])
    }

    pub fn category_tiers(&self) -> TierTable {
        TierTable::new(vec![
            (MatchTier::Exact, self.category_exact),
            (MatchTier::Contains, self.category_contains),
        ])
    }
}

/// Lowercased copies of the searchable fields of one record.
struct LowercasedFields {
    title: String,
    category: String,
    author: String,
    excerpt: String,
    content: String,
    tags: Vec<String>,
}

impl LowercasedFields {
    fn of(record: &ContentRecord) -> Self {
        LowercasedFields {
            title: record.title.to_lowercase(),
            category: record.category.to_lowercase(),
            author: record.author.to_lowercase(),
            excerpt: record.excerpt.to_lowercase(),
            content: record.content.to_lowercase(),
            tags: record.tags.iter().map(|t| t.to_lowercase()).collect(),
        }
    }
}

/// Scores records against lowercased query tokens.
#[derive(Debug, Clone)]
pub struct QueryScorer {
    config: ScoringConfig,
    title_tiers: TierTable,
    category_tiers: TierTable,
}

impl Default for QueryScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl QueryScorer {
    pub fn new(config: ScoringConfig) -> Self {
        QueryScorer {
            title_tiers: config.title_tiers(),
            category_tiers: config.category_tiers(),
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Total score of `record`: text score plus bonuses, or zero when no
    /// token matched any field.
    pub fn score(&self, record: &ContentRecord, tokens: &[String], now: DateTime<Utc>) -> f64 {
        let text = self.text_score(record, tokens);
        if text <= 0.0 {
            return 0.0;
        }
        text + self.recency_bonus(record, now) + self.popularity_bonus(record)
    }

    /// Sum of per-token field scores, without bonuses.
    pub fn text_score(&self, record: &ContentRecord, tokens: &[String]) -> f64 {
        let fields = LowercasedFields::of(record);
        tokens
            .iter()
            .map(|token| self.token_score(&fields, token))
            .sum()
    }

    fn token_score(&self, fields: &LowercasedFields, token: &str) -> f64 {
        let config = &self.config;
        let mut score = self.title_tiers.score(&fields.title, token);

        let tag_hits = fields
            .tags
            .iter()
            .filter(|tag| tag.contains(token))
            .count();
        score += tag_hits as f64 * config.tag_match;

        score += self.category_tiers.score(&fields.category, token);

        if fields.author.contains(token) {
            score += config.author_contains;
        }

        let excerpt_hits = count_occurrences(&fields.excerpt, token);
        if excerpt_hits > 0 {
            score += config.excerpt_base + config.excerpt_per_extra * (excerpt_hits - 1) as f64;
        }

        let content_hits = count_occurrences(&fields.content, token);
        if content_hits > 0 {
            score += config.content_base + content_hits.min(config.content_occurrence_cap) as f64;
        }

        score
    }

    pub fn recency_bonus(&self, record: &ContentRecord, now: DateTime<Utc>) -> f64 {
        if record.is_recent(now, self.config.recency_window_days) {
            self.config.recency_bonus
        } else {
            0.0
        }
    }

    pub fn popularity_bonus(&self, record: &ContentRecord) -> f64 {
        (record.view_count as f64 / self.config.popularity_divisor).min(self.config.popularity_cap)
    }
}
