//! Similarity between a reference record and a candidate.

use ahash::AHashSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::ContentRecord;
use crate::error::{LecternError, Result};

/// Configuration for related-content similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub same_category: f64,
    /// Points per tag present on both records.
    pub shared_tag: f64,
    pub same_author: f64,
    pub same_series: f64,
    pub recency_bonus: f64,
    pub recency_window_days: i64,
    pub popularity_divisor: f64,
    pub popularity_cap: f64,
    /// The automatic phase fetches this many candidates per missing slot.
    pub pool_multiplier: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            same_category: 30.0,
            shared_tag: 20.0,
            same_author: 10.0,
            same_series: 25.0,
            recency_bonus: 5.0,
            recency_window_days: 30,
            popularity_divisor: 100.0,
            popularity_cap: 10.0,
            pool_multiplier: 3,
        }
    }
}

impl SimilarityConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("same_category", self.same_category),
            ("shared_tag", self.shared_tag),
            ("same_author", self.same_author),
            ("same_series", self.same_series),
            ("recency_bonus", self.recency_bonus),
            ("popularity_cap", self.popularity_cap),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(LecternError::config(format!(
                    "similarity.{name} must be a non-negative number, got {weight}"
                )));
            }
        }
        if !(self.popularity_divisor.is_finite() && self.popularity_divisor > 0.0) {
            return Err(LecternError::config(
                "similarity.popularity_divisor must be positive",
            ));
        }
        if self.recency_window_days < 0 {
            return Err(LecternError::config(
                "similarity.recency_window_days must not be negative",
            ));
        }
        if self.pool_multiplier == 0 {
            return Err(LecternError::config(
                "similarity.pool_multiplier must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Scores candidates by similarity to one reference record.
///
/// Category, tag, author and series comparisons are exact and
/// case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    config: SimilarityConfig,
}

impl SimilarityScorer {
    pub fn new(config: SimilarityConfig) -> Self {
        SimilarityScorer { config }
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    pub fn score(
        &self,
        reference: &ContentRecord,
        candidate: &ContentRecord,
        now: DateTime<Utc>,
    ) -> f64 {
        let config = &self.config;
        let mut score = 0.0;

        if candidate.category == reference.category {
            score += config.same_category;
        }

        let reference_tags: AHashSet<&str> = reference.tags.iter().map(String::as_str).collect();
        let shared = candidate
            .tags
            .iter()
            .map(String::as_str)
            .collect::<AHashSet<&str>>()
            .intersection(&reference_tags)
            .count();
        score += shared as f64 * config.shared_tag;

        if candidate.author == reference.author {
            score += config.same_author;
        }

        if let (Some(a), Some(b)) = (&candidate.series, &reference.series)
            && a == b
        {
            score += config.same_series;
        }

        if candidate.is_recent(now, config.recency_window_days) {
            score += config.recency_bonus;
        }

        score + (candidate.view_count as f64 / config.popularity_divisor).min(config.popularity_cap)
    }
}
