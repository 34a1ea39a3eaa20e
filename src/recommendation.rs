//! Related-content recommendation.
//!
//! Recommendations for a reference record come in two phases. Curated
//! relations listed in `related_posts` come first; when they do not fill the
//! requested count, the rest is chosen by similarity (shared category, tags,
//! author, series, recency and popularity).

pub mod recommender;
pub mod similarity;

pub use recommender::RelatedContentRecommender;
pub use similarity::{SimilarityConfig, SimilarityScorer};
