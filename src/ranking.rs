//! Relevance ranking of content records against a free-text query.
//!
//! The pipeline is tokenize → score every candidate → drop zero scores →
//! sort by score then effective date → truncate. Candidates arrive already
//! filtered on every non-text criterion; see [`crate::store::RecordQuery`].

pub mod engine;
pub mod scorer;
pub mod tier;

pub use engine::{RankingEngine, ScoredRecord, compare_scored};
pub use scorer::{QueryScorer, ScoringConfig};
pub use tier::{MatchTier, TierTable};
