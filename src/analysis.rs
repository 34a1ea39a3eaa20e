//! Query analysis.
//!
//! Matching is literal: queries are lowercased and split on whitespace, and
//! fields are compared with case-insensitive equality, prefix and substring
//! tests. There is no stemming and no fuzzy matching.

pub mod occurrence;
pub mod query_tokenizer;

pub use occurrence::count_occurrences;
pub use query_tokenizer::QueryTokenizer;
