//! Whitespace query tokenizer.

/// Splits a free-text query into lowercased tokens.
///
/// The query is trimmed and lowercased, then split on runs of whitespace.
/// Empty fragments never appear in the output.
#[derive(Clone, Debug, Default)]
pub struct QueryTokenizer;

impl QueryTokenizer {
    /// Create a new query tokenizer.
    pub fn new() -> Self {
        QueryTokenizer
    }

    /// Tokenize `query`. An empty result means the query carries no text.
    pub fn tokenize(&self, query: &str) -> Vec<String> {
        query
            .trim()
            .to_lowercase()
            .split_whitespace()
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let tokenizer = QueryTokenizer::new();
        assert_eq!(
            tokenizer.tokenize("  Rust   ASYNC\tawait\n"),
            vec!["rust", "async", "await"]
        );
    }

    #[test]
    fn test_tokenize_blank_query() {
        let tokenizer = QueryTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize(" \t\n ").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_punctuation() {
        let tokenizer = QueryTokenizer::new();
        assert_eq!(tokenizer.tokenize("C++ node.js"), vec!["c++", "node.js"]);
    }
}
