//! Occurrence counting over already-lowercased text.

/// Count non-overlapping occurrences of `token` in `haystack`.
///
/// Both arguments are expected to be lowercased by the caller. An empty token
/// never matches.
pub fn count_occurrences(haystack: &str, token: &str) -> usize {
    if token.is_empty() {
        return 0;
    }
    haystack.matches(token).count()
}
