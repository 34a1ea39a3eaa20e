//! Ranked match tiers.
//!
//! Title and category matches are mutually exclusive per token: only the
//! highest-priority tier that matches contributes. A [`TierTable`] is an
//! ordered list of tier → points pairs evaluated first-match-wins.

use serde::{Deserialize, Serialize};

/// How a lowercased field relates to a query token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchTier {
    /// The field equals the token.
    Exact,
    /// The field starts with the token.
    Prefix,
    /// The field contains the token anywhere.
    Contains,
}

impl MatchTier {
    /// Test this tier alone, ignoring priority.
    pub fn matches(&self, field: &str, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        match self {
            MatchTier::Exact => field == token,
            MatchTier::Prefix => field.starts_with(token),
            MatchTier::Contains => field.contains(token),
        }
    }
}

/// An ordered, first-match-wins list of tiers and the points they award.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    tiers: Vec<(MatchTier, f64)>,
}

impl TierTable {
    /// Build a table. Tiers are checked in the given order.
    pub fn new(tiers: Vec<(MatchTier, f64)>) -> Self {
        TierTable { tiers }
    }

    /// The first tier matching `field` for `token`, if any.
    pub fn best_match(&self, field: &str, token: &str) -> Option<(MatchTier, f64)> {
        self.tiers
            .iter()
            .copied()
            .find(|(tier, _)| tier.matches(field, token))
    }

    /// Points for the first matching tier, or zero.
    pub fn score(&self, field: &str, token: &str) -> f64 {
        self.best_match(field, token)
            .map(|(_, points)| points)
            .unwrap_or(0.0)
    }

    pub fn tiers(&self) -> &[(MatchTier, f64)] {
        &self.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_table() -> TierTable {
        TierTable::new(vec![
            (MatchTier::Exact, 100.0),
            (MatchTier::Prefix, 50.0),
            (MatchTier::Contains, 30.0),
        ])
    }

    #[test]
    fn test_first_match_wins() {
        let table = title_table();
        assert_eq!(table.score("test", "test"), 100.0);
        assert_eq!(table.score("testing tools", "test"), 50.0);
        assert_eq!(table.score("unit testing", "test"), 30.0);
        assert_eq!(table.score("python", "test"), 0.0);
    }

    #[test]
    fn test_best_match_reports_tier() {
        let table = title_table();
        assert_eq!(
            table.best_match("rust guide", "rust"),
            Some((MatchTier::Prefix, 50.0))
        );
        assert_eq!(table.best_match("", "rust"), None);
    }

    #[test]
    fn test_empty_token_never_matches() {
        assert!(!MatchTier::Contains.matches("anything", ""));
        assert!(!MatchTier::Exact.matches("", ""));
    }

    #[test]
    fn test_order_defines_priority() {
        let reversed = TierTable::new(vec![(MatchTier::Contains, 30.0), (MatchTier::Exact, 100.0)]);
        assert_eq!(reversed.score("test", "test"), 30.0);
    }
}
