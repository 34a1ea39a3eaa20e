//! Invariant checks over a batch of records.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::content::ContentRecord;

/// Invariant violations found in a record batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub records: usize,
    /// Identifiers used by more than one record.
    pub duplicate_ids: Vec<String>,
    /// Non-empty slugs used by more than one record.
    pub duplicate_slugs: Vec<String>,
    /// Records with the published flag set but no publication time.
    pub missing_published_at: Vec<String>,
    /// Records whose status is published while the flag is not.
    pub status_flag_mismatch: Vec<String>,
    /// Records without an identifier, by position in the batch.
    pub missing_ids: Vec<usize>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.duplicate_ids.is_empty()
            && self.duplicate_slugs.is_empty()
            && self.missing_published_at.is_empty()
            && self.status_flag_mismatch.is_empty()
            && self.missing_ids.is_empty()
    }

    pub fn problem_count(&self) -> usize {
        self.duplicate_ids.len()
            + self.duplicate_slugs.len()
            + self.missing_published_at.len()
            + self.status_flag_mismatch.len()
            + self.missing_ids.len()
    }
}

/// Check `records` against the record invariants.
///
/// Archived or draft records that still carry the published flag are not
/// reported; only the published-status direction is enforced.
pub fn validate_records(records: &[ContentRecord]) -> ValidationReport {
    let mut report = ValidationReport {
        records: records.len(),
        ..Default::default()
    };

    let mut id_counts: AHashMap<&str, usize> = AHashMap::new();
    let mut slug_counts: AHashMap<&str, usize> = AHashMap::new();

    for (position, record) in records.iter().enumerate() {
        if record.id.is_empty() {
            report.missing_ids.push(position);
        } else {
            *id_counts.entry(record.id.as_str()).or_default() += 1;
        }
        if !record.slug.is_empty() {
            *slug_counts.entry(record.slug.as_str()).or_default() += 1;
        }
        if record.published && record.published_at.is_none() {
            report.missing_published_at.push(record.id.clone());
        }
        if record.is_public() && !record.published {
            report.status_flag_mismatch.push(record.id.clone());
        }
    }

    report.duplicate_ids = repeated(id_counts);
    report.duplicate_slugs = repeated(slug_counts);
    report
}

fn repeated(counts: AHashMap<&str, usize>) -> Vec<String> {
    let mut keys: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(key, _)| key.to_string())
        .collect();
    keys.sort();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStatus;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_clean_batch() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let records = vec![
            ContentRecord::new("a", "First", at).published_on(at),
            ContentRecord::new("b", "Second", at),
        ];
        let report = validate_records(&records);
        assert!(report.is_valid());
        assert_eq!(report.records, 2);
    }

    #[test]
    fn test_reports_every_violation() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut flagged = ContentRecord::new("c", "Flagged", at);
        flagged.published = true;
        let mut mismatch = ContentRecord::new("d", "Mismatch", at);
        mismatch.status = ContentStatus::Published;

        let records = vec![
            ContentRecord::new("a", "Same", at),
            ContentRecord::new("a", "Same", at),
            flagged,
            mismatch,
            ContentRecord::new("", "No Id", at),
        ];
        let report = validate_records(&records);
        assert!(!report.is_valid());
        assert_eq!(report.duplicate_ids, vec!["a"]);
        assert_eq!(report.duplicate_slugs, vec!["same"]);
        assert_eq!(report.missing_published_at, vec!["c"]);
        assert_eq!(report.status_flag_mismatch, vec!["d"]);
        assert_eq!(report.missing_ids, vec![4]);
        assert_eq!(report.problem_count(), 5);
    }
}
