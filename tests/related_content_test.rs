//! Integration tests for related-content recommendation.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use lectern::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn published(id: &str, age_days: i64) -> ContentRecord {
    let at = now() - Duration::days(age_days);
    ContentRecord::new(id, format!("Post {id}"), at).published_on(at)
}

fn service(records: Vec<ContentRecord>) -> SearchService<MemoryRecordStore> {
    SearchService::new(Arc::new(MemoryRecordStore::from_records(records).unwrap()))
}

fn ids(records: &[ContentRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_curated_first_then_similarity() -> Result<()> {
    let service = service(vec![
        published("A", 100)
            .with_category("rust")
            .with_tags(["async"])
            .with_author("ann")
            .with_related(["B", "C"]),
        published("B", 100).with_category("cooking").with_author("bob"),
        published("C", 100).with_category("travel").with_author("cy"),
        published("D", 100).with_category("rust").with_tags(["async"]).with_author("ann"),
        published("E", 100).with_category("rust").with_author("dee"),
        published("F", 100).with_category("go").with_author("ann"),
        published("G", 100).with_category("go").with_author("gus"),
    ]);

    let related = service.related_to_at("A", 5, now())?;
    assert_eq!(related.len(), 5);
    let found = ids(&related);
    assert_eq!(&found[..2], &["B", "C"]);
    assert_eq!(&found[2..], &["D", "E", "F"]);
    Ok(())
}

#[test]
fn test_unknown_reference_returns_nothing() -> Result<()> {
    let service = service(vec![published("A", 1), published("B", 1)]);
    assert!(service.related_to_at("nope", 5, now())?.is_empty());
    Ok(())
}

#[test]
fn test_curated_alone_can_fill_limit() -> Result<()> {
    let service = service(vec![
        published("A", 10).with_related(["B", "C", "D"]),
        published("B", 10),
        published("C", 20),
        published("D", 30),
        published("E", 1).with_category("same"),
    ]);
    let related = service.related_to_at("A", 2, now())?;
    assert_eq!(ids(&related), vec!["B", "C"]);
    Ok(())
}

#[test]
fn test_dangling_and_unpublished_relations_are_skipped() -> Result<()> {
    let draft = ContentRecord::new("draft", "Draft", now());
    let service = service(vec![
        published("A", 10).with_category("rust").with_related(["ghost", "draft", "A", "B"]),
        published("B", 10).with_category("other"),
        draft,
        published("C", 10).with_category("rust"),
    ]);
    let related = service.related_to_at("A", 3, now())?;
    assert_eq!(ids(&related), vec!["B", "C"]);
    Ok(())
}

#[test]
fn test_never_returns_reference_or_exceeds_limit() -> Result<()> {
    let mut records: Vec<ContentRecord> = (0..30)
        .map(|i| published(&format!("p{i:02}"), i).with_category("rust"))
        .collect();
    records[0].related_posts = vec!["p00".into(), "p01".into(), "p02".into()];
    let service = service(records);

    for limit in [0usize, 1, 3, 7, 50] {
        let related = service.related_to_at("p00", limit, now())?;
        assert!(related.len() <= limit);
        assert!(related.iter().all(|r| r.id != "p00"));
    }
    Ok(())
}

#[test]
fn test_similarity_pool_is_bounded_by_multiplier() -> Result<()> {
    // the automatic phase looks at the newest `3 × remaining` candidates only
    let mut records = vec![published("ref", 500).with_category("rust").with_tags(["async"])];
    records.extend((0..6).map(|i| published(&format!("new{i}"), i).with_category("misc")));
    records.push(published("old-match", 400).with_category("rust").with_tags(["async"]));
    let service = service(records);

    let related = service.related_to_at("ref", 1, now())?;
    assert_eq!(related.len(), 1);
    assert_ne!(related[0].id, "old-match");

    let related = service.related_to_at("ref", 3, now())?;
    assert!(related.iter().any(|r| r.id == "old-match"));
    Ok(())
}

#[test]
fn test_custom_similarity_weights() -> Result<()> {
    let config = LecternConfig::from_json_str(r#"{"similarity": {"same_author": 100.0}}"#)?;
    let store = MemoryRecordStore::from_records(vec![
        published("ref", 100).with_category("rust").with_author("ann"),
        published("same-cat", 100).with_category("rust").with_author("bob"),
        published("same-author", 100).with_category("go").with_author("ann"),
    ])?;
    let service = SearchService::with_config(Arc::new(store), &config);
    let related = service.related_to_at("ref", 1, now())?;
    assert_eq!(ids(&related), vec!["same-author"]);
    Ok(())
}

#[test]
fn test_curated_keeps_related_posts_order() -> Result<()> {
    let service = service(vec![
        published("A", 100).with_related(["C", "B"]),
        published("B", 1),
        published("C", 50),
    ]);
    let related = service.related_to_at("A", 2, now())?;
    assert_eq!(ids(&related), vec!["C", "B"]);
    Ok(())
}
