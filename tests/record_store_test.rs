//! Integration tests for the in-memory record store and its interplay with
//! search.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use lectern::prelude::*;
use lectern::store::load_records;
use parking_lot::Mutex;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

/// A store whose clock the test can move.
fn store_with_clock() -> (Arc<MemoryRecordStore>, Arc<Mutex<DateTime<Utc>>>) {
    let time = Arc::new(Mutex::new(start()));
    let clock_time = Arc::clone(&time);
    let store = MemoryRecordStore::with_clock(Arc::new(move || *clock_time.lock()));
    (Arc::new(store), time)
}

#[test]
fn test_lifecycle_is_visible_to_search() -> Result<()> {
    let (store, time) = store_with_clock();
    let service = SearchService::new(Arc::clone(&store));

    let draft = store.create(
        NewRecord::new("Async Rust")
            .id("post-1")
            .category("rust")
            .tags(["async", "tokio"]),
    )?;
    assert!(service.search_at(&SearchRequest::new("async"), start())?.is_empty());

    *time.lock() = start() + Duration::hours(1);
    let published = store.update(&draft.id, RecordUpdate::new().status(ContentStatus::Published))?;
    assert_eq!(published.published_at, Some(start() + Duration::hours(1)));

    let results = service.search_at(&SearchRequest::new("async"), start())?;
    assert_eq!(results.len(), 1);

    store.delete("post-1")?;
    assert!(service.search_at(&SearchRequest::new("async"), start())?.is_empty());
    Ok(())
}

#[test]
fn test_retitle_changes_slug_and_ranking() -> Result<()> {
    let (store, _) = store_with_clock();
    let service = SearchService::new(Arc::clone(&store));

    let first = store.create(NewRecord::new("Weekly Notes").publish(true))?;
    let second = store.create(NewRecord::new("Weekly Notes").publish(true))?;
    assert_eq!(first.slug, "weekly-notes");
    assert_eq!(second.slug, "weekly-notes-2");

    let renamed = store.update(&second.id, RecordUpdate::new().title("Rust Weekly"))?;
    assert_eq!(renamed.slug, "rust-weekly");
    assert!(store.get_by_slug("weekly-notes-2")?.is_none());

    let results = service.search_at(&SearchRequest::new("rust"), start())?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, second.id);
    Ok(())
}

#[test]
fn test_counts_only_grow() -> Result<()> {
    let (store, _) = store_with_clock();
    let record = store.create(NewRecord::new("Counted").publish(true))?;

    let mut last = 0;
    for _ in 0..5 {
        let views = store.increment_views(&record.id)?;
        assert!(views > last);
        last = views;
    }
    assert_eq!(store.get(&record.id)?.map(|r| r.view_count), Some(5));
    Ok(())
}

#[test]
fn test_scheduled_publication() -> Result<()> {
    let (store, time) = store_with_clock();
    let at = start() + Duration::days(1);
    let record = store.create(NewRecord::new("Launch").publish(true).scheduled_at(at))?;
    assert_eq!(record.status, ContentStatus::Draft);

    let public = store.list(&RecordQuery::new().published(true))?;
    assert!(public.is_empty());

    *time.lock() = at + Duration::minutes(5);
    assert_eq!(store.publish_due(at + Duration::minutes(5)), vec![record.id.clone()]);
    let public = store.list(&RecordQuery::new().published(true))?;
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].published_at, Some(at));
    Ok(())
}

#[test]
fn test_load_json_and_jsonl_files() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let json_path = dir.path().join("posts.json");
    std::fs::write(
        &json_path,
        r#"[
            {"id": "1", "title": "Rust Programming", "status": "published", "tags": ["rust"]},
            {"id": "2", "title": "Python Basics", "status": "published"}
        ]"#,
    )?;
    let jsonl_path = dir.path().join("posts.jsonl");
    std::fs::write(
        &jsonl_path,
        "{\"id\": \"1\", \"title\": \"Rust Programming\", \"status\": \"published\", \"tags\": [\"rust\"]}\n\
         {\"id\": \"2\", \"title\": \"Python Basics\", \"status\": \"published\"}\n",
    )?;

    let from_json = load_records(&json_path)?;
    let from_jsonl = load_records(&jsonl_path)?;
    assert_eq!(from_json, from_jsonl);

    let store = MemoryRecordStore::from_records(from_json)?;
    let service = SearchService::new(Arc::new(store));
    let results = service.search_at(&SearchRequest::new("rust"), start())?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "1");
    assert!(results[0].published);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_records("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, LecternError::Io(_)));
}
