//! In-memory record store.

use std::sync::Arc;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use log::debug;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::content::{ContentRecord, slugify, unique_slug};
use crate::error::{LecternError, Result};
use crate::store::changes::{NewRecord, RecordUpdate};
use crate::store::query::RecordQuery;
use crate::store::RecordStore;

/// Source of the current time for timestamps the store assigns.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Default)]
struct Inner {
    records: AHashMap<String, ContentRecord>,
    /// slug → id
    slugs: AHashMap<String, String>,
}

impl Inner {
    fn slug_taken_by_other(&self, slug: &str, id: &str) -> bool {
        self.slugs.get(slug).is_some_and(|owner| owner != id)
    }

    fn record_mut(&mut self, id: &str) -> Result<&mut ContentRecord> {
        self.records
            .get_mut(id)
            .ok_or_else(|| LecternError::not_found(format!("record {id}")))
    }
}

/// A record store backed by a hash map behind a read-write lock.
///
/// Slugs are unique across all stored records at all times. Deletion is a
/// hard removal.
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
    clock: Clock,
}

impl std::fmt::Debug for MemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRecordStore")
            .field("records", &self.inner.read().records.len())
            .field("clock", &"<Clock>")
            .finish()
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordStore {
    /// Create an empty store that stamps records with the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    /// Create an empty store with a custom clock.
    pub fn with_clock(clock: Clock) -> Self {
        MemoryRecordStore {
            inner: RwLock::new(Inner::default()),
            clock,
        }
    }

    /// Create a store holding `records`, as by [`MemoryRecordStore::insert`].
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = ContentRecord>,
    {
        let store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Store an existing record as-is.
    ///
    /// The identifier must be unique. A missing or colliding slug is
    /// re-derived from the title. A published status or flag without a
    /// publication time gets the creation time.
    pub fn insert(&self, mut record: ContentRecord) -> Result<ContentRecord> {
        if record.id.is_empty() {
            return Err(LecternError::invalid_argument("record id must not be empty"));
        }

        let mut inner = self.inner.write();
        if inner.records.contains_key(&record.id) {
            return Err(LecternError::storage(format!(
                "duplicate record id {}",
                record.id
            )));
        }

        if record.slug.is_empty() || inner.slugs.contains_key(&record.slug) {
            record.slug = unique_slug(&record.title, |s| inner.slugs.contains_key(s));
        }
        if record.is_public() {
            record.mark_published(record.created_at);
        } else if record.published && record.published_at.is_none() {
            record.published_at = Some(record.created_at);
        }

        inner.slugs.insert(record.slug.clone(), record.id.clone());
        inner.records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    /// Create a record from `new`.
    ///
    /// The record starts as a draft unless publication is requested and no
    /// future schedule blocks it.
    pub fn create(&self, new: NewRecord) -> Result<ContentRecord> {
        if new.title.trim().is_empty() {
            return Err(LecternError::invalid_argument("title must not be empty"));
        }
        let now = self.now();
        let id = new.id.unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut inner = self.inner.write();
        if inner.records.contains_key(&id) {
            return Err(LecternError::storage(format!("duplicate record id {id}")));
        }

        let slug = unique_slug(&new.title, |s| inner.slugs.contains_key(s));
        let mut record = ContentRecord {
            id,
            slug,
            title: new.title,
            content: new.content,
            excerpt: new.excerpt,
            category: new.category,
            tags: new.tags,
            author: new.author,
            created_at: now,
            updated_at: now,
            scheduled_at: new.scheduled_at,
            series: new.series,
            series_order: new.series_order,
            related_posts: new.related_posts,
            ..Default::default()
        };

        let blocked_by_schedule = new.scheduled_at.is_some_and(|at| at > now);
        if new.publish && !blocked_by_schedule {
            record.mark_published(now);
        }

        debug!("created record {} ({}) status={}", record.id, record.slug, record.status);
        inner.slugs.insert(record.slug.clone(), record.id.clone());
        inner.records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    /// Apply `update` to the record `id`.
    pub fn update(&self, id: &str, update: RecordUpdate) -> Result<ContentRecord> {
        let now = self.now();
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let mut record = inner
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| LecternError::not_found(format!("record {id}")))?;
        let old_slug = record.slug.clone();
        update.apply_to(&mut record, now, |s| inner.slug_taken_by_other(s, id));

        if record.slug != old_slug {
            debug!("record {id} slug {old_slug} -> {}", record.slug);
            inner.slugs.remove(&old_slug);
            inner.slugs.insert(record.slug.clone(), id.to_string());
        }
        inner.records.insert(id.to_string(), record.clone());
        Ok(record)
    }

    /// Remove the record `id`, returning it.
    pub fn delete(&self, id: &str) -> Result<ContentRecord> {
        let mut inner = self.inner.write();
        let record = inner
            .records
            .remove(id)
            .ok_or_else(|| LecternError::not_found(format!("record {id}")))?;
        inner.slugs.remove(&record.slug);
        debug!("deleted record {id}");
        Ok(record)
    }

    /// Increment the view count, returning the new value.
    pub fn increment_views(&self, id: &str) -> Result<u64> {
        let mut inner = self.inner.write();
        let record = inner.record_mut(id)?;
        record.view_count = record.view_count.saturating_add(1);
        Ok(record.view_count)
    }

    /// Increment the like count, returning the new value.
    pub fn increment_likes(&self, id: &str) -> Result<u64> {
        let mut inner = self.inner.write();
        let record = inner.record_mut(id)?;
        record.like_count = record.like_count.saturating_add(1);
        Ok(record.like_count)
    }

    /// Increment the comment count, returning the new value.
    pub fn increment_comments(&self, id: &str) -> Result<u64> {
        let mut inner = self.inner.write();
        let record = inner.record_mut(id)?;
        record.comment_count = record.comment_count.saturating_add(1);
        Ok(record.comment_count)
    }

    /// Publish every unpublished record whose schedule is at or before
    /// `now`. Returns the identifiers published, sorted.
    pub fn publish_due(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut inner = self.inner.write();
        let mut published = Vec::new();
        for record in inner.records.values_mut() {
            if let Some(at) = record.scheduled_at
                && at <= now
                && !record.published
            {
                record.mark_published(at);
                record.updated_at = now;
                published.push(record.id.clone());
            }
        }
        published.sort();
        if !published.is_empty() {
            debug!("published {} scheduled records", published.len());
        }
        published
    }

    /// Every stored record, in no particular order.
    pub fn all(&self) -> Vec<ContentRecord> {
        self.inner.read().records.values().cloned().collect()
    }

    /// The slug `title` would receive if a record were created now.
    pub fn preview_slug(&self, title: &str) -> String {
        let inner = self.inner.read();
        let base = slugify(title);
        if inner.slugs.contains_key(&base) {
            unique_slug(title, |s| inner.slugs.contains_key(s))
        } else {
            base
        }
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, id: &str) -> Result<Option<ContentRecord>> {
        Ok(self.inner.read().records.get(id).cloned())
    }

    fn get_by_slug(&self, slug: &str) -> Result<Option<ContentRecord>> {
        let inner = self.inner.read();
        Ok(inner
            .slugs
            .get(slug)
            .and_then(|id| inner.records.get(id))
            .cloned())
    }

    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.inner.read().records.contains_key(id))
    }

    fn list(&self, query: &RecordQuery) -> Result<Vec<ContentRecord>> {
        Ok(query.apply(self.inner.read().records.values()))
    }

    fn len(&self) -> usize {
        self.inner.read().records.len()
    }
}
