//! Inputs for creating and updating records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{ContentRecord, ContentStatus, unique_slug};

/// Fields for a record that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewRecord {
    /// Identifier to use; a random UUID is generated when absent.
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub series: Option<String>,
    pub series_order: Option<i64>,
    pub related_posts: Vec<String>,
    /// Publish immediately unless a future schedule is set.
    pub publish: bool,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl NewRecord {
    pub fn new<S: Into<String>>(title: S) -> Self {
        NewRecord {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = content.into();
        self
    }

    pub fn excerpt<S: Into<String>>(mut self, excerpt: S) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = category.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = author.into();
        self
    }

    pub fn series<S: Into<String>>(mut self, series: S, order: Option<i64>) -> Self {
        self.series = Some(series.into());
        self.series_order = order;
        self
    }

    pub fn related<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_posts = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    pub fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }
}

/// A partial update. `None` leaves a field untouched.
///
/// Nullable fields use a nested option: `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub series: Option<Option<String>>,
    pub series_order: Option<Option<i64>>,
    pub related_posts: Option<Vec<String>>,
    pub status: Option<ContentStatus>,
    pub published: Option<bool>,
    pub scheduled_at: Option<Option<DateTime<Utc>>>,
}

impl RecordUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn status(mut self, status: ContentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    /// Apply to `record` at time `now`.
    ///
    /// A changed title re-derives the slug through `is_slug_taken`.
    /// `status = Published` forces the published flag on; setting the flag
    /// alone stamps `published_at` when it is missing. Other status changes
    /// leave the published flag as it is.
    pub(crate) fn apply_to<F>(self, record: &mut ContentRecord, now: DateTime<Utc>, is_slug_taken: F)
    where
        F: FnMut(&str) -> bool,
    {
        if let Some(title) = self.title
            && title != record.title
        {
            record.slug = unique_slug(&title, is_slug_taken);
            record.title = title;
        }
        if let Some(content) = self.content {
            record.content = content;
        }
        if let Some(excerpt) = self.excerpt {
            record.excerpt = excerpt;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(tags) = self.tags {
            record.tags = tags;
        }
        if let Some(author) = self.author {
            record.author = author;
        }
        if let Some(series) = self.series {
            record.series = series;
        }
        if let Some(order) = self.series_order {
            record.series_order = order;
        }
        if let Some(related) = self.related_posts {
            record.related_posts = related;
        }
        if let Some(scheduled_at) = self.scheduled_at {
            record.scheduled_at = scheduled_at;
        }
        if let Some(published) = self.published {
            record.published = published;
            if published && record.published_at.is_none() {
                record.published_at = Some(now);
            }
        }
        match self.status {
            Some(ContentStatus::Published) => record.mark_published(now),
            Some(status) => record.status = status,
            None => {}
        }
        record.updated_at = now;
    }
}
