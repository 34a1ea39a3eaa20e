//! Content record structure.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LecternError;

/// Lifecycle status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = LecternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(ContentStatus::Draft),
            "published" => Ok(ContentStatus::Published),
            "archived" => Ok(ContentStatus::Archived),
            other => Err(LecternError::invalid_argument(format!(
                "unknown status '{other}'"
            ))),
        }
    }
}

/// Read a field that may be JSON `null`, falling back to the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single publishable article.
///
/// Every field has a default so that records loaded from loosely-shaped JSON
/// still score: a missing or `null` text field is an empty string, a missing
/// count is zero and a missing timestamp is `None` (or the Unix epoch for the
/// two mandatory timestamps).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentRecord {
    /// Unique, immutable identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Unique URL slug derived from the title.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Body text.
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    /// Tags in insertion order.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,

    #[serde(deserialize_with = "null_as_default")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: DateTime<Utc>,
    /// `None` until the record is published.
    pub published_at: Option<DateTime<Utc>>,
    /// Future publication time, if scheduled.
    pub scheduled_at: Option<DateTime<Utc>>,

    #[serde(deserialize_with = "null_as_default")]
    pub view_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub like_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub comment_count: u64,

    #[serde(deserialize_with = "null_as_default")]
    pub status: ContentStatus,
    /// Kept consistent with `status == Published` by the store.
    #[serde(deserialize_with = "null_as_default")]
    pub published: bool,

    pub series: Option<String>,
    pub series_order: Option<i64>,
    /// Manually curated related-record identifiers.
    #[serde(deserialize_with = "null_as_default")]
    pub related_posts: Vec<String>,
}

impl ContentRecord {
    /// Create a draft record with the given identifier and title.
    ///
    /// Both timestamps are set to `created_at`; the slug is derived from the
    /// title but uniqueness is only enforced once the record enters a store.
    pub fn new<I: Into<String>, T: Into<String>>(
        id: I,
        title: T,
        created_at: DateTime<Utc>,
    ) -> Self {
        let title = title.into();
        ContentRecord {
            id: id.into(),
            slug: super::slugify(&title),
            title,
            created_at,
            updated_at: created_at,
            ..Default::default()
        }
    }

    /// The publication time if set, otherwise the creation time.
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }

    /// Whether the effective date falls within `window_days` before `now`.
    ///
    /// Dates in the future of `now` count as recent. A window reaching past
    /// the representable date range covers every record.
    pub fn is_recent(&self, now: DateTime<Utc>, window_days: i64) -> bool {
        match Duration::try_days(window_days).and_then(|window| now.checked_sub_signed(window)) {
            Some(cutoff) => self.effective_date() >= cutoff,
            None => true,
        }
    }

    /// Whether the record may be served publicly.
    pub fn is_public(&self) -> bool {
        self.status == ContentStatus::Published
    }

    /// Mark the record published at `at`, keeping an existing timestamp.
    pub fn mark_published(&mut self, at: DateTime<Utc>) {
        self.status = ContentStatus::Published;
        self.published = true;
        self.scheduled_at = None;
        if self.published_at.is_none() {
            self.published_at = Some(at);
        }
    }

    pub fn with_content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_excerpt<S: Into<String>>(mut self, excerpt: S) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_series<S: Into<String>>(mut self, series: S, order: Option<i64>) -> Self {
        self.series = Some(series.into());
        self.series_order = order;
        self
    }

    pub fn with_views(mut self, view_count: u64) -> Self {
        self.view_count = view_count;
        self
    }

    pub fn with_related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_posts = related.into_iter().map(Into::into).collect();
        self
    }

    /// Builder form of [`ContentRecord::mark_published`].
    pub fn published_on(mut self, at: DateTime<Utc>) -> Self {
        self.mark_published(at);
        self
    }
}
