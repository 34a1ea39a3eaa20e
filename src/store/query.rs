//! Record filtering, sorting and pagination.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use ahash::AHashSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{ContentRecord, ContentStatus};
use crate::error::LecternError;

/// Field a record listing is sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    PublishedAt,
    ViewCount,
    LikeCount,
}

impl SortField {
    fn compare(&self, a: &ContentRecord, b: &ContentRecord) -> Ordering {
        match self {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            // unpublished records sort as oldest
            SortField::PublishedAt => a.published_at.cmp(&b.published_at),
            SortField::ViewCount => a.view_count.cmp(&b.view_count),
            SortField::LikeCount => a.like_count.cmp(&b.like_count),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::PublishedAt => "publishedAt",
            SortField::ViewCount => "viewCount",
            SortField::LikeCount => "likeCount",
        };
        f.write_str(name)
    }
}

impl FromStr for SortField {
    type Err = LecternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "createdat" | "created" => Ok(SortField::CreatedAt),
            "updatedat" | "updated" => Ok(SortField::UpdatedAt),
            "publishedat" | "published" => Ok(SortField::PublishedAt),
            "viewcount" | "views" => Ok(SortField::ViewCount),
            "likecount" | "likes" => Ok(SortField::LikeCount),
            _ => Err(LecternError::invalid_argument(format!(
                "unknown sort field '{s}'"
            ))),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filters, sort and pagination for listing records.
///
/// Text filters are case-insensitive. `category` must match exactly; `author`,
/// `tag` and `series` match on substrings. The date range is inclusive on
/// both ends. The default sort is creation time, newest first; records with
/// equal sort keys are ordered by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordQuery {
    pub published: Option<bool>,
    pub status: Option<ContentStatus>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub series: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub min_views: Option<u64>,
    pub exclude_ids: Vec<String>,
    /// When set, only these identifiers are eligible.
    pub include_ids: Option<Vec<String>>,
    pub sort: SortField,
    pub order: SortOrder,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn status(mut self, status: ContentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn series<S: Into<String>>(mut self, series: S) -> Self {
        self.series = Some(series.into());
        self
    }

    pub fn created_between(
        mut self,
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_after = after;
        self.created_before = before;
        self
    }

    pub fn min_views(mut self, views: u64) -> Self {
        self.min_views = Some(views);
        self
    }

    pub fn exclude<S: Into<String>>(mut self, id: S) -> Self {
        self.exclude_ids.push(id.into());
        self
    }

    pub fn include_only<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn sort_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = field;
        self.order = order;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The same filters and sort with pagination removed.
    pub fn without_pagination(&self) -> Self {
        RecordQuery {
            offset: 0,
            limit: None,
            ..self.clone()
        }
    }

    /// Whether neither the published flag nor the status is constrained.
    pub fn is_visibility_unset(&self) -> bool {
        self.published.is_none() && self.status.is_none()
    }

    /// Whether `record` passes every filter.
    pub fn matches(&self, record: &ContentRecord) -> bool {
        if let Some(published) = self.published
            && record.published != published
        {
            return false;
        }
        if let Some(status) = self.status
            && record.status != status
        {
            return false;
        }
        if let Some(author) = &self.author
            && !contains_ci(&record.author, author)
        {
            return false;
        }
        if let Some(category) = &self.category
            && record.category.to_lowercase() != category.to_lowercase()
        {
            return false;
        }
        if let Some(tag) = &self.tag
            && !record.tags.iter().any(|t| contains_ci(t, tag))
        {
            return false;
        }
        if let Some(series) = &self.series
            && !record
                .series
                .as_deref()
                .is_some_and(|s| contains_ci(s, series))
        {
            return false;
        }
        if let Some(after) = self.created_after
            && record.created_at < after
        {
            return false;
        }
        if let Some(before) = self.created_before
            && record.created_at > before
        {
            return false;
        }
        if let Some(min_views) = self.min_views
            && record.view_count < min_views
        {
            return false;
        }
        if self.exclude_ids.iter().any(|id| *id == record.id) {
            return false;
        }
        if let Some(include) = &self.include_ids
            && !include.iter().any(|id| *id == record.id)
        {
            return false;
        }
        true
    }

    /// Filter, sort and paginate `records`, cloning the survivors.
    pub fn apply<'a, I>(&self, records: I) -> Vec<ContentRecord>
    where
        I: IntoIterator<Item = &'a ContentRecord>,
    {
        let mut seen = AHashSet::new();
        let mut matched: Vec<&ContentRecord> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .filter(|record| seen.insert(record.id.as_str()))
            .collect();

        matched.sort_by(|a, b| {
            let ord = self.sort.compare(a, b);
            let ord = match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            };
            ord.then_with(|| a.id.cmp(&b.id))
        });

        let page = matched.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => page.take(limit).cloned().collect(),
            None => page.cloned().collect(),
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
