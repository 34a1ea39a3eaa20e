//! Content records: the unit that is searched, ranked and recommended.
//!
//! A [`ContentRecord`] is one publishable article. Ranking and recommendation
//! treat records as read-only; only the record store mutates them.

pub mod record;
pub mod slug;
pub mod validation;

pub use record::{ContentRecord, ContentStatus};
pub use slug::{slugify, unique_slug};
pub use validation::{ValidationReport, validate_records};
