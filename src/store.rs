//! Record store abstraction.
//!
//! Ranking and recommendation never load or save records themselves. A
//! [`RecordStore`] supplies filtered, sorted and paginated record lists and
//! individual lookups; [`memory::MemoryRecordStore`] is the in-memory
//! implementation that also owns the record lifecycle (create, update,
//! publish, delete and counters).
//!
//! # Example
//!
//! ```
//! use lectern::store::{MemoryRecordStore, NewRecord, RecordQuery, RecordStore};
//!
//! # fn main() -> lectern::error::Result<()> {
//! let store = MemoryRecordStore::new();
//! store.create(NewRecord::new("Hello Rust").publish(true))?;
//! store.create(NewRecord::new("Draft notes"))?;
//!
//! let published = store.list(&RecordQuery::new().published(true))?;
//! assert_eq!(published.len(), 1);
//! assert_eq!(published[0].slug, "hello-rust");
//! # Ok(())
//! # }
//! ```

use std::fmt::Debug;

use crate::content::ContentRecord;
use crate::error::Result;

pub mod changes;
pub mod loader;
pub mod memory;
pub mod query;

pub use changes::{NewRecord, RecordUpdate};
pub use loader::{load_records, parse_records_json, parse_records_jsonl};
pub use memory::MemoryRecordStore;
pub use query::{RecordQuery, SortField, SortOrder};

/// Read access to a collection of content records.
pub trait RecordStore: Send + Sync + Debug {
    /// Look up a record by identifier.
    fn get(&self, id: &str) -> Result<Option<ContentRecord>>;

    /// Look up a record by slug.
    fn get_by_slug(&self, slug: &str) -> Result<Option<ContentRecord>>;

    /// Whether a record with this identifier exists.
    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// Records matching every filter of `query`, sorted and paginated as the
    /// query asks.
    fn list(&self, query: &RecordQuery) -> Result<Vec<ContentRecord>>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
