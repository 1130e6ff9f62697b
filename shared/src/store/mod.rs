//! Record store abstraction.
//!
//! Every operation takes the table name explicitly; stores hold no notion of an
//! "active" collection.

mod dynamodb;
mod memory;

pub use dynamodb::DynamoDbStore;
pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::models::Record;
use crate::Result;

/// Predicate used by [`RecordStore::find`].
pub type RecordPredicate<'a> = &'a (dyn Fn(&Record) -> bool + Send + Sync);

/// Key-value table capability used by the dispatchers.
///
/// Each method performs a single call against the backing store and never retries.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a record by id.
    async fn get(&self, table: &str, id: &str) -> Result<Option<Record>>;

    /// Enumerate every record in the table, in store order.
    async fn scan(&self, table: &str) -> Result<Vec<Record>>;

    /// Insert or replace a record.
    async fn put(&self, table: &str, record: &Record) -> Result<()>;

    /// Remove a record by id. Removing an absent id succeeds.
    async fn delete(&self, table: &str, id: &str) -> Result<()>;

    /// Return the first record, in scan order, that matches `predicate`.
    async fn find(&self, table: &str, predicate: RecordPredicate<'_>) -> Result<Option<Record>> {
        let records = self.scan(table).await?;
        Ok(records.into_iter().find(|record| predicate(record)))
    }
}
