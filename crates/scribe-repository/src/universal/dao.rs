//! The universal DAO contract.

use super::filter::Filter;
use super::record::UniversalRecord;
use async_trait::async_trait;
use scribe_core::{Interface, OffsetLimit, ScribeResult};

/// Generic persistence engine over [`UniversalRecord`]s stored in one table.
///
/// Implementations translate field names to columns with the mapping they
/// were constructed with. "Not found" is `Ok(None)` / `Ok(false)`, never an
/// error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniversalDao: Interface + Send + Sync {
    /// Creates the backing table (and indexes) if missing.
    async fn ensure_schema(&self) -> ScribeResult<()>;

    /// Inserts a record. Duplicate ids surface as `ScribeError::Conflict`.
    async fn create(&self, record: &UniversalRecord) -> ScribeResult<bool>;

    /// Fetches a record by id.
    async fn get(&self, id: &str) -> ScribeResult<Option<UniversalRecord>>;

    /// Overwrites an existing record by id. Returns `true` if a row was affected.
    async fn update(&self, record: &UniversalRecord) -> ScribeResult<bool>;

    /// Deletes a record by id. Returns `true` if a row was affected.
    async fn delete(&self, id: &str) -> ScribeResult<bool>;

    /// Fetches a window of records matching `filter`, ordered by id.
    async fn get_n(
        &self,
        filter: Option<Filter>,
        window: OffsetLimit,
    ) -> ScribeResult<Vec<UniversalRecord>>;

    /// Fetches every record matching `filter`, ordered by id.
    async fn get_all(&self, filter: Option<Filter>) -> ScribeResult<Vec<UniversalRecord>>;

    /// Counts records matching `filter`.
    async fn count(&self, filter: Option<Filter>) -> ScribeResult<u64>;
}
