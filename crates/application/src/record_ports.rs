use async_trait::async_trait;
use salesline_core::AppResult;
use salesline_domain::{OwnedRecord, RecordId, UserId, VisibleOwners};

/// Port answering whether a user still owns records of some family.
#[async_trait]
pub trait RecordOwnershipRepository: Send + Sync {
    /// Counts records that reference `owner_id` in any owner field.
    async fn count_records_owned_by(&self, owner_id: &UserId) -> AppResult<u64>;
}

/// Repository port for one CRM record family.
///
/// `list_records` applies the owner filter: a record is returned when any of
/// its owner fields is admitted by `owners`.
#[async_trait]
pub trait RecordRepository<R: OwnedRecord>: RecordOwnershipRepository {
    /// Persists a new record.
    async fn insert_record(&self, record: R) -> AppResult<()>;

    /// Persists changes to an existing record.
    async fn update_record(&self, record: R) -> AppResult<()>;

    /// Finds a record by id, without scope filtering.
    async fn find_record(&self, record_id: RecordId) -> AppResult<Option<R>>;

    /// Lists records visible through `owners`, newest first.
    async fn list_records(&self, owners: &VisibleOwners) -> AppResult<Vec<R>>;

    /// Deletes a record.
    async fn delete_record(&self, record_id: RecordId) -> AppResult<()>;
}
