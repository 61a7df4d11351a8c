use std::sync::Arc;

use salesline_core::AppResult;
use salesline_domain::{OwnedRecord, Permission, RecordId, ResourceAction, User};

use crate::{AccessScopeService, RecordRepository, access_denied};

/// Scoped access to one record family.
///
/// Every read and write goes through the family's required permission and
/// the caller's owner scope. A missing record and an out-of-scope record
/// fail with the same `Forbidden` error.
#[derive(Clone)]
pub struct RecordScope<R: OwnedRecord> {
    access: AccessScopeService,
    repository: Arc<dyn RecordRepository<R>>,
}

impl<R: OwnedRecord> RecordScope<R> {
    /// Creates a scope over one record repository.
    #[must_use]
    pub fn new(access: AccessScopeService, repository: Arc<dyn RecordRepository<R>>) -> Self {
        Self { access, repository }
    }

    /// Lists records visible to the actor.
    pub async fn list(&self, actor: &User) -> AppResult<Vec<R>> {
        let owners = self
            .access
            .scoped_owners(actor, R::FAMILY.required_permission(ResourceAction::View))
            .await?;

        self.repository.list_records(&owners).await
    }

    /// Loads one record the actor may view.
    pub async fn get(&self, actor: &User, record_id: RecordId) -> AppResult<R> {
        self.get_for(actor, record_id, ResourceAction::View).await
    }

    /// Loads one record the actor may perform `action` on.
    pub async fn get_for(
        &self,
        actor: &User,
        record_id: RecordId,
        action: ResourceAction,
    ) -> AppResult<R> {
        self.get_with_permission(actor, record_id, R::FAMILY.required_permission(action))
            .await
    }

    /// Loads one record the actor may touch under an explicit permission.
    pub async fn get_with_permission(
        &self,
        actor: &User,
        record_id: RecordId,
        permission: Permission,
    ) -> AppResult<R> {
        self.access.require_permission(actor, permission)?;

        let Some(record) = self.repository.find_record(record_id).await? else {
            return Err(access_denied());
        };

        if !self
            .access
            .can_access_record(actor, &record, permission)
            .await?
        {
            return Err(access_denied());
        }

        Ok(record)
    }

    /// Stores a new record after checking the create permission and that
    /// every owner reference is inside the actor's scope.
    pub async fn insert(&self, actor: &User, record: R) -> AppResult<R> {
        self.access
            .require_permission(actor, R::FAMILY.required_permission(ResourceAction::Create))?;
        self.access.require_owners_in_scope(actor, &record).await?;

        self.repository.insert_record(record.clone()).await?;
        Ok(record)
    }

    /// Persists a record previously loaded through [`Self::get_for`].
    pub async fn save(&self, record: R) -> AppResult<R> {
        self.repository.update_record(record.clone()).await?;
        Ok(record)
    }

    /// Deletes a record the actor may delete and returns it.
    pub async fn delete(&self, actor: &User, record_id: RecordId) -> AppResult<R> {
        let record = self
            .get_for(actor, record_id, ResourceAction::Delete)
            .await?;
        self.repository.delete_record(record_id).await?;
        Ok(record)
    }

    /// Stores a record derived from one the actor was already authorized on.
    pub(crate) async fn store_derived(&self, record: R) -> AppResult<R> {
        self.repository.insert_record(record.clone()).await?;
        Ok(record)
    }
}
