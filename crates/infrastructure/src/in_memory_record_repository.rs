use async_trait::async_trait;
use salesline_application::{RecordOwnershipRepository, RecordRepository};
use salesline_core::{AppError, AppResult};
use salesline_domain::{OwnedRecord, RecordId, UserId, VisibleOwners};
use tokio::sync::RwLock;

/// In-memory repository for one record family, kept in insertion order.
#[derive(Debug)]
pub struct InMemoryRecordRepository<R> {
    records: RwLock<Vec<R>>,
}

impl<R> InMemoryRecordRepository<R> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R> Default for InMemoryRecordRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn missing<R: OwnedRecord>(record_id: RecordId) -> AppError {
    AppError::NotFound(format!(
        "{} '{record_id}' does not exist",
        R::FAMILY.as_str()
    ))
}

#[async_trait]
impl<R: OwnedRecord> RecordOwnershipRepository for InMemoryRecordRepository<R> {
    async fn count_records_owned_by(&self, owner_id: &UserId) -> AppResult<u64> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.owner_ids().contains(&owner_id))
            .count() as u64)
    }
}

#[async_trait]
impl<R: OwnedRecord> RecordRepository<R> for InMemoryRecordRepository<R> {
    async fn insert_record(&self, record: R) -> AppResult<()> {
        let mut records = self.records.write().await;

        if records
            .iter()
            .any(|existing| existing.record_id() == record.record_id())
        {
            return Err(AppError::Conflict(format!(
                "{} '{}' already exists",
                R::FAMILY.as_str(),
                record.record_id()
            )));
        }

        if let Some(key) = record.owner_unique_key()
            && records.iter().any(|existing| {
                existing.primary_owner() == record.primary_owner()
                    && existing.owner_unique_key().as_ref() == Some(&key)
            })
        {
            return Err(AppError::Conflict(format!(
                "{} for '{key}' already exists for this owner",
                R::FAMILY.as_str()
            )));
        }

        records.push(record);
        Ok(())
    }

    async fn update_record(&self, record: R) -> AppResult<()> {
        let mut records = self.records.write().await;
        let record_id = record.record_id();

        let slot = records
            .iter_mut()
            .find(|existing| existing.record_id() == record_id)
            .ok_or_else(|| missing::<R>(record_id))?;
        *slot = record;
        Ok(())
    }

    async fn find_record(&self, record_id: RecordId) -> AppResult<Option<R>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.record_id() == record_id)
            .cloned())
    }

    async fn list_records(&self, owners: &VisibleOwners) -> AppResult<Vec<R>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .filter(|record| owners.admits_record(*record))
            .cloned()
            .collect())
    }

    async fn delete_record(&self, record_id: RecordId) -> AppResult<()> {
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|record| record.record_id() != record_id);
        if records.len() == before {
            return Err(missing::<R>(record_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use salesline_application::{RecordOwnershipRepository, RecordRepository};
    use salesline_core::{AppError, AppResult};
    use salesline_domain::{
        Lead, LeadDetails, RecordId, Target, TargetPeriod, UserId, VisibleOwners,
    };

    use super::InMemoryRecordRepository;

    fn lead(name: &str, creator: &str, assignee: Option<&str>) -> AppResult<Lead> {
        Lead::new(
            name,
            LeadDetails::default(),
            UserId::parse(creator)?,
            assignee.map(UserId::parse).transpose()?,
        )
    }

    fn only(ids: &[&str]) -> AppResult<VisibleOwners> {
        Ok(VisibleOwners::Only(
            ids.iter()
                .map(|id| UserId::parse(*id))
                .collect::<AppResult<BTreeSet<_>>>()?,
        ))
    }

    #[tokio::test]
    async fn listing_matches_either_owner_newest_first() -> AppResult<()> {
        let repository = InMemoryRecordRepository::<Lead>::new();
        repository.insert_record(lead("first", "u1", Some("u2"))?).await?;
        repository.insert_record(lead("second", "u2", Some("u1"))?).await?;
        repository.insert_record(lead("third", "u2", Some("u2"))?).await?;

        let visible = repository.list_records(&only(&["u1"])?).await?;
        let names: Vec<&str> = visible.iter().map(|lead| lead.name().as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);

        let everything = repository.list_records(&VisibleOwners::All).await?;
        assert_eq!(everything.len(), 3);

        let nobody = repository.list_records(&only(&[])?).await?;
        assert!(nobody.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_require_existing_record() -> AppResult<()> {
        let repository = InMemoryRecordRepository::<Lead>::new();
        let stored = lead("stored", "u1", None)?;
        repository.insert_record(stored.clone()).await?;

        let duplicate = repository.insert_record(stored.clone()).await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        let missing = repository.delete_record(RecordId::new()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        repository.delete_record(stored.id()).await?;
        let gone = repository.update_record(stored).await;
        assert!(matches!(gone, Err(AppError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn second_target_for_same_user_and_month_conflicts() -> AppResult<()> {
        let repository = InMemoryRecordRepository::<Target>::new();
        let march = TargetPeriod::new(2026, 3)?;
        let april = TargetPeriod::new(2026, 4)?;
        let a1 = UserId::parse("a1")?;
        let m1 = UserId::parse("m1")?;

        repository
            .insert_record(Target::new(a1.clone(), march, 10_000, m1.clone())?)
            .await?;
        let duplicate = repository
            .insert_record(Target::new(a1.clone(), march, 20_000, m1.clone())?)
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        repository
            .insert_record(Target::new(a1, april, 10_000, m1.clone())?)
            .await?;
        repository
            .insert_record(Target::new(UserId::parse("a3")?, march, 10_000, m1)?)
            .await?;
        assert_eq!(repository.list_records(&VisibleOwners::All).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn ownership_counts_both_owner_fields() -> AppResult<()> {
        let repository = InMemoryRecordRepository::<Lead>::new();
        repository.insert_record(lead("a", "u1", Some("u2"))?).await?;
        repository.insert_record(lead("b", "u2", None)?).await?;

        assert_eq!(repository.count_records_owned_by(&UserId::parse("u2")?).await?, 2);
        assert_eq!(repository.count_records_owned_by(&UserId::parse("u1")?).await?, 1);
        Ok(())
    }
}
