//! PostgreSQL-backed CRM record repository.
//!
//! All families share `crm_records`: owner references are projected into
//! indexed columns and the record itself is stored as a JSONB payload.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::warn;

use salesline_application::{RecordOwnershipRepository, RecordRepository};
use salesline_core::{AppError, AppResult};
use salesline_domain::{OwnedRecord, RecordId, UserId, VisibleOwners};

/// PostgreSQL repository for one record family.
pub struct PostgresRecordRepository<R> {
    pool: PgPool,
    record: PhantomData<fn() -> R>,
}

impl<R> Clone for PostgresRecordRepository<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            record: PhantomData,
        }
    }
}

impl<R> PostgresRecordRepository<R> {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            record: PhantomData,
        }
    }
}

fn decode_payload<R: OwnedRecord + DeserializeOwned>(payload: serde_json::Value) -> AppResult<R> {
    serde_json::from_value(payload).map_err(|error| {
        warn!(family = R::FAMILY.as_str(), %error, "stored record payload is invalid");
        AppError::Internal(format!(
            "stored {} payload is invalid: {error}",
            R::FAMILY.as_str()
        ))
    })
}

fn owner_columns<R: OwnedRecord>(record: &R) -> (Option<String>, Option<String>) {
    (
        record.primary_owner().map(ToString::to_string),
        record.secondary_owner().map(ToString::to_string),
    )
}

#[async_trait]
impl<R> RecordOwnershipRepository for PostgresRecordRepository<R>
where
    R: OwnedRecord + Serialize + DeserializeOwned,
{
    async fn count_records_owned_by(&self, owner_id: &UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM crm_records
            WHERE family = $1
                AND (primary_owner = $2 OR secondary_owner = $2)
            "#,
        )
        .bind(R::FAMILY.as_str())
        .bind(owner_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to count {} records: {error}",
                R::FAMILY.as_str()
            ))
        })?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}

#[async_trait]
impl<R> RecordRepository<R> for PostgresRecordRepository<R>
where
    R: OwnedRecord + Serialize + DeserializeOwned,
{
    async fn insert_record(&self, record: R) -> AppResult<()> {
        let (primary_owner, secondary_owner) = owner_columns(&record);

        let result = sqlx::query(
            r#"
            INSERT INTO crm_records (
                id, family, primary_owner, secondary_owner, owner_unique_key, payload
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.record_id().as_uuid())
        .bind(R::FAMILY.as_str())
        .bind(primary_owner)
        .bind(secondary_owner)
        .bind(record.owner_unique_key())
        .bind(Json(&record))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "{} '{}' conflicts with an existing record",
                        R::FAMILY.as_str(),
                        record.record_id()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to insert {} record: {error}",
                    R::FAMILY.as_str()
                )))
            }
        }
    }

    async fn update_record(&self, record: R) -> AppResult<()> {
        let (primary_owner, secondary_owner) = owner_columns(&record);

        let result = sqlx::query(
            r#"
            UPDATE crm_records
            SET primary_owner = $3,
                secondary_owner = $4,
                owner_unique_key = $5,
                payload = $6,
                updated_at = now()
            WHERE id = $1 AND family = $2
            "#,
        )
        .bind(record.record_id().as_uuid())
        .bind(R::FAMILY.as_str())
        .bind(primary_owner)
        .bind(secondary_owner)
        .bind(record.owner_unique_key())
        .bind(Json(&record))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update {} record: {error}",
                R::FAMILY.as_str()
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "{} '{}' does not exist",
                R::FAMILY.as_str(),
                record.record_id()
            )));
        }

        Ok(())
    }

    async fn find_record(&self, record_id: RecordId) -> AppResult<Option<R>> {
        let payload: Option<serde_json::Value> = sqlx::query_scalar(
            r#"
            SELECT payload
            FROM crm_records
            WHERE id = $1 AND family = $2
            "#,
        )
        .bind(record_id.as_uuid())
        .bind(R::FAMILY.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to find {} record: {error}",
                R::FAMILY.as_str()
            ))
        })?;

        payload.map(decode_payload::<R>).transpose()
    }

    async fn list_records(&self, owners: &VisibleOwners) -> AppResult<Vec<R>> {
        let owner_ids: Option<Vec<String>> = owners
            .owner_ids()
            .map(|ids| ids.iter().map(ToString::to_string).collect());

        let payloads: Vec<serde_json::Value> = sqlx::query_scalar(
            r#"
            SELECT payload
            FROM crm_records
            WHERE family = $1
                AND (
                    $2::TEXT[] IS NULL
                    OR primary_owner = ANY($2)
                    OR secondary_owner = ANY($2)
                )
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(R::FAMILY.as_str())
        .bind(owner_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list {} records: {error}",
                R::FAMILY.as_str()
            ))
        })?;

        payloads.into_iter().map(decode_payload::<R>).collect()
    }

    async fn delete_record(&self, record_id: RecordId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM crm_records WHERE id = $1 AND family = $2")
            .bind(record_id.as_uuid())
            .bind(R::FAMILY.as_str())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to delete {} record: {error}",
                    R::FAMILY.as_str()
                ))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "{} '{record_id}' does not exist",
                R::FAMILY.as_str()
            )));
        }

        Ok(())
    }
}
