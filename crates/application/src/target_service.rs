//! Monthly revenue targets.
//!
//! A target belongs to one user and one month. Managers set them for their
//! team; the store rejects a second target for the same user and month.

use std::sync::Arc;

use salesline_core::{AppError, AppResult};
use salesline_domain::{
    AuditAction, Permission, RecordId, ResourceAction, Target, TargetPeriod, User, UserId,
};

use crate::{AccessScopeService, AuditEvent, AuditRepository, RecordRepository, RecordScope};

/// Input payload for target creation.
#[derive(Debug, Clone)]
pub struct CreateTargetInput {
    /// User the target applies to.
    pub user_id: UserId,
    /// Calendar month.
    pub period: TargetPeriod,
    /// Revenue goal in cents.
    pub amount_cents: i64,
}

/// Application service for monthly revenue targets.
#[derive(Clone)]
pub struct TargetService {
    access: AccessScopeService,
    targets: RecordScope<Target>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl TargetService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        access: AccessScopeService,
        target_repository: Arc<dyn RecordRepository<Target>>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            targets: RecordScope::new(access.clone(), target_repository),
            access,
            audit_repository,
        }
    }

    /// Lists visible targets, optionally for one period.
    pub async fn list_targets(
        &self,
        actor: &User,
        period: Option<TargetPeriod>,
    ) -> AppResult<Vec<Target>> {
        let targets = self.targets.list(actor).await?;
        Ok(targets
            .into_iter()
            .filter(|target| period.is_none_or(|period| target.period() == period))
            .collect())
    }

    /// Loads one target.
    pub async fn get_target(&self, actor: &User, target_id: RecordId) -> AppResult<Target> {
        self.targets.get(actor, target_id).await
    }

    /// Sets a target for a user the actor can access. One target per user
    /// and month.
    pub async fn create_target(&self, actor: &User, input: CreateTargetInput) -> AppResult<Target> {
        self.access.require_permission(actor, Permission::TargetCreate)?;
        let subject = self
            .access
            .require_accessible_user(actor, &input.user_id)
            .await?;

        let duplicate = self
            .targets
            .list(actor)
            .await?
            .iter()
            .any(|target| target.user_id() == subject.id() && target.period() == input.period);
        if duplicate {
            return Err(AppError::Conflict(format!(
                "user '{}' already has a target for {}",
                subject.id(),
                input.period
            )));
        }

        let target = Target::new(
            subject.id().clone(),
            input.period,
            input.amount_cents,
            actor.id().clone(),
        )?;
        let target = self.targets.insert(actor, target).await?;

        self.audit_repository
            .append_event(AuditEvent::new(
                actor.id(),
                AuditAction::TargetCreated,
                "target",
                target.id(),
                Some(format!("{} for {}", target.period(), target.user_id())),
            ))
            .await?;
        Ok(target)
    }

    /// Changes the goal amount.
    pub async fn update_target(
        &self,
        actor: &User,
        target_id: RecordId,
        amount_cents: i64,
    ) -> AppResult<Target> {
        let mut target = self
            .targets
            .get_for(actor, target_id, ResourceAction::Edit)
            .await?;
        target.set_amount(amount_cents)?;
        self.targets.save(target).await
    }

    /// Deletes a target.
    pub async fn delete_target(&self, actor: &User, target_id: RecordId) -> AppResult<()> {
        let target = self.targets.delete(actor, target_id).await?;

        self.audit_repository
            .append_event(AuditEvent::new(
                actor.id(),
                AuditAction::TargetDeleted,
                "target",
                target_id,
                Some(format!("{} for {}", target.period(), target.user_id())),
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salesline_core::{AppError, AppResult};
    use salesline_domain::{AuditAction, Target, TargetPeriod};

    use crate::test_support::{
        FakeAuditRepository, FakeRecordRepository, FakeUserRepository, access_service, member,
        sales_org, user_id,
    };

    use super::{CreateTargetInput, TargetService};

    fn period() -> TargetPeriod {
        TargetPeriod::new(2026, 3).unwrap_or_else(|_| panic!("period should be valid"))
    }

    #[tokio::test]
    async fn manager_sets_targets_for_team_only() -> AppResult<()> {
        let users = sales_org();
        let audit = Arc::new(FakeAuditRepository::default());
        let service = TargetService::new(
            access_service(Arc::new(FakeUserRepository::with_users(users.clone()))),
            Arc::new(FakeRecordRepository::<Target>::default()),
            audit.clone(),
        );
        let manager = member(&users, "m1");

        let target = service
            .create_target(
                &manager,
                CreateTargetInput {
                    user_id: user_id("a1"),
                    period: period(),
                    amount_cents: 1_000_000,
                },
            )
            .await?;
        assert_eq!(target.user_id(), &user_id("a1"));

        let outside = service
            .create_target(
                &manager,
                CreateTargetInput {
                    user_id: user_id("a2"),
                    period: period(),
                    amount_cents: 1_000_000,
                },
            )
            .await;
        assert!(matches!(outside, Err(AppError::Forbidden(_))));

        let duplicate = service
            .create_target(
                &manager,
                CreateTargetInput {
                    user_id: user_id("a1"),
                    period: period(),
                    amount_cents: 5,
                },
            )
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        assert_eq!(audit.events.lock().await[0].action, AuditAction::TargetCreated);
        Ok(())
    }

    #[tokio::test]
    async fn agent_reads_own_target_but_cannot_change_it() -> AppResult<()> {
        let users = sales_org();
        let repository = Arc::new(FakeRecordRepository::<Target>::default());
        let service = TargetService::new(
            access_service(Arc::new(FakeUserRepository::with_users(users.clone()))),
            repository.clone(),
            Arc::new(FakeAuditRepository::default()),
        );
        let own = Target::new(user_id("a1"), period(), 100, user_id("m1"))?;
        let other = Target::new(user_id("a3"), period(), 100, user_id("m1"))?;
        let own_id = own.id();
        repository.records.lock().await.extend([own, other]);
        let agent = member(&users, "a1");

        let visible = service.list_targets(&agent, Some(period())).await?;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id(), own_id);

        let update = service.update_target(&agent, own_id, 200).await;
        assert!(matches!(update, Err(AppError::Forbidden(_))));
        Ok(())
    }
}
