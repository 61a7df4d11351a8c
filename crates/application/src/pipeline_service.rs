//! Daily revenue logging and lead interactions.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use salesline_core::AppResult;
use salesline_domain::{
    DailyRevenue, Interaction, InteractionKind, Lead, Permission, RecordId, User, UserId,
};
use tracing::info;

use crate::{AccessScopeService, RecordRepository, RecordScope};

/// Input payload for logging revenue.
#[derive(Debug, Clone)]
pub struct LogRevenueInput {
    /// Earner; defaults to the actor.
    pub user_id: Option<UserId>,
    /// Day the revenue was made.
    pub revenue_date: NaiveDate,
    /// Amount in cents.
    pub amount_cents: i64,
    /// Related lead, which must be visible to the actor.
    pub lead_id: Option<RecordId>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Input payload for recording an interaction.
#[derive(Debug, Clone)]
pub struct CreateInteractionInput {
    /// Lead the interaction concerns.
    pub lead_id: RecordId,
    /// Channel.
    pub kind: InteractionKind,
    /// What happened.
    pub notes: String,
    /// When it happened; defaults to now.
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Application service for revenue entries and interactions.
#[derive(Clone)]
pub struct PipelineService {
    access: AccessScopeService,
    leads: RecordScope<Lead>,
    revenue: RecordScope<DailyRevenue>,
    interactions: RecordScope<Interaction>,
}

impl PipelineService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        access: AccessScopeService,
        lead_repository: Arc<dyn RecordRepository<Lead>>,
        revenue_repository: Arc<dyn RecordRepository<DailyRevenue>>,
        interaction_repository: Arc<dyn RecordRepository<Interaction>>,
    ) -> Self {
        Self {
            leads: RecordScope::new(access.clone(), lead_repository),
            revenue: RecordScope::new(access.clone(), revenue_repository),
            interactions: RecordScope::new(access.clone(), interaction_repository),
            access,
        }
    }

    /// Lists visible revenue entries, optionally within an inclusive date range.
    pub async fn list_revenue(
        &self,
        actor: &User,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<DailyRevenue>> {
        let mut entries: Vec<DailyRevenue> = self
            .revenue
            .list(actor)
            .await?
            .into_iter()
            .filter(|entry| from.is_none_or(|from| entry.revenue_date() >= from))
            .filter(|entry| to.is_none_or(|to| entry.revenue_date() <= to))
            .collect();
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.revenue_date()));
        Ok(entries)
    }

    /// Loads one revenue entry.
    pub async fn get_revenue(&self, actor: &User, revenue_id: RecordId) -> AppResult<DailyRevenue> {
        self.revenue.get(actor, revenue_id).await
    }

    /// Logs revenue for the actor or for a user the actor can access.
    pub async fn log_revenue(&self, actor: &User, input: LogRevenueInput) -> AppResult<DailyRevenue> {
        self.access.require_permission(actor, Permission::RevenueLog)?;

        let earner = match input.user_id {
            Some(user_id) if &user_id != actor.id() => self
                .access
                .require_accessible_user(actor, &user_id)
                .await?
                .id()
                .clone(),
            _ => actor.id().clone(),
        };

        if let Some(lead_id) = input.lead_id {
            self.leads.get(actor, lead_id).await?;
        }

        let entry = DailyRevenue::new(
            earner,
            input.revenue_date,
            input.amount_cents,
            input.lead_id,
            input.notes,
        )?;
        let entry = self.revenue.insert(actor, entry).await?;

        info!(
            actor_id = %actor.id(),
            user_id = %entry.user_id(),
            amount_cents = entry.amount_cents(),
            "revenue logged"
        );
        Ok(entry)
    }

    /// Deletes a revenue entry.
    pub async fn delete_revenue(&self, actor: &User, revenue_id: RecordId) -> AppResult<()> {
        self.revenue.delete(actor, revenue_id).await?;
        Ok(())
    }

    /// Lists visible interactions, optionally for one lead, newest first.
    pub async fn list_interactions(
        &self,
        actor: &User,
        lead_id: Option<RecordId>,
    ) -> AppResult<Vec<Interaction>> {
        let mut interactions: Vec<Interaction> = self
            .interactions
            .list(actor)
            .await?
            .into_iter()
            .filter(|interaction| lead_id.is_none_or(|lead_id| interaction.lead_id() == lead_id))
            .collect();
        interactions.sort_by_key(|interaction| std::cmp::Reverse(interaction.occurred_at()));
        Ok(interactions)
    }

    /// Loads one interaction.
    pub async fn get_interaction(
        &self,
        actor: &User,
        interaction_id: RecordId,
    ) -> AppResult<Interaction> {
        self.interactions.get(actor, interaction_id).await
    }

    /// Records an interaction by the actor on a lead visible to them.
    pub async fn create_interaction(
        &self,
        actor: &User,
        input: CreateInteractionInput,
    ) -> AppResult<Interaction> {
        self.access
            .require_permission(actor, Permission::InteractionCreate)?;
        self.leads.get(actor, input.lead_id).await?;

        let interaction = Interaction::new(
            input.lead_id,
            actor.id().clone(),
            input.kind,
            input.notes,
            input.occurred_at.unwrap_or_else(Utc::now),
        )?;
        self.interactions.insert(actor, interaction).await
    }

    /// Deletes an interaction.
    pub async fn delete_interaction(&self, actor: &User, interaction_id: RecordId) -> AppResult<()> {
        self.interactions.delete(actor, interaction_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use salesline_core::{AppError, AppResult};
    use salesline_domain::{DailyRevenue, Interaction, InteractionKind, Lead, LeadDetails};

    use crate::test_support::{
        FakeRecordRepository, FakeUserRepository, access_service, member, sales_org, user_id,
    };

    use super::{CreateInteractionInput, LogRevenueInput, PipelineService};

    struct Fixture {
        service: PipelineService,
        leads: Arc<FakeRecordRepository<Lead>>,
    }

    fn fixture() -> Fixture {
        let access = access_service(Arc::new(FakeUserRepository::with_users(sales_org())));
        let leads = Arc::new(FakeRecordRepository::<Lead>::default());
        Fixture {
            service: PipelineService::new(
                access,
                leads.clone(),
                Arc::new(FakeRecordRepository::<DailyRevenue>::default()),
                Arc::new(FakeRecordRepository::<Interaction>::default()),
            ),
            leads,
        }
    }

    fn day(value: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, value)
            .unwrap_or_else(|| panic!("2026-03-{value:02} should be a valid date"))
    }

    fn revenue(user: Option<&str>, date: NaiveDate) -> LogRevenueInput {
        LogRevenueInput {
            user_id: user.map(user_id),
            revenue_date: date,
            amount_cents: 2_500,
            lead_id: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn agent_logs_only_for_self() -> AppResult<()> {
        let fixture = fixture();
        let users = sales_org();
        let agent = member(&users, "a1");

        let entry = fixture.service.log_revenue(&agent, revenue(None, day(2))).await?;
        assert_eq!(entry.user_id(), &user_id("a1"));

        let for_peer = fixture
            .service
            .log_revenue(&agent, revenue(Some("a3"), day(2)))
            .await;
        assert!(matches!(for_peer, Err(AppError::Forbidden(_))));
        Ok(())
    }

    #[tokio::test]
    async fn manager_logs_for_team_and_lists_range() -> AppResult<()> {
        let fixture = fixture();
        let users = sales_org();
        let manager = member(&users, "m1");

        fixture
            .service
            .log_revenue(&manager, revenue(Some("a1"), day(1)))
            .await?;
        fixture
            .service
            .log_revenue(&manager, revenue(Some("a3"), day(20)))
            .await?;

        let early = fixture
            .service
            .list_revenue(&manager, Some(day(1)), Some(day(10)))
            .await?;
        assert_eq!(early.len(), 1);
        assert_eq!(early[0].user_id(), &user_id("a1"));

        let agent_view = fixture
            .service
            .list_revenue(&member(&users, "a3"), None, None)
            .await?;
        assert_eq!(agent_view.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn interaction_requires_visible_lead() -> AppResult<()> {
        let fixture = fixture();
        let users = sales_org();
        let lead = Lead::new("Acme", LeadDetails::default(), user_id("u1"), Some(user_id("u1")))?;
        let lead_id = lead.id();
        fixture.leads.records.lock().await.push(lead);

        let input = CreateInteractionInput {
            lead_id,
            kind: InteractionKind::Call,
            notes: "Intro call".to_owned(),
            occurred_at: None,
        };

        let denied = fixture
            .service
            .create_interaction(&member(&users, "u2"), input.clone())
            .await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));

        let owner = member(&users, "u1");
        let interaction = fixture.service.create_interaction(&owner, input).await?;
        let listed = fixture.service.list_interactions(&owner, Some(lead_id)).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), interaction.id());
        Ok(())
    }

    #[tokio::test]
    async fn agent_cannot_delete_interactions() -> AppResult<()> {
        let fixture = fixture();
        let users = sales_org();
        let agent = member(&users, "u1");
        let lead = Lead::new("Acme", LeadDetails::default(), user_id("u1"), None)?;
        let lead_id = lead.id();
        fixture.leads.records.lock().await.push(lead);

        let interaction = fixture
            .service
            .create_interaction(
                &agent,
                CreateInteractionInput {
                    lead_id,
                    kind: InteractionKind::Note,
                    notes: "Left voicemail".to_owned(),
                    occurred_at: None,
                },
            )
            .await?;

        let result = fixture
            .service
            .delete_interaction(&agent, interaction.id())
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        Ok(())
    }
}
