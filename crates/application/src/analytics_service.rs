//! Role-scoped pipeline and target reporting.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use salesline_core::AppResult;
use salesline_domain::{
    DailyRevenue, Lead, LeadStatus, Permission, Target, TargetPeriod, User, UserId, VisibleOwners,
};

use crate::{AccessScopeService, RecordRepository};

const ANALYTICS_PERMISSIONS: [Permission; 3] = [
    Permission::AnalyticsOwn,
    Permission::AnalyticsTeam,
    Permission::AnalyticsGlobal,
];

/// Lead count and value for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStageSummary {
    /// Stage.
    pub status: LeadStatus,
    /// Number of leads in the stage.
    pub lead_count: u64,
    /// Sum of estimated values in cents.
    pub total_value_cents: i64,
}

/// Revenue achieved against a monthly target for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProgress {
    /// User the target belongs to.
    pub user_id: UserId,
    /// Goal in cents.
    pub target_cents: i64,
    /// Revenue logged in the period in cents.
    pub achieved_cents: i64,
}

/// Application service for reporting over the caller's visible owners.
#[derive(Clone)]
pub struct AnalyticsService {
    access: AccessScopeService,
    lead_repository: Arc<dyn RecordRepository<Lead>>,
    revenue_repository: Arc<dyn RecordRepository<DailyRevenue>>,
    target_repository: Arc<dyn RecordRepository<Target>>,
}

impl AnalyticsService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        access: AccessScopeService,
        lead_repository: Arc<dyn RecordRepository<Lead>>,
        revenue_repository: Arc<dyn RecordRepository<DailyRevenue>>,
        target_repository: Arc<dyn RecordRepository<Target>>,
    ) -> Self {
        Self {
            access,
            lead_repository,
            revenue_repository,
            target_repository,
        }
    }

    /// Counts leads and sums estimated value per stage, every stage listed.
    ///
    /// Sums saturate at `i64::MAX`.
    pub async fn pipeline_summary(&self, actor: &User) -> AppResult<Vec<PipelineStageSummary>> {
        let owners = self.reporting_scope(actor).await?;
        let leads = self.lead_repository.list_records(&owners).await?;

        Ok(LeadStatus::all()
            .iter()
            .map(|status| {
                let in_stage = leads.iter().filter(|lead| lead.status() == *status);
                PipelineStageSummary {
                    status: *status,
                    lead_count: in_stage.clone().count() as u64,
                    total_value_cents: in_stage.fold(0_i64, |total, lead| {
                        total.saturating_add(lead.details().estimated_value_cents)
                    }),
                }
            })
            .collect())
    }

    /// Compares logged revenue against targets for the period, by user id.
    pub async fn target_progress(
        &self,
        actor: &User,
        period: TargetPeriod,
    ) -> AppResult<Vec<TargetProgress>> {
        let owners = self.reporting_scope(actor).await?;
        let targets = self.target_repository.list_records(&owners).await?;
        let revenue = self.revenue_repository.list_records(&owners).await?;

        let mut achieved: BTreeMap<&UserId, i64> = BTreeMap::new();
        for entry in revenue
            .iter()
            .filter(|entry| period.contains(entry.revenue_date()))
        {
            let total = achieved.entry(entry.user_id()).or_default();
            *total = total.saturating_add(entry.amount_cents());
        }

        let mut progress: Vec<TargetProgress> = targets
            .iter()
            .filter(|target| target.period() == period)
            .map(|target| TargetProgress {
                user_id: target.user_id().clone(),
                target_cents: target.amount_cents(),
                achieved_cents: achieved.get(target.user_id()).copied().unwrap_or_default(),
            })
            .collect();
        progress.sort_by(|left, right| left.user_id.cmp(&right.user_id));
        Ok(progress)
    }

    /// Owner scope for reports: the role scope, narrowed to the actor alone
    /// when only own-analytics is held.
    async fn reporting_scope(&self, actor: &User) -> AppResult<VisibleOwners> {
        self.access
            .require_any_permission(actor, &ANALYTICS_PERMISSIONS)?;

        if self.access.has_any_permission(
            actor,
            &[Permission::AnalyticsTeam, Permission::AnalyticsGlobal],
        ) {
            return self.access.visible_owner_ids(actor).await;
        }

        Ok(VisibleOwners::Only(BTreeSet::from([actor.id().clone()])))
    }
}
