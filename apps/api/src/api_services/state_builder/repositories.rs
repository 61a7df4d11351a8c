use std::sync::Arc;

use salesline_application::{
    AuditRepository, RecordOwnershipRepository, RecordRepository, UserRepository,
};
use salesline_domain::{
    CalendarEvent, Customer, DailyRevenue, Interaction, Lead, OwnedRecord, Target,
};
use salesline_infrastructure::{
    InMemoryAuditRepository, InMemoryRecordRepository, InMemoryUserRepository,
    PostgresAuditRepository, PostgresRecordRepository, PostgresUserRepository,
};
use sqlx::PgPool;

/// Storage adapters behind every application port.
pub struct RepositorySet {
    pub(super) user_repository: Arc<dyn UserRepository>,
    pub(super) audit_repository: Arc<dyn AuditRepository>,
    pub(super) lead_repository: Arc<dyn RecordRepository<Lead>>,
    pub(super) customer_repository: Arc<dyn RecordRepository<Customer>>,
    pub(super) target_repository: Arc<dyn RecordRepository<Target>>,
    pub(super) revenue_repository: Arc<dyn RecordRepository<DailyRevenue>>,
    pub(super) interaction_repository: Arc<dyn RecordRepository<Interaction>>,
    pub(super) calendar_repository: Arc<dyn RecordRepository<CalendarEvent>>,
    pub(super) ownership_repositories: Vec<Arc<dyn RecordOwnershipRepository>>,
}

impl RepositorySet {
    pub fn postgres(pool: &PgPool) -> Self {
        let mut owners = Vec::new();

        Self {
            user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
            audit_repository: Arc::new(PostgresAuditRepository::new(pool.clone())),
            lead_repository: tracked(PostgresRecordRepository::<Lead>::new(pool.clone()), &mut owners),
            customer_repository: tracked(
                PostgresRecordRepository::<Customer>::new(pool.clone()),
                &mut owners,
            ),
            target_repository: tracked(
                PostgresRecordRepository::<Target>::new(pool.clone()),
                &mut owners,
            ),
            revenue_repository: tracked(
                PostgresRecordRepository::<DailyRevenue>::new(pool.clone()),
                &mut owners,
            ),
            interaction_repository: tracked(
                PostgresRecordRepository::<Interaction>::new(pool.clone()),
                &mut owners,
            ),
            calendar_repository: tracked(
                PostgresRecordRepository::<CalendarEvent>::new(pool.clone()),
                &mut owners,
            ),
            ownership_repositories: owners,
        }
    }

    pub fn in_memory() -> Self {
        let mut owners = Vec::new();

        Self {
            user_repository: Arc::new(InMemoryUserRepository::new()),
            audit_repository: Arc::new(InMemoryAuditRepository::new()),
            lead_repository: tracked(InMemoryRecordRepository::<Lead>::new(), &mut owners),
            customer_repository: tracked(InMemoryRecordRepository::<Customer>::new(), &mut owners),
            target_repository: tracked(InMemoryRecordRepository::<Target>::new(), &mut owners),
            revenue_repository: tracked(
                InMemoryRecordRepository::<DailyRevenue>::new(),
                &mut owners,
            ),
            interaction_repository: tracked(
                InMemoryRecordRepository::<Interaction>::new(),
                &mut owners,
            ),
            calendar_repository: tracked(
                InMemoryRecordRepository::<CalendarEvent>::new(),
                &mut owners,
            ),
            ownership_repositories: owners,
        }
    }
}

fn tracked<R, Repository>(
    repository: Repository,
    owners: &mut Vec<Arc<dyn RecordOwnershipRepository>>,
) -> Arc<dyn RecordRepository<R>>
where
    R: OwnedRecord,
    Repository: RecordRepository<R> + 'static,
{
    let repository = Arc::new(repository);
    owners.push(repository.clone());
    repository
}
