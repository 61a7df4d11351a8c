use std::sync::Arc;

use salesline_core::{AppError, AppResult};
use salesline_domain::{AuditAction, Lead, LeadDetails, Permission, Role, User};

use crate::RecordOwnershipRepository;
use crate::test_support::{
    FakeAuditRepository, FakePasswordHasher, FakeRecordRepository, FakeUserRepository,
    access_service, member, sales_org, user_id,
};

use super::{BootstrapAdminInput, CreateUserInput, UserService};

struct Fixture {
    users: Vec<User>,
    repository: Arc<FakeUserRepository>,
    leads: Arc<FakeRecordRepository<Lead>>,
    audit: Arc<FakeAuditRepository>,
    service: UserService,
}

fn fixture_with(users: Vec<User>) -> Fixture {
    let repository = Arc::new(FakeUserRepository::with_users(users.clone()));
    let leads = Arc::new(FakeRecordRepository::<Lead>::default());
    let audit = Arc::new(FakeAuditRepository::default());
    let lead_ownership: Arc<dyn RecordOwnershipRepository> = leads.clone();
    let service = UserService::new(
        access_service(repository.clone()),
        repository.clone(),
        Arc::new(FakePasswordHasher),
        audit.clone(),
        vec![lead_ownership],
    );

    Fixture {
        users,
        repository,
        leads,
        audit,
        service,
    }
}

fn fixture() -> Fixture {
    fixture_with(sales_org())
}

fn new_user(email: &str, role: Role, manager: Option<&str>) -> CreateUserInput {
    CreateUserInput {
        display_name: "New Hire".to_owned(),
        email: email.to_owned(),
        role,
        manager_id: manager.map(user_id),
        password: "long enough secret".to_owned(),
    }
}

fn ids(users: &[User]) -> Vec<&str> {
    let mut ids: Vec<&str> = users.iter().map(|user| user.id().as_str()).collect();
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn user_listing_follows_role_scope() -> AppResult<()> {
    let fixture = fixture();

    let admin = fixture
        .service
        .list_users(&member(&fixture.users, "root"))
        .await?;
    let manager = fixture
        .service
        .list_users(&member(&fixture.users, "m1"))
        .await?;
    let agent = fixture
        .service
        .list_users(&member(&fixture.users, "a1"))
        .await?;

    assert_eq!(admin.len(), fixture.users.len());
    assert_eq!(ids(&manager), vec!["a1", "a3", "m1"]);
    assert_eq!(ids(&agent), vec!["a1"]);
    Ok(())
}

#[tokio::test]
async fn agent_cannot_read_manager_profile() {
    let fixture = fixture();

    let result = fixture
        .service
        .get_user(&member(&fixture.users, "a1"), &user_id("m1"))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn manager_creates_agents_for_own_team_only() -> AppResult<()> {
    let fixture = fixture();
    let manager = member(&fixture.users, "m1");

    let created = fixture
        .service
        .create_user(&manager, new_user("new@example.com", Role::SalesAgent, None))
        .await?;
    assert_eq!(created.manager_id(), Some(&user_id("m1")));

    let other_role = fixture
        .service
        .create_user(&manager, new_user("boss@example.com", Role::SalesManager, None))
        .await;
    assert!(matches!(other_role, Err(AppError::Forbidden(_))));

    let other_team = fixture
        .service
        .create_user(
            &manager,
            new_user("stray@example.com", Role::SalesAgent, Some("m2")),
        )
        .await;
    assert!(matches!(other_team, Err(AppError::Forbidden(_))));

    let events = fixture.audit.events.lock().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::UserCreated);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let fixture = fixture();

    let result = fixture
        .service
        .create_user(
            &member(&fixture.users, "root"),
            new_user("A1@example.com", Role::SalesAgent, None),
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn agent_manager_must_be_a_sales_manager() {
    let fixture = fixture();

    let result = fixture
        .service
        .create_user(
            &member(&fixture.users, "root"),
            new_user("x@example.com", Role::SalesAgent, Some("a1")),
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn reassignment_moves_agent_between_teams() -> AppResult<()> {
    let fixture = fixture();
    let admin = member(&fixture.users, "root");

    fixture
        .service
        .reassign_manager(&admin, &user_id("a2"), Some(user_id("m1")))
        .await?;

    let team = fixture
        .service
        .list_users(&member(&fixture.users, "m1"))
        .await?;
    assert!(ids(&team).contains(&"a2"));

    let former = fixture
        .service
        .list_users(&member(&fixture.users, "m2"))
        .await?;
    assert_eq!(ids(&former), vec!["m2"]);
    Ok(())
}

#[tokio::test]
async fn manager_may_only_release_own_agents() -> AppResult<()> {
    let fixture = fixture();
    let manager = member(&fixture.users, "m1");

    let to_peer = fixture
        .service
        .reassign_manager(&manager, &user_id("a1"), Some(user_id("m2")))
        .await;
    assert!(matches!(to_peer, Err(AppError::Forbidden(_))));

    let foreign = fixture
        .service
        .reassign_manager(&manager, &user_id("a2"), None)
        .await;
    assert!(matches!(foreign, Err(AppError::Forbidden(_))));

    let released = fixture
        .service
        .reassign_manager(&manager, &user_id("a1"), None)
        .await?;
    assert_eq!(released.manager_id(), None);
    Ok(())
}

#[tokio::test]
async fn deletion_refuses_managers_with_reports_and_record_owners() -> AppResult<()> {
    let fixture = fixture();
    let admin = member(&fixture.users, "root");

    let manager = fixture.service.delete_user(&admin, &user_id("m1")).await;
    assert!(matches!(manager, Err(AppError::Conflict(_))));

    fixture.leads.records.lock().await.push(Lead::new(
        "Owned",
        LeadDetails::default(),
        user_id("u1"),
        None,
    )?);
    let owner = fixture.service.delete_user(&admin, &user_id("u1")).await;
    assert!(matches!(owner, Err(AppError::Conflict(_))));

    fixture.service.delete_user(&admin, &user_id("u2")).await?;
    assert!(fixture.repository.users.lock().await.get(&user_id("u2")).is_none());

    let self_delete = fixture.service.delete_user(&admin, &user_id("root")).await;
    assert!(matches!(self_delete, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn login_fails_generically() -> AppResult<()> {
    let fixture = fixture_with(Vec::new());
    let admin = fixture
        .service
        .bootstrap_super_admin(BootstrapAdminInput {
            display_name: "Owner".to_owned(),
            email: "owner@example.com".to_owned(),
            password: "long enough secret".to_owned(),
        })
        .await?;

    let signed_in = fixture
        .service
        .login("OWNER@example.com", "long enough secret")
        .await?;
    assert_eq!(signed_in.map(|user| user.id().clone()), Some(admin.id().clone()));

    assert!(fixture.service.login("owner@example.com", "wrong").await?.is_none());
    assert!(fixture.service.login("nobody@example.com", "x").await?.is_none());
    assert!(fixture.service.login("not-an-email", "x").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn bootstrap_only_runs_once() -> AppResult<()> {
    let fixture = fixture();

    let result = fixture
        .service
        .bootstrap_super_admin(BootstrapAdminInput {
            display_name: "Second".to_owned(),
            email: "second@example.com".to_owned(),
            password: "long enough secret".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

#[test]
fn effective_permissions_follow_table() {
    let fixture = fixture();

    let agent = fixture
        .service
        .effective_permissions(&member(&fixture.users, "a1"));

    assert!(agent.contains(&Permission::LeadView));
    assert!(!agent.contains(&Permission::UserCreate));
}
