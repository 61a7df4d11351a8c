use std::collections::BTreeSet;
use std::sync::Arc;

use salesline_core::AppError;
use salesline_domain::{Permission, Role, VisibleOwners};

use crate::AccessGuard;
use crate::test_support::{
    FakeUserRepository, access_service, identity, member, sales_org, user, user_id,
};

#[tokio::test]
async fn authorize_requires_identity() {
    let service = access_service(Arc::new(FakeUserRepository::with_users(sales_org())));

    let result = service
        .authorize(None, &AccessGuard::require_permission(Permission::LeadView))
        .await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn authorize_rejects_session_of_deleted_user() {
    let service = access_service(Arc::new(FakeUserRepository::with_users(sales_org())));
    let ghost = user("ghost", Role::SuperAdmin, None);

    let result = service
        .authorize(
            Some(&identity(&ghost)),
            &AccessGuard::require_permission(Permission::LeadView),
        )
        .await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn authorize_returns_actor_or_forbidden() {
    let users = sales_org();
    let service = access_service(Arc::new(FakeUserRepository::with_users(users.clone())));
    let guard = AccessGuard::require_permission(Permission::LeadDelete);

    let manager = service
        .authorize(Some(&identity(&member(&users, "m1"))), &guard)
        .await
        .unwrap_or_else(|_| panic!("manager should pass the gate"));
    assert_eq!(manager.id(), &user_id("m1"));

    let agent = service
        .authorize(Some(&identity(&member(&users, "a1"))), &guard)
        .await;
    assert!(matches!(agent, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn role_gate_uses_current_stored_role() {
    let users = sales_org();
    let service = access_service(Arc::new(FakeUserRepository::with_users(users.clone())));

    let result = service
        .authorize(
            Some(&identity(&member(&users, "m1"))),
            &AccessGuard::require_role(Role::SuperAdmin),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn agent_accesses_only_own_resources() {
    let users = sales_org();
    let service = access_service(Arc::new(FakeUserRepository::with_users(users.clone())));
    let agent = member(&users, "u1");

    let own = service
        .can_access_resource(&agent, &user_id("u1"), Permission::LeadView)
        .await;
    let other = service
        .can_access_resource(&agent, &user_id("u2"), Permission::LeadView)
        .await;

    assert!(matches!(own, Ok(true)));
    assert!(matches!(other, Ok(false)));
}

#[tokio::test]
async fn permission_gate_precedes_scope() {
    let users = sales_org();
    let service = access_service(Arc::new(FakeUserRepository::with_users(users.clone())));
    let agent = member(&users, "u1");

    let result = service
        .can_access_resource(&agent, &user_id("u1"), Permission::LeadDelete)
        .await;

    assert!(matches!(result, Ok(false)));
}

#[tokio::test]
async fn manager_accesses_team_but_not_other_teams() {
    let users = sales_org();
    let service = access_service(Arc::new(FakeUserRepository::with_users(users.clone())));
    let manager = member(&users, "m1");

    for (owner, expected) in [("m1", true), ("a1", true), ("a3", true), ("a2", false), ("m2", false)]
    {
        let result = service
            .can_access_resource(&manager, &user_id(owner), Permission::LeadView)
            .await;
        assert!(
            matches!(result, Ok(value) if value == expected),
            "m1 access to {owner} should be {expected}"
        );
    }
}

#[tokio::test]
async fn super_admin_accesses_everyone() {
    let users = sales_org();
    let service = access_service(Arc::new(FakeUserRepository::with_users(users.clone())));
    let admin = member(&users, "root");

    for owner in ["m1", "a2", "u2", "nobody"] {
        let result = service
            .can_access_resource(&admin, &user_id(owner), Permission::RevenueDelete)
            .await;
        assert!(matches!(result, Ok(true)));
    }
}

#[tokio::test]
async fn manager_reassignment_applies_to_next_decision() {
    let users = sales_org();
    let repository = Arc::new(FakeUserRepository::with_users(users.clone()));
    let service = access_service(repository.clone());
    let manager = member(&users, "m1");

    let before = service.can_access_user(&manager, &user_id("a2")).await;
    assert!(matches!(before, Ok(false)));

    let mut moved = member(&users, "a2");
    moved
        .reassign_manager(Some(user_id("m1")))
        .unwrap_or_else(|_| panic!("reassignment should be valid"));
    {
        let mut stored = repository.users.lock().await;
        if let Some(credentials) = stored.get_mut(moved.id()) {
            credentials.user = moved;
        }
    }

    let after = service.can_access_user(&manager, &user_id("a2")).await;
    assert!(matches!(after, Ok(true)));

    let previous_manager = member(&users, "m2");
    let lost = service
        .can_access_user(&previous_manager, &user_id("a2"))
        .await;
    assert!(matches!(lost, Ok(false)));
}

#[tokio::test]
async fn visible_owner_ids_follow_role() {
    let users = sales_org();
    let service = access_service(Arc::new(FakeUserRepository::with_users(users.clone())));

    let admin = service.visible_owner_ids(&member(&users, "root")).await;
    assert!(matches!(admin, Ok(VisibleOwners::All)));

    let manager = service
        .visible_owner_ids(&member(&users, "m1"))
        .await
        .unwrap_or_else(|_| panic!("manager scope should resolve"));
    assert_eq!(
        manager,
        VisibleOwners::Only(BTreeSet::from([
            user_id("m1"),
            user_id("a1"),
            user_id("a3"),
        ]))
    );

    let agent = service
        .visible_owner_ids(&member(&users, "a1"))
        .await
        .unwrap_or_else(|_| panic!("agent scope should resolve"));
    assert_eq!(agent, VisibleOwners::Only(BTreeSet::from([user_id("a1")])));
}

#[tokio::test]
async fn team_lookup_failure_is_internal_not_forbidden() {
    let users = sales_org();
    let mut repository = FakeUserRepository::with_users(users.clone());
    repository.fail_team_lookups = true;
    let service = access_service(Arc::new(repository));

    let result = service
        .can_access_resource(&member(&users, "m1"), &user_id("a1"), Permission::LeadView)
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn missing_and_foreign_users_are_denied_alike() {
    let users = sales_org();
    let service = access_service(Arc::new(FakeUserRepository::with_users(users.clone())));
    let agent = member(&users, "u1");

    let foreign = service
        .require_accessible_user(&agent, &user_id("u2"))
        .await;
    let missing = service
        .require_accessible_user(&agent, &user_id("nobody"))
        .await;

    match (foreign, missing) {
        (Err(AppError::Forbidden(foreign)), Err(AppError::Forbidden(missing))) => {
            assert_eq!(foreign, missing);
        }
        other => panic!("expected two forbidden errors, got {other:?}"),
    }
}
