use axum::middleware::from_fn_with_state;
use axum::routing::MethodRouter;
use salesline_application::AccessGuard;
use salesline_domain::{Permission, Role};

use crate::middleware;
use crate::state::AppState;

/// Attaches request gates to method routers.
#[derive(Clone)]
pub(super) struct Guards {
    app_state: AppState,
}

impl Guards {
    pub(super) fn new(app_state: AppState) -> Self {
        Self { app_state }
    }

    pub(super) fn permission(
        &self,
        permission: Permission,
        route: MethodRouter<AppState>,
    ) -> MethodRouter<AppState> {
        self.gate(AccessGuard::require_permission(permission), route)
    }

    pub(super) fn any_permission(
        &self,
        permissions: impl IntoIterator<Item = Permission>,
        route: MethodRouter<AppState>,
    ) -> MethodRouter<AppState> {
        self.gate(AccessGuard::require_any_permission(permissions), route)
    }

    pub(super) fn role(&self, role: Role, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
        self.gate(AccessGuard::require_role(role), route)
    }

    fn gate(&self, guard: AccessGuard, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
        route
            .route_layer(from_fn_with_state(
                self.app_state.clone(),
                middleware::require_access,
            ))
            .layer(axum::Extension(guard))
    }
}
