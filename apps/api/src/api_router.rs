mod cors;
mod guarded;

use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{delete, get, post, put};
use salesline_core::AppError;
use salesline_domain::{Permission, Role};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

use self::cors::build_cors_layer;
use self::guarded::Guards;

pub fn build_router<Store>(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<Store>,
) -> Result<Router, AppError>
where
    Store: SessionStore + Clone,
{
    let guards = Guards::new(app_state.clone());

    let session_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route_layer(from_fn(middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(session_routes)
        .merge(lead_routes(&guards))
        .merge(customer_routes(&guards))
        .merge(target_routes(&guards))
        .merge(activity_routes(&guards))
        .merge(calendar_routes(&guards))
        .merge(user_routes(&guards))
        .merge(report_routes(&guards))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}

fn lead_routes(guards: &Guards) -> Router<AppState> {
    Router::new()
        .route(
            "/api/leads",
            guards
                .permission(
                    Permission::LeadView,
                    get(handlers::leads::list_leads_handler),
                )
                .merge(guards.permission(
                    Permission::LeadCreate,
                    post(handlers::leads::create_lead_handler),
                )),
        )
        .route(
            "/api/leads/{lead_id}",
            guards
                .permission(Permission::LeadView, get(handlers::leads::get_lead_handler))
                .merge(guards.permission(
                    Permission::LeadEdit,
                    put(handlers::leads::update_lead_handler),
                ))
                .merge(guards.permission(
                    Permission::LeadDelete,
                    delete(handlers::leads::delete_lead_handler),
                )),
        )
        .route(
            "/api/leads/{lead_id}/assignment",
            guards.permission(
                Permission::LeadAssign,
                put(handlers::leads::assign_lead_handler),
            ),
        )
        .route(
            "/api/leads/{lead_id}/convert",
            guards.permission(
                Permission::LeadConvert,
                post(handlers::leads::convert_lead_handler),
            ),
        )
}

fn customer_routes(guards: &Guards) -> Router<AppState> {
    Router::new()
        .route(
            "/api/customers",
            guards.permission(
                Permission::CustomerView,
                get(handlers::customers::list_customers_handler),
            ),
        )
        .route(
            "/api/customers/{customer_id}",
            guards
                .permission(
                    Permission::CustomerView,
                    get(handlers::customers::get_customer_handler),
                )
                .merge(guards.permission(
                    Permission::CustomerEdit,
                    put(handlers::customers::update_customer_handler),
                ))
                .merge(guards.permission(
                    Permission::CustomerDelete,
                    delete(handlers::customers::delete_customer_handler),
                )),
        )
}

fn target_routes(guards: &Guards) -> Router<AppState> {
    Router::new()
        .route(
            "/api/targets",
            guards
                .permission(
                    Permission::TargetView,
                    get(handlers::targets::list_targets_handler),
                )
                .merge(guards.permission(
                    Permission::TargetCreate,
                    post(handlers::targets::create_target_handler),
                )),
        )
        .route(
            "/api/targets/{target_id}",
            guards
                .permission(
                    Permission::TargetView,
                    get(handlers::targets::get_target_handler),
                )
                .merge(guards.permission(
                    Permission::TargetEdit,
                    put(handlers::targets::update_target_handler),
                ))
                .merge(guards.permission(
                    Permission::TargetDelete,
                    delete(handlers::targets::delete_target_handler),
                )),
        )
}

fn activity_routes(guards: &Guards) -> Router<AppState> {
    Router::new()
        .route(
            "/api/revenue",
            guards
                .permission(
                    Permission::RevenueView,
                    get(handlers::revenue::list_revenue_handler),
                )
                .merge(guards.permission(
                    Permission::RevenueLog,
                    post(handlers::revenue::log_revenue_handler),
                )),
        )
        .route(
            "/api/revenue/{revenue_id}",
            guards
                .permission(
                    Permission::RevenueView,
                    get(handlers::revenue::get_revenue_handler),
                )
                .merge(guards.permission(
                    Permission::RevenueDelete,
                    delete(handlers::revenue::delete_revenue_handler),
                )),
        )
        .route(
            "/api/interactions",
            guards
                .permission(
                    Permission::InteractionView,
                    get(handlers::interactions::list_interactions_handler),
                )
                .merge(guards.permission(
                    Permission::InteractionCreate,
                    post(handlers::interactions::create_interaction_handler),
                )),
        )
        .route(
            "/api/interactions/{interaction_id}",
            guards
                .permission(
                    Permission::InteractionView,
                    get(handlers::interactions::get_interaction_handler),
                )
                .merge(guards.permission(
                    Permission::InteractionDelete,
                    delete(handlers::interactions::delete_interaction_handler),
                )),
        )
}

fn calendar_routes(guards: &Guards) -> Router<AppState> {
    Router::new()
        .route(
            "/api/calendar/events",
            guards
                .permission(
                    Permission::CalendarView,
                    get(handlers::calendar::list_events_handler),
                )
                .merge(guards.permission(
                    Permission::CalendarManage,
                    post(handlers::calendar::create_event_handler),
                )),
        )
        .route(
            "/api/calendar/events/{event_id}",
            guards
                .permission(
                    Permission::CalendarView,
                    get(handlers::calendar::get_event_handler),
                )
                .merge(guards.permission(
                    Permission::CalendarManage,
                    put(handlers::calendar::update_event_handler)
                        .delete(handlers::calendar::delete_event_handler),
                )),
        )
}

fn user_routes(guards: &Guards) -> Router<AppState> {
    let view_users = [
        Permission::UserViewSelf,
        Permission::UserViewTeam,
        Permission::UserViewAll,
    ];

    Router::new()
        .route(
            "/api/users",
            guards
                .any_permission(view_users, get(handlers::users::list_users_handler))
                .merge(guards.permission(
                    Permission::UserCreate,
                    post(handlers::users::create_user_handler),
                )),
        )
        .route(
            "/api/users/{user_id}",
            guards
                .any_permission(view_users, get(handlers::users::get_user_handler))
                .merge(guards.permission(
                    Permission::UserDelete,
                    delete(handlers::users::delete_user_handler),
                )),
        )
        .route(
            "/api/users/{user_id}/manager",
            guards.permission(
                Permission::UserEdit,
                put(handlers::users::reassign_manager_handler),
            ),
        )
}

fn report_routes(guards: &Guards) -> Router<AppState> {
    let analytics = [
        Permission::AnalyticsOwn,
        Permission::AnalyticsTeam,
        Permission::AnalyticsGlobal,
    ];

    Router::new()
        .route(
            "/api/analytics/pipeline",
            guards.any_permission(
                analytics,
                get(handlers::analytics::pipeline_summary_handler),
            ),
        )
        .route(
            "/api/analytics/targets",
            guards.any_permission(
                analytics,
                get(handlers::analytics::target_progress_handler),
            ),
        )
        .route(
            "/api/audit-log",
            guards.permission(
                Permission::AuditView,
                get(handlers::audit::list_audit_log_handler),
            ),
        )
        .route(
            "/api/admin/role-permissions",
            guards.role(
                Role::SuperAdmin,
                get(handlers::users::role_permissions_handler),
            ),
        )
}
