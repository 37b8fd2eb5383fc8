use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

pub fn admin_routes(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/admin/dashboard", get(handlers::get_overview))
        .route(
            "/api/admin/dashboard/resources",
            post(handlers::quick_add_resource),
        )
        .route(
            "/api/admin/dashboard/requests/{id}/status",
            patch(handlers::review_request),
        )
        .with_state(service)
}
