use crate::features::disasters::handlers;
use crate::features::disasters::services::DisasterService;
use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<DisasterService>) -> Router {
    Router::new()
        .route("/api/disasters", get(handlers::list_disasters))
        .with_state(service)
}

pub fn admin_routes(service: Arc<DisasterService>) -> Router {
    Router::new()
        .route(
            "/api/admin/disasters",
            get(handlers::admin_list_disasters).post(handlers::create_disaster),
        )
        .route("/api/admin/disasters/{id}", patch(handlers::update_disaster))
        .with_state(service)
}
