use crate::features::fundraisers::handlers;
use crate::features::fundraisers::services::FundraiserService;
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<FundraiserService>) -> Router {
    Router::new()
        .route("/api/fundraisers", get(handlers::list_fundraisers))
        .route("/api/donations", post(handlers::create_donation))
        .route("/api/donations/mine", get(handlers::list_my_donations))
        .with_state(service)
}

pub fn admin_routes(service: Arc<FundraiserService>) -> Router {
    Router::new()
        .route(
            "/api/admin/fundraisers",
            get(handlers::list_all_fundraisers).post(handlers::create_fundraiser),
        )
        .route(
            "/api/admin/fundraisers/{id}/status",
            patch(handlers::update_fundraiser_status),
        )
        .route("/api/admin/donations", get(handlers::list_all_donations))
        .with_state(service)
}
