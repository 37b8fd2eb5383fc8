use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (local mirror only)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .with_state(service)
}

/// Protected auth routes (require JWT authentication)
pub fn protected_routes(service: Arc<AuthService>, local_session: bool) -> Router {
    let router = Router::new().route("/api/auth/me", get(handlers::get_me));
    let router = if local_session {
        router.route("/api/auth/logout", post(handlers::logout))
    } else {
        router
    };
    router.with_state(service)
}
