use crate::features::requests::handlers;
use crate::features::requests::services::RequestService;
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<RequestService>) -> Router {
    Router::new()
        .route("/api/requests", post(handlers::create_request))
        .route("/api/requests/mine", get(handlers::list_my_requests))
        .with_state(service)
}

pub fn admin_routes(service: Arc<RequestService>) -> Router {
    Router::new()
        .route("/api/admin/requests", get(handlers::list_all_requests))
        .route(
            "/api/admin/requests/{id}/status",
            patch(handlers::update_request_status),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::shared::test_helpers::{memory_store, with_admin_auth, with_auth};
    use crate::store::SessionStore;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn submitted_request_is_pending_and_carries_profile_for_admin() {
        let store = memory_store().await;
        assert!(store.register("victim@example.org", "secret1", "Rahmat", "08123").await);
        let victim = store.current_user().await.unwrap();
        let service = Arc::new(RequestService::new(store));

        let session = AuthenticatedUser {
            user_id: victim.id,
            email: Some(victim.email.clone()),
            roles: vec![],
        };
        let user_server = TestServer::new(with_auth(routes(service.clone()), session)).unwrap();
        let response = user_server
            .post("/api/requests")
            .json(&json!({
                "name": "Rahmat",
                "location": "Palu",
                "description": "Need clean water",
                "urgency": "critical",
                "status": "approved"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "pending");

        let admin_server = TestServer::new(with_admin_auth(admin_routes(service))).unwrap();
        let body: Value = admin_server.get("/api/admin/requests").await.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["profile"]["name"], "Rahmat");
        assert_eq!(body["data"][0]["profile"]["contact"], "08123");
    }

    #[tokio::test]
    async fn blank_description_is_rejected() {
        let service = Arc::new(RequestService::new(memory_store().await));
        let server = TestServer::new(with_admin_auth(routes(service))).unwrap();

        server
            .post("/api/requests")
            .json(&json!({ "name": "A", "location": "B", "description": "   " }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_transition_is_conflict() {
        let service = Arc::new(RequestService::new(memory_store().await));
        let server = TestServer::new(with_admin_auth(
            routes(service.clone()).merge(admin_routes(service)),
        ))
        .unwrap();

        let body: Value = server
            .post("/api/requests")
            .json(&json!({ "name": "A", "location": "B", "description": "C" }))
            .await
            .json();
        let id = body["data"]["id"].as_str().unwrap().to_string();

        server
            .patch(&format!("/api/admin/requests/{}/status", id))
            .json(&json!({ "status": "completed" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }
}
