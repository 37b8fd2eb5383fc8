use crate::features::users::handlers;
use crate::features::users::services::UserService;
use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users/me", patch(handlers::update_own_profile))
        .with_state(service)
}

pub fn admin_routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/admin/users", get(handlers::list_users))
        .route(
            "/api/admin/users/{id}/status",
            patch(handlers::update_user_status),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::shared::test_helpers::{memory_store, with_admin_auth, with_auth, with_user_auth};
    use crate::store::SessionStore;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn admin_can_deactivate_user() {
        let store = memory_store().await;
        assert!(store.register("ayu@example.org", "secret1", "Ayu", "0811").await);
        let user = store.current_user().await.unwrap();

        let service = Arc::new(UserService::new(store.clone()));
        let server = TestServer::new(with_admin_auth(admin_routes(service))).unwrap();

        let response = server
            .patch(&format!("/api/admin/users/{}/status", user.id))
            .json(&json!({ "is_active": false }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["is_active"], false);

        store.logout().await;
        assert!(!store.login("ayu@example.org", "secret1").await);
    }

    #[tokio::test]
    async fn user_list_is_admin_only() {
        let store = memory_store().await;
        let service = Arc::new(UserService::new(store));
        let server = TestServer::new(with_user_auth(admin_routes(service))).unwrap();

        let response = server.get("/api/admin/users").await;
        response.assert_status(StatusCode::FORBIDDEN);
        let body: Value = response.json();
        assert_eq!(body["message"], "You don't have admin permissions.");
    }

    #[tokio::test]
    async fn unknown_user_status_update_is_not_found() {
        let store = memory_store().await;
        let service = Arc::new(UserService::new(store));
        let server = TestServer::new(with_admin_auth(admin_routes(service))).unwrap();

        let response = server
            .patch(&format!("/api/admin/users/{}/status", uuid::Uuid::now_v7()))
            .json(&json!({ "is_active": true }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn own_profile_update_rejects_bad_phone() {
        let store = memory_store().await;
        assert!(store.register("dewi@example.org", "secret1", "Dewi", "0812345").await);
        let user = store.current_user().await.unwrap();
        let session = AuthenticatedUser {
            user_id: user.id,
            email: Some(user.email.clone()),
            roles: vec![],
        };

        let service = Arc::new(UserService::new(store.clone()));
        let server = TestServer::new(with_auth(routes(service), session)).unwrap();

        server
            .patch("/api/users/me")
            .json(&json!({ "phone": "call me" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .patch("/api/users/me")
            .json(&json!({ "phone": "+62 811 2222" }))
            .await;
        response.assert_status_ok();
        assert_eq!(store.current_user().await.unwrap().phone, "+62 811 2222");
    }
}
