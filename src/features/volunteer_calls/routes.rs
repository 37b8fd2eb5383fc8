use crate::features::volunteer_calls::handlers;
use crate::features::volunteer_calls::services::PostingService;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<PostingService>) -> Router {
    Router::new()
        .route("/api/volunteer-calls", get(handlers::list_postings))
        .route(
            "/api/volunteer-calls/{id}/applications",
            post(handlers::apply_to_posting),
        )
        .route("/api/applications/mine", get(handlers::list_my_applications))
        .with_state(service)
}

pub fn admin_routes(service: Arc<PostingService>) -> Router {
    Router::new()
        .route(
            "/api/admin/volunteer-calls",
            get(handlers::admin_list_postings).post(handlers::create_posting),
        )
        .route(
            "/api/admin/volunteer-calls/{id}",
            delete(handlers::delete_posting),
        )
        .route(
            "/api/admin/volunteer-calls/{id}/applications",
            get(handlers::list_posting_applications),
        )
        .route(
            "/api/admin/applications/{id}/status",
            patch(handlers::update_application_status),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{memory_store, with_admin_auth, with_user_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn admin_server() -> TestServer {
        let service = Arc::new(PostingService::new(memory_store().await));
        TestServer::new(with_admin_auth(routes(service.clone()).merge(admin_routes(service))))
            .unwrap()
    }

    async fn create_posting(server: &TestServer) -> String {
        let response = server
            .post("/api/admin/volunteer-calls")
            .json(&json!({
                "disaster_name": "Cianjur Landslide",
                "disaster_location": "Cianjur",
                "volunteers_needed": 15,
                "priority_level": "critical",
                "call_date": "2026-10-20",
                "required_skills": ["heavy machinery"]
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn apply_twice_is_conflict() {
        let server = admin_server().await;
        let id = create_posting(&server).await;

        server
            .post(&format!("/api/volunteer-calls/{}/applications", id))
            .json(&json!({ "notes": "Available all week" }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post(&format!("/api/volunteer-calls/{}/applications", id))
            .json(&json!({}))
            .await
            .assert_status(StatusCode::CONFLICT);

        let mine: Value = server.get("/api/applications/mine").await.json();
        assert_eq!(mine["meta"]["total"], 1);
        assert_eq!(mine["data"][0]["status"], "pending");
    }

    #[tokio::test]
    async fn applying_to_unknown_posting_is_not_found() {
        let server = admin_server().await;
        server
            .post(&format!(
                "/api/volunteer-calls/{}/applications",
                uuid::Uuid::now_v7()
            ))
            .json(&json!({}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let server = admin_server().await;
        let id = create_posting(&server).await;

        server
            .delete(&format!("/api/admin/volunteer-calls/{}", id))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        let still_there: Value = server.get("/api/volunteer-calls").await.json();
        assert_eq!(still_there["meta"]["total"], 1);

        server
            .delete(&format!("/api/admin/volunteer-calls/{}", id))
            .add_query_param("confirm", "true")
            .await
            .assert_status_ok();
        let gone: Value = server.get("/api/volunteer-calls").await.json();
        assert_eq!(gone["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn zero_volunteers_needed_is_rejected() {
        let server = admin_server().await;
        server
            .post("/api/admin/volunteer-calls")
            .json(&json!({
                "disaster_name": "Flood",
                "disaster_location": "Demak",
                "volunteers_needed": 0,
                "call_date": "2026-10-20"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn users_cannot_publish_postings() {
        let service = Arc::new(PostingService::new(memory_store().await));
        let server = TestServer::new(with_user_auth(admin_routes(service))).unwrap();
        server
            .get(&format!(
                "/api/admin/volunteer-calls/{}/applications",
                uuid::Uuid::now_v7()
            ))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
