use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/api/reports", post(handlers::create_report))
        .route("/api/reports/mine", get(handlers::list_my_reports))
        .with_state(service)
}

pub fn admin_routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/api/admin/reports", get(handlers::list_all_reports))
        .route("/api/admin/reports/{id}", delete(handlers::delete_report))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{memory_store, with_admin_auth, with_user_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn submitted_report_shows_up_for_author_and_admin() {
        let service = Arc::new(ReportService::new(memory_store().await));
        let user_server = TestServer::new(with_user_auth(routes(service.clone()))).unwrap();

        let response = user_server
            .post("/api/reports")
            .json(&json!({ "report": "Shelter at the school is full" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["report_type"], "Field Report");

        let mine: Value = user_server.get("/api/reports/mine").await.json();
        assert_eq!(mine["meta"]["total"], 1);

        let admin_server = TestServer::new(with_admin_auth(admin_routes(service))).unwrap();
        let all: Value = admin_server.get("/api/admin/reports").await.json();
        assert_eq!(all["meta"]["total"], 1);
        assert!(all["data"][0]["profile"].is_null());
    }

    #[tokio::test]
    async fn empty_report_is_rejected() {
        let service = Arc::new(ReportService::new(memory_store().await));
        let server = TestServer::new(with_user_auth(routes(service))).unwrap();

        server
            .post("/api/reports")
            .json(&json!({ "report": "   " }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let service = Arc::new(ReportService::new(memory_store().await));
        let user_server = TestServer::new(with_user_auth(routes(service.clone()))).unwrap();
        let created: Value = user_server
            .post("/api/reports")
            .json(&json!({ "report": "Bridge washed out", "report_type": "Infrastructure" }))
            .await
            .json();
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let admin_server = TestServer::new(with_admin_auth(admin_routes(service))).unwrap();
        admin_server
            .delete(&format!("/api/admin/reports/{}", id))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        admin_server
            .delete(&format!("/api/admin/reports/{}", id))
            .add_query_param("confirm", true)
            .await
            .assert_status_ok();

        let all: Value = admin_server.get("/api/admin/reports").await.json();
        assert_eq!(all["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn report_list_is_admin_only() {
        let service = Arc::new(ReportService::new(memory_store().await));
        let server = TestServer::new(with_user_auth(admin_routes(service))).unwrap();
        server
            .get("/api/admin/reports")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
