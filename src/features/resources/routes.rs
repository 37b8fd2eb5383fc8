use crate::features::resources::handlers;
use crate::features::resources::services::ResourceService;
use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

pub fn admin_routes(service: Arc<ResourceService>) -> Router {
    Router::new()
        .route(
            "/api/admin/resources",
            get(handlers::list_resources).post(handlers::create_resource),
        )
        .route(
            "/api/admin/resources/{id}",
            patch(handlers::update_resource).delete(handlers::delete_resource),
        )
        .route(
            "/api/admin/allocations",
            get(handlers::list_allocations).post(handlers::allocate_resource),
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
    use uuid::Uuid;

    async fn server() -> TestServer {
        let service = Arc::new(ResourceService::new(memory_store().await));
        TestServer::new(with_admin_auth(admin_routes(service))).unwrap()
    }

    async fn add_water(server: &TestServer, quantity: i32) -> String {
        let body: Value = server
            .post("/api/admin/resources")
            .json(&json!({
                "name": "Water",
                "quantity": quantity,
                "unit": "liters",
                "category": "Food & Water"
            }))
            .await
            .json();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn allocation_decrements_stock() {
        let server = server().await;
        let id = add_water(&server, 100).await;
        let request_id = Uuid::now_v7();

        server
            .post("/api/admin/allocations")
            .json(&json!({ "resource_id": id, "request_id": request_id, "quantity": 30 }))
            .await
            .assert_status(StatusCode::CREATED);

        let resources: Value = server.get("/api/admin/resources").await.json();
        assert_eq!(resources["data"][0]["quantity"], 70);

        let allocations: Value = server
            .get("/api/admin/allocations")
            .add_query_param("request_id", request_id)
            .await
            .json();
        assert_eq!(allocations["meta"]["total"], 1);
        assert_eq!(allocations["data"][0]["quantity"], 30);
    }

    #[tokio::test]
    async fn overdraw_is_rejected_and_stock_kept() {
        let server = server().await;
        let id = add_water(&server, 10).await;

        server
            .post("/api/admin/allocations")
            .json(&json!({ "resource_id": id, "request_id": Uuid::now_v7(), "quantity": 11 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let resources: Value = server.get("/api/admin/resources").await.json();
        assert_eq!(resources["data"][0]["quantity"], 10);
        let allocations: Value = server.get("/api/admin/allocations").await.json();
        assert_eq!(allocations["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn quantity_cannot_be_set_negative() {
        let server = server().await;
        let id = add_water(&server, 10).await;

        server
            .patch(&format!("/api/admin/resources/{}", id))
            .json(&json!({ "quantity": -1 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .patch(&format!("/api/admin/resources/{}", id))
            .json(&json!({ "quantity": 40, "unit": "bottles" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["quantity"], 40);
        assert_eq!(body["data"]["name"], "Water");
    }

    #[tokio::test]
    async fn delete_needs_confirmation() {
        let server = server().await;
        let id = add_water(&server, 5).await;

        server
            .delete(&format!("/api/admin/resources/{}", id))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .delete(&format!("/api/admin/resources/{}", id))
            .add_query_param("confirm", true)
            .await
            .assert_status_ok();
        server
            .delete(&format!("/api/admin/resources/{}", id))
            .add_query_param("confirm", true)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn inventory_is_admin_only() {
        let service = Arc::new(ResourceService::new(memory_store().await));
        let server = TestServer::new(with_user_auth(admin_routes(service))).unwrap();
        server
            .get("/api/admin/resources")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
