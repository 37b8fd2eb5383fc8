use crate::features::volunteers::handlers;
use crate::features::volunteers::services::{OutreachService, VolunteerService};
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<VolunteerService>) -> Router {
    Router::new()
        .route("/api/volunteers", post(handlers::register_volunteer))
        .route("/api/volunteers/mine", get(handlers::list_my_volunteers))
        .with_state(service)
}

pub fn admin_routes(service: Arc<VolunteerService>) -> Router {
    Router::new()
        .route("/api/admin/volunteers", get(handlers::list_all_volunteers))
        .route(
            "/api/admin/volunteers/{id}/status",
            patch(handlers::update_volunteer_status),
        )
        .with_state(service)
}

pub fn outreach_routes(service: Arc<OutreachService>) -> Router {
    Router::new()
        .route(
            "/api/admin/outreach",
            get(handlers::list_calls).post(handlers::log_call),
        )
        .route("/api/admin/outreach/{id}", patch(handlers::update_call))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_user, memory_store, with_admin_auth, with_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use fake::faker::address::en::CityName;
    use fake::Fake;
    use serde_json::{json, Value};

    fn registration(disaster_id: Option<uuid::Uuid>) -> Value {
        let city: String = CityName().fake();
        json!({
            "disaster_id": disaster_id,
            "skills": ["first aid", " logistics ", ""],
            "availability": "weekends",
            "location": city,
            "contact_info": "0812 3456"
        })
    }

    #[tokio::test]
    async fn second_registration_for_same_disaster_conflicts() {
        let service = Arc::new(VolunteerService::new(memory_store().await));
        let server = TestServer::new(with_admin_auth(routes(service))).unwrap();
        let disaster = uuid::Uuid::now_v7();

        let response = server.post("/api/volunteers").json(&registration(Some(disaster))).await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["skills"], json!(["first aid", "logistics"]));

        server
            .post("/api/volunteers")
            .json(&registration(Some(disaster)))
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .post("/api/volunteers")
            .json(&registration(None))
            .await
            .assert_status(StatusCode::CREATED);

        let mine: Value = server.get("/api/volunteers/mine").await.json();
        assert_eq!(mine["meta"]["total"], 2);
    }

    #[tokio::test]
    async fn outreach_call_is_logged_against_admin() {
        let store = memory_store().await;
        let volunteers = Arc::new(VolunteerService::new(store.clone()));
        let outreach = Arc::new(OutreachService::new(store));
        let admin = create_admin_user();
        let server = TestServer::new(with_auth(
            routes(volunteers).merge(outreach_routes(outreach)),
            admin.clone(),
        ))
        .unwrap();

        let body: Value = server
            .post("/api/volunteers")
            .json(&registration(None))
            .await
            .json();
        let volunteer_id = body["data"]["id"].as_str().unwrap().to_string();

        let response = server
            .post("/api/admin/outreach")
            .json(&json!({ "volunteer_id": volunteer_id, "notes": "left voicemail" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let call: Value = response.json();
        assert_eq!(call["data"]["called_by"], admin.user_id.to_string());
        assert_eq!(call["data"]["response_status"], "pending");
        let call_id = call["data"]["id"].as_str().unwrap().to_string();

        let updated: Value = server
            .patch(&format!("/api/admin/outreach/{}", call_id))
            .json(&json!({ "response_status": "not_reachable" }))
            .await
            .json();
        assert_eq!(updated["data"]["response_status"], "not_reachable");
        assert_eq!(updated["data"]["notes"], "left voicemail");

        let log: Value = server
            .get("/api/admin/outreach")
            .add_query_param("volunteer_id", &volunteer_id)
            .await
            .json();
        assert_eq!(log["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn calling_unknown_volunteer_is_not_found() {
        let outreach = Arc::new(OutreachService::new(memory_store().await));
        let server = TestServer::new(with_admin_auth(outreach_routes(outreach))).unwrap();

        server
            .post("/api/admin/outreach")
            .json(&json!({ "volunteer_id": uuid::Uuid::now_v7() }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn admin_can_deactivate_volunteer() {
        let service = Arc::new(VolunteerService::new(memory_store().await));
        let server = TestServer::new(with_admin_auth(
            routes(service.clone()).merge(admin_routes(service)),
        ))
        .unwrap();

        let body: Value = server
            .post("/api/volunteers")
            .json(&registration(None))
            .await
            .json();
        let id = body["data"]["id"].as_str().unwrap().to_string();

        server
            .patch(&format!("/api/admin/volunteers/{}/status", id))
            .json(&json!({ "status": "inactive" }))
            .await
            .assert_status_ok();

        let active: Value = server
            .get("/api/admin/volunteers")
            .add_query_param("status", "active")
            .await
            .json();
        assert_eq!(active["meta"]["total"], 0);
    }
}
