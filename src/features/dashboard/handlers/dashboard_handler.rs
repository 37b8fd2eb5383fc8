use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::dashboard::dtos::{
    DashboardOverviewDto, RequestReviewDto, ResourceQuickAddDto,
};
use crate::features::dashboard::services::DashboardService;
use crate::features::requests::dtos::UpdateRequestStatusDto;
use crate::features::resources::dtos::CreateResourceDto;
use crate::features::resources::models::NewResource;
use crate::shared::types::ApiResponse;

/// Admin overview. Always 200; collections that failed to load are listed
/// in `notices`.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "admin-dashboard",
    responses(
        (status = 200, description = "Dashboard overview", body = ApiResponse<DashboardOverviewDto>),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_overview(
    _admin: RequireAdmin,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardOverviewDto>>> {
    let overview = service.overview().await;
    Ok(Json(ApiResponse::success(Some(overview), None, None)))
}

/// Inventory quick add. A store failure is reported in `notices` with a 200
/// so the dashboard can keep the draft and retry.
#[utoipa::path(
    post,
    path = "/api/admin/dashboard/resources",
    request_body = CreateResourceDto,
    responses(
        (status = 200, description = "Attempt settled; see notices", body = ApiResponse<ResourceQuickAddDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-dashboard",
    security(("bearer_auth" = []))
)]
pub async fn quick_add_resource(
    _admin: RequireAdmin,
    State(service): State<Arc<DashboardService>>,
    AppJson(dto): AppJson<CreateResourceDto>,
) -> Result<Json<ApiResponse<ResourceQuickAddDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let draft = NewResource {
        name: dto.name.trim().to_string(),
        quantity: dto.quantity,
        unit: dto.unit.trim().to_string(),
        category: dto.category.trim().to_string(),
    };
    let outcome = service.quick_add_resource(draft).await;
    Ok(Json(ApiResponse::success(Some(outcome), None, None)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/dashboard/requests/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = UpdateRequestStatusDto,
    responses(
        (status = 200, description = "Attempt settled; see notices", body = ApiResponse<RequestReviewDto>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-dashboard",
    security(("bearer_auth" = []))
)]
pub async fn review_request(
    _admin: RequireAdmin,
    State(service): State<Arc<DashboardService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRequestStatusDto>,
) -> Result<Json<ApiResponse<RequestReviewDto>>> {
    let outcome = service.review_request(id, dto.status).await;
    Ok(Json(ApiResponse::success(Some(outcome), None, None)))
}
