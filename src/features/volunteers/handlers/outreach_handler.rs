use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::volunteers::dtos::{
    CallResponseDto, LogCallDto, OutreachListQuery, UpdateCallDto,
};
use crate::features::volunteers::models::CallFilter;
use crate::features::volunteers::services::OutreachService;
use crate::shared::types::{ApiResponse, Meta};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/admin/outreach",
    params(OutreachListQuery),
    responses(
        (status = 200, description = "Call log retrieved", body = ApiResponse<Vec<CallResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-volunteers",
    security(("bearer_auth" = []))
)]
pub async fn list_calls(
    _admin: RequireAdmin,
    State(service): State<Arc<OutreachService>>,
    Query(query): Query<OutreachListQuery>,
) -> Result<Json<ApiResponse<Vec<CallResponseDto>>>> {
    let filter = CallFilter {
        volunteer_id: query.volunteer_id,
        disaster_id: query.disaster_id,
    };
    let calls = service.list(filter).await?;
    let meta = Meta::total_of(&calls);
    Ok(Json(ApiResponse::success(Some(calls), None, Some(meta))))
}

/// Log a call to a volunteer (admin)
#[utoipa::path(
    post,
    path = "/api/admin/outreach",
    request_body = LogCallDto,
    responses(
        (status = 201, description = "Call logged", body = ApiResponse<CallResponseDto>),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Volunteer not found")
    ),
    tag = "admin-volunteers",
    security(("bearer_auth" = []))
)]
pub async fn log_call(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<OutreachService>>,
    AppJson(dto): AppJson<LogCallDto>,
) -> Result<(StatusCode, Json<ApiResponse<CallResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let call = service.log_call(admin.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(call),
            Some("Call logged".to_string()),
            None,
        )),
    ))
}

/// Record the outcome of a call (admin)
#[utoipa::path(
    patch,
    path = "/api/admin/outreach/{id}",
    params(
        ("id" = Uuid, Path, description = "Call log entry ID")
    ),
    request_body = UpdateCallDto,
    responses(
        (status = 200, description = "Call updated", body = ApiResponse<CallResponseDto>),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Call not found")
    ),
    tag = "admin-volunteers",
    security(("bearer_auth" = []))
)]
pub async fn update_call(
    _admin: RequireAdmin,
    State(service): State<Arc<OutreachService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCallDto>,
) -> Result<Json<ApiResponse<CallResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let call = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(call), None, None)))
}
